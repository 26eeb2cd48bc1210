use crate::{
    foundation::{
        core::Canvas,
        error::{ReelError, ReelResult},
    },
    page::model::{
        ConveyorSection, GifGrid, Hero, ImageBox, ImageLayer, Justify, MediaRow, Page, RevealStack,
    },
};

/// Assembles a [`Page`] section by section and validates it on [`build`](Self::build).
pub struct PageBuilder {
    canvas: Canvas,
    backdrop: Option<ImageBox>,
    hero: Option<Hero>,
    reveal: Option<RevealStack>,
    conveyors: Option<ConveyorSection>,
    rows: Vec<MediaRow>,
    layers: Vec<ImageLayer>,
    overlays: Option<GifGrid>,
}

impl PageBuilder {
    /// Start an empty page on `canvas`.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            backdrop: None,
            hero: None,
            reveal: None,
            conveyors: None,
            rows: Vec::new(),
            layers: Vec::new(),
            overlays: None,
        }
    }

    /// Background image.
    pub fn backdrop(mut self, backdrop: ImageBox) -> Self {
        self.backdrop = Some(backdrop);
        self
    }

    /// Hero section.
    pub fn hero(mut self, hero: Hero) -> Self {
        self.hero = Some(hero);
        self
    }

    /// Reveal stack.
    pub fn reveal(mut self, reveal: RevealStack) -> Self {
        self.reveal = Some(reveal);
        self
    }

    /// Conveyor section.
    pub fn conveyors(mut self, conveyors: ConveyorSection) -> Self {
        self.conveyors = Some(conveyors);
        self
    }

    /// Append a media row.
    pub fn row(mut self, row: MediaRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Append an image layer.
    pub fn layer(mut self, layer: ImageLayer) -> Self {
        self.layers.push(layer);
        self
    }

    /// GIF overlay grid.
    pub fn overlays(mut self, overlays: GifGrid) -> Self {
        self.overlays = Some(overlays);
        self
    }

    /// Finish and validate the page.
    pub fn build(self) -> ReelResult<Page> {
        let page = Page {
            canvas: self.canvas,
            backdrop: self.backdrop,
            hero: self.hero.ok_or_else(|| ReelError::validation("page is missing a hero"))?,
            reveal: self
                .reveal
                .ok_or_else(|| ReelError::validation("page is missing a reveal stack"))?,
            conveyors: self
                .conveyors
                .ok_or_else(|| ReelError::validation("page is missing a conveyor section"))?,
            rows: self.rows,
            layers: self.layers,
            overlays: self
                .overlays
                .ok_or_else(|| ReelError::validation("page is missing an overlay grid"))?,
        };
        page.validate()?;
        Ok(page)
    }
}

/// Builds a [`MediaRow`] with the usual defaults (16:9, centered, no mask).
pub struct RowBuilder {
    row: MediaRow,
}

impl RowBuilder {
    /// Row of `names` at `top`.
    pub fn new<S: AsRef<str>>(label: impl Into<String>, top: f64, names: &[S]) -> Self {
        Self {
            row: MediaRow {
                label: label.into(),
                top,
                left: 0.0,
                names: names.iter().map(|n| n.as_ref().to_string()).collect(),
                width_frac: 0.2,
                max_width_px: None,
                aspect: 16.0 / 9.0,
                gap_px: 16.0,
                justify: Justify::Center,
                round: false,
            },
        }
    }

    /// Horizontal shift.
    pub fn left(mut self, left: f64) -> Self {
        self.row.left = left;
        self
    }

    /// Cell width fraction.
    pub fn width_frac(mut self, frac: f64) -> Self {
        self.row.width_frac = frac;
        self
    }

    /// Cell width cap.
    pub fn max_width(mut self, px: f64) -> Self {
        self.row.max_width_px = Some(px);
        self
    }

    /// Cell aspect ratio.
    pub fn aspect(mut self, width: f64, height: f64) -> Self {
        self.row.aspect = width / height;
        self
    }

    /// Gap between cells.
    pub fn gap(mut self, px: f64) -> Self {
        self.row.gap_px = px;
        self
    }

    /// Horizontal distribution.
    pub fn justify(mut self, justify: Justify) -> Self {
        self.row.justify = justify;
        self
    }

    /// Circular mask.
    pub fn round(mut self) -> Self {
        self.row.round = true;
        self
    }

    /// Finish the row.
    pub fn build(self) -> ReelResult<MediaRow> {
        if self.row.label.trim().is_empty() {
            return Err(ReelError::validation("row label must be non-empty"));
        }
        Ok(self.row)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/dsl.rs"]
mod tests;
