use std::{fs::File, io::BufReader, path::Path, time::Duration};

use crate::{
    animation::transition::TransitionSpec,
    conveyor::lane::{ConveyorLane, Direction},
    foundation::{
        core::{Canvas, Point, Rect, Size},
        error::{ReelError, ReelResult},
    },
    media::item::{AssetRef, CacheBust, expand_videos},
    page::gif_layout::{GifLayoutConfig, GifLayoutPatch},
    visibility::tracker::TrackingMode,
};

/// A fixed-size portfolio page: every block is absolutely positioned in page space.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Page {
    /// Page canvas (width and total scroll height).
    pub canvas: Canvas,
    /// Full-width animated background behind everything else.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop: Option<ImageBox>,
    /// Top section with the logo and title.
    pub hero: Hero,
    /// Staggered reveal stack of about images.
    pub reveal: RevealStack,
    /// Conveyor lanes of lazily mounted videos.
    pub conveyors: ConveyorSection,
    /// Eagerly loaded video rows.
    #[serde(default)]
    pub rows: Vec<MediaRow>,
    /// Static image layers.
    #[serde(default)]
    pub layers: Vec<ImageLayer>,
    /// GIF overlay grid with per-item placement.
    pub overlays: GifGrid,
}

/// An image placed at a fixed box.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageBox {
    /// Image asset.
    pub asset: AssetRef,
    /// Page-space box.
    pub rect: Rect,
}

/// First screen of the page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hero {
    /// Section height.
    pub height: f64,
    /// Corner logo.
    pub logo: ImageBox,
    /// Centered title image.
    pub title: ImageBox,
}

/// Overlapping images that fade and rise into place as the section scrolls in.
///
/// Item `i` is drawn with z-index `len - i` and starts its transition `i * stagger_ms` later
/// than item 0.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealStack {
    /// Section top.
    pub top: f64,
    /// Section height.
    pub height: f64,
    /// Displayed size of every image; images are centered in the section.
    pub image: Size,
    /// Images in declaration order.
    pub images: Vec<AssetRef>,
    /// Opacity/transform transition of item 0.
    pub transition: TransitionSpec,
    /// Extra delay per item.
    pub stagger_ms: u64,
    /// Downward offset while hidden.
    pub rise_px: f64,
    /// Reveal rule of each item.
    #[serde(default)]
    pub tracking: TrackingMode,
}

impl RevealStack {
    /// Resting box of every item, centered in a `container_width` wide section.
    pub fn item_rect(&self, container_width: f64) -> Rect {
        let x = (container_width - self.image.width) * 0.5;
        let y = self.top + (self.height - self.image.height) * 0.5;
        Rect::new(x, y, x + self.image.width, y + self.image.height)
    }

    /// Transition of item `i` with its stagger delay.
    pub fn item_transition(&self, i: usize) -> TransitionSpec {
        let delay = self.stagger_ms.saturating_mul(i as u64);
        self.transition.delayed(self.transition.delay_ms.saturating_add(delay))
    }

    /// Stacking order of item `i`.
    pub fn z_index(&self, i: usize) -> usize {
        self.images.len().saturating_sub(i)
    }
}

/// One lane of the conveyor section.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LaneSpec {
    /// Video names, expanded to `/videos/{name}.mp4`.
    pub names: Vec<String>,
    /// Scroll direction.
    #[serde(default)]
    pub direction: Direction,
}

/// Stacked infinite conveyors sharing cell geometry and period.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConveyorSection {
    /// Top of the first lane.
    pub top: f64,
    /// Cell box size.
    pub cell: Size,
    /// Trailing gap after every cell.
    pub gap_px: f64,
    /// Vertical space between lanes.
    pub lane_spacing_px: f64,
    /// Duration of one `0 -> -50%` sweep.
    pub period_ms: u64,
    /// Lanes from top to bottom.
    pub lanes: Vec<LaneSpec>,
    /// Reveal rule of each cell.
    #[serde(default)]
    pub tracking: TrackingMode,
}

impl ConveyorSection {
    /// Untranslated origin of lane `i`.
    pub fn lane_origin(&self, i: usize) -> Point {
        Point::new(0.0, self.top + i as f64 * (self.cell.height + self.lane_spacing_px))
    }

    /// Section height including the spacing between lanes.
    pub fn height(&self) -> f64 {
        let n = self.lanes.len() as f64;
        if n == 0.0 {
            return 0.0;
        }
        n * self.cell.height + (n - 1.0) * self.lane_spacing_px
    }

    /// Build validated lanes, expanding names with one shared cache-bust token.
    pub fn build_lanes(&self, cache_bust: &CacheBust) -> ReelResult<Vec<ConveyorLane>> {
        self.lanes
            .iter()
            .map(|spec| {
                ConveyorLane::new(
                    expand_videos(&spec.names, cache_bust),
                    self.cell,
                    self.gap_px,
                    Duration::from_millis(self.period_ms),
                    spec.direction,
                )
            })
            .collect()
    }
}

/// Horizontal distribution of a row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Justify {
    /// Cells packed with `gap_px` and centered.
    #[default]
    Center,
    /// Free space split evenly around and between cells, in addition to `gap_px`.
    Evenly,
}

fn default_aspect() -> f64 {
    16.0 / 9.0
}

/// A row of eagerly loaded videos.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MediaRow {
    /// Row identifier used in logs and markup.
    pub label: String,
    /// Row top.
    pub top: f64,
    /// Horizontal shift of the whole row.
    #[serde(default)]
    pub left: f64,
    /// Video names.
    pub names: Vec<String>,
    /// Cell width as a fraction of the container width.
    pub width_frac: f64,
    /// Upper bound on the cell width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width_px: Option<f64>,
    /// Cell aspect ratio (width / height).
    #[serde(default = "default_aspect")]
    pub aspect: f64,
    /// Gap between cells.
    pub gap_px: f64,
    /// Horizontal distribution.
    #[serde(default)]
    pub justify: Justify,
    /// Circular mask.
    #[serde(default)]
    pub round: bool,
}

impl MediaRow {
    /// Cell size for a container of `container_width`.
    pub fn cell_size(&self, container_width: f64) -> Size {
        let mut w = container_width * self.width_frac;
        if let Some(max) = self.max_width_px {
            w = w.min(max);
        }
        Size::new(w, w / self.aspect)
    }

    /// Page-space cell boxes.
    pub fn cell_rects(&self, container_width: f64) -> ReelResult<Vec<Rect>> {
        let n = self.names.len();
        if n == 0 {
            return Ok(vec![]);
        }
        let size = self.cell_size(container_width);
        let packed = n as f64 * size.width + (n - 1) as f64 * self.gap_px;
        let free = container_width - packed;
        if free < 0.0 {
            return Err(ReelError::layout(format!(
                "row '{}' needs {packed}px but the container is {container_width}px wide",
                self.label
            )));
        }
        let (start, pitch) = match self.justify {
            Justify::Center => (free * 0.5, size.width + self.gap_px),
            Justify::Evenly => {
                let space = free / (n + 1) as f64;
                (space, size.width + self.gap_px + space)
            }
        };
        Ok((0..n)
            .map(|i| {
                let x = self.left + start + i as f64 * pitch;
                Rect::new(x, self.top, x + size.width, self.top + size.height)
            })
            .collect())
    }
}

/// A static image layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageLayer {
    /// Image asset.
    pub asset: AssetRef,
    /// Layer top.
    pub top: f64,
    /// Layer left.
    #[serde(default)]
    pub left: f64,
    /// Drawn size.
    pub size: Size,
    /// Stacking order.
    #[serde(default)]
    pub z: i32,
}

impl ImageLayer {
    /// Page-space box.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(Point::new(self.left, self.top), self.size)
    }
}

/// Post-mount placement update of overlay `index`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayPatch {
    /// Overlay index in [`GifGrid::items`].
    pub index: usize,
    /// Fields to overwrite.
    #[serde(flatten)]
    pub patch: GifLayoutPatch,
}

/// Grid of GIF overlays, each nudged by its own [`GifLayoutConfig`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GifGrid {
    /// Grid top.
    pub top: f64,
    /// Grid left.
    pub left: f64,
    /// Column count.
    pub columns: usize,
    /// Gap between cells, both axes.
    pub gap_px: f64,
    /// Cell size.
    pub cell: Size,
    /// Overlays in grid order.
    pub items: Vec<AssetRef>,
    /// Updates applied once the page has mounted.
    #[serde(default)]
    pub patches: Vec<OverlayPatch>,
}

impl GifGrid {
    /// Untransformed box of overlay `i`.
    pub fn cell_rect(&self, i: usize) -> Rect {
        let cols = self.columns.max(1);
        let x = self.left + (i % cols) as f64 * (self.cell.width + self.gap_px);
        let y = self.top + (i / cols) as f64 * (self.cell.height + self.gap_px);
        Rect::from_origin_size(Point::new(x, y), self.cell)
    }

    /// Initial configs, one per item.
    pub fn initial_configs(&self) -> Vec<GifLayoutConfig> {
        vec![GifLayoutConfig::default(); self.items.len()]
    }
}

fn finite_rect(r: &Rect) -> bool {
    r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()
}

fn positive_size(s: Size) -> bool {
    s.width.is_finite() && s.width > 0.0 && s.height.is_finite() && s.height > 0.0
}

impl Page {
    /// Parse a page from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader(r).map_err(|e| ReelError::serde(format!("parse page JSON: {e}")))
    }

    /// Parse a page from JSON text.
    pub fn from_json(s: &str) -> ReelResult<Self> {
        serde_json::from_str(s).map_err(|e| ReelError::serde(format!("parse page JSON: {e}")))
    }

    /// Parse a page from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open page JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty JSON form.
    pub fn to_json(&self) -> ReelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every referenced asset, in page order.
    pub fn assets(&self) -> Vec<AssetRef> {
        let mut out = Vec::new();
        out.extend(self.backdrop.iter().map(|b| b.asset.clone()));
        out.push(self.hero.logo.asset.clone());
        out.push(self.hero.title.asset.clone());
        out.extend(self.reveal.images.iter().cloned());
        for lane in &self.conveyors.lanes {
            out.extend(lane.names.iter().map(|n| AssetRef::Video(n.clone())));
        }
        for row in &self.rows {
            out.extend(row.names.iter().map(|n| AssetRef::Video(n.clone())));
        }
        out.extend(self.layers.iter().map(|l| l.asset.clone()));
        out.extend(self.overlays.items.iter().cloned());
        out
    }

    /// Check structural and numeric constraints.
    pub fn validate(&self) -> ReelResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ReelError::validation("canvas width/height must be > 0"));
        }
        for asset in self.assets() {
            asset.validate()?;
        }

        for b in self.backdrop.iter().chain([&self.hero.logo, &self.hero.title]) {
            if !finite_rect(&b.rect) {
                return Err(ReelError::validation(format!(
                    "image box for '{}' must have finite coordinates",
                    b.asset.path()
                )));
            }
        }
        if !self.hero.height.is_finite() || self.hero.height <= 0.0 {
            return Err(ReelError::validation("hero height must be finite and > 0"));
        }

        let reveal = &self.reveal;
        if reveal.images.is_empty() {
            return Err(ReelError::validation("reveal stack must have at least one image"));
        }
        if !positive_size(reveal.image) {
            return Err(ReelError::validation("reveal image size must be finite and > 0"));
        }
        if !reveal.top.is_finite() || !reveal.height.is_finite() || reveal.height <= 0.0 {
            return Err(ReelError::validation(
                "reveal section top/height must be finite, height > 0",
            ));
        }
        if !reveal.rise_px.is_finite() {
            return Err(ReelError::validation("reveal rise must be finite"));
        }
        reveal.transition.validate()?;
        reveal.tracking.validate()?;

        let conv = &self.conveyors;
        if conv.lanes.is_empty() {
            return Err(ReelError::validation("conveyor section must have at least one lane"));
        }
        if !conv.top.is_finite()
            || !conv.lane_spacing_px.is_finite()
            || conv.lane_spacing_px < 0.0
        {
            return Err(ReelError::validation(
                "conveyor top must be finite and lane spacing >= 0",
            ));
        }
        conv.tracking.validate()?;
        conv.build_lanes(&CacheBust::disabled())?;

        for row in &self.rows {
            if row.names.is_empty() {
                return Err(ReelError::validation(format!("row '{}' has no videos", row.label)));
            }
            if !row.width_frac.is_finite() || row.width_frac <= 0.0 || row.width_frac > 1.0 {
                return Err(ReelError::validation(format!(
                    "row '{}' width fraction must be within (0, 1]",
                    row.label
                )));
            }
            if row.max_width_px.is_some_and(|m| !m.is_finite() || m <= 0.0) {
                return Err(ReelError::validation(format!(
                    "row '{}' max width must be finite and > 0",
                    row.label
                )));
            }
            if !row.aspect.is_finite() || row.aspect <= 0.0 {
                return Err(ReelError::validation(format!(
                    "row '{}' aspect must be finite and > 0",
                    row.label
                )));
            }
            if !row.top.is_finite()
                || !row.left.is_finite()
                || !row.gap_px.is_finite()
                || row.gap_px < 0.0
            {
                return Err(ReelError::validation(format!(
                    "row '{}' offsets must be finite and gap >= 0",
                    row.label
                )));
            }
            row.cell_rects(f64::from(self.canvas.width))?;
        }

        for layer in &self.layers {
            if !positive_size(layer.size) || !layer.top.is_finite() || !layer.left.is_finite() {
                return Err(ReelError::validation(format!(
                    "layer '{}' must have finite offsets and size > 0",
                    layer.asset.path()
                )));
            }
        }

        let grid = &self.overlays;
        if grid.columns == 0 {
            return Err(ReelError::validation("overlay grid must have at least one column"));
        }
        if !positive_size(grid.cell) || !grid.top.is_finite() || !grid.left.is_finite() {
            return Err(ReelError::validation(
                "overlay grid must have finite offsets and cell size > 0",
            ));
        }
        if !grid.gap_px.is_finite() || grid.gap_px < 0.0 {
            return Err(ReelError::validation("overlay gap must be finite and >= 0"));
        }
        for p in &grid.patches {
            if p.index >= grid.items.len() {
                return Err(ReelError::validation(format!(
                    "overlay patch references missing overlay {} (have {})",
                    p.index,
                    grid.items.len()
                )));
            }
            p.patch.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/model.rs"]
mod tests;
