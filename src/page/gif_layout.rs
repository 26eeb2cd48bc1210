use crate::foundation::{
    core::{Point, Rect, Vec2},
    error::{ReelError, ReelResult},
};

/// Placement of one GIF overlay: `translate(offset) scale(scale)` about the cell center.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GifLayoutConfig {
    /// Uniform scale; `0` hides the overlay.
    pub scale: f64,
    /// Horizontal offset in pixels.
    pub offset_x: f64,
    /// Vertical offset in pixels.
    pub offset_y: f64,
}

impl Default for GifLayoutConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl GifLayoutConfig {
    /// Validate finite offsets and a non-negative scale.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.scale.is_finite() || self.scale < 0.0 {
            return Err(ReelError::validation("gif scale must be finite and >= 0"));
        }
        if !self.offset_x.is_finite() || !self.offset_y.is_finite() {
            return Err(ReelError::validation("gif offsets must be finite"));
        }
        Ok(())
    }

    /// Overwrite the fields the patch sets.
    pub fn merge(&mut self, patch: &GifLayoutPatch) {
        if let Some(s) = patch.scale {
            self.scale = s;
        }
        if let Some(x) = patch.offset_x {
            self.offset_x = x;
        }
        if let Some(y) = patch.offset_y {
            self.offset_y = y;
        }
    }

    /// Return `true` when the overlay renders nothing.
    pub fn is_hidden(&self) -> bool {
        self.scale == 0.0
    }

    /// Offset as a vector.
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset_x, self.offset_y)
    }

    /// CSS `transform` value.
    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.offset_x, self.offset_y, self.scale
        )
    }

    /// Painted box of a cell laid out at `cell`.
    pub fn apply(&self, cell: Rect) -> Rect {
        let c = cell.center() + self.offset();
        let half = Vec2::new(cell.width(), cell.height()) * (0.5 * self.scale);
        Rect::from_points(
            Point::new(c.x - half.x, c.y - half.y),
            Point::new(c.x + half.x, c.y + half.y),
        )
    }
}

/// Partial update of a [`GifLayoutConfig`]; unset fields keep their value.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GifLayoutPatch {
    /// New scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// New horizontal offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f64>,
    /// New vertical offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f64>,
}

impl GifLayoutPatch {
    /// Patch that sets every field.
    pub fn full(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            scale: Some(scale),
            offset_x: Some(offset_x),
            offset_y: Some(offset_y),
        }
    }

    /// Validate the fields the patch sets.
    pub fn validate(&self) -> ReelResult<()> {
        let mut probe = GifLayoutConfig::default();
        probe.merge(self);
        probe.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/gif_layout.rs"]
mod tests;
