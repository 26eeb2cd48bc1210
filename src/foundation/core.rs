use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Fixed page canvas dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Total scrollable height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Canvas bounds anchored at the page origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// The visible window onto the page, in page coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Vertical scroll position of the top edge.
    pub scroll_y: f64,
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport.
    pub fn new(scroll_y: f64, width: f64, height: f64) -> ReelResult<Self> {
        if !scroll_y.is_finite() {
            return Err(ReelError::validation("viewport scroll_y must be finite"));
        }
        if !width.is_finite() || width <= 0.0 || !height.is_finite() || height <= 0.0 {
            return Err(ReelError::validation(
                "viewport width/height must be finite and > 0",
            ));
        }
        Ok(Self {
            scroll_y,
            width,
            height,
        })
    }

    /// Viewport rectangle in page coordinates.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.scroll_y + self.height)
    }

    /// Same viewport moved to another scroll position.
    pub fn scrolled_to(self, scroll_y: f64) -> Self {
        Self { scroll_y, ..self }
    }
}

/// Fraction of `element` covered by `viewport`, in `[0, 1]`.
///
/// Zero-area elements report `1.0` when they touch the viewport and `0.0` otherwise.
pub fn intersection_ratio(element: Rect, viewport: Rect) -> f64 {
    let element = element.abs();
    let viewport = viewport.abs();
    let area = element.area();
    if area <= 0.0 {
        let touches = element.x0 <= viewport.x1
            && element.x1 >= viewport.x0
            && element.y0 <= viewport.y1
            && element.y1 >= viewport.y0;
        return if touches { 1.0 } else { 0.0 };
    }
    let overlap = element.intersect(viewport);
    (overlap.area() / area).clamp(0.0, 1.0)
}

/// Return `true` when `element` and `viewport` overlap or share an edge.
pub fn is_intersecting(element: Rect, viewport: Rect) -> bool {
    let element = element.abs();
    let viewport = viewport.abs();
    element.x0 <= viewport.x1
        && element.x1 >= viewport.x0
        && element.y0 <= viewport.y1
        && element.y1 >= viewport.y0
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
