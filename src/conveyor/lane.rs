use std::{ops::Range, time::Duration};

use crate::{
    animation::clock::loop_phase,
    foundation::core::{Point, Rect, Size},
    foundation::error::{ReelError, ReelResult},
    media::item::MediaItem,
};

/// Scroll direction of a lane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Content moves left: offset runs `0 -> -50%`.
    #[default]
    Forward,
    /// Content moves right: offset runs `-50% -> 0`.
    Reverse,
}

/// Geometry and timing of one infinite conveyor lane.
///
/// The displayed sequence is `items ++ items`. Every cell occupies one stride
/// (`cell width + gap`, the gap trailing the cell), so half the lane width is exactly
/// `L` strides and an offset of `-50%` renders the same frame as offset `0`.
#[derive(Clone, Debug, PartialEq)]
pub struct ConveyorLane {
    items: Vec<MediaItem>,
    cell: Size,
    gap_px: f64,
    period: Duration,
    direction: Direction,
}

impl ConveyorLane {
    /// Create a validated lane.
    pub fn new(
        items: Vec<MediaItem>,
        cell: Size,
        gap_px: f64,
        period: Duration,
        direction: Direction,
    ) -> ReelResult<Self> {
        if items.is_empty() {
            return Err(ReelError::validation("conveyor lane must have at least one item"));
        }
        if !cell.width.is_finite()
            || cell.width <= 0.0
            || !cell.height.is_finite()
            || cell.height <= 0.0
        {
            return Err(ReelError::validation(
                "conveyor cell width/height must be finite and > 0",
            ));
        }
        if !gap_px.is_finite() || gap_px < 0.0 {
            return Err(ReelError::validation("conveyor gap must be finite and >= 0"));
        }
        if period.is_zero() {
            return Err(ReelError::validation("conveyor period must be > 0"));
        }
        Ok(Self {
            items,
            cell,
            gap_px,
            period,
            direction,
        })
    }

    /// Source items (length `L`).
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// `L`.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Lanes are never empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of displayed cells, `2L`.
    pub fn displayed_len(&self) -> usize {
        self.items.len() * 2
    }

    /// Item shown at displayed index `i` (`items[i mod L]`).
    pub fn displayed_item(&self, i: usize) -> Option<&MediaItem> {
        if i >= self.displayed_len() {
            return None;
        }
        self.items.get(i % self.items.len())
    }

    /// Displayed sequence, two concatenated copies of the items.
    pub fn displayed(&self) -> Vec<&MediaItem> {
        self.items.iter().chain(self.items.iter()).collect()
    }

    /// Cell box size.
    pub fn cell_size(&self) -> Size {
        self.cell
    }

    /// Trailing gap in pixels.
    pub fn gap_px(&self) -> f64 {
        self.gap_px
    }

    /// Animation period of one `0 -> -50%` sweep.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Lane direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Horizontal pitch between consecutive cells.
    pub fn stride(&self) -> f64 {
        self.cell.width + self.gap_px
    }

    /// Total lane width, `2L` strides.
    pub fn lane_width(&self) -> f64 {
        self.displayed_len() as f64 * self.stride()
    }

    /// Constant scroll speed in pixels per second.
    pub fn velocity_px_per_sec(&self) -> f64 {
        (self.len() as f64 * self.stride()) / self.period.as_secs_f64()
    }

    /// Translation as a fraction of lane width, in `(-0.5, 0]` (or `[-0.5, 0)` reversed).
    pub fn offset_fraction_at(&self, elapsed: Duration) -> f64 {
        let phase = loop_phase(elapsed, self.period);
        match self.direction {
            Direction::Forward => -0.5 * phase,
            Direction::Reverse => -0.5 * (1.0 - phase),
        }
    }

    /// Translation in pixels after `elapsed` animation time.
    pub fn offset_at(&self, elapsed: Duration) -> f64 {
        self.offset_fraction_at(elapsed) * self.lane_width()
    }

    /// Left edge of displayed cell `i` relative to the lane origin under `offset_px`.
    pub fn cell_x(&self, i: usize, offset_px: f64) -> f64 {
        offset_px + (i as f64) * self.stride()
    }

    /// Page-space box of displayed cell `i` for a lane whose untranslated origin is `origin`.
    pub fn cell_rect(&self, i: usize, offset_px: f64, origin: Point) -> Rect {
        let x = origin.x + self.cell_x(i, offset_px);
        Rect::new(x, origin.y, x + self.cell.width, origin.y + self.cell.height)
    }

    /// Displayed indices whose box overlaps the window `(x0, x1)` with positive width.
    pub fn visible_range(&self, offset_px: f64, x0: f64, x1: f64) -> Range<usize> {
        let stride = self.stride();
        let n = self.displayed_len();
        // Cell i spans (offset + i*stride, offset + i*stride + width).
        let first = ((x0 - offset_px - self.cell.width) / stride).floor() + 1.0;
        let end = ((x1 - offset_px) / stride).ceil();
        let start = first.clamp(0.0, n as f64) as usize;
        let end = end.clamp(0.0, n as f64) as usize;
        start.min(end)..end
    }

    /// Return `true` when half the lane is at least `width` wide, so no gap shows at the wrap.
    pub fn covers(&self, width: f64) -> bool {
        self.lane_width() * 0.5 >= width
    }

    /// Cells drawn within `[x0, x1]`: left edge plus item, in display order.
    pub fn frame(&self, offset_px: f64, x0: f64, x1: f64) -> Vec<(f64, &MediaItem)> {
        self.visible_range(offset_px, x0, x1)
            .filter_map(|i| self.displayed_item(i).map(|item| (self.cell_x(i, offset_px), item)))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/conveyor/lane.rs"]
mod tests;
