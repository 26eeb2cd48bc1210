use std::time::Duration;

use crate::{
    animation::transition::{RevealStyle, TransitionSpec},
    conveyor::lane::Direction,
    foundation::core::{Canvas, Point, Rect, Size, Viewport},
    media::item::MediaItem,
    mount::cell::CellView,
    page::{
        gif_layout::GifLayoutConfig,
        model::{Hero, ImageBox, ImageLayer},
    },
    visibility::{observer::ElementId, tracker::TrackingMode},
};

/// Render-ready state of a whole page at one instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageSnapshot {
    /// Page canvas.
    pub canvas: Canvas,
    /// Viewport the snapshot was sampled under.
    pub viewport: Viewport,
    /// Session time.
    pub elapsed: Duration,
    /// Background layer.
    pub backdrop: Option<EagerView>,
    /// Hero section.
    pub hero: Hero,
    /// Reveal stack items in declaration order.
    pub reveal: Vec<RevealView>,
    /// Conveyor lanes, top to bottom.
    pub lanes: Vec<LaneView>,
    /// Eager video rows.
    pub rows: Vec<RowView>,
    /// Static image layers.
    pub layers: Vec<ImageLayer>,
    /// GIF overlays in grid order.
    pub overlays: Vec<OverlayView>,
}

/// One reveal-stack image.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RevealView {
    /// Tracked element.
    pub element: ElementId,
    /// Image and resting box.
    pub image: ImageBox,
    /// Stacking order.
    pub z: usize,
    /// Tracker signal.
    pub revealed: bool,
    /// Interpolated style.
    pub style: RevealStyle,
    /// Style the transition is heading to.
    pub target: RevealStyle,
    /// Staggered transition.
    pub transition: TransitionSpec,
    /// Downward offset while hidden.
    pub rise_px: f64,
    /// Reveal rule.
    pub tracking: TrackingMode,
}

/// One conveyor lane.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LaneView {
    /// Untranslated origin.
    pub origin: Point,
    /// Cell box.
    pub cell: Size,
    /// Trailing gap.
    pub gap_px: f64,
    /// Sweep period.
    pub period: Duration,
    /// Direction.
    pub direction: Direction,
    /// Current translation in pixels.
    pub offset_px: f64,
    /// Current translation as a fraction of the lane width.
    pub offset_fraction: f64,
    /// Position within the current period, in `[0, 1)`.
    pub phase: f64,
    /// Hover pause.
    pub paused: bool,
    /// All `2L` cells with their element ids.
    pub cells: Vec<(ElementId, CellView)>,
    /// Media behind each cell, parallel to `cells`.
    pub sources: Vec<MediaItem>,
    /// Reveal rule of every cell.
    pub tracking: TrackingMode,
}

/// Always-mounted media with its own loading state.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EagerView {
    /// Load-signal target.
    pub element: ElementId,
    /// Media shown.
    pub item: MediaItem,
    /// Layout box.
    pub rect: Rect,
    /// Fade-in opacity.
    pub opacity: f64,
    /// Spinner visible.
    pub spinner: bool,
}

/// One eager video row.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RowView {
    /// Row label.
    pub label: String,
    /// Circular mask.
    pub round: bool,
    /// Cells in order.
    pub cells: Vec<EagerView>,
}

/// One GIF overlay.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OverlayView {
    /// Media and untransformed grid box.
    pub media: EagerView,
    /// Current placement.
    pub config: GifLayoutConfig,
}

impl OverlayView {
    /// Painted box after the placement transform.
    pub fn painted_rect(&self) -> Rect {
        self.config.apply(self.media.rect)
    }
}
