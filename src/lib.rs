//! reelpage models a long, scroll-driven portfolio page and renders it to static HTML.
//!
//! The page runtime is deterministic and host-agnostic. A [`PageSession`] owns the page's
//! observation host, visibility trackers, mount-on-visible cells and conveyors, and is
//! driven explicitly:
//!
//! - Build a [`Page`] (JSON, [`PageBuilder`] or [`Page::portfolio`])
//! - Create a [`PageSession`] and feed it scroll positions, elapsed time, hover and
//!   load signals
//! - Take a [`PageSnapshot`] and render it with [`render_document`], or write a full
//!   site with [`export_site`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub(crate) mod animation;
pub(crate) mod conveyor;
pub(crate) mod export;
pub(crate) mod foundation;
pub(crate) mod media;
pub(crate) mod mount;
pub(crate) mod page;
pub(crate) mod render;
pub(crate) mod session;
pub(crate) mod visibility;

pub use crate::foundation::core::{
    Canvas, Point, Rect, Size, Vec2, Viewport, intersection_ratio, is_intersecting,
};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::animation::clock::{AnimationClock, loop_phase};
pub use crate::animation::ease::Ease;
pub use crate::animation::transition::{RevealStyle, RevealTransition, TransitionSpec, Tween};

pub use crate::visibility::hysteresis::{
    ENTER_RATIO, EXIT_RATIO, Hysteresis, RevealState, SAMPLE_THRESHOLDS, VisibilityEdge,
    VisibilityState,
};
pub use crate::visibility::observer::{
    ElementAllocator, ElementId, IntersectionSample, ObservationHost, Subscription,
    ViewportObserver,
};
pub use crate::visibility::tracker::{ONCE_DEFAULT_THRESHOLD, TrackingMode, VisibilityTracker};

pub use crate::media::item::{
    AssetRef, CacheBust, CacheBustMode, MediaItem, MediaKind, expand_videos,
};
pub use crate::media::loader::{LAZY_LOAD_BUFFER_VIEWPORTS, PreloadAs, preload_as, should_lazy_load};

pub use crate::mount::cell::{CellView, DecoderPool, MediaBackend, MediaHandle, MountOnVisible};
pub use crate::mount::slot::{FADE_IN, LoadState, MediaSlot, VideoAttrs};

pub use crate::conveyor::lane::{ConveyorLane, Direction};
pub use crate::conveyor::motion::Conveyor;

pub use crate::page::dsl::{PageBuilder, RowBuilder};
pub use crate::page::gif_layout::{GifLayoutConfig, GifLayoutPatch};
pub use crate::page::model::{
    ConveyorSection, GifGrid, Hero, ImageBox, ImageLayer, Justify, LaneSpec, MediaRow,
    OverlayPatch, Page, RevealStack,
};
pub use crate::page::portfolio::{
    OVERLAY_GIFS, REVERSE_NAMES, SECTION_HEIGHT, SECTION_WIDTH, SHOWCASE_NAMES, TOTAL_HEIGHT,
};

pub use crate::session::page_session::{PageSession, SessionOpts, SessionStats};
pub use crate::session::snapshot::{
    EagerView, LaneView, OverlayView, PageSnapshot, RevealView, RowView,
};

pub use crate::render::html::{HtmlOpts, render_document};

pub use crate::export::assets::{AssetProbe, AssetReport, check_assets};
pub use crate::export::opts::ExportOpts;
pub use crate::export::site::{ExportReport, export_site};
