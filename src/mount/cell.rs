use std::time::Duration;

use crate::{
    foundation::core::Size,
    media::item::MediaItem,
    mount::slot::{LoadState, MediaSlot, VideoAttrs},
    visibility::{
        hysteresis::VisibilityEdge,
        observer::{ElementId, IntersectionSample, ObservationHost},
        tracker::VisibilityTracker,
    },
};

/// Identity of one live decoder/network resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct MediaHandle(pub u64);

/// Host-side media resources: each acquired handle holds decode and fetch state until released.
pub trait MediaBackend {
    /// Create a fresh media element for `item` sized to `size`.
    fn acquire(&mut self, item: &MediaItem, size: Size) -> MediaHandle;

    /// Tear the element down and free its decode/network resources.
    fn release(&mut self, handle: MediaHandle);
}

/// [`MediaBackend`] that only counts live handles.
#[derive(Clone, Debug, Default)]
pub struct DecoderPool {
    next: u64,
    live: std::collections::BTreeMap<MediaHandle, String>,
    peak: usize,
    acquired_total: u64,
}

impl DecoderPool {
    /// Empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles currently alive.
    pub fn live(&self) -> usize {
        self.live.len()
    }

    /// Highest simultaneous live count seen.
    pub fn peak(&self) -> usize {
        self.peak
    }

    /// Number of acquisitions over the pool's lifetime.
    pub fn acquired_total(&self) -> u64 {
        self.acquired_total
    }

    /// Return `true` when `handle` has not been released.
    pub fn is_live(&self, handle: MediaHandle) -> bool {
        self.live.contains_key(&handle)
    }

    /// URLs of live handles.
    pub fn live_urls(&self) -> impl Iterator<Item = &str> {
        self.live.values().map(String::as_str)
    }
}

impl MediaBackend for DecoderPool {
    fn acquire(&mut self, item: &MediaItem, _size: Size) -> MediaHandle {
        let handle = MediaHandle(self.next);
        self.next += 1;
        self.acquired_total += 1;
        self.live.insert(handle, item.url());
        self.peak = self.peak.max(self.live.len());
        handle
    }

    fn release(&mut self, handle: MediaHandle) {
        self.live.remove(&handle);
    }
}

#[derive(Clone, Debug, PartialEq)]
struct MountedMedia {
    handle: MediaHandle,
    slot: MediaSlot,
}

/// Render-ready description of a cell.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case", tag = "view")]
pub enum CellView {
    /// Empty box with the media's dimensions; nothing fetched.
    Placeholder {
        /// Reserved box size.
        size: Size,
    },
    /// Mounted media filling the same box.
    Media {
        /// Media shown.
        item: MediaItem,
        /// Box size.
        size: Size,
        /// Video playback attributes.
        attrs: VideoAttrs,
        /// Fade-in opacity.
        opacity: f64,
        /// Loading spinner visible.
        spinner: bool,
    },
}

/// A list cell that holds real media only while its placeholder is revealed.
///
/// The media resource is scoped to the revealed interval: a reveal acquires a fresh handle
/// and a fresh `loaded` flag, and a hide releases the handle. A cell therefore owns live
/// media iff its tracker reports `revealed`.
#[derive(Debug)]
pub struct MountOnVisible {
    item: MediaItem,
    size: Size,
    element: ElementId,
    tracker: VisibilityTracker,
    mounted: Option<MountedMedia>,
}

impl MountOnVisible {
    /// Unmounted cell for `item`, tracked through `element`.
    pub fn new(
        item: MediaItem,
        size: Size,
        element: ElementId,
        tracker: VisibilityTracker,
    ) -> Self {
        Self {
            item,
            size,
            element,
            tracker,
            mounted: None,
        }
    }

    /// Media this cell represents.
    pub fn item(&self) -> &MediaItem {
        &self.item
    }

    /// Placeholder element observed by the tracker.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Box size shared by placeholder and media.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Tracker `revealed` signal.
    pub fn revealed(&self) -> bool {
        self.tracker.revealed()
    }

    /// Return `true` while media is mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Live media handle, when mounted.
    pub fn handle(&self) -> Option<MediaHandle> {
        self.mounted.as_ref().map(|m| m.handle)
    }

    /// Load state of the mounted media.
    pub fn load_state(&self) -> Option<LoadState> {
        self.mounted.as_ref().map(|m| m.slot.load_state())
    }

    /// Start observing the placeholder.
    pub fn mount(&mut self, host: &mut dyn ObservationHost) {
        self.tracker.mount(host, Some(self.element));
    }

    /// Stop observing and release any media.
    pub fn unmount(&mut self, host: &mut dyn ObservationHost, backend: &mut dyn MediaBackend) {
        self.tracker.unmount(host);
        self.release(backend);
    }

    /// Route one sample through the tracker and mount or release media on edges.
    pub fn on_sample(
        &mut self,
        host: &mut dyn ObservationHost,
        backend: &mut dyn MediaBackend,
        sample: IntersectionSample,
    ) -> Option<VisibilityEdge> {
        let edge = self.tracker.on_sample(host, sample);
        match edge {
            Some(VisibilityEdge::Reveal) => self.acquire(backend),
            Some(VisibilityEdge::Hide) => self.release(backend),
            None => {}
        }
        edge
    }

    /// First data arrived for the mounted media. Ignored when unmounted.
    pub fn media_loaded(&mut self) {
        if let Some(m) = &mut self.mounted {
            m.slot.on_loaded_data();
        }
    }

    /// Load failure for the mounted media. Ignored when unmounted.
    pub fn media_failed(&mut self) {
        if let Some(m) = &mut self.mounted {
            m.slot.on_error();
        }
    }

    /// Feed host time progress.
    pub fn advance(&mut self, dt: Duration) {
        if let Some(m) = &mut self.mounted {
            m.slot.advance(dt);
        }
    }

    /// Current render description.
    pub fn view(&self) -> CellView {
        match &self.mounted {
            None => CellView::Placeholder { size: self.size },
            Some(m) => CellView::Media {
                item: self.item.clone(),
                size: self.size,
                attrs: VideoAttrs::AMBIENT,
                opacity: m.slot.opacity(),
                spinner: m.slot.shows_spinner(),
            },
        }
    }

    fn acquire(&mut self, backend: &mut dyn MediaBackend) {
        self.release(backend);
        let handle = backend.acquire(&self.item, self.size);
        tracing::debug!(url = %self.item.url(), handle = handle.0, "mount media");
        self.mounted = Some(MountedMedia {
            handle,
            slot: MediaSlot::new(self.item.clone()),
        });
    }

    fn release(&mut self, backend: &mut dyn MediaBackend) {
        if let Some(m) = self.mounted.take() {
            tracing::debug!(url = %self.item.url(), handle = m.handle.0, "unmount media");
            backend.release(m.handle);
        }
    }
}

impl Drop for MountOnVisible {
    fn drop(&mut self) {
        if let Some(m) = &self.mounted {
            tracing::warn!(
                element = self.element.0,
                handle = m.handle.0,
                url = %self.item.url(),
                "media cell dropped while still mounted; handle leaked"
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mount/cell.rs"]
mod tests;
