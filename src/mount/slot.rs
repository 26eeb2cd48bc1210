use std::time::Duration;

use crate::{
    animation::{
        ease::Ease,
        transition::{TransitionSpec, Tween},
    },
    media::item::MediaItem,
};

/// Fade-in applied once media data arrives.
pub const FADE_IN: TransitionSpec = TransitionSpec {
    duration_ms: 300,
    delay_ms: 0,
    ease: Ease::InOut,
};

/// Load progress of one mounted media element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    /// Waiting for the first frame/data.
    #[default]
    Pending,
    /// First frame/data arrived.
    Loaded,
    /// The host reported a fetch/decode failure. Rendered exactly like `Pending`.
    Stalled,
}

/// Playback attributes of a rendered `<video>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct VideoAttrs {
    /// Start playing when mounted.
    pub autoplay: bool,
    /// Restart at the end.
    pub looping: bool,
    /// No audio.
    pub muted: bool,
    /// Play inline on mobile.
    pub plays_inline: bool,
    /// Show user controls.
    pub controls: bool,
}

impl VideoAttrs {
    /// Decorative background playback: autoplay, loop, muted, inline, no controls.
    pub const AMBIENT: Self = Self {
        autoplay: true,
        looping: true,
        muted: true,
        plays_inline: true,
        controls: false,
    };
}

/// A mounted media element with its own `loaded` flag and fade-in.
///
/// The spinner stays visible until the load signal arrives. A failed load never retries and
/// keeps the spinner up; the failure is only logged and reflected in [`LoadState::Stalled`].
#[derive(Clone, Debug, PartialEq)]
pub struct MediaSlot {
    item: MediaItem,
    load: LoadState,
    fade: Tween,
}

impl MediaSlot {
    /// Freshly mounted slot: not loaded, fully transparent.
    pub fn new(item: MediaItem) -> Self {
        Self {
            item,
            load: LoadState::Pending,
            fade: Tween::at_rest(0.0, FADE_IN),
        }
    }

    /// Media shown by this slot.
    pub fn item(&self) -> &MediaItem {
        &self.item
    }

    /// Current load state.
    pub fn load_state(&self) -> LoadState {
        self.load
    }

    /// Return `true` once data has arrived.
    pub fn is_loaded(&self) -> bool {
        self.load == LoadState::Loaded
    }

    /// Spinner visibility.
    pub fn shows_spinner(&self) -> bool {
        !self.is_loaded()
    }

    /// Media opacity in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        self.fade.value().clamp(0.0, 1.0)
    }

    /// First frame/data available. Later signals are ignored.
    pub fn on_loaded_data(&mut self) {
        if self.load == LoadState::Loaded {
            return;
        }
        self.load = LoadState::Loaded;
        self.fade.retarget(1.0);
    }

    /// Fetch or decode failure reported by the host.
    pub fn on_error(&mut self) {
        if self.load == LoadState::Pending {
            tracing::warn!(url = %self.item.url(), "media failed to load; spinner stays up");
            self.load = LoadState::Stalled;
        }
    }

    /// Feed host time progress.
    pub fn advance(&mut self, dt: Duration) {
        self.fade.advance(dt);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mount/slot.rs"]
mod tests;
