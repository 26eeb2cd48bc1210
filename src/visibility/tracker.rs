use crate::{
    foundation::error::{ReelError, ReelResult},
    visibility::{
        hysteresis::{Hysteresis, RevealState, VisibilityEdge, VisibilityState},
        observer::{ElementId, IntersectionSample, ObservationHost, Subscription},
    },
};

/// Default reveal threshold of [`TrackingMode::Once`].
pub const ONCE_DEFAULT_THRESHOLD: f64 = 0.1;

/// How a tracker turns samples into the `revealed` signal.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingMode {
    /// Two-way reveal with enter/exit hysteresis.
    Hysteresis(Hysteresis),
    /// Reveal on the first intersecting sample at or above `threshold`, then stop observing.
    Once {
        /// Minimum ratio of the first qualifying sample.
        threshold: f64,
    },
}

impl Default for TrackingMode {
    fn default() -> Self {
        Self::Hysteresis(Hysteresis::default())
    }
}

impl TrackingMode {
    /// Validate mode parameters.
    pub fn validate(&self) -> ReelResult<()> {
        match self {
            Self::Hysteresis(h) => h.validate(),
            Self::Once { threshold } => {
                if !threshold.is_finite() || !(0.0..=1.0).contains(threshold) {
                    return Err(ReelError::validation(
                        "once threshold must be finite and within [0, 1]",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Thresholds registered for an element tracked in this mode.
    pub fn thresholds(&self) -> Vec<f64> {
        match self {
            Self::Hysteresis(h) => h.sample_thresholds(),
            Self::Once { threshold } => vec![*threshold],
        }
    }
}

/// Owns one element's [`VisibilityState`] and its observation registration.
///
/// Lifecycle: [`mount`](Self::mount) registers with the host, samples flow through
/// [`on_sample`](Self::on_sample), and [`unmount`](Self::unmount) releases the registration.
/// A tracker with no element performs no observation and keeps its last `revealed` value.
#[derive(Debug, Default)]
pub struct VisibilityTracker {
    mode: TrackingMode,
    state: VisibilityState,
    subscription: Option<Subscription>,
}

impl VisibilityTracker {
    /// Hidden, unmounted tracker.
    pub fn new(mode: TrackingMode) -> Self {
        Self {
            mode,
            state: VisibilityState::default(),
            subscription: None,
        }
    }

    /// Hidden tracker using the default hysteresis bounds.
    pub fn with_hysteresis() -> Self {
        Self::new(TrackingMode::default())
    }

    /// Current `revealed` signal.
    pub fn revealed(&self) -> bool {
        self.state.revealed()
    }

    /// Ratio and state snapshot.
    pub fn state(&self) -> VisibilityState {
        self.state
    }

    /// Tracking mode.
    pub fn mode(&self) -> TrackingMode {
        self.mode
    }

    /// Element currently observed, if any.
    pub fn element(&self) -> Option<ElementId> {
        self.subscription.as_ref().map(Subscription::element)
    }

    /// Return `true` while registered with a host.
    pub fn is_observing(&self) -> bool {
        self.subscription.is_some()
    }

    /// Start observing `element`; re-mounting releases the previous registration first.
    ///
    /// `None` (element not rendered) leaves the tracker idle.
    pub fn mount(&mut self, host: &mut dyn ObservationHost, element: Option<ElementId>) {
        self.unmount(host);
        let Some(element) = element else {
            tracing::debug!("tracker mounted without an element; not observing");
            return;
        };
        if matches!(self.mode, TrackingMode::Once { .. }) && self.revealed() {
            return;
        }
        self.subscription = Some(host.observe(element, &self.mode.thresholds()));
    }

    /// Stop observing and release the registration. Idempotent.
    pub fn unmount(&mut self, host: &mut dyn ObservationHost) {
        if let Some(sub) = self.subscription.take() {
            host.unobserve(sub);
        }
    }

    /// Apply one sample; returns the state edge it caused, if any.
    ///
    /// Samples arriving while unmounted are ignored.
    pub fn on_sample(
        &mut self,
        host: &mut dyn ObservationHost,
        sample: IntersectionSample,
    ) -> Option<VisibilityEdge> {
        self.subscription.as_ref()?;
        match self.mode {
            TrackingMode::Hysteresis(bounds) => self.state.apply(sample.ratio, &bounds),
            TrackingMode::Once { threshold } => {
                if !sample.ratio.is_finite() {
                    return None;
                }
                self.state.ratio = sample.ratio.clamp(0.0, 1.0);
                if sample.is_intersecting && self.state.ratio >= threshold {
                    self.state.state = RevealState::Revealed;
                    self.unmount(host);
                    Some(VisibilityEdge::Reveal)
                } else {
                    None
                }
            }
        }
    }
}

impl Drop for VisibilityTracker {
    fn drop(&mut self) {
        if let Some(sub) = &self.subscription {
            tracing::warn!(
                element = sub.element().0,
                "visibility tracker dropped while still observing"
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/visibility/tracker.rs"]
mod tests;
