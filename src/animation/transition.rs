use std::time::Duration;

use crate::{
    animation::ease::Ease,
    foundation::error::{ReelError, ReelResult},
};

/// A CSS-style property transition: `duration`, `delay` and timing curve.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionSpec {
    /// Transition duration in milliseconds.
    pub duration_ms: u64,
    /// Delay before the transition starts, in milliseconds.
    #[serde(default)]
    pub delay_ms: u64,
    /// Timing curve.
    pub ease: Ease,
}

impl TransitionSpec {
    /// `duration ms` with no delay.
    pub fn new(duration_ms: u64, ease: Ease) -> Self {
        Self {
            duration_ms,
            delay_ms: 0,
            ease,
        }
    }

    /// Same transition with a start delay.
    pub fn delayed(self, delay_ms: u64) -> Self {
        Self { delay_ms, ..self }
    }

    /// Validate the timing payload.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.ease.is_valid() {
            return Err(ReelError::validation(
                "transition ease control points are out of range",
            ));
        }
        Ok(())
    }

    /// Eased progress `elapsed` after a change, in `[0, 1]`.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        let delay = Duration::from_millis(self.delay_ms);
        if elapsed < delay {
            return 0.0;
        }
        if self.duration_ms == 0 {
            return 1.0;
        }
        let t = (elapsed - delay).as_secs_f64() / (self.duration_ms as f64 / 1000.0);
        self.ease.apply(t)
    }

    /// `transition` shorthand for the given CSS properties.
    pub fn css(&self, properties: &[&str]) -> String {
        properties
            .iter()
            .map(|p| {
                format!(
                    "{p} {}ms {} {}ms",
                    self.duration_ms,
                    self.ease.css(),
                    self.delay_ms
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A scalar that moves toward a target with a [`TransitionSpec`].
///
/// Retargeting mid-flight starts the new transition from the current value, the way a
/// browser interrupts a running CSS transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    since_change: Duration,
    spec: TransitionSpec,
}

impl Tween {
    /// Tween resting at `value`.
    pub fn at_rest(value: f64, spec: TransitionSpec) -> Self {
        Self {
            from: value,
            to: value,
            since_change: Duration::ZERO,
            spec,
        }
    }

    /// Current (sampled) value.
    pub fn value(&self) -> f64 {
        let p = self.spec.progress(self.since_change);
        self.from + (self.to - self.from) * p
    }

    /// Value the tween is heading to.
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Return `true` while the value has not reached the target.
    pub fn is_animating(&self) -> bool {
        (self.value() - self.to).abs() > f64::EPSILON
    }

    /// Start moving toward `target` from the current value.
    pub fn retarget(&mut self, target: f64) {
        if (target - self.to).abs() <= f64::EPSILON {
            return;
        }
        self.from = self.value();
        self.to = target;
        self.since_change = Duration::ZERO;
    }

    /// Jump to `value` without a transition.
    pub fn snap_to(&mut self, value: f64) {
        self.from = value;
        self.to = value;
        self.since_change = Duration::ZERO;
    }

    /// Feed host time progress.
    pub fn advance(&mut self, dt: Duration) {
        self.since_change = self.since_change.saturating_add(dt);
    }
}

/// Opacity and vertical offset applied to a revealed block.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RevealStyle {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Downward translation in pixels.
    pub translate_y_px: f64,
}

/// Drives a [`RevealStyle`] from the boolean `revealed` signal.
///
/// Hidden blocks sit at opacity 0 and `rise_px` below their final position; revealing
/// fades them in while they slide up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealTransition {
    progress: Tween,
    rise_px: f64,
}

impl RevealTransition {
    /// Hidden reveal transition.
    pub fn new(spec: TransitionSpec, rise_px: f64) -> Self {
        Self {
            progress: Tween::at_rest(0.0, spec),
            rise_px,
        }
    }

    /// Follow the tracker's `revealed` signal.
    pub fn set_revealed(&mut self, revealed: bool) {
        self.progress.retarget(if revealed { 1.0 } else { 0.0 });
    }

    /// Feed host time progress.
    pub fn advance(&mut self, dt: Duration) {
        self.progress.advance(dt);
    }

    /// Current style.
    pub fn style(&self) -> RevealStyle {
        let p = self.progress.value().clamp(0.0, 1.0);
        RevealStyle {
            opacity: p,
            translate_y_px: (1.0 - p) * self.rise_px,
        }
    }

    /// Final style for the current target, ignoring in-flight motion.
    pub fn target_style(&self) -> RevealStyle {
        let p = self.progress.target();
        RevealStyle {
            opacity: p,
            translate_y_px: (1.0 - p) * self.rise_px,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/transition.rs"]
mod tests;
