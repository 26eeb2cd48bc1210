use std::time::Duration;

/// Pausable animation clock driven by host time deltas.
///
/// The clock only accumulates time while running, so pausing at elapsed `t` and resuming
/// later continues from `t`. This is the `animation-play-state: paused` model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationClock {
    elapsed: Duration,
    paused: bool,
}

impl AnimationClock {
    /// Create a running clock at elapsed zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed wall-clock progress; ignored while paused.
    pub fn advance(&mut self, dt: Duration) {
        if !self.paused {
            self.elapsed = self.elapsed.saturating_add(dt);
        }
    }

    /// Freeze the clock at its current elapsed time.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Continue from the paused elapsed time.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Pause or resume according to `paused`.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Return `true` while paused.
    pub fn is_paused(self) -> bool {
        self.paused
    }

    /// Effective animation time.
    pub fn elapsed(self) -> Duration {
        self.elapsed
    }
}

/// Normalized phase in `[0, 1)` of a repeating animation with the given `period`.
///
/// A zero period has no motion and reports phase `0`.
pub fn loop_phase(elapsed: Duration, period: Duration) -> f64 {
    let period_ns = period.as_nanos();
    if period_ns == 0 {
        return 0.0;
    }
    let rem = elapsed.as_nanos() % period_ns;
    (rem as f64) / (period_ns as f64)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
