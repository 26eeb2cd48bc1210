use crate::foundation::error::{ReelError, ReelResult};

/// Ratio a hidden element must exceed to become revealed.
pub const ENTER_RATIO: f64 = 0.15;
/// Ratio a revealed element must fall below to become hidden.
pub const EXIT_RATIO: f64 = 0.05;
/// Intersection thresholds registered with the observation host.
///
/// Samples arrive near both hysteresis boundaries plus full exit/entry.
pub const SAMPLE_THRESHOLDS: [f64; 4] = [0.0, EXIT_RATIO, ENTER_RATIO, 1.0];

/// Enter/exit ratios of the reveal state machine.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hysteresis {
    /// Strict lower bound for `Hidden -> Revealed`.
    pub enter: f64,
    /// Strict upper bound for `Revealed -> Hidden`.
    pub exit: f64,
}

impl Default for Hysteresis {
    fn default() -> Self {
        Self {
            enter: ENTER_RATIO,
            exit: EXIT_RATIO,
        }
    }
}

impl Hysteresis {
    /// Create validated bounds with `0 <= exit < enter <= 1`.
    pub fn new(enter: f64, exit: f64) -> ReelResult<Self> {
        let h = Self { enter, exit };
        h.validate()?;
        Ok(h)
    }

    /// Validate bounds.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.enter.is_finite() || !self.exit.is_finite() {
            return Err(ReelError::validation("hysteresis ratios must be finite"));
        }
        if !(0.0..=1.0).contains(&self.enter) || !(0.0..=1.0).contains(&self.exit) {
            return Err(ReelError::validation(
                "hysteresis ratios must be within [0, 1]",
            ));
        }
        if self.exit >= self.enter {
            return Err(ReelError::validation(
                "hysteresis exit ratio must be below the enter ratio",
            ));
        }
        Ok(())
    }

    /// Thresholds to register: `{0, exit, enter, 1}`.
    pub fn sample_thresholds(&self) -> Vec<f64> {
        let mut t = vec![0.0, self.exit, self.enter, 1.0];
        t.dedup_by(|a, b| (*a - *b).abs() < f64::EPSILON);
        t
    }
}

/// The two reveal states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    /// Not revealed; initial state.
    #[default]
    Hidden,
    /// Revealed.
    Revealed,
}

/// A state change emitted by [`VisibilityState::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityEdge {
    /// `Hidden -> Revealed`.
    Reveal,
    /// `Revealed -> Hidden`.
    Hide,
}

/// Last observed ratio plus the reveal state derived from the sample history.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct VisibilityState {
    /// Last sampled ratio in `[0, 1]`.
    pub ratio: f64,
    /// Current state.
    pub state: RevealState,
}

impl VisibilityState {
    /// Return `true` when revealed.
    pub fn revealed(&self) -> bool {
        self.state == RevealState::Revealed
    }

    /// Feed one sampled ratio through the guarded transitions.
    ///
    /// Non-finite ratios are dropped; others are clamped into `[0, 1]`.
    pub fn apply(&mut self, ratio: f64, bounds: &Hysteresis) -> Option<VisibilityEdge> {
        if !ratio.is_finite() {
            return None;
        }
        let ratio = ratio.clamp(0.0, 1.0);
        self.ratio = ratio;
        match self.state {
            RevealState::Hidden if ratio > bounds.enter => {
                self.state = RevealState::Revealed;
                Some(VisibilityEdge::Reveal)
            }
            RevealState::Revealed if ratio < bounds.exit => {
                self.state = RevealState::Hidden;
                Some(VisibilityEdge::Hide)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/visibility/hysteresis.rs"]
mod tests;
