//! Scroll-visibility detection: the reveal state machine, the host observation seam and
//! per-element trackers.

pub(crate) mod hysteresis;
pub(crate) mod observer;
pub(crate) mod tracker;
