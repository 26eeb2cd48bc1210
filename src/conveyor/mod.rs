//! Infinite horizontal media conveyors.

pub(crate) mod lane;
pub(crate) mod motion;
