/// Convenience result type used across reelpage.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by library APIs.
///
/// The page runtime itself never fails: a missing element or a stalled media load is
/// absorbed locally. Errors only surface at the edges (page validation, layout lookups,
/// session bookkeeping and (de)serialization).
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid user-provided page or option data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while resolving geometry for a block, lane or cell.
    #[error("layout error: {0}")]
    Layout(String),

    /// Errors while driving a page session (unknown ids, bad events).
    #[error("session error: {0}")]
    Session(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`ReelError::Session`] value.
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ReelError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
