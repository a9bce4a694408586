//! Story player errors.

/// Errors that keep playback from starting.
///
/// All of them are scoped to the sequence being shown: the player stays
/// `Idle` and a corrected `show` call recovers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    #[error("Cannot show an empty sequence")]
    EmptySequence,

    #[error("Item {index} has a negative duration ({duration_ms} ms)")]
    NegativeDuration { index: usize, duration_ms: i64 },

    #[error("Invalid player configuration: {0}")]
    InvalidConfig(String),
}
