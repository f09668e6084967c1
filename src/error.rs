//! Error type shared by all fallible operations of the crate

use thiserror::Error;

/// Errors raised when a sequence or a test is configured with invalid input.
///
/// All of them are reported when the stream or the test is created, never in
/// the middle of an iteration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeqError {
    #[error("invalid recurrence seed: {reason}")]
    InvalidSeed { reason: String },

    #[error("invalid sequence index: {reason}")]
    InvalidIndex { reason: String },

    #[error("polygonal numbers need at least 3 sides, got {sides}")]
    InvalidSides { sides: usize },

    #[error("miller-rabin test needs at least one witness round")]
    InvalidRounds,

    /// The membership scan looked at `limit` terms without the sequence
    /// settling into a regime where a verdict can be proven.
    #[error("membership scan gave up after {limit} unclassified terms")]
    ScanLimit { limit: usize },

    /// The terms outgrew the integer type while the sequence was in no regime
    /// where the rest of it could be ruled out.
    #[error("sequence terms overflowed the integer type before a verdict was reached")]
    Overflow,
}

impl SeqError {
    pub(crate) fn seed(reason: impl Into<String>) -> Self {
        SeqError::InvalidSeed {
            reason: reason.into(),
        }
    }

    pub(crate) fn index(reason: impl Into<String>) -> Self {
        SeqError::InvalidIndex {
            reason: reason.into(),
        }
    }
}
