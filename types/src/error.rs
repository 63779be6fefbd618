//! Fault taxonomy shared by every sequence, codec and executor operation.

use std::any::Any;
use std::error::Error as StdError;

use thiserror::Error;

/// Boxed cause carried by [`ExecutionError::Failed`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors raised by cursors and slice construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("sequence exhausted")]
    Exhausted,
    #[error("{name} must not be negative (got {value})")]
    InvalidArgument { name: &'static str, value: i64 },
}

/// Malformed percent-escape encountered while decoding.
///
/// `position` is the byte offset of the offending `%`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("incomplete escape sequence at byte {position}")]
    TruncatedEscape { position: usize },
    #[error("invalid escape sequence {escape:?} at byte {position}")]
    InvalidEscape { position: usize, escape: String },
}

/// A pending result resolved with failure.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("work item panicked: {message}")]
    Panicked { message: String },
    #[error("work item cancelled before producing a value")]
    Cancelled,
    #[error("work item failed")]
    Failed {
        #[source]
        source: BoxError,
    },
}

impl ExecutionError {
    /// Wrap an arbitrary executor failure, keeping it as the error source.
    pub fn failed(source: impl Into<BoxError>) -> Self {
        Self::Failed {
            source: source.into(),
        }
    }

    /// Build a [`ExecutionError::Panicked`] from a `catch_unwind`/`join` payload.
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&'static str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self::Panicked { message }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
