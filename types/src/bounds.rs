//! Validated `(skip, count)` windows for slicing sequences.
//!
//! A `SliceBounds` value is proof that neither component is negative. Raw
//! signed input (call sites, config files) goes through [`SliceBounds::checked`]
//! or the serde `try_from` boundary.

use serde::{Deserialize, Serialize};

use crate::error::SequenceError;

#[derive(Deserialize)]
struct RawSliceBounds {
    #[serde(default)]
    skip: i64,
    count: i64,
}

/// Number of leading elements to discard, then the maximum number to yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "RawSliceBounds")]
pub struct SliceBounds {
    skip: usize,
    count: usize,
}

impl SliceBounds {
    #[must_use]
    pub const fn new(skip: usize, count: usize) -> Self {
        Self { skip, count }
    }

    /// Bounds with no skip.
    #[must_use]
    pub const fn limit(count: usize) -> Self {
        Self::new(0, count)
    }

    /// Validate signed input, rejecting negative `skip` or `count`.
    pub fn checked(skip: i64, count: i64) -> Result<Self, SequenceError> {
        Ok(Self::new(non_negative("skip", skip)?, non_negative("count", count)?))
    }

    #[must_use]
    pub const fn skip(&self) -> usize {
        self.skip
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Highest number of source elements a slice with these bounds may pull.
    #[must_use]
    pub const fn reach(&self) -> usize {
        self.skip.saturating_add(self.count)
    }
}

impl TryFrom<RawSliceBounds> for SliceBounds {
    type Error = SequenceError;

    fn try_from(raw: RawSliceBounds) -> Result<Self, Self::Error> {
        Self::checked(raw.skip, raw.count)
    }
}

fn non_negative(name: &'static str, value: i64) -> Result<usize, SequenceError> {
    usize::try_from(value).map_err(|_| SequenceError::InvalidArgument { name, value })
}
