//! Value and error types for seqkit.
//!
//! Pure types with no IO, no async and no threads. Every other seqkit crate
//! reports its faults through the enums defined here.

#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod bounds;
mod error;

pub use bounds::SliceBounds;
pub use error::{BoxError, DecodeError, ExecutionError, SequenceError};
