//! Lazy sequence utilities for seqkit.
//!
//! - **`cursor`** / **`sequence`**: forward-only cursors and the re-iterable
//!   sequences that hand them out
//! - **`adapters`**: lazy `map`, `filter`, `find` and bounded `slice` views
//! - **`async_map`**: per-element dispatch to an [`Executor`] and the blocking
//!   `resolve_all` that awaits the handles in order
//! - **`coalesce`** and **`urlcode`**: small value helpers

pub mod adapters;
pub mod async_map;
pub mod coalesce;
pub mod cursor;
pub mod executor;
pub mod sequence;
pub mod urlcode;

pub use adapters::{
    Filter, Map, MapCursor, Slice, SliceCursor, filter, find, limit, limit_cursor, map, map_cursor,
    slice, slice_bounds,
};
pub use async_map::{AsyncMap, async_map, resolve_all, resolve_each};
pub use coalesce::{
    coalesce, coalesce_bool, coalesce_default, coalesce_i32, coalesce_i64, coalesce_str,
};
pub use cursor::{Cursor, Iter, IterCursor};
pub use executor::{Executor, InlineExecutor, PendingResult, Ready, TaskHandle, TokioExecutor};
pub use sequence::{Empty, FromFn, Sequence, Single, empty, from_fn, single};
pub use urlcode::{decode, decode_opt, encode, encode_opt};

pub use seqkit_types::{DecodeError, ExecutionError, SequenceError, SliceBounds};
