//! Lazy transforms over sequences: map, filter, find and bounded slices.
//!
//! Each adapter wraps its source and computes elements on demand; nothing is
//! buffered beyond the one-element look-ahead the filter needs.

use std::sync::Arc;

use seqkit_types::{SequenceError, SliceBounds};
use tracing::debug;

use crate::cursor::Cursor;
use crate::sequence::Sequence;

// ============================================================================
// map
// ============================================================================

/// Sequence of `mapper(x)` for every `x` of the source.
#[derive(Debug)]
pub struct Map<S, F> {
    source: S,
    mapper: Arc<F>,
}

/// Lazily apply `mapper` to each element.
///
/// The mapper runs exactly once per consumed element, inside `take_next`.
pub fn map<S, F, T>(source: S, mapper: F) -> Map<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> T,
{
    Map {
        source,
        mapper: Arc::new(mapper),
    }
}

impl<S: Clone, F> Clone for Map<S, F> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            mapper: Arc::clone(&self.mapper),
        }
    }
}

impl<S, F, T> Sequence for Map<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> T,
{
    type Item = T;
    type Cursor = MapCursor<S::Cursor, F>;

    fn cursor(&self) -> Self::Cursor {
        MapCursor {
            inner: self.source.cursor(),
            mapper: Arc::clone(&self.mapper),
        }
    }
}

/// [`map`] over a caller-owned cursor. Single pass.
pub fn map_cursor<C, F, T>(cursor: C, mapper: F) -> MapCursor<C, F>
where
    C: Cursor,
    F: Fn(C::Item) -> T,
{
    MapCursor {
        inner: cursor,
        mapper: Arc::new(mapper),
    }
}

pub struct MapCursor<C, F> {
    inner: C,
    mapper: Arc<F>,
}

impl<C, F, T> Cursor for MapCursor<C, F>
where
    C: Cursor,
    F: Fn(C::Item) -> T,
{
    type Item = T;

    fn has_more(&mut self) -> bool {
        self.inner.has_more()
    }

    fn take_next(&mut self) -> Result<T, SequenceError> {
        let item = self.inner.take_next()?;
        Ok((self.mapper)(item))
    }
}

// ============================================================================
// filter
// ============================================================================

/// Sequence of the source elements for which the predicate holds.
#[derive(Debug)]
pub struct Filter<S, P> {
    source: S,
    predicate: Arc<P>,
}

/// Lazily keep the elements satisfying `predicate`, in source order.
pub fn filter<S, P>(source: S, predicate: P) -> Filter<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    Filter {
        source,
        predicate: Arc::new(predicate),
    }
}

impl<S: Clone, P> Clone for Filter<S, P> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S, P> Sequence for Filter<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;
    type Cursor = FilterCursor<S::Cursor, P>;

    fn cursor(&self) -> Self::Cursor {
        FilterCursor {
            inner: self.source.cursor(),
            predicate: Arc::clone(&self.predicate),
            matched: None,
        }
    }
}

pub struct FilterCursor<C: Cursor, P> {
    inner: C,
    predicate: Arc<P>,
    // Element that already passed the predicate but has not been taken.
    matched: Option<C::Item>,
}

impl<C, P> FilterCursor<C, P>
where
    C: Cursor,
    P: Fn(&C::Item) -> bool,
{
    fn advance(&mut self) -> bool {
        if self.matched.is_some() {
            return true;
        }
        while self.inner.has_more() {
            let Ok(item) = self.inner.take_next() else {
                return false;
            };
            if (self.predicate)(&item) {
                self.matched = Some(item);
                return true;
            }
        }
        false
    }
}

impl<C, P> Cursor for FilterCursor<C, P>
where
    C: Cursor,
    P: Fn(&C::Item) -> bool,
{
    type Item = C::Item;

    fn has_more(&mut self) -> bool {
        self.advance()
    }

    fn take_next(&mut self) -> Result<Self::Item, SequenceError> {
        self.advance();
        self.matched.take().ok_or(SequenceError::Exhausted)
    }
}

// ============================================================================
// find
// ============================================================================

/// First element satisfying `predicate`, or `None`.
///
/// Stops at the first match. `None` is the absent marker; for a sequence of
/// `Option<T>` a found `None` element comes back as `Some(None)`.
pub fn find<S, P>(source: &S, mut predicate: P) -> Option<S::Item>
where
    S: Sequence + ?Sized,
    P: FnMut(&S::Item) -> bool,
{
    let mut cursor = source.cursor();
    while let Some(item) = cursor.next_item() {
        if predicate(&item) {
            return Some(item);
        }
    }
    None
}

// ============================================================================
// slice
// ============================================================================

/// At most `count` elements after skipping `skip`.
#[derive(Debug, Clone)]
pub struct Slice<S> {
    source: S,
    bounds: SliceBounds,
}

/// Lazily skip `skip` elements, then yield up to `count`.
///
/// Fails with [`SequenceError::InvalidArgument`] when either argument is negative.
pub fn slice<S: Sequence>(
    source: S,
    skip: i64,
    count: i64,
) -> Result<Slice<S>, SequenceError> {
    Ok(slice_bounds(source, SliceBounds::checked(skip, count)?))
}

/// [`slice`] with pre-validated bounds.
pub fn slice_bounds<S: Sequence>(source: S, bounds: SliceBounds) -> Slice<S> {
    Slice { source, bounds }
}

/// Shorthand for `slice(source, 0, count)`.
pub fn limit<S: Sequence>(source: S, count: i64) -> Result<Slice<S>, SequenceError> {
    slice(source, 0, count)
}

/// Bound a caller-owned cursor to at most `count` further elements.
///
/// Single pass. Pass `&mut cursor` to keep using the cursor afterwards; it is
/// left positioned right after the last element yielded.
pub fn limit_cursor<C: Cursor>(
    cursor: C,
    count: i64,
) -> Result<SliceCursor<C>, SequenceError> {
    let bounds = SliceBounds::checked(0, count)?;
    Ok(SliceCursor {
        inner: cursor,
        remaining: bounds.count(),
    })
}

impl<S: Sequence> Slice<S> {
    #[must_use]
    pub fn bounds(&self) -> SliceBounds {
        self.bounds
    }
}

impl<S: Sequence> Sequence for Slice<S> {
    type Item = S::Item;
    type Cursor = SliceCursor<S::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        let mut inner = self.source.cursor();
        let mut skipped = 0;
        while skipped < self.bounds.skip() && inner.has_more() {
            if inner.take_next().is_err() {
                break;
            }
            skipped += 1;
        }
        if skipped < self.bounds.skip() {
            debug!(
                skipped,
                requested = self.bounds.skip(),
                "source exhausted while skipping"
            );
        }
        SliceCursor {
            inner,
            remaining: self.bounds.count(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SliceCursor<C> {
    inner: C,
    remaining: usize,
}

impl<C> SliceCursor<C> {
    /// Release the underlying cursor.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: Cursor> Cursor for SliceCursor<C> {
    type Item = C::Item;

    fn has_more(&mut self) -> bool {
        self.remaining > 0 && self.inner.has_more()
    }

    fn take_next(&mut self) -> Result<Self::Item, SequenceError> {
        if self.remaining == 0 {
            return Err(SequenceError::Exhausted);
        }
        let item = self.inner.take_next()?;
        self.remaining -= 1;
        Ok(item)
    }
}
