//! Forward-only, pull-based cursors.
//!
//! A [`Cursor`] separates "is there another element" from "hand it over" so
//! adapters can answer `has_more` without running user code (mappers,
//! executor dispatch) for an element nobody asked for yet.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use seqkit_types::SequenceError;

/// Single forward-only pass over a sequence.
pub trait Cursor {
    type Item;

    /// Whether another element is available.
    ///
    /// Idempotent: calling it repeatedly without [`Cursor::take_next`] must not
    /// advance the cursor.
    fn has_more(&mut self) -> bool;

    /// Produce the next element, or [`SequenceError::Exhausted`] when none remain.
    fn take_next(&mut self) -> Result<Self::Item, SequenceError>;

    /// Pull-and-test in one step; `None` once exhausted.
    fn next_item(&mut self) -> Option<Self::Item> {
        if self.has_more() {
            self.take_next().ok()
        } else {
            None
        }
    }

    /// View this cursor as a standard iterator.
    fn into_items(self) -> Iter<Self>
    where
        Self: Sized,
    {
        Iter { cursor: self }
    }
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    type Item = C::Item;

    fn has_more(&mut self) -> bool {
        (**self).has_more()
    }

    fn take_next(&mut self) -> Result<Self::Item, SequenceError> {
        (**self).take_next()
    }
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    type Item = C::Item;

    fn has_more(&mut self) -> bool {
        (**self).has_more()
    }

    fn take_next(&mut self) -> Result<Self::Item, SequenceError> {
        (**self).take_next()
    }
}

/// Adapts a standard [`Iterator`] into a [`Cursor`].
///
/// `has_more` pulls at most one element into a look-ahead slot; the source
/// iterator is never advanced further than that.
#[derive(Debug)]
pub struct IterCursor<I: Iterator> {
    iter: I,
    peeked: Option<I::Item>,
    done: bool,
}

impl<I: Iterator> IterCursor<I> {
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            iter: iter.into_iter(),
            peeked: None,
            done: false,
        }
    }

    fn fill(&mut self) {
        if self.peeked.is_none() && !self.done {
            self.peeked = self.iter.next();
            self.done = self.peeked.is_none();
        }
    }
}

impl<I: Iterator> Cursor for IterCursor<I> {
    type Item = I::Item;

    fn has_more(&mut self) -> bool {
        self.fill();
        self.peeked.is_some()
    }

    fn take_next(&mut self) -> Result<Self::Item, SequenceError> {
        self.fill();
        self.peeked.take().ok_or(SequenceError::Exhausted)
    }
}

/// Cursor with no elements.
#[derive(Debug)]
pub struct EmptyCursor<T>(PhantomData<fn() -> T>);

impl<T> EmptyCursor<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for EmptyCursor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for EmptyCursor<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> Cursor for EmptyCursor<T> {
    type Item = T;

    fn has_more(&mut self) -> bool {
        false
    }

    fn take_next(&mut self) -> Result<T, SequenceError> {
        Err(SequenceError::Exhausted)
    }
}

/// Cursor over an optional inner cursor; `None` behaves as empty.
#[derive(Debug, Clone)]
pub struct OptionCursor<C>(Option<C>);

impl<C> OptionCursor<C> {
    pub const fn new(inner: Option<C>) -> Self {
        Self(inner)
    }
}

impl<C: Cursor> Cursor for OptionCursor<C> {
    type Item = C::Item;

    fn has_more(&mut self) -> bool {
        self.0.as_mut().is_some_and(Cursor::has_more)
    }

    fn take_next(&mut self) -> Result<Self::Item, SequenceError> {
        match self.0.as_mut() {
            Some(inner) => inner.take_next(),
            None => Err(SequenceError::Exhausted),
        }
    }
}

/// [`Iterator`] view of a cursor, produced by [`Cursor::into_items`].
#[derive(Debug, Clone)]
pub struct Iter<C> {
    cursor: C,
}

impl<C> Iter<C> {
    /// Give the cursor back, e.g. to resume after a `take(n)` on `by_ref()`.
    pub fn into_cursor(self) -> C {
        self.cursor
    }
}

impl<C: Cursor> Iterator for Iter<C> {
    type Item = C::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next_item()
    }
}

impl<C: Cursor> FusedIterator for Iter<C> {}
