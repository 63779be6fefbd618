//! Re-iterable sequences.
//!
//! A [`Sequence`] hands out fresh [`Cursor`]s; adapters built on top of it are
//! views, never materialized containers.

use std::marker::PhantomData;
use std::ops::{Range, RangeInclusive};
use std::slice;
use std::vec;

use seqkit_types::SequenceError;

use crate::cursor::{Cursor, EmptyCursor, Iter, IterCursor, OptionCursor};

/// Producer of fresh forward-only cursors.
pub trait Sequence {
    type Item;
    type Cursor: Cursor<Item = Self::Item>;

    /// Start a new pass. Every call begins at the first element.
    fn cursor(&self) -> Self::Cursor;

    /// Start a new pass as a standard iterator.
    fn items(&self) -> Iter<Self::Cursor> {
        self.cursor().into_items()
    }

    /// Materialize one pass.
    fn materialize(&self) -> Vec<Self::Item> {
        self.items().collect()
    }
}

impl<S: Sequence + ?Sized> Sequence for &S {
    type Item = S::Item;
    type Cursor = S::Cursor;

    fn cursor(&self) -> Self::Cursor {
        (**self).cursor()
    }
}

/// Each `cursor()` clones the whole vector, so a pass costs `O(len)` clones up
/// front. For large or expensive elements prefer `&[T]`, which yields references.
impl<T: Clone> Sequence for Vec<T> {
    type Item = T;
    type Cursor = IterCursor<vec::IntoIter<T>>;

    fn cursor(&self) -> Self::Cursor {
        IterCursor::new(self.clone())
    }
}

impl<'a, T> Sequence for &'a [T] {
    type Item = &'a T;
    type Cursor = IterCursor<slice::Iter<'a, T>>;

    fn cursor(&self) -> Self::Cursor {
        let items: &'a [T] = *self;
        IterCursor::new(items.iter())
    }
}

impl<A> Sequence for Range<A>
where
    Range<A>: Iterator<Item = A> + Clone,
{
    type Item = A;
    type Cursor = IterCursor<Range<A>>;

    fn cursor(&self) -> Self::Cursor {
        IterCursor::new(self.clone())
    }
}

impl<A> Sequence for RangeInclusive<A>
where
    RangeInclusive<A>: Iterator<Item = A> + Clone,
{
    type Item = A;
    type Cursor = IterCursor<RangeInclusive<A>>;

    fn cursor(&self) -> Self::Cursor {
        IterCursor::new(self.clone())
    }
}

/// An absent sequence behaves as an empty one.
impl<S: Sequence> Sequence for Option<S> {
    type Item = S::Item;
    type Cursor = OptionCursor<S::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        OptionCursor::new(self.as_ref().map(Sequence::cursor))
    }
}

/// Sequence backed by a closure that builds a fresh iterator per pass.
#[derive(Debug, Clone)]
pub struct FromFn<F> {
    factory: F,
}

/// Wrap a cursor factory. Each `cursor()` call invokes `factory` once.
pub fn from_fn<F, I>(factory: F) -> FromFn<F>
where
    F: Fn() -> I,
    I: IntoIterator,
{
    FromFn { factory }
}

impl<F, I> Sequence for FromFn<F>
where
    F: Fn() -> I,
    I: IntoIterator,
{
    type Item = I::Item;
    type Cursor = IterCursor<I::IntoIter>;

    fn cursor(&self) -> Self::Cursor {
        IterCursor::new((self.factory)())
    }
}

/// Typed empty sequence.
#[derive(Debug)]
pub struct Empty<T>(PhantomData<fn() -> T>);

#[must_use]
pub const fn empty<T>() -> Empty<T> {
    Empty(PhantomData)
}

impl<T> Clone for Empty<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Empty<T> {}

impl<T> Default for Empty<T> {
    fn default() -> Self {
        empty()
    }
}

impl<T> Sequence for Empty<T> {
    type Item = T;
    type Cursor = EmptyCursor<T>;

    fn cursor(&self) -> Self::Cursor {
        EmptyCursor::new()
    }
}

/// One element if present, nothing otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Single<T> {
    value: Option<T>,
}

pub fn single<T: Clone>(value: Option<T>) -> Single<T> {
    Single { value }
}

impl<T: Clone> Sequence for Single<T> {
    type Item = T;
    type Cursor = SingleCursor<T>;

    fn cursor(&self) -> Self::Cursor {
        SingleCursor {
            value: self.value.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SingleCursor<T> {
    value: Option<T>,
}

impl<T> Cursor for SingleCursor<T> {
    type Item = T;

    fn has_more(&mut self) -> bool {
        self.value.is_some()
    }

    fn take_next(&mut self) -> Result<T, SequenceError> {
        self.value.take().ok_or(SequenceError::Exhausted)
    }
}
