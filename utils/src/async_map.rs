//! Asynchronous map over a sequence and the matching blocking await.

use std::sync::Arc;

use seqkit_types::{ExecutionError, SequenceError};
use tracing::debug;

use crate::adapters::{map, map_cursor};
use crate::cursor::Cursor;
use crate::executor::{Executor, PendingResult};
use crate::sequence::Sequence;

/// Lazy sequence of pending results, one per source element.
#[derive(Debug)]
pub struct AsyncMap<E, S, F> {
    executor: E,
    source: S,
    mapper: Arc<F>,
}

/// Dispatch `mapper(x)` to `executor` for each source element `x`.
///
/// Nothing is submitted when the sequence or a cursor is created. Each
/// `take_next` pulls one element and submits exactly one unit of work owning
/// that element; `has_more` never submits. Handle `i` belongs to element `i`,
/// whatever order the executor finishes them in.
pub fn async_map<E, S, F, T>(executor: E, source: S, mapper: F) -> AsyncMap<E, S, F>
where
    E: Executor + Clone,
    S: Sequence,
    S::Item: Send + 'static,
    F: Fn(S::Item) -> T + Send + Sync + 'static,
    T: Send + 'static,
{
    AsyncMap {
        executor,
        source,
        mapper: Arc::new(mapper),
    }
}

impl<E: Clone, S: Clone, F> Clone for AsyncMap<E, S, F> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
            source: self.source.clone(),
            mapper: Arc::clone(&self.mapper),
        }
    }
}

impl<E, S, F, T> Sequence for AsyncMap<E, S, F>
where
    E: Executor + Clone,
    S: Sequence,
    S::Item: Send + 'static,
    F: Fn(S::Item) -> T + Send + Sync + 'static,
    T: Send + 'static,
{
    type Item = E::Pending<T>;
    type Cursor = AsyncMapCursor<E, S::Cursor, F>;

    fn cursor(&self) -> Self::Cursor {
        AsyncMapCursor {
            executor: self.executor.clone(),
            inner: self.source.cursor(),
            mapper: Arc::clone(&self.mapper),
            dispatched: 0,
        }
    }
}

pub struct AsyncMapCursor<E, C, F> {
    executor: E,
    inner: C,
    mapper: Arc<F>,
    dispatched: usize,
}

impl<E, C, F> AsyncMapCursor<E, C, F> {
    /// Units of work submitted by this cursor so far.
    #[must_use]
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }
}

impl<E, C, F, T> Cursor for AsyncMapCursor<E, C, F>
where
    E: Executor,
    C: Cursor,
    C::Item: Send + 'static,
    F: Fn(C::Item) -> T + Send + Sync + 'static,
    T: Send + 'static,
{
    type Item = E::Pending<T>;

    fn has_more(&mut self) -> bool {
        self.inner.has_more()
    }

    fn take_next(&mut self) -> Result<Self::Item, SequenceError> {
        let item = self.inner.take_next()?;
        let mapper = Arc::clone(&self.mapper);
        debug!(index = self.dispatched, "dispatching work item");
        self.dispatched += 1;
        Ok(self.executor.submit(move || mapper(item)))
    }
}

/// Resolve each pending result in order, blocking per element.
///
/// Items are `Ok(value)` or the [`ExecutionError`] the handle resolved with.
/// Waiting happens inside `take_next`, one handle at a time, so a consumer
/// that stops at the first `Err` (e.g. `collect::<Result<Vec<_>, _>>()`)
/// never waits on the handles after it.
pub fn resolve_all<S>(
    handles: S,
) -> impl Sequence<Item = Result<<S::Item as PendingResult>::Output, ExecutionError>>
where
    S: Sequence,
    S::Item: PendingResult,
{
    map(handles, wait_for::<S::Item>)
}

/// [`resolve_all`] over a caller-owned cursor of handles, e.g. handles that
/// were already dispatched and collected.
pub fn resolve_each<C>(
    handles: C,
) -> impl Cursor<Item = Result<<C::Item as PendingResult>::Output, ExecutionError>>
where
    C: Cursor,
    C::Item: PendingResult,
{
    map_cursor(handles, wait_for::<C::Item>)
}

fn wait_for<H: PendingResult>(handle: H) -> Result<H::Output, ExecutionError> {
    handle
        .wait()
        .inspect_err(|err| debug!(%err, "pending result resolved with failure"))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use seqkit_types::{ExecutionError, SequenceError};

    use super::{async_map, resolve_all, resolve_each};
    use crate::adapters::limit;
    use crate::cursor::{Cursor, IterCursor};
    use crate::executor::{Executor, InlineExecutor, PendingResult, Ready};
    use crate::sequence::Sequence;

    /// Inline executor that counts submissions.
    #[derive(Debug, Clone, Default)]
    struct CountingExecutor {
        submitted: Arc<AtomicUsize>,
    }

    impl CountingExecutor {
        fn submitted(&self) -> usize {
            self.submitted.load(Ordering::SeqCst)
        }
    }

    impl Executor for CountingExecutor {
        type Pending<T: Send + 'static> = Ready<T>;

        fn submit<T, F>(&self, work: F) -> Ready<T>
        where
            F: FnOnce() -> T + Send + 'static,
            T: Send + 'static,
        {
            self.submitted.fetch_add(1, Ordering::SeqCst);
            InlineExecutor.submit(work)
        }
    }

    #[test]
    fn round_trip_preserves_order() {
        let handles = async_map(InlineExecutor, vec![1, 2, 3], |x| x);
        let values: Result<Vec<_>, _> = resolve_all(handles).items().collect();
        assert_eq!(values.unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn nothing_dispatched_until_taken() {
        let exec = CountingExecutor::default();
        let handles = async_map(exec.clone(), vec![1, 2, 3], |x| x * 2);
        let mut cursor = handles.cursor();
        assert_eq!(exec.submitted(), 0);

        for _ in 0..4 {
            assert!(cursor.has_more());
        }
        assert_eq!(exec.submitted(), 0);

        let first = cursor.take_next().unwrap();
        assert_eq!(exec.submitted(), 1);
        assert_eq!(cursor.dispatched(), 1);
        assert_eq!(first.wait().unwrap(), 2);
    }

    #[test]
    fn each_pass_dispatches_again() {
        let exec = CountingExecutor::default();
        let handles = async_map(&exec, vec!["a", "b"], str::to_uppercase);
        let resolved = resolve_all(&handles);
        assert_eq!(
            resolved.items().collect::<Result<Vec<_>, _>>().unwrap(),
            vec!["A", "B"]
        );
        assert_eq!(exec.submitted(), 2);
        let _ = resolved.materialize();
        assert_eq!(exec.submitted(), 4);
    }

    #[test]
    fn limit_bounds_dispatch() {
        let exec = CountingExecutor::default();
        let handles = async_map(&exec, 0..1000, |x| x + 1);
        let first_two = limit(handles, 2).unwrap();
        let values: Vec<_> = resolve_all(first_two)
            .items()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(values, vec![1, 2]);
        assert_eq!(exec.submitted(), 2);
    }

    #[test]
    fn panicking_mapper_surfaces_as_execution_error() {
        let handles = async_map(InlineExecutor, vec![1, 0, 2], |x: i32| {
            assert_ne!(x, 0, "zero is not allowed");
            x
        });
        let mut resolved = resolve_all(handles).cursor();
        assert_eq!(resolved.take_next().unwrap().unwrap(), 1);
        let err = resolved.take_next().unwrap().unwrap_err();
        assert!(matches!(err, ExecutionError::Panicked { .. }));
    }

    #[test]
    fn resolve_each_over_collected_handles() {
        let exec = CountingExecutor::default();
        let pending: Vec<_> = async_map(&exec, vec![3, 1, 2], |x| x * 10).items().collect();
        assert_eq!(exec.submitted(), 3);
        let values: Vec<i32> = resolve_each(IterCursor::new(pending))
            .into_items()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(values, vec![30, 10, 20]);
    }

    /// Handle that records when it is waited on.
    #[derive(Clone)]
    struct Staged {
        outcome: Option<i32>,
        waited: Rc<Cell<usize>>,
    }

    impl PendingResult for Staged {
        type Output = i32;

        fn wait(self) -> Result<i32, ExecutionError> {
            self.waited.set(self.waited.get() + 1);
            self.outcome.ok_or(ExecutionError::Cancelled)
        }
    }

    #[test]
    fn resolve_all_stops_waiting_at_first_failure() {
        let waited = Rc::new(Cell::new(0));
        let staged = |outcome| Staged {
            outcome,
            waited: Rc::clone(&waited),
        };
        let handles = vec![staged(Some(1)), staged(None), staged(Some(3))];

        let collected: Result<Vec<i32>, _> = resolve_all(handles).items().collect();
        assert!(collected.unwrap_err().is_cancelled());
        assert_eq!(waited.get(), 2);
    }

    #[test]
    fn take_past_end_faults_without_dispatch() {
        let exec = CountingExecutor::default();
        let handles = async_map(exec.clone(), vec![1], |x| x);
        let mut cursor = handles.cursor();
        assert_eq!(cursor.take_next().unwrap().wait().unwrap(), 1);

        assert!(!cursor.has_more());
        assert!(matches!(cursor.take_next(), Err(SequenceError::Exhausted)));
        assert_eq!(exec.submitted(), 1);
        assert_eq!(cursor.dispatched(), 1);
    }
}
