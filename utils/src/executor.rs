//! The work-executor boundary.
//!
//! An [`Executor`] accepts independent units of work and hands back a
//! [`PendingResult`] per unit. seqkit never sizes or owns a pool; callers
//! bring their own (a tokio runtime, their own threads, or inline execution).

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::JoinHandle;

use seqkit_types::ExecutionError;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::sync::oneshot;
use tokio::task::AbortHandle;
use tracing::debug;

/// Handle to a value computed by a dispatched unit of work.
pub trait PendingResult {
    type Output;

    /// Block the calling thread until the work resolves.
    fn wait(self) -> Result<Self::Output, ExecutionError>;
}

/// Facility that runs zero-argument units of work.
pub trait Executor {
    type Pending<T: Send + 'static>: PendingResult<Output = T>;

    /// Dispatch `work`. Must not block on its completion.
    fn submit<T, F>(&self, work: F) -> Self::Pending<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static;
}

impl<E: Executor + ?Sized> Executor for &E {
    type Pending<T: Send + 'static> = E::Pending<T>;

    fn submit<T, F>(&self, work: F) -> Self::Pending<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        (**self).submit(work)
    }
}

impl<E: Executor + ?Sized> Executor for Arc<E> {
    type Pending<T: Send + 'static> = E::Pending<T>;

    fn submit<T, F>(&self, work: F) -> Self::Pending<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        (**self).submit(work)
    }
}

impl<T> PendingResult for JoinHandle<T> {
    type Output = T;

    fn wait(self) -> Result<T, ExecutionError> {
        self.join().map_err(|payload| ExecutionError::from_panic(&*payload))
    }
}

fn run_caught<T>(work: impl FnOnce() -> T) -> Result<T, ExecutionError> {
    panic::catch_unwind(AssertUnwindSafe(work))
        .map_err(|payload| ExecutionError::from_panic(&*payload))
}

// ============================================================================
// Inline
// ============================================================================

/// Already-resolved result.
#[derive(Debug)]
pub struct Ready<T> {
    result: Result<T, ExecutionError>,
}

impl<T> Ready<T> {
    #[must_use]
    pub fn ok(value: T) -> Self {
        Self { result: Ok(value) }
    }

    #[must_use]
    pub fn err(error: ExecutionError) -> Self {
        Self { result: Err(error) }
    }
}

impl<T> From<Result<T, ExecutionError>> for Ready<T> {
    fn from(result: Result<T, ExecutionError>) -> Self {
        Self { result }
    }
}

impl<T> PendingResult for Ready<T> {
    type Output = T;

    fn wait(self) -> Result<T, ExecutionError> {
        self.result
    }
}

/// Runs each unit of work on the submitting thread, at submission time.
///
/// A panicking unit resolves to [`ExecutionError::Panicked`] instead of
/// unwinding into the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineExecutor;

impl Executor for InlineExecutor {
    type Pending<T: Send + 'static> = Ready<T>;

    fn submit<T, F>(&self, work: F) -> Ready<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        Ready::from(run_caught(work))
    }
}

// ============================================================================
// Tokio
// ============================================================================

/// Dispatches work onto the blocking pool of an externally owned tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioExecutor {
    handle: Handle,
}

impl TokioExecutor {
    #[must_use]
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Use the runtime the caller is currently running inside.
    pub fn try_current() -> Result<Self, TryCurrentError> {
        Handle::try_current().map(Self::new)
    }

    #[must_use]
    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Executor for TokioExecutor {
    type Pending<T: Send + 'static> = TaskHandle<T>;

    fn submit<T, F>(&self, work: F) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let task = self.handle.spawn_blocking(move || {
            // The receiver may already be gone; the result is simply dropped then.
            let _ = tx.send(run_caught(work));
        });
        TaskHandle {
            rx,
            abort: task.abort_handle(),
        }
    }
}

/// Pending result of a unit of work dispatched by [`TokioExecutor`].
#[derive(Debug)]
pub struct TaskHandle<T> {
    rx: oneshot::Receiver<Result<T, ExecutionError>>,
    abort: AbortHandle,
}

impl<T> TaskHandle<T> {
    /// Request cancellation.
    ///
    /// Work that has not started yet never runs and the handle resolves to
    /// [`ExecutionError::Cancelled`]. Work already running is not interrupted.
    pub fn cancel(&self) {
        debug!("cancelling pending work item");
        self.abort.abort();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }
}

impl<T> PendingResult for TaskHandle<T> {
    type Output = T;

    /// Blocks on the result.
    ///
    /// # Panics
    ///
    /// Panics when called from inside an async task; wait from a plain thread
    /// or from `spawn_blocking`.
    fn wait(self) -> Result<T, ExecutionError> {
        match self.rx.blocking_recv() {
            Ok(result) => result,
            Err(_) => Err(ExecutionError::Cancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use seqkit_types::ExecutionError;

    use super::{Executor, InlineExecutor, PendingResult, Ready};

    #[test]
    fn inline_runs_at_submission() {
        let ran = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ran);
        let pending = InlineExecutor.submit(move || counter.fetch_add(1, Ordering::SeqCst) + 10);
        assert_eq!(ran.load(Ordering::SeqCst), 1);
        assert_eq!(pending.wait().unwrap(), 10);
    }

    #[test]
    fn inline_captures_panics() {
        let pending = InlineExecutor.submit(|| -> u8 { panic!("exploded") });
        let err = pending.wait().unwrap_err();
        assert!(matches!(err, ExecutionError::Panicked { ref message } if message == "exploded"));
    }

    fn run_on<E: Executor>(executor: E, value: i32) -> i32 {
        executor.submit(move || value).wait().unwrap()
    }

    #[test]
    fn executor_by_reference_and_arc() {
        let exec = InlineExecutor;
        assert_eq!(run_on(&exec, 1), 1);
        assert_eq!(run_on(exec, 3), 3);
        assert_eq!(run_on(Arc::new(InlineExecutor), 2), 2);
    }

    #[test]
    fn ready_resolves_to_its_result() {
        assert_eq!(Ready::ok("v").wait().unwrap(), "v");
        assert!(Ready::<()>::err(ExecutionError::Cancelled).wait().unwrap_err().is_cancelled());
    }

    #[test]
    fn join_handle_is_a_pending_result() {
        let handle = thread::spawn(|| 6 * 7);
        assert_eq!(handle.wait().unwrap(), 42);

        let handle = thread::spawn(|| -> i32 { panic!("thread failed") });
        let err = handle.wait().unwrap_err();
        assert!(matches!(err, ExecutionError::Panicked { ref message } if message == "thread failed"));
    }
}
