//! Fixed-size thread pool with per-job result handles.
//!
//! Backed by a `rayon::ThreadPool` built with exactly the requested number of
//! threads. Every submitted job gets its own one-shot
//! `crossbeam_channel::bounded(1)` channel; the returned [`JobHandle`] is the
//! receiving end, so results come back without any state shared between jobs.
//!
//! A job that panics does not take the pool down: the panic is caught on the
//! worker and surfaces as [`JobError::Panicked`] when the handle is joined.
//!
//! Typical use, mirroring a submit-all / shutdown / collect-all cycle:
//!
//! ```
//! use cpfr::threadpool::WorkerPool;
//!
//! let pool = WorkerPool::new(2).unwrap();
//! let handles: Vec<_> = (0..4u32).map(|i| pool.submit(move || i * 10)).collect();
//! pool.shutdown();
//! let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
//! assert_eq!(total, 60);
//! ```

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread;

use crossbeam_channel::{bounded, Receiver};
use rayon::ThreadPool as RayonPool;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to build a [`WorkerPool`].
#[derive(Debug)]
pub enum PoolError {
    /// A pool needs at least one thread.
    ZeroThreads,
    /// The OS refused to spawn the worker threads.
    Build(rayon::ThreadPoolBuildError),
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::ZeroThreads => write!(f, "thread pool needs at least one thread"),
            PoolError::Build(e) => write!(f, "cannot start worker threads: {}", e),
        }
    }
}

impl std::error::Error for PoolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PoolError::ZeroThreads => None,
            PoolError::Build(e) => Some(e),
        }
    }
}

/// Failure of a single submitted job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    /// The job panicked; carries the panic message when it was a string.
    Panicked(String),
    /// The job's result channel closed without a value.
    Lost,
}

impl fmt::Display for JobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobError::Panicked(msg) => write!(f, "job panicked: {}", msg),
            JobError::Lost => write!(f, "job result was lost"),
        }
    }
}

impl std::error::Error for JobError {}

// ---------------------------------------------------------------------------
// Pool
// ---------------------------------------------------------------------------

struct PoolState {
    pending: usize, // number of submitted-but-not-yet-finished jobs
}

/// Thread pool handle.
///
/// Dropping the pool waits for every submitted job to finish, then joins the
/// worker threads.
pub struct WorkerPool {
    pool: RayonPool,
    nb_threads: usize,
    /// Pending job counter plus a condvar for [`WorkerPool::jobs_completed`].
    state: Arc<(Mutex<PoolState>, Condvar)>,
}

/// Receiving end of one job's result.
#[must_use = "a job's result is only observed by joining its handle"]
pub struct JobHandle<R> {
    rx: Receiver<thread::Result<R>>,
}

impl WorkerPool {
    /// Builds a pool of exactly `nb_threads` worker threads.
    pub fn new(nb_threads: usize) -> Result<Self, PoolError> {
        if nb_threads < 1 {
            return Err(PoolError::ZeroThreads);
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(nb_threads)
            .thread_name(|i| format!("cpfr-worker-{}", i))
            .build()
            .map_err(PoolError::Build)?;

        Ok(WorkerPool {
            pool,
            nb_threads,
            state: Arc::new((Mutex::new(PoolState { pending: 0 }), Condvar::new())),
        })
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.nb_threads
    }

    /// Queues `job` for execution and returns a handle to its result.
    ///
    /// Never blocks: jobs beyond the thread count wait in the pool's queue.
    pub fn submit<F, R>(&self, job: F) -> JobHandle<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let (tx, rx) = bounded(1);

        // Count before spawning so `jobs_completed` cannot observe zero
        // between submit and execution start.
        {
            let (lock, _cvar) = &*self.state;
            lock.lock().unwrap_or_else(PoisonError::into_inner).pending += 1;
        }

        let state = Arc::clone(&self.state);
        self.pool.spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(job));
            // The handle may have been dropped; nobody wants the value then.
            let _ = tx.send(outcome);

            let (lock, cvar) = &*state;
            let mut s = lock.lock().unwrap_or_else(PoisonError::into_inner);
            s.pending -= 1;
            if s.pending == 0 {
                cvar.notify_all();
            }
        });

        JobHandle { rx }
    }

    /// Blocks until every submitted job has finished.
    ///
    /// Does not shut the pool down; more jobs may be submitted afterwards.
    pub fn jobs_completed(&self) {
        let (lock, cvar) = &*self.state;
        let mut s = lock.lock().unwrap_or_else(PoisonError::into_inner);
        while s.pending > 0 {
            s = cvar.wait(s).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Stops accepting work, drains outstanding jobs and joins the workers.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.jobs_completed();
        // rayon::ThreadPool::drop tears the worker threads down.
    }
}

impl<R> JobHandle<R> {
    /// Waits for the job and returns its value.
    pub fn join(self) -> Result<R, JobError> {
        match self.rx.recv() {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(payload)) => Err(JobError::Panicked(panic_message(payload.as_ref()))),
            Err(_) => Err(JobError::Lost),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
