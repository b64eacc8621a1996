//! Fixed-size worker pool
//!
//! Runs short, independent unit-of-work closures on a fixed set of OS
//! threads fed by an unbounded FIFO task queue. Dropping the pool signals
//! stop, lets the workers finish every already-queued task, and joins them
//! - queued work is never discarded.
//!
//! A panicking task is caught and logged; the worker that ran it keeps
//! serving the queue.

use std::any::Any;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, mpsc};
use std::thread::{self, JoinHandle};

use crate::error::{PipelineError, Result};

const LOCK_POISONED: &str = "pool lock poisoned by a panicking holder";

type Task = Box<dyn FnOnce() + Send + 'static>;

struct TaskQueue {
    tasks: VecDeque<Task>,
    stopped: bool,
}

struct Shared {
    queue: Mutex<TaskQueue>,
    available: Condvar,
}

/// Fixed-size executor over an unbounded FIFO task queue
pub struct WorkerPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn a pool of `threads` workers (clamped to at least one)
    pub fn new(threads: usize) -> Self {
        let threads = threads.max(1);
        let shared = Arc::new(Shared {
            queue: Mutex::new(TaskQueue {
                tasks: VecDeque::new(),
                stopped: false,
            }),
            available: Condvar::new(),
        });

        let mut workers = Vec::with_capacity(threads);
        for index in 0..threads {
            let shared = Arc::clone(&shared);
            let handle = thread::Builder::new()
                .name(format!("vitals-worker-{index}"))
                .spawn(move || worker_loop(&shared))
                .expect("failed to spawn pool worker");
            workers.push(handle);
        }

        tracing::debug!(threads, "worker pool started");
        Self { shared, workers }
    }

    /// Queue a unit of work
    ///
    /// Fails fast with [`PipelineError::PoolStopped`] when the pool is
    /// shutting down.
    pub fn submit<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.submit_boxed(Box::new(task))
    }

    /// Queue a unit of work and get a handle to its result
    ///
    /// The handle yields the closure's return value, or the panic message
    /// if the closure panicked.
    pub fn submit_with_handle<F, T>(&self, task: F) -> Result<TaskHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (sender, receiver) = mpsc::sync_channel(1);

        self.submit_boxed(Box::new(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(task))
                .map_err(|payload| panic_message(payload.as_ref()));
            // The handle may have been dropped; that is the caller's choice.
            let _ = sender.send(outcome);
        }))?;

        Ok(TaskHandle { receiver })
    }

    fn submit_boxed(&self, task: Task) -> Result<()> {
        {
            let mut queue = self.shared.queue.lock().expect(LOCK_POISONED);
            if queue.stopped {
                return Err(PipelineError::PoolStopped);
            }
            queue.tasks.push_back(task);
        }

        self.shared.available.notify_one();
        Ok(())
    }

    /// Number of worker threads
    #[inline]
    pub fn thread_count(&self) -> usize {
        self.workers.len()
    }

    /// Snapshot of tasks queued but not yet picked up
    pub fn pending_task_count(&self) -> usize {
        self.shared.queue.lock().expect(LOCK_POISONED).tasks.len()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        {
            let mut queue = self.shared.queue.lock().expect(LOCK_POISONED);
            queue.stopped = true;
        }
        self.shared.available.notify_all();

        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
        tracing::debug!("worker pool stopped, all workers joined");
    }
}

fn worker_loop(shared: &Shared) {
    loop {
        let task = {
            let mut queue = shared.queue.lock().expect(LOCK_POISONED);
            loop {
                // Drain queued tasks even during shutdown; exit only once
                // the queue is both stopped and empty.
                if let Some(task) = queue.tasks.pop_front() {
                    break task;
                }
                if queue.stopped {
                    return;
                }
                queue = shared.available.wait(queue).expect(LOCK_POISONED);
            }
        };

        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
            tracing::error!(
                panic = %panic_message(payload.as_ref()),
                "pool task panicked; worker continues"
            );
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".into()
    }
}

/// Completion handle for a task submitted with
/// [`WorkerPool::submit_with_handle`]
pub struct TaskHandle<T> {
    receiver: mpsc::Receiver<std::result::Result<T, String>>,
}

impl<T> TaskHandle<T> {
    /// Block until the task completes and take its result
    pub fn join(self) -> Result<T> {
        match self.receiver.recv() {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(panic)) => Err(PipelineError::TaskPanicked(panic)),
            Err(_) => Err(PipelineError::TaskCanceled),
        }
    }
}

#[cfg(test)]
#[path = "pool_test.rs"]
mod pool_test;
