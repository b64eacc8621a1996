//! Blocking bounded queue with explicit stop
//!
//! A [`RingBuffer`] wrapped with a mutex, a "not-full" and a "not-empty"
//! condition variable, and a one-way `stopped` flag. This is the handoff
//! point between producer threads and the drain thread.
//!
//! # Shutdown semantics
//!
//! `stop()` is the only cancellation primitive and it is cooperative: it
//! broadcasts both conditions so every blocked thread wakes and re-checks
//! its predicate. After stop, `push` always reports failure, while `pop`
//! keeps draining buffered items and only then reports exhaustion - nothing
//! accepted before the stop is lost.

use std::sync::{Condvar, Mutex};

use crate::ring::RingBuffer;

// Lock poisoning is fatal by contract: a holder that panicked may have left
// the ring in a half-updated state, so the owner must replace the queue.
const LOCK_POISONED: &str = "queue lock poisoned by a panicking holder";

struct Shared<T> {
    ring: RingBuffer<T>,
    stopped: bool,
}

/// Bounded multi-producer queue with blocking and non-blocking operations
pub struct BlockingQueue<T> {
    shared: Mutex<Shared<T>>,
    not_empty: Condvar,
    not_full: Condvar,
}

impl<T> BlockingQueue<T> {
    /// Create an active queue with `capacity` slots
    pub fn new(capacity: usize) -> Self {
        Self {
            shared: Mutex::new(Shared {
                ring: RingBuffer::new(capacity),
                stopped: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    /// Block until the item is accepted or the queue stops
    ///
    /// Returns `true` when the item was enqueued, `false` when the queue
    /// was stopped first (the item is dropped in that case).
    pub fn push(&self, item: T) -> bool {
        let mut shared = self.shared.lock().expect(LOCK_POISONED);

        while shared.ring.is_full() && !shared.stopped {
            shared = self.not_full.wait(shared).expect(LOCK_POISONED);
        }

        if shared.stopped {
            return false;
        }

        // Space is guaranteed: the lock is held and the buffer is not full.
        let _ = shared.ring.try_push(item);
        drop(shared);

        self.not_empty.notify_one();
        true
    }

    /// Block until an item is available or the queue is stopped and drained
    ///
    /// Returns `None` only when the queue is stopped *and* empty, so a
    /// consumer loop naturally drains every accepted item before exiting.
    pub fn pop(&self) -> Option<T> {
        let mut shared = self.shared.lock().expect(LOCK_POISONED);

        while shared.ring.is_empty() && !shared.stopped {
            shared = self.not_empty.wait(shared).expect(LOCK_POISONED);
        }

        if shared.stopped && shared.ring.is_empty() {
            return None;
        }

        let item = shared.ring.try_pop();
        drop(shared);

        self.not_full.notify_one();
        item
    }

    /// Enqueue without blocking
    ///
    /// Hands the item back when the queue is full or stopped. This is the
    /// producer path the log manager uses.
    pub fn try_push(&self, item: T) -> Result<(), T> {
        let mut shared = self.shared.lock().expect(LOCK_POISONED);

        if shared.stopped {
            return Err(item);
        }

        match shared.ring.try_push(item) {
            Ok(()) => {
                drop(shared);
                self.not_empty.notify_one();
                Ok(())
            }
            Err(item) => Err(item),
        }
    }

    /// Move the queue into its terminal state and wake every waiter
    pub fn stop(&self) {
        let mut shared = self.shared.lock().expect(LOCK_POISONED);
        shared.stopped = true;
        drop(shared);

        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    /// True once `stop()` has been called
    pub fn is_stopped(&self) -> bool {
        self.shared.lock().expect(LOCK_POISONED).stopped
    }

    /// True when no items are buffered
    pub fn is_empty(&self) -> bool {
        self.shared.lock().expect(LOCK_POISONED).ring.is_empty()
    }

    /// Number of items currently buffered
    pub fn len(&self) -> usize {
        self.shared.lock().expect(LOCK_POISONED).ring.len()
    }

    /// Slot count fixed at construction
    pub fn capacity(&self) -> usize {
        self.shared.lock().expect(LOCK_POISONED).ring.capacity()
    }
}

#[cfg(test)]
#[path = "queue_test.rs"]
mod queue_test;
