//! Work queue subsystem.
//!
//! # Data Flow
//! ```text
//! intake operations (any task)
//!     → add() (de-duplicated against pending items)
//!     → get().await (single worker)
//!     → done() (re-queues items re-added mid-processing)
//!
//! failed items → add_rate_limited() → backoff.rs delay → add()
//! shut_down() → get() returns None, pending items are discarded
//! ```
//!
//! # Design Decisions
//! - Single consumer; producers only ever touch the lock briefly
//! - Equal pending items collapse to one (idempotent event streams)
//! - An item re-added while being processed is parked and re-queued on
//!   done(), never run concurrently with itself
//! - Shutdown takes priority over pending items

pub mod backoff;

use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::Notify;

/// De-duplicating FIFO with shutdown signalling and rate-limited requeue.
pub struct WorkQueue<T> {
    state: Mutex<QueueState<T>>,
    notify: Notify,
}

struct QueueState<T> {
    order: VecDeque<T>,
    pending: HashSet<T>,
    processing: HashSet<T>,
    parked: HashSet<T>,
    attempts: HashMap<T, u32>,
    shutting_down: bool,
}

impl<T> WorkQueue<T>
where
    T: Clone + Eq + Hash,
{
    /// Create a new empty queue.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                order: VecDeque::new(),
                pending: HashSet::new(),
                processing: HashSet::new(),
                parked: HashSet::new(),
                attempts: HashMap::new(),
                shutting_down: false,
            }),
            notify: Notify::new(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enqueue an item.
    ///
    /// A no-op if an equal item is already pending. If an equal item is
    /// currently being processed the new one is parked and re-queued when
    /// `done` is called for it. Items added after shutdown are dropped.
    pub fn add(&self, item: T) {
        let mut state = self.lock();
        if state.shutting_down {
            return;
        }
        if state.pending.contains(&item) {
            return;
        }
        if state.processing.contains(&item) {
            state.parked.insert(item);
            return;
        }
        state.pending.insert(item.clone());
        state.order.push_back(item);
        drop(state);
        self.notify.notify_one();
    }

    /// Wait for the next item. Returns `None` once the queue is shut down.
    ///
    /// Shutdown wins over pending items: anything still queued at that point
    /// is discarded.
    pub async fn get(&self) -> Option<T> {
        loop {
            let notified = self.notify.notified();
            {
                let mut state = self.lock();
                if state.shutting_down {
                    return None;
                }
                if let Some(item) = state.order.pop_front() {
                    state.pending.remove(&item);
                    state.processing.insert(item.clone());
                    return Some(item);
                }
            }
            notified.await;
        }
    }

    /// Mark processing of `item` complete.
    pub fn done(&self, item: &T) {
        let mut state = self.lock();
        state.processing.remove(item);
        if state.parked.remove(item) && !state.shutting_down && !state.pending.contains(item) {
            state.pending.insert(item.clone());
            state.order.push_back(item.clone());
            drop(state);
            self.notify.notify_one();
        }
    }

    /// Number of items waiting to be picked up.
    pub fn len(&self) -> usize {
        self.lock().order.len()
    }

    /// True when no items are waiting.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Signal shutdown; current and future `get` calls return `None`.
    pub fn shut_down(&self) {
        let mut state = self.lock();
        state.shutting_down = true;
        drop(state);
        self.notify.notify_one();
    }
}

impl<T> WorkQueue<T>
where
    T: Clone + Eq + Hash + Send + 'static,
{
    /// Re-enqueue a failed item after an exponential backoff delay.
    pub fn add_rate_limited(self: &Arc<Self>, item: T) {
        let attempt = {
            let mut state = self.lock();
            let attempt = state.attempts.entry(item.clone()).or_insert(0);
            *attempt += 1;
            *attempt
        };
        let delay = backoff::requeue_delay(attempt);
        let queue = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            queue.add(item);
        });
    }

    /// Clear the requeue counter for an item that finally succeeded.
    pub fn forget(&self, item: &T) {
        self.lock().attempts.remove(item);
    }

    /// How often the item has been requeued so far.
    pub fn num_requeues(&self, item: &T) -> u32 {
        self.lock().attempts.get(item).copied().unwrap_or(0)
    }
}

impl<T> Default for WorkQueue<T>
where
    T: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
