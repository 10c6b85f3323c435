//! # Event bus shared by a scheduler's batches and subscribers.
//!
//! One [`Bus`] is created per [`Scheduler`](crate::Scheduler). It has two kinds
//! of publishers and two kinds of consumers:
//!
//! ```text
//! Batch::publish ───────────────┐  BatchStarted, TaskAdmitted, TaskFulfilled,
//!   (one coordinator per run)   │  TaskRejected, TaskPanicked, BatchCompleted,
//!                               │  BatchFailed
//!                               ▼
//!                              Bus ──► Listener ──► SubscriberSet::emit
//!                               ▲   └─► Scheduler::subscribe() receivers
//! SubscriberSet workers ────────┘  SubscriberPanicked, SubscriberOverflow
//! ```
//!
//! ## Rules
//! - `publish()` never blocks a batch coordinator; with no receiver the event is dropped.
//! - Within one batch, events are published by a single task in state-change order,
//!   so a receiver can replay the gate's `active` count from them.
//! - A receiver that falls more than the capacity behind gets `RecvError::Lagged(n)`.
//! - The free [`run_bounded`](crate::run_bounded) entry point has no bus.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel carrying batch and subscriber events.
///
/// Clones share the same channel; each running batch holds one.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (clamped to at least 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Event>(capacity);
        Self { tx }
    }

    /// Publishes an event to all active receivers.
    ///
    /// If there are no receivers, the event is dropped.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver that will observe subsequent events.
    ///
    /// A receiver only gets events **sent after** it subscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}
