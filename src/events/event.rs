//! # Runtime events emitted by the scheduler and its batches.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Batch events**: a batch started, completed, or failed as a whole
//! - **Task events**: a task was admitted, fulfilled, rejected, or panicked
//! - **Subscriber events**: a subscriber dropped an event or panicked
//!
//! The [`Event`] struct carries additional metadata such as timestamps, batch id,
//! submission index and the gate's active count at the time of the event.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use boundvisor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::TaskAdmitted)
//!     .with_batch(7)
//!     .with_index(3)
//!     .with_active(2);
//!
//! assert_eq!(ev.kind, EventKind::TaskAdmitted);
//! assert_eq!(ev.index, Some(3));
//! assert_eq!(ev.active, Some(2));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `reason`: subscriber name and panic message
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `reason`: subscriber name and drop reason
    SubscriberOverflow,

    // === Batch events ===
    /// Batch accepted; its tasks are queued and initial admission follows.
    ///
    /// Sets:
    /// - `batch`: batch id
    /// - `total`: number of tasks
    /// - `limit`: concurrency limit
    BatchStarted,

    /// Every slot of the batch has settled; results are released to the caller.
    ///
    /// Sets:
    /// - `batch`: batch id
    /// - `total`: number of tasks
    BatchCompleted,

    /// Batch aborted by a runtime error (panic, invariant violation, lost worker).
    ///
    /// Sets:
    /// - `batch`: batch id
    /// - `reason`: error label
    BatchFailed,

    // === Task events ===
    /// Task left the pending queue and was started.
    ///
    /// Sets:
    /// - `batch`, `index`
    /// - `active`: active count **after** admission
    TaskAdmitted,

    /// Task settled with a value.
    ///
    /// Sets:
    /// - `batch`, `index`
    /// - `active`: active count **after** release
    TaskFulfilled,

    /// Task settled with a failure (recorded as data, batch continues).
    ///
    /// Sets:
    /// - `batch`, `index`
    /// - `active`: active count **after** release
    TaskRejected,

    /// Task body panicked.
    ///
    /// Sets:
    /// - `batch`, `index`
    /// - `active`: active count **after** release
    /// - `reason`: panic message
    TaskPanicked,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Batch id (unique per scheduler process).
    pub batch: Option<u64>,
    /// Submission index of the task, if applicable.
    pub index: Option<usize>,
    /// Gate active count observed right after the event's state change.
    pub active: Option<usize>,
    /// Number of tasks in the batch.
    pub total: Option<usize>,
    /// Concurrency limit of the batch.
    pub limit: Option<usize>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            batch: None,
            index: None,
            active: None,
            total: None,
            limit: None,
            reason: None,
        }
    }

    #[inline]
    pub fn with_batch(mut self, id: u64) -> Self {
        self.batch = Some(id);
        self
    }

    #[inline]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    #[inline]
    pub fn with_active(mut self, active: usize) -> Self {
        self.active = Some(active);
        self
    }

    #[inline]
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }

    #[inline]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_reason(format!("subscriber={subscriber} panic={info}"))
    }

    /// True for events a [`SubscriberSet`](crate::SubscriberSet) publishes about its
    /// own subscribers (`SubscriberOverflow`, `SubscriberPanicked`).
    #[inline]
    pub fn is_subscriber_report(&self) -> bool {
        matches!(
            self.kind,
            EventKind::SubscriberOverflow | EventKind::SubscriberPanicked
        )
    }

    /// True for events describing a task settling (fulfilled, rejected or panicked).
    #[inline]
    pub fn is_settlement(&self) -> bool {
        matches!(
            self.kind,
            EventKind::TaskFulfilled | EventKind::TaskRejected | EventKind::TaskPanicked
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_monotonic() {
        let a = Event::new(EventKind::BatchStarted);
        let b = Event::new(EventKind::BatchCompleted);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn settlement_kinds() {
        assert!(Event::new(EventKind::TaskFulfilled).is_settlement());
        assert!(Event::new(EventKind::TaskRejected).is_settlement());
        assert!(Event::new(EventKind::TaskPanicked).is_settlement());
        assert!(!Event::new(EventKind::TaskAdmitted).is_settlement());
    }

    #[test]
    fn subscriber_report_kinds() {
        assert!(Event::subscriber_overflow("audit", "full").is_subscriber_report());
        assert!(Event::subscriber_panicked("audit", "boom".into()).is_subscriber_report());
        assert!(!Event::new(EventKind::BatchFailed).is_subscriber_report());
    }

    #[test]
    fn overflow_reason_names_subscriber() {
        let ev = Event::subscriber_overflow("audit", "full");
        assert_eq!(ev.kind, EventKind::SubscriberOverflow);
        assert_eq!(ev.reason.as_deref(), Some("subscriber=audit reason=full"));
    }
}
