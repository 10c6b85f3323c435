//! # Subscriber trait
//!
//! [`Subscribe`] receives the events of every batch run on a
//! [`Scheduler`](crate::Scheduler) built with
//! [`SchedulerBuilder::with_subscriber`](crate::SchedulerBuilder::with_subscriber).
//!
//! ## Delivery
//! - Each subscriber has its own worker and bounded queue inside the
//!   [`SubscriberSet`](crate::SubscriberSet); a slow subscriber never delays
//!   admission of the next task.
//! - Events arrive in publication order for one subscriber. A batch's events
//!   run from `BatchStarted` to `BatchCompleted` or `BatchFailed`.
//! - A full queue drops the event for that subscriber only and publishes
//!   `SubscriberOverflow`.
//! - A panic in [`Subscribe::on_event`] is caught and published as
//!   `SubscriberPanicked`; the subscriber keeps receiving later events.
//!   Subscribers also receive these reports, and a panic while handling one is
//!   logged without a further report.
//! - [`Scheduler::shutdown`](crate::Scheduler::shutdown) waits until every
//!   queued event has been handled.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use boundvisor::{Event, EventKind, Subscribe};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! #[derive(Default)]
//! struct RejectCounter(AtomicUsize);
//!
//! #[async_trait]
//! impl Subscribe for RejectCounter {
//!     async fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::TaskRejected {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!     fn name(&self) -> &'static str { "reject-counter" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Observer of batch and subscriber events.
///
/// Runs on its own worker task; blocking calls inside `on_event` stall only
/// this subscriber's queue, but still occupy a runtime thread.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handles one event.
    async fn on_event(&self, event: &Event);

    /// Human-readable name (for logs/metrics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Capacity of this subscriber's queue (default 1024, minimum 1).
    fn queue_capacity(&self) -> usize {
        1024
    }
}
