//! # Logging subscriber.
//!
//! [`LogWriter`] renders scheduler events through [`tracing`]. Install any
//! `tracing` subscriber (for example `tracing-subscriber`'s fmt layer) to see them.
//!
//! ## Output (fmt layer)
//! ```text
//! INFO  batch started batch=0 total=6 limit=2
//! DEBUG task admitted batch=0 index=0 active=1
//! DEBUG task fulfilled batch=0 index=0 active=1
//! WARN  task rejected batch=0 index=1 active=1
//! INFO  batch completed batch=0 total=6
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// `tracing`-backed logging subscriber.
///
/// Enabled via the `logging` feature.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::BatchStarted => {
                tracing::info!(batch = ?e.batch, total = ?e.total, limit = ?e.limit, "batch started");
            }
            EventKind::BatchCompleted => {
                tracing::info!(batch = ?e.batch, total = ?e.total, "batch completed");
            }
            EventKind::BatchFailed => {
                tracing::error!(batch = ?e.batch, reason = ?e.reason, "batch failed");
            }
            EventKind::TaskAdmitted => {
                tracing::debug!(batch = ?e.batch, index = ?e.index, active = ?e.active, "task admitted");
            }
            EventKind::TaskFulfilled => {
                tracing::debug!(batch = ?e.batch, index = ?e.index, active = ?e.active, "task fulfilled");
            }
            EventKind::TaskRejected => {
                tracing::warn!(batch = ?e.batch, index = ?e.index, active = ?e.active, "task rejected");
            }
            EventKind::TaskPanicked => {
                tracing::error!(batch = ?e.batch, index = ?e.index, reason = ?e.reason, "task panicked");
            }
            EventKind::SubscriberOverflow | EventKind::SubscriberPanicked => {
                tracing::warn!(kind = ?e.kind, reason = ?e.reason, "subscriber issue");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}
