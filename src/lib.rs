//! # boundvisor
//!
//! **Boundvisor** runs a fixed list of async tasks with bounded concurrency.
//!
//! Given an ordered list of tasks and a concurrency limit, it starts at most
//! `limit` tasks at once, starts the next queued task as soon as a running one
//! settles, and returns one result per task, at the task's submission index,
//! regardless of completion order. A failing task is recorded as data
//! ([`Settled::Rejected`]) and never aborts its siblings.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐
//!     │ task #0  │ │ task #1  │ │ task #2  │ │ task #3  │   Vec<TaskRef<T, E>>
//!     └────┬─────┘ └────┬─────┘ └────┬─────┘ └────┬─────┘
//!          ▼            ▼            ▼            ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Batch (single coordinator, one per call)                   │
//! │  - PendingQueue   FIFO backlog, indices assigned in order   │
//! │  - AdmissionGate  active count ≤ limit                      │
//! │  - ResultLedger   write-once slot per submission index      │
//! └──────┬───────────────────────────────────────────┬──────────┘
//!        │ admit (JoinSet::spawn)                    ▲ settle (join_next)
//!        ▼                                           │
//!     ┌──────────────────────────────────────────────┴──┐
//!     │ runner::run_task  (invoke, catch panic, tag idx) │
//!     └──────────────────────────────────────────────────┘
//!
//!  Batch ── publish(Event) ──► Bus ──► listener ──► SubscriberSet ──► Subscribe::on_event
//! ```
//!
//! ### Lifecycle
//! ```text
//! run(tasks)
//!   ├─► limit == 0 ─► Err(InvalidLimit)          (before anything starts)
//!   ├─► tasks empty ─► Ok(vec![])                (no admission)
//!   ├─► publish BatchStarted
//!   ├─► try_admit_next()                          (fill capacity)
//!   └─► loop until every slot is written {
//!         completion = join_next()
//!         ├─► gate.release()
//!         ├─► ledger.record(index, Fulfilled | Rejected)
//!         ├─► publish TaskFulfilled | TaskRejected
//!         └─► try_admit_next()                    (backfill)
//!       }
//!   └─► publish BatchCompleted ─► Ok(results in submission order)
//! ```
//!
//! ## Features
//! | Area              | Description                                               | Key types / traits                   |
//! |-------------------|-----------------------------------------------------------|--------------------------------------|
//! | **Entry points**  | One-shot or configured bounded batches.                   | [`run_bounded`], [`Scheduler`]       |
//! | **Tasks**         | Deferred one-shot operations returning `Result<T, E>`.    | [`Task`], [`TaskFn`], [`TaskRef`]    |
//! | **Results**       | Per-task fulfilled/rejected outcome.                      | [`Settled`], [`SettleStatus`]        |
//! | **Errors**        | Configuration and invariant failures of a whole batch.    | [`RuntimeError`]                     |
//! | **Subscriber API**| Hook into batch/task events (logging, metrics).           | [`Subscribe`], [`Event`]             |
//! | **Configuration** | Concurrency limit and bus capacity.                       | [`Config`]                           |
//!
//! ## Optional features
//! - `logging`: exports a built-in [`Subscribe`] implementation, `LogWriter`,
//!   that renders events through `tracing`.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use boundvisor::{run_bounded, SettleStatus};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), boundvisor::RuntimeError> {
//!     let jobs = [(1u64, 40u64), (2, 10), (3, 30)];
//!
//!     let results = run_bounded(
//!         jobs.map(|(id, ms)| move || async move {
//!             tokio::time::sleep(Duration::from_millis(ms)).await;
//!             if id == 2 { Err(format!("job {id} failed")) } else { Ok(id) }
//!         }),
//!         2,
//!     )
//!     .await?;
//!
//!     let statuses: Vec<_> = results.iter().map(|r| r.status()).collect();
//!     assert_eq!(
//!         statuses,
//!         [SettleStatus::Fulfilled, SettleStatus::Rejected, SettleStatus::Fulfilled]
//!     );
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use crate::core::{Config, DEFAULT_BUS_CAPACITY, DEFAULT_LIMIT, Scheduler, SchedulerBuilder, run_bounded};
pub use error::RuntimeError;
pub use events::{Bus, Event, EventKind};
pub use subscribers::{Subscribe, SubscriberSet};
pub use tasks::{BoxTaskFuture, SettleStatus, Settled, Task, TaskFn, TaskRef};

// Optional: expose a built-in tracing subscriber.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
