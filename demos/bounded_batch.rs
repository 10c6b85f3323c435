//! # Example: bounded_batch
//!
//! Runs six tasks with a concurrency limit of 2 under a [`Scheduler`] with the
//! built-in [`LogWriter`] subscriber.
//!
//! Demonstrates how to:
//! - Configure the limit through [`Config`].
//! - Submit closures with [`Scheduler::run_fns`].
//! - Read fulfilled values and rejection reasons back in submission order.
//!
//! ## Flow
//! ```text
//! Scheduler::run_fns(tasks)
//!     ├─► publish(BatchStarted)
//!     ├─► publish(TaskAdmitted #0, #1)
//!     ├─► ... each settlement backfills the next queued task
//!     └─► publish(BatchCompleted)
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example bounded_batch --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use boundvisor::{Config, LogWriter, Scheduler, Settled};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let sched = Scheduler::builder(Config::with_limit(2))
        .with_subscriber(Arc::new(LogWriter))
        .build();

    let plan: [(&str, u64, bool); 6] = [
        ("Task 1", 1000, true),
        ("Error 1", 500, false),
        ("Task 2", 2000, true),
        ("Error 2", 1500, false),
        ("Task 3", 300, true),
        ("Task 4", 800, true),
    ];

    let results = sched
        .run_fns(plan.map(|(payload, ms, ok)| move || async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            if ok { Ok(payload) } else { Err(payload) }
        }))
        .await?;

    for (i, r) in results.iter().enumerate() {
        match r {
            Settled::Fulfilled(v) => println!("#{i} fulfilled: {v}"),
            Settled::Rejected(e) => println!("#{i} rejected: {e}"),
        }
    }

    sched.shutdown().await;
    Ok(())
}
