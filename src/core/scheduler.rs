//! # Scheduler: runs bounded batches and publishes their lifecycle.
//!
//! The [`Scheduler`] owns the configuration, the event bus and (optionally) a
//! [`SubscriberSet`] fed by a background listener. Each call to
//! [`Scheduler::run`] creates an independent batch that lives only for that call.
//!
//! ## High-level architecture
//! ```text
//! Scheduler::run(Vec<TaskRef>)
//!   ├─► Config::concurrency_limit()    (fail fast: InvalidLimit)
//!   ├─► empty input ─► Ok(vec![])      (no admission, no events)
//!   └─► Batch::drive()
//!          ├─► AdmissionGate / PendingQueue / ResultLedger
//!          └─► publish(Event) ──► Bus ──► subscriber_listener ──► SubscriberSet::emit
//!                                    └──► Scheduler::subscribe() receivers
//! ```
//!
//! ## Example
//! ```rust
//! use boundvisor::{Config, Scheduler, Settled};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sched = Scheduler::new(Config::with_limit(2));
//!
//!     let results = sched
//!         .run_fns((1..=4).map(|i| move || async move {
//!             if i % 2 == 0 { Err(format!("Error {i}")) } else { Ok(i) }
//!         }))
//!         .await?;
//!
//!     assert_eq!(results.len(), 4);
//!     assert_eq!(results[0], Settled::Fulfilled(1));
//!     assert_eq!(results[1], Settled::Rejected("Error 2".to_string()));
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Notify, broadcast};
use tokio::task::JoinHandle;

use crate::{
    core::{Config, batch::run_batch, builder::SchedulerBuilder},
    error::RuntimeError,
    events::{Bus, Event},
    subscribers::SubscriberSet,
    tasks::{Settled, TaskFn, TaskRef},
};

/// Background forwarder from the bus to the subscriber set.
pub(crate) struct Listener {
    pub(crate) subs: Arc<SubscriberSet>,
    pub(crate) stop: Arc<Notify>,
    pub(crate) handle: JoinHandle<()>,
}

impl Listener {
    /// Subscribes to `bus` and forwards every event to `subs` until stopped.
    ///
    /// On stop, events already buffered in the receiver are forwarded before exiting.
    pub(crate) fn spawn(bus: &Bus, subs: Arc<SubscriberSet>) -> Self {
        let mut rx = bus.subscribe();
        let stop = Arc::new(Notify::new());
        let set = Arc::clone(&subs);
        let stopped = Arc::clone(&stop);

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    msg = rx.recv() => match msg {
                        Ok(ev) => set.emit(&ev),
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "subscriber listener lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                    _ = stopped.notified() => {
                        while let Ok(ev) = rx.try_recv() {
                            set.emit(&ev);
                        }
                        break;
                    }
                }
            }
        });

        Self { subs, stop, handle }
    }
}

/// Runs batches of tasks under a fixed concurrency limit.
pub struct Scheduler {
    cfg: Config,
    bus: Bus,
    listener: Option<Listener>,
}

impl Scheduler {
    /// Creates a scheduler without subscribers.
    ///
    /// Events are still published on the bus and can be observed through
    /// [`Scheduler::subscribe`]. Does not require a running Tokio runtime.
    pub fn new(cfg: Config) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        Self::new_internal(cfg, bus, None)
    }

    /// Returns a builder for a scheduler with subscribers.
    pub fn builder(cfg: Config) -> SchedulerBuilder {
        SchedulerBuilder::new(cfg)
    }

    pub(crate) fn new_internal(cfg: Config, bus: Bus, listener: Option<Listener>) -> Self {
        Self { cfg, bus, listener }
    }

    /// Returns the scheduler configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Creates a raw receiver for subsequent events of every batch.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Runs `tasks` with at most `limit` of them active at any instant.
    ///
    /// Returns one [`Settled`] per task, at the task's submission index.
    ///
    /// # Errors
    /// - [`RuntimeError::InvalidLimit`] before any task is started when `limit == 0`.
    /// - [`RuntimeError::TaskPanicked`] when a task body panics (after the
    ///   tasks already running have finished).
    /// - Invariant violations ([`RuntimeError::SlotAlreadySettled`], ...), which
    ///   indicate a defect.
    ///
    /// Task failures are **not** errors: they are returned as [`Settled::Rejected`].
    pub async fn run<T, E>(&self, tasks: Vec<TaskRef<T, E>>) -> Result<Vec<Settled<T, E>>, RuntimeError>
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        let limit = self.cfg.concurrency_limit()?;
        run_batch(tasks, limit, Some(self.bus.clone())).await
    }

    /// Convenience over [`Scheduler::run`] for closures returning futures.
    pub async fn run_fns<I, F, Fut, T, E>(&self, tasks: I) -> Result<Vec<Settled<T, E>>, RuntimeError>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        self.run(tasks.into_iter().map(TaskFn::boxed).collect()).await
    }

    /// Stops the subscriber listener and waits until subscribers processed every
    /// event already published.
    pub async fn shutdown(mut self) {
        let Some(listener) = self.listener.take() else {
            return;
        };
        listener.stop.notify_one();
        if let Err(err) = listener.handle.await {
            tracing::warn!(error = %err, "subscriber listener ended abnormally");
        }
        match Arc::try_unwrap(listener.subs) {
            Ok(set) => set.shutdown().await,
            Err(_) => tracing::warn!("subscriber set still shared; skipping flush"),
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.take() {
            listener.handle.abort();
        }
    }
}

/// Runs `tasks` with at most `limit` of them active at any instant.
///
/// One-shot form of [`Scheduler::run_fns`] without events or subscribers.
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use boundvisor::{run_bounded, Settled};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let delays = [30u64, 10, 20];
///     let results = run_bounded(
///         delays.map(|ms| move || async move {
///             tokio::time::sleep(Duration::from_millis(ms)).await;
///             Ok::<_, String>(ms)
///         }),
///         2,
///     )
///     .await
///     .unwrap();
///
///     // Submission order, not completion order.
///     assert_eq!(
///         results,
///         vec![Settled::Fulfilled(30), Settled::Fulfilled(10), Settled::Fulfilled(20)]
///     );
/// }
/// ```
///
/// # Errors
/// Same as [`Scheduler::run`].
pub async fn run_bounded<I, F, Fut, T, E>(tasks: I, limit: usize) -> Result<Vec<Settled<T, E>>, RuntimeError>
where
    I: IntoIterator<Item = F>,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    let limit = Config::with_limit(limit).concurrency_limit()?;
    let tasks = tasks.into_iter().map(TaskFn::boxed).collect();
    run_batch(tasks, limit, None).await
}
