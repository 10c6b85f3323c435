//! # Batch: one bounded run over a fixed task list.
//!
//! A [`Batch`] owns the three pieces of state of one invocation and is driven by
//! a single coordinating future, so every read and write of that state is
//! serialized without a lock:
//!
//! ```text
//! Batch::drive()
//!   ├─► publish BatchStarted
//!   ├─► try_admit_next()                  (fill initial capacity)
//!   │     while gate.has_capacity() && queue.dequeue_head():
//!   │        gate.admit() ─► publish TaskAdmitted ─► JoinSet::spawn(run_task)
//!   │
//!   └─► loop until ledger.is_complete():
//!         JoinSet::join_next() ─► on_task_settled(completion)
//!                                   ├─► gate.release()
//!                                   ├─► ledger.record(index, settled)
//!                                   ├─► publish TaskFulfilled / TaskRejected
//!                                   └─► try_admit_next()  (backfill)
//!
//! Completion: ledger complete ─► publish BatchCompleted ─► ordered results
//! Failure:    runtime error   ─► stop admitting
//!                             ─► wait for in-flight tasks (no cancellation)
//!                             ─► publish BatchFailed ─► Err(RuntimeError)
//! ```
//!
//! ## Rules
//! - Start order is FIFO; completion order is whatever the tasks do.
//! - Placement is by submission index, never by completion time.
//! - Task failures are recorded as [`Settled::Rejected`] and never stop the batch.
//! - The results are released only when every slot is written.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use tokio::task::JoinSet;

use crate::{
    core::{
        gate::AdmissionGate,
        ledger::ResultLedger,
        queue::PendingQueue,
        runner::{Completion, run_task},
    },
    error::RuntimeError,
    events::{Bus, Event, EventKind},
    tasks::{Settled, TaskRef},
};

/// Process-wide batch id counter.
static BATCH_SEQ: AtomicU64 = AtomicU64::new(0);

/// Validates the limit, short-circuits empty input, then drives a [`Batch`].
///
/// `bus` is optional: the free [`run_bounded`](crate::run_bounded) entry point
/// runs without observability.
pub(crate) async fn run_batch<T, E>(
    tasks: Vec<TaskRef<T, E>>,
    limit: usize,
    bus: Option<Bus>,
) -> Result<Vec<Settled<T, E>>, RuntimeError>
where
    T: Send + 'static,
    E: Send + 'static,
{
    if limit == 0 {
        return Err(RuntimeError::InvalidLimit { limit });
    }
    if tasks.is_empty() {
        return Ok(Vec::new());
    }
    Batch::new(tasks, limit, bus).drive().await
}

/// State of one in-flight batch.
pub(crate) struct Batch<T, E> {
    id: u64,
    gate: AdmissionGate,
    queue: PendingQueue<T, E>,
    ledger: ResultLedger<T, E>,
    running: JoinSet<Completion<T, E>>,
    bus: Option<Bus>,
}

impl<T, E> Batch<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Creates a batch; `limit` must already be validated.
    pub(crate) fn new(tasks: Vec<TaskRef<T, E>>, limit: usize, bus: Option<Bus>) -> Self {
        let total = tasks.len();
        Self {
            id: BATCH_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            gate: AdmissionGate::new(limit),
            queue: PendingQueue::enqueue_all(tasks),
            ledger: ResultLedger::new(total),
            running: JoinSet::new(),
            bus,
        }
    }

    /// Runs the batch to completion and returns the results in submission order.
    pub(crate) async fn drive(mut self) -> Result<Vec<Settled<T, E>>, RuntimeError> {
        let total = self.ledger.total();
        self.publish(
            Event::new(EventKind::BatchStarted)
                .with_total(total)
                .with_limit(self.gate.limit()),
        );
        tracing::debug!(batch = self.id, total, limit = self.gate.limit(), "batch started");

        if let Err(err) = self.try_admit_next() {
            return self.abort(err).await;
        }

        while !self.ledger.is_complete() {
            let step = match self.running.join_next().await {
                Some(Ok(completion)) => self.on_task_settled(completion),
                Some(Err(join_err)) => Err(RuntimeError::WorkerLost {
                    reason: join_err.to_string(),
                }),
                None => Err(RuntimeError::Incomplete {
                    settled: self.ledger.settled(),
                    total,
                }),
            };
            if let Err(err) = step {
                return self.abort(err).await;
            }
        }

        self.publish(Event::new(EventKind::BatchCompleted).with_total(total));
        tracing::debug!(batch = self.id, total, "batch completed");
        self.ledger.into_results()
    }

    /// Admits queued tasks while the gate has capacity.
    fn try_admit_next(&mut self) -> Result<(), RuntimeError> {
        while self.gate.has_capacity() {
            let Some((index, task)) = self.queue.dequeue_head() else {
                break;
            };
            let active = self.gate.admit()?;
            self.publish(
                Event::new(EventKind::TaskAdmitted)
                    .with_index(index)
                    .with_active(active),
            );
            tracing::trace!(batch = self.id, index, active, pending = self.queue.len(), "task admitted");
            self.running.spawn(run_task(index, task));
        }
        Ok(())
    }

    /// Records one settlement and backfills the freed slot.
    fn on_task_settled(&mut self, completion: Completion<T, E>) -> Result<(), RuntimeError> {
        let Completion { index, outcome } = completion;
        let active = self.gate.release()?;

        match outcome {
            Ok(settled) => {
                let kind = match settled {
                    Settled::Fulfilled(_) => EventKind::TaskFulfilled,
                    Settled::Rejected(_) => EventKind::TaskRejected,
                };
                self.ledger.record(index, settled)?;
                self.publish(Event::new(kind).with_index(index).with_active(active));
            }
            Err(message) => {
                self.publish(
                    Event::new(EventKind::TaskPanicked)
                        .with_index(index)
                        .with_active(active)
                        .with_reason(message.as_str()),
                );
                return Err(RuntimeError::TaskPanicked { index, message });
            }
        }

        self.try_admit_next()
    }

    /// Stops admission, waits for in-flight tasks, and reports `err`.
    async fn abort(mut self, err: RuntimeError) -> Result<Vec<Settled<T, E>>, RuntimeError> {
        let in_flight = self.gate.active();
        tracing::error!(
            batch = self.id,
            error = %err,
            label = err.as_label(),
            in_flight,
            never_started = self.queue.len(),
            "batch failed; waiting for in-flight tasks"
        );
        while self.running.join_next().await.is_some() {}

        self.publish(Event::new(EventKind::BatchFailed).with_reason(err.as_label()));
        Err(err)
    }

    /// Publishes an event stamped with this batch's id.
    fn publish(&self, ev: Event) {
        if let Some(bus) = &self.bus {
            bus.publish(ev.with_batch(self.id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::TaskFn;

    fn ok(v: u32) -> TaskRef<u32, String> {
        TaskFn::boxed(move || async move { Ok(v) })
    }

    #[tokio::test]
    async fn zero_limit_is_rejected_before_admission() {
        let res = run_batch(vec![ok(1)], 0, None).await;
        assert_eq!(res, Err(RuntimeError::InvalidLimit { limit: 0 }));
    }

    #[tokio::test]
    async fn empty_batch_publishes_nothing() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        let res = run_batch::<u32, String>(Vec::new(), 2, Some(bus)).await;
        assert_eq!(res, Ok(Vec::new()));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn initial_admission_fills_capacity_in_order() {
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let res = run_batch(vec![ok(1), ok(2), ok(3)], 2, Some(bus)).await.unwrap();
        assert_eq!(
            res,
            vec![Settled::Fulfilled(1), Settled::Fulfilled(2), Settled::Fulfilled(3)]
        );

        let mut events = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            events.push(ev);
        }
        assert_eq!(events.first().map(|e| e.kind), Some(EventKind::BatchStarted));
        assert_eq!(events.last().map(|e| e.kind), Some(EventKind::BatchCompleted));

        // The first two admissions happen before any settlement.
        let kinds: Vec<_> = events.iter().map(|e| (e.kind, e.index)).collect();
        assert_eq!(kinds[1], (EventKind::TaskAdmitted, Some(0)));
        assert_eq!(kinds[2], (EventKind::TaskAdmitted, Some(1)));
        assert!(events.iter().all(|e| e.batch == events[0].batch));
    }

    #[tokio::test]
    async fn panic_aborts_after_in_flight_tasks_finish() {
        let finished = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
        let f = finished.clone();
        let explode = true;

        let tasks: Vec<TaskRef<u32, String>> = vec![
            TaskFn::boxed(move || async move {
                tokio::task::yield_now().await;
                if explode {
                    panic!("boom");
                }
                Ok(0)
            }),
            TaskFn::boxed(move || async move {
                for _ in 0..5 {
                    tokio::task::yield_now().await;
                }
                f.store(true, std::sync::atomic::Ordering::SeqCst);
                Ok(1)
            }),
            ok(2),
        ];

        let res = run_batch(tasks, 2, None).await;
        assert_eq!(
            res,
            Err(RuntimeError::TaskPanicked {
                index: 0,
                message: "boom".to_string()
            })
        );
        assert!(finished.load(std::sync::atomic::Ordering::SeqCst));
    }
}
