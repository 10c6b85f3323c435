//! End-to-end batch scenarios against the public API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use boundvisor::{RuntimeError, SettleStatus, Settled, TaskFn, TaskRef, run_bounded};
use tokio::time::{Instant, sleep};

/// Tracks tasks currently inside their body and the highest value observed.
#[derive(Default)]
struct Probe {
    active: AtomicUsize,
    peak: AtomicUsize,
    started: Mutex<Vec<usize>>,
}

impl Probe {
    fn enter(&self, index: usize) {
        self.started.lock().unwrap().push(index);
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }

    fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn started(&self) -> Vec<usize> {
        self.started.lock().unwrap().clone()
    }
}

fn delayed_ok(probe: &Arc<Probe>, index: usize, value: &str, ms: u64) -> TaskRef<String, String> {
    let probe = Arc::clone(probe);
    let value = value.to_string();
    TaskFn::boxed(move || async move {
        probe.enter(index);
        sleep(Duration::from_millis(ms)).await;
        probe.leave();
        Ok(value)
    })
}

fn delayed_err(probe: &Arc<Probe>, index: usize, reason: &str, ms: u64) -> TaskRef<String, String> {
    let probe = Arc::clone(probe);
    let reason = reason.to_string();
    TaskFn::boxed(move || async move {
        probe.enter(index);
        sleep(Duration::from_millis(ms)).await;
        probe.leave();
        Err(reason)
    })
}

/// Paused-clock timers fire on millisecond ticks; allow a small rounding margin.
fn assert_elapsed(started: Instant, ms: u64) {
    let elapsed = started.elapsed();
    let expected = Duration::from_millis(ms);
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(20),
        "elapsed {elapsed:?}, expected about {expected:?}"
    );
}

async fn run(tasks: Vec<TaskRef<String, String>>, limit: usize) -> Result<Vec<Settled<String, String>>, RuntimeError> {
    boundvisor::Scheduler::new(boundvisor::Config::with_limit(limit))
        .run(tasks)
        .await
}

#[tokio::test(start_paused = true)]
async fn six_tasks_keep_submission_order() {
    let probe = Arc::new(Probe::default());
    let delays = [1000, 500, 2000, 1500, 300, 800];
    let tasks = delays
        .iter()
        .enumerate()
        .map(|(i, ms)| delayed_ok(&probe, i, &format!("Task {}", i + 1), *ms))
        .collect();

    let results = run(tasks, 2).await.unwrap();

    assert_eq!(results.len(), 6);
    assert!(results.iter().all(Settled::is_fulfilled));
    let values: Vec<_> = results.iter().filter_map(|r| r.value().cloned()).collect();
    assert_eq!(values, ["Task 1", "Task 2", "Task 3", "Task 4", "Task 5", "Task 6"]);
    assert_eq!(probe.peak(), 2);
    assert_eq!(probe.started(), vec![0, 1, 2, 3, 4, 5]);
}

#[tokio::test(start_paused = true)]
async fn mixed_outcomes_stay_in_place() {
    let probe = Arc::new(Probe::default());
    let tasks = vec![
        delayed_ok(&probe, 0, "Task 1", 1000),
        delayed_err(&probe, 1, "Error 1", 500),
        delayed_ok(&probe, 2, "Task 2", 2000),
        delayed_err(&probe, 3, "Error 2", 1500),
        delayed_ok(&probe, 4, "Task 3", 300),
        delayed_ok(&probe, 5, "Task 4", 800),
    ];

    let results = run(tasks, 2).await.unwrap();

    let statuses: Vec<_> = results.iter().map(Settled::status).collect();
    assert_eq!(
        statuses,
        [
            SettleStatus::Fulfilled,
            SettleStatus::Rejected,
            SettleStatus::Fulfilled,
            SettleStatus::Rejected,
            SettleStatus::Fulfilled,
            SettleStatus::Fulfilled,
        ]
    );
    assert_eq!(results[1].reason().map(String::as_str), Some("Error 1"));
    assert_eq!(results[3].reason().map(String::as_str), Some("Error 2"));
    assert_eq!(results[4].value().map(String::as_str), Some("Task 3"));
}

#[tokio::test(start_paused = true)]
async fn empty_batch_returns_immediately() {
    let started = Instant::now();
    let results = run(Vec::new(), 2).await.unwrap();
    assert!(results.is_empty());
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn single_task() {
    let probe = Arc::new(Probe::default());
    let results = run(vec![delayed_ok(&probe, 0, "Single Task", 1000)], 2).await.unwrap();
    assert_eq!(results, vec![Settled::Fulfilled("Single Task".to_string())]);
}

#[tokio::test(start_paused = true)]
async fn limit_one_runs_strictly_sequentially() {
    let probe = Arc::new(Probe::default());
    let tasks = vec![
        delayed_ok(&probe, 0, "a", 300),
        delayed_ok(&probe, 1, "b", 100),
        delayed_ok(&probe, 2, "c", 200),
    ];

    let started = Instant::now();
    let results = run(tasks, 1).await.unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(probe.peak(), 1);
    assert_eq!(probe.started(), vec![0, 1, 2]);
    // Sequential: total time is the sum of the delays.
    assert_elapsed(started, 600);
}

#[tokio::test(start_paused = true)]
async fn limit_above_len_admits_everything_at_once() {
    let probe = Arc::new(Probe::default());
    let tasks = (0..4)
        .map(|i| delayed_ok(&probe, i, "x", 1000))
        .collect();

    let started = Instant::now();
    let results = run(tasks, 10).await.unwrap();

    assert_eq!(results.len(), 4);
    assert_eq!(probe.peak(), 4);
    assert_elapsed(started, 1000);
}

#[tokio::test(start_paused = true)]
async fn freed_slot_is_backfilled_without_waiting_for_a_round() {
    let probe = Arc::new(Probe::default());
    // Task 1 is short; task 2 must start as soon as it finishes, while task 0 still runs.
    let tasks = vec![
        delayed_ok(&probe, 0, "long", 1000),
        delayed_ok(&probe, 1, "short", 100),
        delayed_ok(&probe, 2, "next", 100),
    ];

    let started = Instant::now();
    run(tasks, 2).await.unwrap();
    assert_elapsed(started, 1000);
}

#[tokio::test]
async fn zero_limit_is_a_configuration_error() {
    let invoked = Arc::new(AtomicUsize::new(0));
    let i = invoked.clone();
    let res = run_bounded(
        [move || async move {
            i.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(())
        }],
        0,
    )
    .await;

    assert_eq!(res, Err(RuntimeError::InvalidLimit { limit: 0 }));
    assert_eq!(invoked.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn zero_limit_wins_over_empty_input() {
    let res = run(Vec::new(), 0).await;
    assert!(matches!(res, Err(err) if err.is_config()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn cap_holds_on_multi_thread_runtime() {
    let probe = Arc::new(Probe::default());
    let tasks = (0..40)
        .map(|i| {
            let probe = Arc::clone(&probe);
            move || async move {
                probe.enter(i);
                tokio::time::sleep(Duration::from_millis(2 + (i as u64 % 5))).await;
                probe.leave();
                if i % 7 == 0 { Err(i) } else { Ok(i * 10) }
            }
        })
        .collect::<Vec<_>>();

    let results = run_bounded(tasks, 3).await.unwrap();

    assert_eq!(results.len(), 40);
    assert!(probe.peak() <= 3);
    for (i, r) in results.into_iter().enumerate() {
        if i % 7 == 0 {
            assert_eq!(r, Settled::Rejected(i));
        } else {
            assert_eq!(r, Settled::Fulfilled(i * 10));
        }
    }
}

#[tokio::test]
async fn panicking_task_fails_the_batch() {
    let explode = true;
    let res = run_bounded(
        (0..3).map(move |i| move || async move {
            if explode && i == 1 {
                panic!("task body exploded");
            }
            Ok::<_, ()>(i)
        }),
        2,
    )
    .await;

    assert_eq!(
        res,
        Err(RuntimeError::TaskPanicked {
            index: 1,
            message: "task body exploded".to_string(),
        })
    );
}
