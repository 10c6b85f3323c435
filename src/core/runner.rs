//! # Run a single admitted task.
//!
//! Invokes one [`Task`](crate::Task) and turns whatever happens into a
//! [`Completion`] the batch coordinator can record:
//!
//! ```text
//! Ok(value)   ──► Completion { outcome: Ok(Settled::Fulfilled(value)) }
//! Err(reason) ──► Completion { outcome: Ok(Settled::Rejected(reason)) }
//! panic       ──► Completion { outcome: Err(panic message) }
//! ```
//!
//! ## Rules
//! - The task is invoked **inside** the returned future, so a panic raised while
//!   building the task's future is caught the same way as one raised while polling it.
//! - The submission index travels with the outcome; it is the only correlation key.

use futures::FutureExt;

use crate::subscribers::panic_message;
use crate::tasks::{Settled, TaskRef};

/// Outcome of one task, tagged with its submission index.
pub(crate) struct Completion<T, E> {
    /// Submission index of the task.
    pub index: usize,
    /// Settled result, or the panic message if the task body panicked.
    pub outcome: Result<Settled<T, E>, String>,
}

/// Invokes `task` and waits for it to settle.
pub(crate) async fn run_task<T, E>(index: usize, task: TaskRef<T, E>) -> Completion<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    let fut = async move { task.invoke().await };
    let outcome = match std::panic::AssertUnwindSafe(fut).catch_unwind().await {
        Ok(res) => Ok(Settled::from(res)),
        Err(panic_err) => Err(panic_message(&*panic_err)),
    };
    Completion { index, outcome }
}
