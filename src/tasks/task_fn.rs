//! # Function-backed task (`TaskFn`)
//!
//! [`TaskFn`] wraps a closure `F: FnOnce() -> Fut`. The closure is called when
//! the task is admitted and the returned future is driven to completion.
//!
//! Since the closure is `FnOnce`, it may move captured state into its future;
//! no `Arc`/`Mutex` is required unless the state is shared between tasks.
//!
//! ## Example
//! ```rust
//! use boundvisor::{TaskFn, TaskRef};
//!
//! let payload = String::from("Task 1");
//! let t: TaskRef<String, String> = TaskFn::boxed(move || async move {
//!     Ok::<_, String>(payload)
//! });
//! # let _ = t;
//! ```

use std::future::Future;

use crate::tasks::task::{BoxTaskFuture, Task, TaskRef};

/// Function-backed task implementation.
#[derive(Debug)]
pub struct TaskFn<F> {
    f: F,
}

impl<F> TaskFn<F> {
    /// Creates a new function-backed task.
    ///
    /// Prefer [`TaskFn::boxed`] when you immediately need a [`TaskRef`].
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the task and returns it as an owned handle (`Box<dyn Task>`).
    pub fn boxed<T, E, Fut>(f: F) -> TaskRef<T, E>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Box::new(Self::new(f))
    }
}

impl<F, Fut, T, E> Task<T, E> for TaskFn<F>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    fn invoke(self: Box<Self>) -> BoxTaskFuture<T, E> {
        Box::pin((self.f)())
    }
}
