//! # Task abstraction.
//!
//! This module defines the [`Task`] trait: a deferred, one-shot async operation
//! producing either a value `T` or a failure `E`.
//!
//! A task has no identity beyond its submission index inside a batch. The
//! scheduler owns the invocation; [`Task::invoke`] consumes the boxed task, so
//! a task can be started at most once.

use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`Task::invoke`].
pub type BoxTaskFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'static>>;

/// Owned handle to a task, as submitted to a batch.
pub type TaskRef<T, E> = Box<dyn Task<T, E>>;

/// # Deferred, one-shot unit of work.
///
/// # Example
/// ```
/// use boundvisor::{BoxTaskFuture, Task};
///
/// struct Fetch(u32);
///
/// impl Task<u32, String> for Fetch {
///     fn invoke(self: Box<Self>) -> BoxTaskFuture<u32, String> {
///         Box::pin(async move {
///             if self.0 == 0 {
///                 return Err("empty".to_string());
///             }
///             Ok(self.0 * 2)
///         })
///     }
/// }
/// ```
pub trait Task<T, E>: Send + 'static {
    /// Starts the task, returning the future that settles it.
    ///
    /// Called exactly once, by the scheduler, when the task is admitted.
    fn invoke(self: Box<Self>) -> BoxTaskFuture<T, E>;
}
