//! # Task abstractions and settled results.
//!
//! This module provides the task-related types:
//! - [`Task`] - trait for a deferred one-shot async operation
//! - [`TaskFn`] - closure-backed task implementation
//! - [`TaskRef`] - owned task handle (`Box<dyn Task<T, E>>`)
//! - [`Settled`] - fulfilled/rejected outcome recorded per task

mod settled;
mod task;
mod task_fn;

pub use settled::{SettleStatus, Settled};
pub use task::{BoxTaskFuture, Task, TaskRef};
pub use task_fn::TaskFn;
