//! Runtime core: admission, ordering and the public entry points.
//!
//! The public API from this module is [`Scheduler`], [`SchedulerBuilder`],
//! [`Config`] and [`run_bounded`].
//!
//! Internal modules:
//! - [`gate`]: admission gate (active count bounded by the limit);
//! - [`queue`]: FIFO backlog of not-yet-started tasks;
//! - [`ledger`]: write-once result slots addressed by submission index;
//! - [`runner`]: invokes one task and catches panics;
//! - [`batch`]: single coordinator driving gate, queue and ledger;
//! - [`scheduler`]: configuration, event bus, subscriber listener.

mod batch;
mod builder;
mod config;
mod gate;
mod ledger;
mod queue;
mod runner;
mod scheduler;

pub use builder::SchedulerBuilder;
pub use config::{Config, DEFAULT_BUS_CAPACITY, DEFAULT_LIMIT};
pub use scheduler::{Scheduler, run_bounded};
