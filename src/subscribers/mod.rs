//! # Event subscribers for the boundvisor runtime.
//!
//! This module provides the [`Subscribe`] trait and the [`SubscriberSet`] fan-out
//! used by the [`Scheduler`](crate::Scheduler) to deliver [`Event`](crate::Event)s.
//!
//! ## Architecture
//! ```text
//! Batch ── publish(Event) ──► Bus ──► subscriber_listener ──► SubscriberSet::emit
//!                                                              │
//!                                                    ┌─────────┼─────────┐
//!                                                    ▼         ▼         ▼
//!                                                LogWriter  Metrics   Custom
//! ```
//!
//! ## Built-in subscribers
//! - `LogWriter` (feature `logging`): renders events through `tracing`.

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub(crate) use set::panic_message;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
