//! Runtime events: types and broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: batch coordinators (`core::batch`), `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: the scheduler's subscriber listener (fans out to `SubscriberSet`)
//!   and any raw receiver obtained through `Scheduler::subscribe`.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
