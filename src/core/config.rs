//! # Scheduler configuration.
//!
//! Provides [`Config`], the centralized settings for a [`Scheduler`](crate::Scheduler)
//! and for the one-shot [`run_bounded`](crate::run_bounded) entry point.
//!
//! ## Sentinel values
//! - `limit = 0` → **invalid**; every batch is rejected with [`RuntimeError::InvalidLimit`]
//!   before any task is admitted (a zero cap would otherwise never admit anything).
//! - `bus_capacity = 0` → clamped to 1.

use crate::error::RuntimeError;

/// Default concurrency limit.
pub const DEFAULT_LIMIT: usize = 2;

/// Default event bus capacity.
pub const DEFAULT_BUS_CAPACITY: usize = 1024;

/// Configuration for the scheduler runtime.
///
/// ## Field semantics
/// - `limit`: Maximum number of tasks of one batch running at the same time (`>= 1`)
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by Bus)
///
/// ## Notes
/// All fields are public for flexibility. Prefer using helper accessors to avoid
/// sprinkling sentinel checks across the codebase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of tasks to run concurrently within one batch.
    ///
    /// Fixed for the lifetime of a batch. The cap is per batch: two batches
    /// running on the same scheduler do not share it.
    pub limit: usize,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Receivers that lag behind more than `bus_capacity` messages will
    /// receive `Lagged` and skip older items.
    pub bus_capacity: usize,
}

impl Config {
    /// Returns a default configuration with the given concurrency limit.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Returns the validated concurrency limit.
    ///
    /// # Errors
    /// [`RuntimeError::InvalidLimit`] when `limit == 0`.
    ///
    /// # Example
    /// ```
    /// use boundvisor::{Config, RuntimeError};
    ///
    /// assert_eq!(Config::with_limit(3).concurrency_limit(), Ok(3));
    /// assert_eq!(
    ///     Config::with_limit(0).concurrency_limit(),
    ///     Err(RuntimeError::InvalidLimit { limit: 0 }),
    /// );
    /// ```
    #[inline]
    pub fn concurrency_limit(&self) -> Result<usize, RuntimeError> {
        match self.limit {
            0 => Err(RuntimeError::InvalidLimit { limit: 0 }),
            n => Ok(n),
        }
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `limit = 2`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            bus_capacity: DEFAULT_BUS_CAPACITY,
        }
    }
}
