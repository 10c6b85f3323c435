//! # Settled results.
//!
//! [`Settled`] is the per-task outcome recorded in the batch result: either the
//! task's value or its failure reason. Failures are data here, they never abort
//! the batch.

use std::fmt;

/// Outcome status of a settled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettleStatus {
    /// The task produced a value.
    Fulfilled,
    /// The task produced a failure.
    Rejected,
}

impl SettleStatus {
    /// Returns a short stable label for logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SettleStatus::Fulfilled => "fulfilled",
            SettleStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for SettleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Settled outcome of one task.
///
/// # Example
/// ```
/// use boundvisor::{Settled, SettleStatus};
///
/// let ok: Settled<&str, &str> = Ok("Task 1").into();
/// let err: Settled<&str, &str> = Err("Error 1").into();
///
/// assert_eq!(ok.status(), SettleStatus::Fulfilled);
/// assert_eq!(ok.value(), Some(&"Task 1"));
/// assert_eq!(err.reason(), Some(&"Error 1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled<T, E> {
    /// The task succeeded with a value.
    Fulfilled(T),
    /// The task failed with a reason.
    Rejected(E),
}

impl<T, E> Settled<T, E> {
    /// Returns the outcome status.
    pub fn status(&self) -> SettleStatus {
        match self {
            Settled::Fulfilled(_) => SettleStatus::Fulfilled,
            Settled::Rejected(_) => SettleStatus::Rejected,
        }
    }

    #[inline]
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Settled::Fulfilled(_))
    }

    #[inline]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Settled::Rejected(_))
    }

    /// Returns the value if fulfilled.
    pub fn value(&self) -> Option<&T> {
        match self {
            Settled::Fulfilled(v) => Some(v),
            Settled::Rejected(_) => None,
        }
    }

    /// Returns the failure reason if rejected.
    pub fn reason(&self) -> Option<&E> {
        match self {
            Settled::Fulfilled(_) => None,
            Settled::Rejected(e) => Some(e),
        }
    }

    /// Converts back into a plain `Result`.
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Settled::Fulfilled(v) => Ok(v),
            Settled::Rejected(e) => Err(e),
        }
    }
}

impl<T, E> From<Result<T, E>> for Settled<T, E> {
    fn from(res: Result<T, E>) -> Self {
        match res {
            Ok(v) => Settled::Fulfilled(v),
            Err(e) => Settled::Rejected(e),
        }
    }
}
