//! Error types used by the boundvisor runtime.
//!
//! Task failures are **not** errors here: they are captured as
//! [`Settled::Rejected`](crate::Settled::Rejected) values in the batch result.
//! [`RuntimeError`] only covers failures of the batch as a whole:
//!
//! - configuration errors (rejected before any task is admitted);
//! - internal invariant violations (ledger double-write, gate over-admission);
//! - defects inside task bodies (panics) and lost workers.
//!
//! Every variant provides helper methods (`as_label`, `as_message`) for logging/metrics.

use thiserror::Error;

/// # Errors produced by the boundvisor runtime.
///
/// A batch that returns `Err(RuntimeError)` produced no results at all;
/// a batch that returns `Ok(results)` always carries one entry per task,
/// even when every task was rejected.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Concurrency limit is not a positive integer.
    #[error("invalid concurrency limit {limit}: must be at least 1")]
    InvalidLimit {
        /// The rejected limit value.
        limit: usize,
    },

    /// A settlement referenced a slot outside the batch.
    #[error("result slot {index} out of range (batch of {total})")]
    SlotOutOfRange {
        /// Submission index carried by the settlement.
        index: usize,
        /// Number of slots in the batch.
        total: usize,
    },

    /// A result ledger slot was written twice.
    #[error("result slot {index} already settled")]
    SlotAlreadySettled {
        /// Submission index of the slot.
        index: usize,
    },

    /// The admission gate was asked to admit beyond its limit.
    #[error("admission beyond capacity: active={active} limit={limit}")]
    CapacityExceeded {
        /// Tasks already active when admission was attempted.
        active: usize,
        /// Configured concurrency limit.
        limit: usize,
    },

    /// The admission gate was released with no active task.
    #[error("admission gate released with no active task")]
    GateUnderflow,

    /// Results were collected before every slot was settled.
    #[error("batch incomplete: {settled}/{total} slots settled")]
    Incomplete {
        /// Number of settled slots.
        settled: usize,
        /// Total number of slots.
        total: usize,
    },

    /// A task body panicked; the batch is aborted once in-flight tasks finish.
    #[error("task {index} panicked: {message}")]
    TaskPanicked {
        /// Submission index of the panicking task.
        index: usize,
        /// Panic payload rendered as text (when it was a string).
        message: String,
    },

    /// A task worker was cancelled by the runtime before it could settle.
    #[error("task worker lost: {reason}")]
    WorkerLost {
        /// Join error description.
        reason: String,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use boundvisor::RuntimeError;
    ///
    /// let err = RuntimeError::InvalidLimit { limit: 0 };
    /// assert_eq!(err.as_label(), "runtime_invalid_limit");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::InvalidLimit { .. } => "runtime_invalid_limit",
            RuntimeError::SlotOutOfRange { .. } => "runtime_slot_out_of_range",
            RuntimeError::SlotAlreadySettled { .. } => "runtime_slot_already_settled",
            RuntimeError::CapacityExceeded { .. } => "runtime_capacity_exceeded",
            RuntimeError::GateUnderflow => "runtime_gate_underflow",
            RuntimeError::Incomplete { .. } => "runtime_incomplete",
            RuntimeError::TaskPanicked { .. } => "runtime_task_panicked",
            RuntimeError::WorkerLost { .. } => "runtime_worker_lost",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::InvalidLimit { limit } => format!("invalid limit: {limit}"),
            RuntimeError::SlotOutOfRange { index, total } => {
                format!("unknown slot: slot={index} total={total}")
            }
            RuntimeError::SlotAlreadySettled { index } => format!("double settle: slot={index}"),
            RuntimeError::CapacityExceeded { active, limit } => {
                format!("over admission: active={active} limit={limit}")
            }
            RuntimeError::GateUnderflow => "gate underflow".to_string(),
            RuntimeError::Incomplete { settled, total } => {
                format!("incomplete: settled={settled} total={total}")
            }
            RuntimeError::TaskPanicked { index, message } => {
                format!("panic: task={index} message={message}")
            }
            RuntimeError::WorkerLost { reason } => format!("worker lost: {reason}"),
        }
    }

    /// Indicates whether the error is a configuration problem on the caller's side.
    ///
    /// Everything else points at a defect (in a task body or in the runtime itself).
    ///
    /// # Example
    /// ```
    /// use boundvisor::RuntimeError;
    ///
    /// assert!(RuntimeError::InvalidLimit { limit: 0 }.is_config());
    /// assert!(!RuntimeError::GateUnderflow.is_config());
    /// ```
    pub fn is_config(&self) -> bool {
        matches!(self, RuntimeError::InvalidLimit { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        let cases = [
            (RuntimeError::InvalidLimit { limit: 0 }, "runtime_invalid_limit"),
            (RuntimeError::SlotOutOfRange { index: 9, total: 2 }, "runtime_slot_out_of_range"),
            (RuntimeError::SlotAlreadySettled { index: 3 }, "runtime_slot_already_settled"),
            (RuntimeError::CapacityExceeded { active: 2, limit: 2 }, "runtime_capacity_exceeded"),
            (RuntimeError::GateUnderflow, "runtime_gate_underflow"),
            (RuntimeError::Incomplete { settled: 1, total: 2 }, "runtime_incomplete"),
            (
                RuntimeError::TaskPanicked { index: 0, message: "boom".into() },
                "runtime_task_panicked",
            ),
            (RuntimeError::WorkerLost { reason: "cancelled".into() }, "runtime_worker_lost"),
        ];
        for (err, label) in cases {
            assert_eq!(err.as_label(), label);
        }
    }

    #[test]
    fn display_includes_details() {
        let err = RuntimeError::TaskPanicked { index: 4, message: "boom".into() };
        assert_eq!(err.to_string(), "task 4 panicked: boom");

        let err = RuntimeError::Incomplete { settled: 1, total: 3 };
        assert_eq!(err.as_message(), "incomplete: settled=1 total=3");
    }

    #[test]
    fn only_invalid_limit_is_config() {
        assert!(RuntimeError::InvalidLimit { limit: 0 }.is_config());
        assert!(!RuntimeError::SlotAlreadySettled { index: 0 }.is_config());
        assert!(!RuntimeError::WorkerLost { reason: String::new() }.is_config());
    }
}
