//! # Admission gate.
//!
//! Counts the tasks of one batch that are invoked but not yet settled and
//! decides whether another one may start.
//!
//! ## Rules
//! - `active` never exceeds `limit`: [`AdmissionGate::admit`] refuses instead.
//! - `active` never goes below zero: [`AdmissionGate::release`] refuses instead.
//!
//! Both refusals are invariant violations, reported as [`RuntimeError`].

use crate::error::RuntimeError;

/// Active-task counter bounded by a fixed limit.
#[derive(Debug)]
pub(crate) struct AdmissionGate {
    active: usize,
    limit: usize,
}

impl AdmissionGate {
    /// Creates an idle gate (`active = 0`).
    ///
    /// `limit` must already be validated (`>= 1`).
    pub(crate) fn new(limit: usize) -> Self {
        debug_assert!(limit > 0, "gate limit must be validated");
        Self { active: 0, limit }
    }

    /// True while another task may be admitted.
    #[inline]
    pub(crate) fn has_capacity(&self) -> bool {
        self.active < self.limit
    }

    /// Accounts for one more running task, returning the new active count.
    pub(crate) fn admit(&mut self) -> Result<usize, RuntimeError> {
        if !self.has_capacity() {
            return Err(RuntimeError::CapacityExceeded {
                active: self.active,
                limit: self.limit,
            });
        }
        self.active += 1;
        Ok(self.active)
    }

    /// Accounts for one settled task, returning the new active count.
    pub(crate) fn release(&mut self) -> Result<usize, RuntimeError> {
        self.active = self.active.checked_sub(1).ok_or(RuntimeError::GateUnderflow)?;
        Ok(self.active)
    }

    #[inline]
    pub(crate) fn active(&self) -> usize {
        self.active
    }

    #[inline]
    pub(crate) fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_up_to_limit() {
        let mut gate = AdmissionGate::new(2);
        assert_eq!(gate.admit(), Ok(1));
        assert_eq!(gate.admit(), Ok(2));
        assert!(!gate.has_capacity());
        assert_eq!(
            gate.admit(),
            Err(RuntimeError::CapacityExceeded { active: 2, limit: 2 })
        );
        assert_eq!(gate.active(), 2);
    }

    #[test]
    fn release_frees_capacity() {
        let mut gate = AdmissionGate::new(1);
        gate.admit().unwrap();
        assert_eq!(gate.release(), Ok(0));
        assert!(gate.has_capacity());
        assert_eq!(gate.limit(), 1);
    }

    #[test]
    fn release_on_idle_gate_is_underflow() {
        let mut gate = AdmissionGate::new(3);
        assert_eq!(gate.release(), Err(RuntimeError::GateUnderflow));
        assert_eq!(gate.active(), 0);
    }
}
