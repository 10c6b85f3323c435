//! # Result ledger.
//!
//! Fixed-size slot array with one entry per submitted task, addressed by
//! submission index. Each slot is written exactly once; the ledger counts
//! written slots so completion is a constant-time check (counting join).

use crate::error::RuntimeError;
use crate::tasks::Settled;

/// Write-once result slots for one batch.
pub(crate) struct ResultLedger<T, E> {
    slots: Vec<Option<Settled<T, E>>>,
    settled: usize,
}

impl<T, E> ResultLedger<T, E> {
    /// Creates a ledger with `total` empty slots.
    pub(crate) fn new(total: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(total).collect(),
            settled: 0,
        }
    }

    /// Writes the outcome of the task at `index`.
    ///
    /// # Errors
    /// - [`RuntimeError::SlotOutOfRange`] if `index` is not a slot of this batch.
    /// - [`RuntimeError::SlotAlreadySettled`] on a second write to the same slot;
    ///   the first value is kept.
    pub(crate) fn record(&mut self, index: usize, outcome: Settled<T, E>) -> Result<(), RuntimeError> {
        let total = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(RuntimeError::SlotOutOfRange { index, total })?;
        if slot.is_some() {
            return Err(RuntimeError::SlotAlreadySettled { index });
        }
        *slot = Some(outcome);
        self.settled += 1;
        Ok(())
    }

    /// True once every slot has been written.
    #[inline]
    pub(crate) fn is_complete(&self) -> bool {
        self.settled == self.slots.len()
    }

    #[inline]
    pub(crate) fn settled(&self) -> usize {
        self.settled
    }

    #[inline]
    pub(crate) fn total(&self) -> usize {
        self.slots.len()
    }

    /// Releases the ordered results.
    ///
    /// # Errors
    /// [`RuntimeError::Incomplete`] if any slot is still empty.
    pub(crate) fn into_results(self) -> Result<Vec<Settled<T, E>>, RuntimeError> {
        if !self.is_complete() {
            return Err(RuntimeError::Incomplete {
                settled: self.settled,
                total: self.slots.len(),
            });
        }
        Ok(self.slots.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_follow_index_not_write_order() {
        let mut ledger = ResultLedger::<&str, &str>::new(3);
        ledger.record(2, Settled::Fulfilled("c")).unwrap();
        ledger.record(0, Settled::Fulfilled("a")).unwrap();
        assert!(!ledger.is_complete());
        ledger.record(1, Settled::Rejected("b")).unwrap();
        assert!(ledger.is_complete());

        assert_eq!(
            ledger.into_results().unwrap(),
            vec![
                Settled::Fulfilled("a"),
                Settled::Rejected("b"),
                Settled::Fulfilled("c"),
            ]
        );
    }

    #[test]
    fn second_write_is_rejected_and_first_kept() {
        let mut ledger = ResultLedger::<u8, ()>::new(1);
        ledger.record(0, Settled::Fulfilled(1)).unwrap();
        assert_eq!(
            ledger.record(0, Settled::Fulfilled(2)),
            Err(RuntimeError::SlotAlreadySettled { index: 0 })
        );
        assert_eq!(ledger.settled(), 1);
        assert_eq!(ledger.into_results().unwrap(), vec![Settled::Fulfilled(1)]);
    }

    #[test]
    fn out_of_range_index() {
        let mut ledger = ResultLedger::<u8, ()>::new(2);
        assert_eq!(
            ledger.record(5, Settled::Rejected(())),
            Err(RuntimeError::SlotOutOfRange { index: 5, total: 2 })
        );
    }

    #[test]
    fn incomplete_ledger_does_not_release() {
        let mut ledger = ResultLedger::<u8, ()>::new(2);
        ledger.record(1, Settled::Fulfilled(9)).unwrap();
        assert_eq!(
            ledger.into_results(),
            Err(RuntimeError::Incomplete { settled: 1, total: 2 })
        );
    }

    #[test]
    fn empty_ledger_is_complete() {
        let ledger = ResultLedger::<u8, ()>::new(0);
        assert!(ledger.is_complete());
        assert_eq!(ledger.total(), 0);
        assert!(ledger.into_results().unwrap().is_empty());
    }
}
