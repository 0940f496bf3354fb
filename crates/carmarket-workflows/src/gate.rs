//! The single-flight gate shared by both workflows.
//!
//! One submission per form instance may be awaiting its response at a
//! time. The gate is a drop guard rather than a pair of flag writes: the
//! mark is released when the submit attempt resolves on any path, and
//! also when the submit future itself is dropped at its suspension point
//! (an embedding racing `submit` against a timeout or a `select!` arm).
//! A dropped attempt must never leave the form unsubmittable.

use carmarket_core::{CarmarketError, CarmarketResult};

/// Marks a form instance as in flight for as long as the guard lives.
pub(crate) struct InFlightGuard<'a> {
    flag: &'a mut bool,
}

impl<'a> InFlightGuard<'a> {
    /// Claims the gate, rejecting the attempt if a prior submission on
    /// the same form instance has not resolved.
    pub(crate) fn acquire(flag: &'a mut bool) -> CarmarketResult<Self> {
        if *flag {
            return Err(CarmarketError::InFlight);
        }
        *flag = true;
        Ok(Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}
