//! Arithmetic guard
//!
//! Every balance, pool and counter mutation in the engine is computed through
//! these helpers. They never saturate or wrap: a result outside the unsigned
//! range is an error, returned before any state is written.

use crate::errors::{CarbonError, CarbonResult};

/// Amount type for credits and insurance units (micro-denominated).
pub type Amount = u128;

/// Checked addition; `Overflow` if the sum leaves the range.
#[inline]
pub fn safe_add(a: Amount, b: Amount) -> CarbonResult<Amount> {
    a.checked_add(b).ok_or(CarbonError::Overflow)
}

/// Checked subtraction; `Underflow` if `b > a`.
#[inline]
pub fn safe_sub(a: Amount, b: Amount) -> CarbonResult<Amount> {
    a.checked_sub(b).ok_or(CarbonError::Underflow)
}

/// Checked multiplication; `Overflow` if the product leaves the range.
#[inline]
pub fn safe_mul(a: Amount, b: Amount) -> CarbonResult<Amount> {
    a.checked_mul(b).ok_or(CarbonError::Overflow)
}

/// Checked increment for `u64` counters (project counts, rate windows).
#[inline]
pub fn safe_increment(counter: u64) -> CarbonResult<u64> {
    counter.checked_add(1).ok_or(CarbonError::Overflow)
}
