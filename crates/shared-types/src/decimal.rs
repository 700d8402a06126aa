//! # Decimal
//!
//! 18-digit fixed-point decimal over `U256`.
//!
//! Every ledger amount (prices, balances, deposits, collateral, debt) is a
//! `Decimal`. Sort keys reuse the same representation, with
//! [`Decimal::INFINITY`] (`U256::MAX`) as the maximal sentinel: a position
//! with zero debt sorts above everything else.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use thiserror::Error;

/// Number of fractional digits.
pub const DECIMAL_DIGITS: u32 = 18;

/// Scaling factor: `10^18`. Fits in the low limb of a `U256`.
pub const DECIMAL_PRECISION: U256 = U256([1_000_000_000_000_000_000, 0, 0, 0]);

/// Errors from checked decimal arithmetic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecimalError {
    /// Division by zero.
    #[error("decimal division by zero")]
    DivisionByZero,

    /// Arithmetic overflowed the 256-bit representation.
    #[error("decimal arithmetic overflow")]
    Overflow,
}

/// Fixed-point decimal amount with 18 fractional digits.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal(U256);

impl Decimal {
    /// Zero.
    pub const ZERO: Decimal = Decimal(U256::zero());

    /// One (`10^18` raw).
    pub const ONE: Decimal = Decimal(DECIMAL_PRECISION);

    /// Maximal sentinel, used as the "infinite" sort key.
    pub const INFINITY: Decimal = Decimal(U256::MAX);

    /// Construct from a raw scaled `U256` (already multiplied by `10^18`).
    #[must_use]
    pub const fn from_raw(raw: U256) -> Self {
        Decimal(raw)
    }

    /// The raw scaled representation.
    #[must_use]
    pub const fn raw(&self) -> U256 {
        self.0
    }

    /// Whether this is the infinite sentinel.
    #[must_use]
    pub fn is_infinite(&self) -> bool {
        self.0 == U256::MAX
    }

    /// Whether this is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition.
    pub fn checked_add(self, other: Decimal) -> Result<Decimal, DecimalError> {
        self.0
            .checked_add(other.0)
            .map(Decimal)
            .ok_or(DecimalError::Overflow)
    }

    /// Checked subtraction.
    pub fn checked_sub(self, other: Decimal) -> Result<Decimal, DecimalError> {
        self.0
            .checked_sub(other.0)
            .map(Decimal)
            .ok_or(DecimalError::Overflow)
    }

    /// Subtraction clamped at zero.
    #[must_use]
    pub fn saturating_sub(self, other: Decimal) -> Decimal {
        Decimal(self.0.saturating_sub(other.0))
    }

    /// Addition clamped at the maximum.
    #[must_use]
    pub fn saturating_add(self, other: Decimal) -> Decimal {
        Decimal(self.0.saturating_add(other.0))
    }

    /// Fixed-point multiplication: `(a * b) / 10^18`.
    pub fn checked_mul(self, other: Decimal) -> Result<Decimal, DecimalError> {
        self.0
            .checked_mul(other.0)
            .map(|p| Decimal(p / DECIMAL_PRECISION))
            .ok_or(DecimalError::Overflow)
    }

    /// Fixed-point division: `(a * 10^18) / b`.
    pub fn checked_div(self, other: Decimal) -> Result<Decimal, DecimalError> {
        if other.0.is_zero() {
            return Err(DecimalError::DivisionByZero);
        }
        self.0
            .checked_mul(DECIMAL_PRECISION)
            .map(|p| Decimal(p / other.0))
            .ok_or(DecimalError::Overflow)
    }

    /// Absolute difference.
    #[must_use]
    pub fn abs_diff(self, other: Decimal) -> Decimal {
        if self >= other {
            Decimal(self.0 - other.0)
        } else {
            Decimal(other.0 - self.0)
        }
    }
}

impl From<u64> for Decimal {
    fn from(n: u64) -> Self {
        Decimal(U256::from(n) * DECIMAL_PRECISION)
    }
}

// Ledger amounts are far below the overflow range in practice; the operator
// forms mirror plain integer arithmetic on U256 and panic on overflow.
impl Add for Decimal {
    type Output = Decimal;

    fn add(self, other: Decimal) -> Decimal {
        Decimal(self.0 + other.0)
    }
}

impl Sub for Decimal {
    type Output = Decimal;

    fn sub(self, other: Decimal) -> Decimal {
        Decimal(self.0 - other.0)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_infinite() {
            return write!(f, "inf");
        }
        let int = self.0 / DECIMAL_PRECISION;
        let frac = self.0 % DECIMAL_PRECISION;
        if frac.is_zero() {
            write!(f, "{int}")
        } else {
            let frac_str = format!("{:018}", frac.as_u128());
            write!(f, "{}.{}", int, frac_str.trim_end_matches('0'))
        }
    }
}
