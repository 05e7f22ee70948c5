//! Integer fund amounts
//!
//! The ledger is single-asset and integer-denominated. `Amount` wraps `u64`
//! with checked arithmetic so overflow and underflow surface as explicit
//! errors rather than wrapping silently.

use crate::{LedgerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative quantity of pooled funds, in smallest units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Amount(pub u64);

impl Amount {
    /// The zero amount
    pub const ZERO: Amount = Amount(0);

    /// Create a new amount
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw value in smallest units
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checked addition
    pub fn checked_add(self, other: Self) -> Result<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(LedgerError::AmountOverflow)
    }

    /// Checked subtraction
    pub fn checked_sub(self, other: Self) -> Result<Self> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(LedgerError::AmountUnderflow)
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_arithmetic() {
        let a = Amount::new(100);
        let b = Amount::new(40);

        assert_eq!(a.checked_add(b).unwrap(), Amount::new(140));
        assert_eq!(a.checked_sub(b).unwrap(), Amount::new(60));
    }

    #[test]
    fn test_overflow_is_explicit() {
        let max = Amount::new(u64::MAX);
        assert!(matches!(
            max.checked_add(Amount::new(1)),
            Err(LedgerError::AmountOverflow)
        ));
    }

    #[test]
    fn test_underflow_is_explicit() {
        let a = Amount::new(10);
        assert!(matches!(
            a.checked_sub(Amount::new(11)),
            Err(LedgerError::AmountUnderflow)
        ));
    }

    #[test]
    fn test_comparison() {
        assert!(Amount::new(50) < Amount::new(100));
        assert!(Amount::ZERO.is_zero());
        assert!(Amount::new(1).is_positive());
    }
}
