//! Raw token amount with checked arithmetic.

use core::fmt;

use super::Rounding;

/// A raw token amount in the smallest unit of either pool token.
///
/// `Amount` never interprets decimals — decimal normalization happens once,
/// in the share-pricing formula, using the decimals recorded in the vault
/// configuration. All `u128` values are valid amounts.
///
/// Arithmetic methods are checked: they return `None` on overflow,
/// underflow, or division by zero instead of panicking.
///
/// # Examples
///
/// ```
/// use range_vault::domain::Amount;
///
/// let a = Amount::new(100);
/// let b = Amount::new(200);
/// assert_eq!(a.checked_add(&b), Some(Amount::new(300)));
/// assert_eq!(b.checked_sub(&a), Some(Amount::new(100)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount. Used as the "collect everything"
    /// sentinel when draining a pool position.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a new `Amount` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Subtraction clamped at zero.
    ///
    /// Used when computing shortfalls (`requested − available`), where a
    /// surplus simply means no shortfall.
    pub const fn saturating_sub(&self, other: &Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Checked multiplication. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_mul(&self, other: &Self) -> Option<Self> {
        match self.0.checked_mul(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked division with explicit rounding direction.
    ///
    /// - [`Rounding::Down`]: floor division (round towards zero).
    /// - [`Rounding::Up`]: ceiling division.
    ///
    /// Returns `None` if `divisor` is zero.
    #[must_use]
    pub const fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        if divisor.0 == 0 {
            return None;
        }
        match rounding {
            Rounding::Down => Some(Self(self.0 / divisor.0)),
            Rounding::Up => {
                let q = self.0 / divisor.0;
                let r = self.0 % divisor.0;
                if r != 0 {
                    // q + 1 cannot overflow: a nonzero remainder implies the
                    // quotient is strictly below u128::MAX.
                    Some(Self(q + 1))
                } else {
                    Some(Self(q))
                }
            }
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    // -- Construction & accessors -------------------------------------------

    #[test]
    fn new_and_get() {
        let a = Amount::new(42);
        assert_eq!(a.get(), 42);
    }

    #[test]
    fn constants() {
        assert_eq!(Amount::ZERO.get(), 0);
        assert_eq!(Amount::MAX.get(), u128::MAX);
        assert!(Amount::ZERO.is_zero());
    }

    // -- Checked arithmetic -------------------------------------------------

    #[test]
    fn add_overflow_is_none() {
        assert_eq!(Amount::MAX.checked_add(&Amount::new(1)), None);
    }

    #[test]
    fn sub_underflow_is_none() {
        assert_eq!(Amount::ZERO.checked_sub(&Amount::new(1)), None);
    }

    #[test]
    fn saturating_sub_clamps() {
        assert_eq!(Amount::new(5).saturating_sub(&Amount::new(9)), Amount::ZERO);
        assert_eq!(
            Amount::new(9).saturating_sub(&Amount::new(5)),
            Amount::new(4)
        );
    }

    #[test]
    fn ordering_picks_smaller() {
        assert_eq!(Amount::new(3).min(Amount::new(7)), Amount::new(3));
        assert_eq!(Amount::new(7).min(Amount::new(3)), Amount::new(3));
    }

    #[test]
    fn div_by_zero_is_none() {
        assert_eq!(
            Amount::new(10).checked_div(&Amount::ZERO, Rounding::Down),
            None
        );
    }

    #[test]
    fn div_rounding_directions() {
        let n = Amount::new(7);
        let d = Amount::new(2);
        assert_eq!(n.checked_div(&d, Rounding::Down), Some(Amount::new(3)));
        assert_eq!(n.checked_div(&d, Rounding::Up), Some(Amount::new(4)));
    }

    #[test]
    fn div_exact_same_both_directions() {
        let n = Amount::new(8);
        let d = Amount::new(2);
        assert_eq!(n.checked_div(&d, Rounding::Down), Some(Amount::new(4)));
        assert_eq!(n.checked_div(&d, Rounding::Up), Some(Amount::new(4)));
    }

    // -- Display ------------------------------------------------------------

    #[test]
    fn display_is_raw_value() {
        assert_eq!(format!("{}", Amount::new(1234)), "1234");
    }
}
