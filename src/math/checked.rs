//! Checked arithmetic trait for domain wrapper types.
//!
//! The [`CheckedArithmetic`] trait provides fallible arithmetic operations
//! that return [`Result<Self, VaultError>`](crate::error::VaultError)
//! instead of panicking on overflow, underflow, or division by zero.
//!
//! # Implementations
//!
//! - [`Amount`] — token quantities (`u128`)
//! - [`Shares`] — vault share quantities (`u128`)
//! - [`Liquidity`] — pool liquidity quantities (`u128`)
//!
//! # Examples
//!
//! ```
//! use range_vault::domain::Amount;
//! use range_vault::math::CheckedArithmetic;
//!
//! let a = Amount::new(100);
//! let b = Amount::new(200);
//! let sum = a.safe_add(&b);
//! assert!(sum.is_ok());
//! ```

use crate::domain::{Amount, Liquidity, Rounding, Shares};
use crate::error::VaultError;

/// Fallible arithmetic for domain wrapper types.
///
/// Every method returns [`Result<Self, VaultError>`] with a specific error
/// variant so callers can distinguish overflow from underflow from
/// division by zero.
///
/// # Contract
///
/// - **No panics** — all error conditions produce `Err`.
/// - **No saturation** — saturation hides bugs; errors propagate instead.
/// - Implementations must delegate to the inner type's checked operations.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_add(&self, other: &Self) -> Result<Self, VaultError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, VaultError>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_mul(&self, other: &Self) -> Result<Self, VaultError>;

    /// Checked division with explicit [`Rounding`] direction.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, VaultError>;
}

fn div_u128(n: u128, d: u128, rounding: Rounding) -> Result<u128, VaultError> {
    if d == 0 {
        return Err(VaultError::DivisionByZero);
    }
    let q = n / d;
    if rounding.is_up() && n % d != 0 {
        Ok(q + 1)
    } else {
        Ok(q)
    }
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, VaultError> {
        self.checked_add(other)
            .ok_or(VaultError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, VaultError> {
        self.checked_sub(other)
            .ok_or(VaultError::Underflow("amount subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, VaultError> {
        self.checked_mul(other)
            .ok_or(VaultError::Overflow("amount multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, VaultError> {
        div_u128(self.get(), other.get(), rounding).map(Amount::new)
    }
}

// ---------------------------------------------------------------------------
// Shares
// ---------------------------------------------------------------------------

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, VaultError> {
        self.checked_add(other)
            .ok_or(VaultError::Overflow("share addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, VaultError> {
        self.checked_sub(other)
            .ok_or(VaultError::Underflow("share subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, VaultError> {
        self.get()
            .checked_mul(other.get())
            .map(Shares::new)
            .ok_or(VaultError::Overflow("share multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, VaultError> {
        div_u128(self.get(), other.get(), rounding).map(Shares::new)
    }
}

// ---------------------------------------------------------------------------
// Liquidity
// ---------------------------------------------------------------------------

impl CheckedArithmetic for Liquidity {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, VaultError> {
        self.checked_add(other)
            .ok_or(VaultError::Overflow("liquidity addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, VaultError> {
        self.checked_sub(other)
            .ok_or(VaultError::Underflow("liquidity subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, VaultError> {
        self.get()
            .checked_mul(other.get())
            .map(Liquidity::new)
            .ok_or(VaultError::Overflow("liquidity multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, VaultError> {
        div_u128(self.get(), other.get(), rounding).map(Liquidity::new)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Amount
    // -----------------------------------------------------------------------

    mod amount {
        use super::*;

        #[test]
        fn add_ok() {
            let Ok(r) = Amount::new(100).safe_add(&Amount::new(200)) else {
                panic!("expected Ok");
            };
            assert_eq!(r, Amount::new(300));
        }

        #[test]
        fn add_overflow() {
            let err = Amount::MAX.safe_add(&Amount::new(1));
            let Err(VaultError::Overflow(_)) = err else {
                panic!("expected Overflow");
            };
        }

        #[test]
        fn sub_ok() {
            let Ok(r) = Amount::new(300).safe_sub(&Amount::new(100)) else {
                panic!("expected Ok");
            };
            assert_eq!(r, Amount::new(200));
        }

        #[test]
        fn sub_underflow() {
            let err = Amount::new(1).safe_sub(&Amount::new(2));
            let Err(VaultError::Underflow(_)) = err else {
                panic!("expected Underflow");
            };
        }

        #[test]
        fn mul_overflow() {
            let err = Amount::MAX.safe_mul(&Amount::new(2));
            let Err(VaultError::Overflow(_)) = err else {
                panic!("expected Overflow");
            };
        }

        #[test]
        fn div_rounding_directions() {
            let Ok(down) = Amount::new(10).safe_div(&Amount::new(3), Rounding::Down) else {
                panic!("expected Ok");
            };
            let Ok(up) = Amount::new(10).safe_div(&Amount::new(3), Rounding::Up) else {
                panic!("expected Ok");
            };
            assert_eq!(down, Amount::new(3));
            assert_eq!(up, Amount::new(4));
        }

        #[test]
        fn div_by_zero() {
            let err = Amount::new(100).safe_div(&Amount::ZERO, Rounding::Down);
            let Err(VaultError::DivisionByZero) = err else {
                panic!("expected DivisionByZero");
            };
        }

        #[test]
        fn chaining_works() {
            // (100 + 200) * 3 - 100 = 800
            let result = Amount::new(100)
                .safe_add(&Amount::new(200))
                .and_then(|v| v.safe_mul(&Amount::new(3)))
                .and_then(|v| v.safe_sub(&Amount::new(100)));
            let Ok(r) = result else {
                panic!("expected Ok");
            };
            assert_eq!(r, Amount::new(800));
        }
    }

    // -----------------------------------------------------------------------
    // Shares
    // -----------------------------------------------------------------------

    mod shares {
        use super::*;

        #[test]
        fn add_ok() {
            let Ok(r) = Shares::new(100).safe_add(&Shares::new(200)) else {
                panic!("expected Ok");
            };
            assert_eq!(r, Shares::new(300));
        }

        #[test]
        fn add_overflow() {
            let err = Shares::MAX.safe_add(&Shares::new(1));
            let Err(VaultError::Overflow(_)) = err else {
                panic!("expected Overflow");
            };
        }

        #[test]
        fn sub_underflow() {
            let err = Shares::new(1).safe_sub(&Shares::new(2));
            let Err(VaultError::Underflow(_)) = err else {
                panic!("expected Underflow");
            };
        }

        #[test]
        fn sub_to_zero() {
            let Ok(r) = Shares::new(42).safe_sub(&Shares::new(42)) else {
                panic!("expected Ok");
            };
            assert_eq!(r, Shares::ZERO);
        }

        #[test]
        fn div_round_up() {
            let Ok(r) = Shares::new(10).safe_div(&Shares::new(3), Rounding::Up) else {
                panic!("expected Ok");
            };
            assert_eq!(r, Shares::new(4));
        }
    }

    // -----------------------------------------------------------------------
    // Liquidity
    // -----------------------------------------------------------------------

    mod liquidity {
        use super::*;

        #[test]
        fn add_ok() {
            let Ok(r) = Liquidity::new(100).safe_add(&Liquidity::new(200)) else {
                panic!("expected Ok");
            };
            assert_eq!(r, Liquidity::new(300));
        }

        #[test]
        fn add_overflow() {
            let err = Liquidity::new(u128::MAX).safe_add(&Liquidity::new(1));
            let Err(VaultError::Overflow(_)) = err else {
                panic!("expected Overflow");
            };
        }

        #[test]
        fn sub_underflow() {
            let err = Liquidity::new(1).safe_sub(&Liquidity::new(2));
            let Err(VaultError::Underflow(_)) = err else {
                panic!("expected Underflow");
            };
        }

        #[test]
        fn div_by_zero() {
            let err = Liquidity::new(100).safe_div(&Liquidity::ZERO, Rounding::Down);
            let Err(VaultError::DivisionByZero) = err else {
                panic!("expected DivisionByZero");
            };
        }
    }
}
