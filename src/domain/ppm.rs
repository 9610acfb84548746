//! Parts-per-million rate representation.

use core::fmt;

use super::{Amount, Rounding};

/// Denominator of a [`Ppm`] rate: one million parts make a whole.
pub const PPM_DENOMINATOR: u32 = 1_000_000;

/// A rate expressed in parts per million.
///
/// Used for the protocol fee cut and the swap price-impact cap. A value of
/// `1_000` is 0.1%; `1_000_000` is 100%.
///
/// # Examples
///
/// ```
/// use range_vault::domain::{Amount, Ppm, Rounding};
///
/// let fee = Ppm::new(1_000); // 0.1%
/// let cut = fee.apply(&Amount::new(1_000), Rounding::Down);
/// assert_eq!(cut, Some(Amount::new(1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ppm(u32);

impl Ppm {
    /// Zero rate.
    pub const ZERO: Self = Self(0);

    /// The whole: 100% expressed in parts per million.
    pub const ONE: Self = Self(PPM_DENOMINATOR);

    /// Creates a new `Ppm` rate from a raw parts-per-million value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw parts-per-million value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the rate does not exceed 100%.
    #[must_use]
    pub const fn is_fraction(&self) -> bool {
        self.0 <= PPM_DENOMINATOR
    }

    /// Applies this rate to an amount: `amount × ppm / 1e6`.
    ///
    /// Returns `None` on overflow of the intermediate product.
    #[must_use]
    pub fn apply(&self, amount: &Amount, rounding: Rounding) -> Option<Amount> {
        amount
            .checked_mul(&Amount::new(u128::from(self.0)))?
            .checked_div(&Amount::new(u128::from(PPM_DENOMINATOR)), rounding)
    }
}

impl fmt::Display for Ppm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ppm", self.0)
    }
}
