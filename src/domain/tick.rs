//! Discrete price point for the concentrated-liquidity pool.

use core::fmt;

use crate::error::VaultError;

/// Minimum valid tick index (Uniswap v3 standard).
const MIN_TICK: i32 = -887_272;

/// Maximum valid tick index (Uniswap v3 standard).
const MAX_TICK: i32 = 887_272;

/// A discrete price point in the concentrated-liquidity model.
///
/// Follows the convention where price increases exponentially with the tick
/// index: `price = 1.0001^tick`. Valid tick indices range from
/// [`MIN`](Self::MIN) (`-887272`) to [`MAX`](Self::MAX) (`887272`).
///
/// # Examples
///
/// ```
/// use range_vault::domain::Tick;
///
/// let tick = Tick::new(100);
/// assert!(tick.is_ok());
/// assert_eq!(tick.unwrap_or(Tick::ZERO).get(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(i32);

impl Tick {
    /// Minimum valid tick (`-887272`).
    pub const MIN: Self = Self(MIN_TICK);

    /// Maximum valid tick (`887272`).
    pub const MAX: Self = Self(MAX_TICK);

    /// Neutral tick where `price = 1.0001^0 = 1.0`.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Tick` with range validation.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidTick`] if `value` is outside
    /// the range `[-887272, 887272]`.
    pub const fn new(value: i32) -> crate::error::Result<Self> {
        if value < MIN_TICK || value > MAX_TICK {
            return Err(VaultError::InvalidTick(
                "tick out of range [-887272, 887272]",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the underlying `i32` tick index.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Floors this tick to the nearest multiple of `spacing`, rounding
    /// towards negative infinity.
    ///
    /// Plain integer division truncates towards zero, which would round
    /// negative ticks the wrong way; `-5.floor(10)` must be `-10`, not `0`.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfiguration`] if `spacing` is not
    /// strictly positive.
    pub const fn floor_to_spacing(&self, spacing: i32) -> crate::error::Result<Self> {
        if spacing <= 0 {
            return Err(VaultError::InvalidConfiguration(
                "tick spacing must be strictly positive",
            ));
        }
        let mut floored = self.0 / spacing;
        if self.0 < 0 && self.0 % spacing != 0 {
            floored -= 1;
        }
        Ok(Self(floored * spacing))
    }

    /// Returns `true` if this tick is an exact multiple of `spacing`.
    #[must_use]
    pub const fn is_aligned(&self, spacing: i32) -> bool {
        spacing > 0 && self.0 % spacing == 0
    }

    /// Checked addition of a delta to this tick.
    ///
    /// Returns `None` if the result would be outside the valid tick range.
    #[must_use]
    pub const fn checked_add(&self, delta: i32) -> Option<Self> {
        match self.0.checked_add(delta) {
            Some(v) if v >= MIN_TICK && v <= MAX_TICK => Some(Self(v)),
            _ => None,
        }
    }

    /// Checked subtraction of a delta from this tick.
    ///
    /// Returns `None` if the result would be outside the valid tick range.
    #[must_use]
    pub const fn checked_sub(&self, delta: i32) -> Option<Self> {
        match self.0.checked_sub(delta) {
            Some(v) if v >= MIN_TICK && v <= MAX_TICK => Some(Self(v)),
            _ => None,
        }
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tick({})", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    // -- Construction -------------------------------------------------------

    #[test]
    fn valid_zero() {
        let Ok(t) = Tick::new(0) else {
            panic!("expected Ok");
        };
        assert_eq!(t.get(), 0);
    }

    #[test]
    fn valid_bounds() {
        let Ok(lo) = Tick::new(-887_272) else {
            panic!("expected Ok");
        };
        let Ok(hi) = Tick::new(887_272) else {
            panic!("expected Ok");
        };
        assert_eq!(lo, Tick::MIN);
        assert_eq!(hi, Tick::MAX);
    }

    #[test]
    fn out_of_range_rejected() {
        assert!(Tick::new(-887_273).is_err());
        assert!(Tick::new(887_273).is_err());
    }

    // -- floor_to_spacing ---------------------------------------------------

    #[test]
    fn floor_positive() {
        let Ok(t) = Tick::new(125) else {
            panic!("expected Ok");
        };
        let Ok(f) = t.floor_to_spacing(60) else {
            panic!("expected Ok");
        };
        assert_eq!(f.get(), 120);
    }

    #[test]
    fn floor_negative_rounds_towards_negative_infinity() {
        let Ok(t) = Tick::new(-5) else {
            panic!("expected Ok");
        };
        let Ok(f) = t.floor_to_spacing(10) else {
            panic!("expected Ok");
        };
        assert_eq!(f.get(), -10);
    }

    #[test]
    fn floor_negative_aligned_unchanged() {
        let Ok(t) = Tick::new(-120) else {
            panic!("expected Ok");
        };
        let Ok(f) = t.floor_to_spacing(60) else {
            panic!("expected Ok");
        };
        assert_eq!(f.get(), -120);
    }

    #[test]
    fn floor_zero_spacing_rejected() {
        assert!(Tick::ZERO.floor_to_spacing(0).is_err());
        assert!(Tick::ZERO.floor_to_spacing(-10).is_err());
    }

    // -- Alignment ----------------------------------------------------------

    #[test]
    fn alignment_checks() {
        let Ok(t) = Tick::new(-600) else {
            panic!("expected Ok");
        };
        assert!(t.is_aligned(60));
        assert!(!t.is_aligned(7));
        assert!(!t.is_aligned(0));
    }

    // -- Checked arithmetic -------------------------------------------------

    #[test]
    fn checked_add_within_range() {
        let Ok(t) = Tick::new(100) else {
            panic!("expected Ok");
        };
        assert_eq!(t.checked_add(50).map(|x| x.get()), Some(150));
    }

    #[test]
    fn checked_add_past_max_is_none() {
        assert_eq!(Tick::MAX.checked_add(1), None);
    }

    #[test]
    fn checked_sub_past_min_is_none() {
        assert_eq!(Tick::MIN.checked_sub(1), None);
    }

    // -- Display ------------------------------------------------------------

    #[test]
    fn display() {
        assert_eq!(format!("{}", Tick::ZERO), "Tick(0)");
    }
}
