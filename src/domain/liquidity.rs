//! Pool-internal liquidity unit.

use core::fmt;

/// Liquidity deposited in the pool position.
///
/// An AMM-internal unit representing depth provided within a price range;
/// it relates token amounts to sqrt-price movement and is the quantity the
/// pool's `mint`/`burn` primitives operate on. All `u128` values are valid.
///
/// # Examples
///
/// ```
/// use range_vault::domain::Liquidity;
///
/// let l = Liquidity::new(1_000_000);
/// assert_eq!(l.get(), 1_000_000);
/// assert!(!l.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Liquidity(u128);

impl Liquidity {
    /// Zero liquidity. Burning zero liquidity is the "poke" operation that
    /// materializes accrued fees without changing the position size.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Liquidity` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the liquidity is zero.
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

}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
