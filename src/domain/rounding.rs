//! Explicit rounding direction for arithmetic operations.

/// Specifies the rounding direction for division operations on domain types
/// and for the full-precision `mul_div` helpers.
///
/// All division in the vault engine requires an explicit `Rounding`
/// parameter to prevent silent precision loss. The convention follows the
/// usual AMM safety rule: round against the party extracting value (down
/// when paying out, up when charging in).
///
/// # Examples
///
/// ```
/// use range_vault::domain::Rounding;
///
/// let r = Rounding::Up;
/// assert!(r.is_up());
/// assert!(!r.is_down());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}
