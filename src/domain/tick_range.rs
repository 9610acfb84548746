//! Tick range occupied by the vault's pool position.

use core::fmt;

use super::Tick;
use crate::error::VaultError;

/// The tick boundaries of the vault's single concentrated-liquidity position.
///
/// # Invariants
///
/// - `lower < upper` — the range must be non-empty.
/// - Both ticks are within the globally valid tick range (enforced by
///   [`Tick`] construction).
/// - When built through [`TickRange::aligned`], both boundaries are exact
///   multiples of the pool's tick spacing.
///
/// # Examples
///
/// ```
/// use range_vault::domain::{Tick, TickRange};
///
/// let lower = Tick::new(-600).unwrap_or(Tick::ZERO);
/// let upper = Tick::new(600).unwrap_or(Tick::ZERO);
/// let range = TickRange::new(lower, upper);
/// assert!(range.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickRange {
    lower: Tick,
    upper: Tick,
}

impl TickRange {
    /// Creates a new `TickRange` with validated ordering.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidTickRange`] if `lower >= upper`.
    pub const fn new(lower: Tick, upper: Tick) -> crate::error::Result<Self> {
        if lower.get() >= upper.get() {
            return Err(VaultError::InvalidTickRange(
                "lower tick must be less than upper tick",
            ));
        }
        Ok(Self { lower, upper })
    }

    /// Creates a new `TickRange`, additionally requiring both boundaries to
    /// be aligned to `spacing`.
    ///
    /// # Errors
    ///
    /// - [`VaultError::InvalidTickRange`] if `lower >= upper` or either
    ///   boundary is misaligned.
    pub const fn aligned(lower: Tick, upper: Tick, spacing: i32) -> crate::error::Result<Self> {
        if !lower.is_aligned(spacing) || !upper.is_aligned(spacing) {
            return Err(VaultError::InvalidTickRange(
                "range boundaries must be aligned to tick spacing",
            ));
        }
        Self::new(lower, upper)
    }

    /// Returns the lower tick boundary.
    #[must_use]
    pub const fn lower(&self) -> Tick {
        self.lower
    }

    /// Returns the upper tick boundary.
    #[must_use]
    pub const fn upper(&self) -> Tick {
        self.upper
    }

    /// Returns the width of the range in ticks (`upper - lower`).
    ///
    /// Always positive for a valid range.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.upper.get() - self.lower.get()
    }

    /// Returns `true` if the given tick falls within this range.
    ///
    /// The check is lower-inclusive, upper-exclusive, following the
    /// Uniswap v3 convention.
    #[must_use]
    pub const fn contains(&self, tick: Tick) -> bool {
        tick.get() >= self.lower.get() && tick.get() < self.upper.get()
    }
}

impl fmt::Display for TickRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.lower, self.upper)
    }
}
