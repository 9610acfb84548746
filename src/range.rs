//! Position range selection.
//!
//! A vault position is always a symmetric band around a reference tick:
//! the reference is floored to the pool's tick spacing and the band extends
//! `threshold` ticks to each side, where `threshold` is the tick spacing
//! times the strategy's range multiplier (so the bounds stay aligned).
//!
//! Two references are supported. [`base_range`] centers on a tick the
//! caller already trusts (the spot tick behind a TWAP guard).
//! [`range_from_balances`] instead derives the reference from the vault's
//! own idle token balances — the price those holdings imply — which cannot
//! be pushed around by a single-block price excursion.

use crate::domain::{Amount, Tick, TickRange};
use crate::error::{Result, VaultError};
use crate::math::{sqrt_price_from_ratio, tick_at_sqrt_price};

/// Builds the symmetric range `(floor − threshold, floor + threshold)`
/// around `reference_tick` floored to `tick_spacing`.
///
/// Flooring rounds toward negative infinity, so a reference of `-5` with
/// spacing `10` centers on `-10`, not `0`.
///
/// # Errors
///
/// - [`VaultError::InvalidConfiguration`] if `threshold` is zero or not a
///   multiple of `tick_spacing`.
/// - [`VaultError::InvalidTick`] if a bound leaves the global tick domain.
///
/// # Examples
///
/// ```
/// use range_vault::domain::{Tick, TickRange};
/// use range_vault::range::base_range;
///
/// let range = base_range(Tick::ZERO, 600, 60);
/// assert_eq!(range, TickRange::new(Tick::new(-600)?, Tick::new(600)?));
/// # Ok::<(), range_vault::error::VaultError>(())
/// ```
pub fn base_range(reference_tick: Tick, threshold: u32, tick_spacing: i32) -> Result<TickRange> {
    let threshold = i32::try_from(threshold)
        .map_err(|_| VaultError::InvalidConfiguration("range threshold exceeds tick domain"))?;
    if threshold == 0 {
        return Err(VaultError::InvalidConfiguration(
            "range threshold must be greater than zero",
        ));
    }
    if tick_spacing <= 0 || threshold % tick_spacing != 0 {
        return Err(VaultError::InvalidConfiguration(
            "range threshold must be a positive multiple of tick spacing",
        ));
    }
    let floor = reference_tick.floor_to_spacing(tick_spacing)?;
    let lower = floor
        .get()
        .checked_sub(threshold)
        .ok_or(VaultError::InvalidTick("range lower bound underflows"))?;
    let upper = floor
        .get()
        .checked_add(threshold)
        .ok_or(VaultError::InvalidTick("range upper bound overflows"))?;
    TickRange::aligned(Tick::new(lower)?, Tick::new(upper)?, tick_spacing)
}

/// Builds a range centered on the tick implied by the vault's idle
/// balances, `price = balance1 / balance0`.
///
/// Returns `Ok(None)` when either balance is zero — the implied price is
/// undefined then and the caller must fall back to a trusted spot tick.
///
/// # Errors
///
/// Same as [`base_range`], plus
/// [`VaultError::InvalidSqrtPrice`] if the balance ratio falls outside the
/// representable tick domain.
pub fn range_from_balances(
    balance0: Amount,
    balance1: Amount,
    threshold: u32,
    tick_spacing: i32,
) -> Result<Option<TickRange>> {
    if balance0.is_zero() || balance1.is_zero() {
        return Ok(None);
    }
    let implied_sqrt = sqrt_price_from_ratio(balance1, balance0)?;
    let implied_tick = tick_at_sqrt_price(implied_sqrt)?;
    base_range(implied_tick, threshold, tick_spacing).map(Some)
}
