//! Inventory correction for rebalancing.
//!
//! After a reposition the vault's idle holdings rarely match what the new
//! range can absorb: one token is in excess. The corrector decides which
//! token to sell, how much, and how far the swap may move the price.
//!
//! Only *half* the excess is swapped. Selling the excess moves the price,
//! which itself shifts the range's absorbable mix toward the oversupplied
//! token; half is the first-order correction that avoids overshooting. The
//! remainder is re-measured after the swap.

use primitive_types::U256;

use crate::domain::{Amount, Ppm, Rounding, SqrtPriceQ96, PPM_DENOMINATOR};
use crate::error::{Result, VaultError};
use crate::math::mul_div_u256;

/// Decides the swap direction from the valued excesses.
///
/// The token0 excess is valued in token1 terms at the current price
/// (`excess0 · price`), then compared against the raw token1 excess.
/// Returns `true` (sell token0, price moves down) when token0 is the
/// oversupplied side.
///
/// # Errors
///
/// Returns [`VaultError::Overflow`] if valuing the token0 excess leaves
/// the 256-bit range.
pub fn swap_direction(
    desired0: Amount,
    desired1: Amount,
    achievable0: Amount,
    achievable1: Amount,
    sqrt_price: SqrtPriceQ96,
) -> Result<bool> {
    let excess0 = desired0.saturating_sub(&achievable0);
    let excess1 = desired1.saturating_sub(&achievable1);

    // excess0 · sqrt² >> 192, the token1 value of the token0 surplus.
    let valued0 = {
        let squared = mul_div_u256(
            sqrt_price.get(),
            sqrt_price.get(),
            U256::one() << 96,
            Rounding::Down,
        )?;
        mul_div_u256(
            U256::from(excess0.get()),
            squared,
            U256::one() << 96,
            Rounding::Down,
        )?
    };

    Ok(valued0 > U256::from(excess1.get()))
}

/// Size of the corrective swap: half the unplaceable excess.
///
/// Zero when the range can already absorb the full desired amount.
#[must_use]
pub fn swap_amount(desired: Amount, achievable: Amount) -> Amount {
    let excess = desired.saturating_sub(&achievable);
    Amount::new(excess.get() / 2)
}

/// Worst acceptable sqrt-price for the corrective swap.
///
/// The budget `impact_ppm` bounds the full round-trip price impact; the
/// limit sits half that distance from the current price, below it when
/// selling token0 and above it when selling token1.
///
/// # Errors
///
/// - [`VaultError::InvalidSqrtPrice`] if the limit would leave the valid
///   sqrt-price range (including falling to zero).
pub fn price_limit(
    current: SqrtPriceQ96,
    impact_ppm: Ppm,
    zero_for_one: bool,
) -> Result<SqrtPriceQ96> {
    // current · (impact / 2) / 1e6, computed as current · impact / 2e6.
    let delta = mul_div_u256(
        current.get(),
        U256::from(impact_ppm.get()),
        U256::from(2 * u64::from(PPM_DENOMINATOR)),
        Rounding::Down,
    )?;
    let limit = if zero_for_one {
        current
            .get()
            .checked_sub(delta)
            .ok_or(VaultError::InvalidSqrtPrice("price limit underflows"))?
    } else {
        current
            .get()
            .checked_add(delta)
            .ok_or(VaultError::InvalidSqrtPrice("price limit overflows"))?
    };
    if limit.is_zero() {
        return Err(VaultError::InvalidSqrtPrice("price limit cannot be zero"));
    }
    SqrtPriceQ96::new(limit)
}
