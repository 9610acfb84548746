//! Conversions between liquidity and token amounts within a tick range.
//!
//! For a range `[sqrt_a, sqrt_b]` and liquidity `L` (all prices Q64.96):
//!
//! ```text
//! amount0 = L · 2^96 · (sqrt_b − sqrt_a) / (sqrt_b · sqrt_a)
//! amount1 = L · (sqrt_b − sqrt_a) / 2^96
//! ```
//!
//! Only the part of the range on each side of the current price holds the
//! corresponding token: entirely below the range the position is all
//! token0, entirely above it is all token1, and inside it is a mix split
//! at the current sqrt-price.

use primitive_types::U256;

use super::mul_div::mul_div_u256;
use crate::domain::{Amount, Liquidity, Rounding, SqrtPriceQ96, SQRT_PRICE_FRACTIONAL_BITS};
use crate::error::{Result, VaultError};

/// Computes the maximum liquidity the given token amounts can fund within
/// `[sqrt_lower, sqrt_upper]` at the current sqrt-price.
///
/// Inside the range the result is the minimum of the two single-sided
/// liquidities — the binding constraint decides, and the surplus of the
/// other token stays idle.
///
/// # Errors
///
/// - [`VaultError::InvalidTickRange`] if `sqrt_lower >= sqrt_upper`.
/// - [`VaultError::Overflow`] if the liquidity does not fit in `u128`.
pub fn liquidity_for_amounts(
    current: SqrtPriceQ96,
    sqrt_lower: SqrtPriceQ96,
    sqrt_upper: SqrtPriceQ96,
    amount0: Amount,
    amount1: Amount,
) -> Result<Liquidity> {
    check_order(sqrt_lower, sqrt_upper)?;
    if current <= sqrt_lower {
        liquidity_for_amount0(sqrt_lower, sqrt_upper, amount0)
    } else if current < sqrt_upper {
        let from0 = liquidity_for_amount0(current, sqrt_upper, amount0)?;
        let from1 = liquidity_for_amount1(sqrt_lower, current, amount1)?;
        Ok(from0.min(from1))
    } else {
        liquidity_for_amount1(sqrt_lower, sqrt_upper, amount1)
    }
}

/// Computes the token amounts a position of the given liquidity holds
/// within `[sqrt_lower, sqrt_upper]` at the current sqrt-price.
///
/// Amounts are floored; a mint that consumes these amounts never takes
/// more than the liquidity is worth.
///
/// # Errors
///
/// - [`VaultError::InvalidTickRange`] if `sqrt_lower >= sqrt_upper`.
/// - [`VaultError::Overflow`] if an amount does not fit in `u128`.
pub fn amounts_for_liquidity(
    current: SqrtPriceQ96,
    sqrt_lower: SqrtPriceQ96,
    sqrt_upper: SqrtPriceQ96,
    liquidity: Liquidity,
) -> Result<(Amount, Amount)> {
    check_order(sqrt_lower, sqrt_upper)?;
    if current <= sqrt_lower {
        Ok((amount0_delta(sqrt_lower, sqrt_upper, liquidity)?, Amount::ZERO))
    } else if current < sqrt_upper {
        Ok((
            amount0_delta(current, sqrt_upper, liquidity)?,
            amount1_delta(sqrt_lower, current, liquidity)?,
        ))
    } else {
        Ok((Amount::ZERO, amount1_delta(sqrt_lower, sqrt_upper, liquidity)?))
    }
}

/// Liquidity fundable by `amount0` alone over `[sqrt_a, sqrt_b]`:
/// `amount0 · (sqrt_a · sqrt_b / 2^96) / (sqrt_b − sqrt_a)`.
pub fn liquidity_for_amount0(
    sqrt_a: SqrtPriceQ96,
    sqrt_b: SqrtPriceQ96,
    amount0: Amount,
) -> Result<Liquidity> {
    check_order(sqrt_a, sqrt_b)?;
    let q96 = U256::one() << SQRT_PRICE_FRACTIONAL_BITS;
    let intermediate = mul_div_u256(sqrt_a.get(), sqrt_b.get(), q96, Rounding::Down)?;
    let liquidity = mul_div_u256(
        U256::from(amount0.get()),
        intermediate,
        sqrt_b.get() - sqrt_a.get(),
        Rounding::Down,
    )?;
    narrow_liquidity(liquidity)
}

/// Liquidity fundable by `amount1` alone over `[sqrt_a, sqrt_b]`:
/// `amount1 · 2^96 / (sqrt_b − sqrt_a)`.
pub fn liquidity_for_amount1(
    sqrt_a: SqrtPriceQ96,
    sqrt_b: SqrtPriceQ96,
    amount1: Amount,
) -> Result<Liquidity> {
    check_order(sqrt_a, sqrt_b)?;
    let q96 = U256::one() << SQRT_PRICE_FRACTIONAL_BITS;
    let liquidity = mul_div_u256(
        U256::from(amount1.get()),
        q96,
        sqrt_b.get() - sqrt_a.get(),
        Rounding::Down,
    )?;
    narrow_liquidity(liquidity)
}

/// Token0 held by liquidity `L` over `[sqrt_a, sqrt_b]`, floored.
fn amount0_delta(sqrt_a: SqrtPriceQ96, sqrt_b: SqrtPriceQ96, liquidity: Liquidity) -> Result<Amount> {
    if sqrt_a.is_zero() {
        return Err(VaultError::DivisionByZero);
    }
    let shifted = U256::from(liquidity.get()) << SQRT_PRICE_FRACTIONAL_BITS;
    let scaled = mul_div_u256(
        shifted,
        sqrt_b.get() - sqrt_a.get(),
        sqrt_b.get(),
        Rounding::Down,
    )?;
    narrow_amount(scaled / sqrt_a.get())
}

/// Token1 held by liquidity `L` over `[sqrt_a, sqrt_b]`, floored.
fn amount1_delta(sqrt_a: SqrtPriceQ96, sqrt_b: SqrtPriceQ96, liquidity: Liquidity) -> Result<Amount> {
    let q96 = U256::one() << SQRT_PRICE_FRACTIONAL_BITS;
    let scaled = mul_div_u256(
        U256::from(liquidity.get()),
        sqrt_b.get() - sqrt_a.get(),
        q96,
        Rounding::Down,
    )?;
    narrow_amount(scaled)
}

fn check_order(sqrt_a: SqrtPriceQ96, sqrt_b: SqrtPriceQ96) -> Result<()> {
    if sqrt_a >= sqrt_b {
        return Err(VaultError::InvalidTickRange(
            "lower sqrt price must be below upper sqrt price",
        ));
    }
    Ok(())
}

fn narrow_liquidity(value: U256) -> Result<Liquidity> {
    if value.bits() > 128 {
        return Err(VaultError::Overflow("liquidity exceeds u128"));
    }
    Ok(Liquidity::new(value.as_u128()))
}

fn narrow_amount(value: U256) -> Result<Amount> {
    if value.bits() > 128 {
        return Err(VaultError::Overflow("token amount exceeds u128"));
    }
    Ok(Amount::new(value.as_u128()))
}
