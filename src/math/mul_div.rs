//! Full-precision multiply-then-divide helpers.
//!
//! Products of two 128-bit values are computed in 256 bits, and products of
//! two 256-bit values in 512 bits, so `a × b / d` never loses precision or
//! wraps in an intermediate step. The final result is checked back into the
//! caller's width; leaving the representable range is an error, never a
//! silent truncation.

use primitive_types::{U256, U512};

use crate::domain::Rounding;
use crate::error::{Result, VaultError};

/// Computes `a × b / denominator` over `u128` with full 256-bit
/// intermediates and explicit rounding.
///
/// # Errors
///
/// - [`VaultError::DivisionByZero`] if `denominator` is zero.
/// - [`VaultError::Overflow`] if the quotient does not fit in `u128`.
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128> {
    if denominator == 0 {
        return Err(VaultError::DivisionByZero);
    }
    let product = U256::from(a) * U256::from(b);
    let d = U256::from(denominator);
    let mut quotient = product / d;
    if rounding.is_up() && !(product % d).is_zero() {
        quotient += U256::one();
    }
    if quotient.bits() > 128 {
        return Err(VaultError::Overflow("mul_div quotient exceeds u128"));
    }
    Ok(quotient.as_u128())
}

/// Computes `a × b / denominator` over `U256` with full 512-bit
/// intermediates and explicit rounding.
///
/// # Errors
///
/// - [`VaultError::DivisionByZero`] if `denominator` is zero.
/// - [`VaultError::Overflow`] if the quotient does not fit in `U256`.
pub fn mul_div_u256(a: U256, b: U256, denominator: U256, rounding: Rounding) -> Result<U256> {
    if denominator.is_zero() {
        return Err(VaultError::DivisionByZero);
    }
    let product = a.full_mul(b);
    let d = U512::from(denominator);
    let mut quotient = product / d;
    if rounding.is_up() && !(product % d).is_zero() {
        quotient += U512::one();
    }
    u512_to_u256(quotient)
}

/// Narrows a `U512` back to `U256`.
///
/// # Errors
///
/// Returns [`VaultError::Overflow`] if the value occupies more than 256 bits.
pub(crate) fn u512_to_u256(value: U512) -> Result<U256> {
    if value.bits() > 256 {
        return Err(VaultError::Overflow("value exceeds 256 bits"));
    }
    let mut bytes = [0u8; 64];
    value.to_big_endian(&mut bytes);
    Ok(U256::from_big_endian(&bytes[32..]))
}
