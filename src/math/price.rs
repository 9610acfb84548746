//! Conversions between the Q64.96 sqrt-price representation and linear
//! prices scaled by a caller-chosen precision.
//!
//! These are the pure price primitives the vault builds on: the share
//! exchange-rate baseline is fixed from [`price_from_sqrt`] at
//! initialization, and [`sqrt_price_from_ratio`] derives a
//! manipulation-resistant implied price from idle token balances when
//! re-ranging.
//!
//! All arithmetic is integer fixed-point; overflow is reported as an error,
//! never wrapped.

use primitive_types::{U256, U512};

use super::mul_div::u512_to_u256;
use crate::domain::{Amount, SqrtPriceQ96, SQRT_PRICE_FRACTIONAL_BITS};
use crate::error::{Result, VaultError};

/// Twice the fractional width of the Q64.96 format, the shift that removes
/// both square-root scale factors after squaring.
const DOUBLE_FRACTIONAL_BITS: u32 = 2 * SQRT_PRICE_FRACTIONAL_BITS;

/// Converts a Q64.96 sqrt-price into a linear price scaled by `precision`:
/// `sqrt² × precision >> 192`.
///
/// # Errors
///
/// Returns [`VaultError::Overflow`] if the scaled price does not fit in
/// `u128`. Overflow is fatal — the value is out of representable range.
///
/// # Examples
///
/// ```
/// use range_vault::domain::SqrtPriceQ96;
/// use range_vault::math::price_from_sqrt;
///
/// // √1.0 → price 1.0, scaled by 1e6.
/// let price = price_from_sqrt(SqrtPriceQ96::one(), 1_000_000);
/// assert_eq!(price, Ok(1_000_000));
/// ```
pub fn price_from_sqrt(sqrt_price: SqrtPriceQ96, precision: u128) -> Result<u128> {
    let squared: U512 = sqrt_price.get().full_mul(sqrt_price.get());
    // sqrt_price is at most 160 bits, so squared is at most 320 bits and
    // the product with a 128-bit precision stays within 512 bits.
    let scaled = squared * U512::from(precision);
    let shifted = scaled >> DOUBLE_FRACTIONAL_BITS;
    let narrowed = u512_to_u256(shifted)?;
    if narrowed.bits() > 128 {
        return Err(VaultError::Overflow("linear price exceeds u128"));
    }
    Ok(narrowed.as_u128())
}

/// Converts a linear price scaled by `precision` back into a Q64.96
/// sqrt-price: `isqrt(price << 192 / precision)`.
///
/// Zero maps to zero. The integer square root converges to the exact floor
/// result for all non-negative inputs.
///
/// # Errors
///
/// - [`VaultError::DivisionByZero`] if `precision` is zero.
/// - [`VaultError::InvalidSqrtPrice`] if the root exceeds 160 bits.
///
/// # Examples
///
/// ```
/// use range_vault::domain::SqrtPriceQ96;
/// use range_vault::math::sqrt_from_price;
///
/// let sqrt = sqrt_from_price(1_000_000, 1_000_000);
/// assert_eq!(sqrt, Ok(SqrtPriceQ96::one()));
/// ```
pub fn sqrt_from_price(price: u128, precision: u128) -> Result<SqrtPriceQ96> {
    if precision == 0 {
        return Err(VaultError::DivisionByZero);
    }
    let shifted = U512::from(price) << DOUBLE_FRACTIONAL_BITS;
    let ratio = shifted / U512::from(precision);
    SqrtPriceQ96::new(integer_sqrt_wide(ratio))
}

/// Derives the Q64.96 sqrt-price implied by a pair of raw token balances:
/// `isqrt(amount1 << 192 / amount0)`.
///
/// This is the price the idle balances themselves "vote" for, used when the
/// instantaneous pool price is deliberately not trusted.
///
/// # Errors
///
/// Returns [`VaultError::DivisionByZero`] if `amount0` is zero.
pub fn sqrt_price_from_ratio(amount1: Amount, amount0: Amount) -> Result<SqrtPriceQ96> {
    if amount0.is_zero() {
        return Err(VaultError::DivisionByZero);
    }
    let shifted = U512::from(amount1.get()) << DOUBLE_FRACTIONAL_BITS;
    let ratio = shifted / U512::from(amount0.get());
    SqrtPriceQ96::new(integer_sqrt_wide(ratio))
}

/// Integer square root over `u128`, exact floor result for all inputs.
///
/// # Examples
///
/// ```
/// use range_vault::math::integer_sqrt;
///
/// assert_eq!(integer_sqrt(0), 0);
/// assert_eq!(integer_sqrt(15), 3);
/// assert_eq!(integer_sqrt(16), 4);
/// ```
#[must_use]
pub fn integer_sqrt(value: u128) -> u128 {
    integer_sqrt_wide(U512::from(value)).as_u128()
}

/// Newton's-method integer square root over a 512-bit value.
///
/// Starts from a power-of-two upper bound on the root and iterates
/// `x ← (x + v/x) / 2`, which decreases monotonically to the floor root.
fn integer_sqrt_wide(value: U512) -> U256 {
    if value <= U512::one() {
        // The root of a 512-bit value fits 256 bits.
        let mut bytes = [0u8; 64];
        value.to_big_endian(&mut bytes);
        return U256::from_big_endian(&bytes[32..]);
    }
    // 2^ceil(bits/2) is an upper bound on the root.
    let shift = value.bits().div_ceil(2);
    let mut x = U512::one() << shift;
    loop {
        let next = (x + value / x) >> 1;
        if next >= x {
            break;
        }
        x = next;
    }
    let mut bytes = [0u8; 64];
    x.to_big_endian(&mut bytes);
    U256::from_big_endian(&bytes[32..])
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const PRECISION: u128 = 1_000_000;

    // -- integer_sqrt -------------------------------------------------------

    #[test]
    fn sqrt_of_zero_and_one() {
        assert_eq!(integer_sqrt(0), 0);
        assert_eq!(integer_sqrt(1), 1);
    }

    #[test]
    fn sqrt_floors_between_squares() {
        assert_eq!(integer_sqrt(2), 1);
        assert_eq!(integer_sqrt(3), 1);
        assert_eq!(integer_sqrt(4), 2);
        assert_eq!(integer_sqrt(99), 9);
        assert_eq!(integer_sqrt(100), 10);
    }

    #[test]
    fn sqrt_of_perfect_squares() {
        for root in [2u128, 17, 1_000, 1 << 40] {
            assert_eq!(integer_sqrt(root * root), root);
        }
    }

    #[test]
    fn sqrt_of_u128_max_floors() {
        // floor(sqrt(2^128 - 1)) == 2^64 - 1.
        assert_eq!(integer_sqrt(u128::MAX), (1u128 << 64) - 1);
    }

    // -- price_from_sqrt ----------------------------------------------------

    #[test]
    fn unit_sqrt_gives_unit_price() {
        let Ok(p) = price_from_sqrt(SqrtPriceQ96::one(), PRECISION) else {
            panic!("expected Ok");
        };
        assert_eq!(p, PRECISION);
    }

    #[test]
    fn doubled_sqrt_quadruples_price() {
        let Ok(doubled) = SqrtPriceQ96::new(U256::one() << 97) else {
            panic!("expected Ok");
        };
        let Ok(p) = price_from_sqrt(doubled, PRECISION) else {
            panic!("expected Ok");
        };
        assert_eq!(p, 4 * PRECISION);
    }

    #[test]
    fn zero_sqrt_gives_zero_price() {
        assert_eq!(price_from_sqrt(SqrtPriceQ96::ZERO, PRECISION), Ok(0));
    }

    #[test]
    fn overflowing_price_is_fatal() {
        let Ok(wide) = SqrtPriceQ96::new((U256::one() << 160) - U256::one()) else {
            panic!("expected Ok");
        };
        assert!(price_from_sqrt(wide, u128::MAX).is_err());
    }

    // -- sqrt_from_price ----------------------------------------------------

    #[test]
    fn unit_price_round_trips() {
        let Ok(s) = sqrt_from_price(PRECISION, PRECISION) else {
            panic!("expected Ok");
        };
        assert_eq!(s, SqrtPriceQ96::one());
    }

    #[test]
    fn zero_price_maps_to_zero() {
        assert_eq!(sqrt_from_price(0, PRECISION), Ok(SqrtPriceQ96::ZERO));
    }

    #[test]
    fn zero_precision_is_error() {
        assert_eq!(sqrt_from_price(1, 0), Err(VaultError::DivisionByZero));
    }

    #[test]
    fn round_trip_through_linear_price() {
        for price in [1u128, 4, 9, 1_000_000, 123_456_789] {
            let scaled = price * PRECISION;
            let Ok(s) = sqrt_from_price(scaled, PRECISION) else {
                panic!("expected Ok");
            };
            let Ok(back) = price_from_sqrt(s, PRECISION) else {
                panic!("expected Ok");
            };
            // The floor sqrt loses at most one ulp of the scaled price.
            assert!(back <= scaled);
            assert!(scaled - back <= 2 * integer_sqrt(scaled) + 1);
        }
    }

    // -- sqrt_price_from_ratio ----------------------------------------------

    #[test]
    fn equal_balances_imply_unit_price() {
        let Ok(s) = sqrt_price_from_ratio(Amount::new(5_000), Amount::new(5_000)) else {
            panic!("expected Ok");
        };
        assert_eq!(s, SqrtPriceQ96::one());
    }

    #[test]
    fn ratio_four_implies_sqrt_two() {
        let Ok(s) = sqrt_price_from_ratio(Amount::new(4_000), Amount::new(1_000)) else {
            panic!("expected Ok");
        };
        assert_eq!(s.get(), U256::one() << 97);
    }

    #[test]
    fn zero_balance0_is_error() {
        assert_eq!(
            sqrt_price_from_ratio(Amount::new(1), Amount::ZERO),
            Err(VaultError::DivisionByZero)
        );
    }
}
