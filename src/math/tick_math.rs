//! Tick to sqrt-price conversion and its inverse.
//!
//! Implements the standard relationship `price = 1.0001^tick` in integer
//! Q64.96 fixed point, using the binary decomposition of the tick over
//! precomputed `sqrt(1.0001^(2^i))` multipliers. The inverse direction is a
//! binary search over the forward function, which guarantees round-trip
//! correctness by construction: `tick_at_sqrt_price(sqrt_price_at_tick(t))
//! == t` for every valid tick.

use primitive_types::U256;

use super::mul_div::u512_to_u256;
use crate::domain::{SqrtPriceQ96, Tick};
use crate::error::{Result, VaultError};

/// Q128.128 multipliers for `1 / sqrt(1.0001^(2^i))`, indexed by bit
/// position `i` of the absolute tick. Standard TickMath constants.
const SQRT_MULTIPLIERS: [u128; 19] = [
    0xfff97272373d413259a46990580e213a,
    0xfff2e50f5f656932ef12357cf3c7fdcc,
    0xffe5caca7e10e4e61c3624eaa0941cd0,
    0xffcb9843d60f6159c9db58835c926644,
    0xff973b41fa98c081472e6896dfb254c0,
    0xff2ea16466c96a3843ec78b326b52861,
    0xfe5dee046a99a2a811c461f1969c3053,
    0xfcbe86c7900a88aedcffc83b479aa3a4,
    0xf987a7253ac413176f2b074cf7815e54,
    0xf3392b0822b70005940c7a398e4b70f3,
    0xe7159475a2c29b7443b29c7fa6e889d9,
    0xd097f3bdfd2022b8845ad8f792aa5825,
    0xa9f746462d870fdf8a65dc1f90e061e5,
    0x70d869a156d2a1b890bb3df62baf32f7,
    0x31be135f97d08fd981231505542fcfa6,
    0x9aa508b5b7a84e1c677de54f3e99bc9,
    0x5d6af8dedb81196699c329225ee604,
    0x2216e584f5fa1ea926041bedfe98,
    0x48a170391f7dc42444e8fa2,
];

/// Multiplier for tick bit 0x1, `1 / sqrt(1.0001)` in Q128.128.
const SQRT_MULTIPLIER_BIT0: u128 = 0xfffcb933bd6fad37aa2d162d1a594001;

/// Computes the Q64.96 sqrt-price at a given tick:
/// `sqrt(1.0001^tick) · 2^96`.
///
/// # Errors
///
/// Propagates [`VaultError::Overflow`] from intermediate narrowing; this
/// cannot occur for ticks produced by [`Tick::new`].
///
/// # Examples
///
/// ```
/// use range_vault::domain::{SqrtPriceQ96, Tick};
/// use range_vault::math::sqrt_price_at_tick;
///
/// let at_zero = sqrt_price_at_tick(Tick::ZERO);
/// assert_eq!(at_zero, Ok(SqrtPriceQ96::one()));
/// ```
pub fn sqrt_price_at_tick(tick: Tick) -> Result<SqrtPriceQ96> {
    let abs_tick = tick.get().unsigned_abs();

    let mut ratio: U256 = if abs_tick & 0x1 != 0 {
        U256::from(SQRT_MULTIPLIER_BIT0)
    } else {
        U256::one() << 128
    };
    for (i, multiplier) in SQRT_MULTIPLIERS.iter().enumerate() {
        if abs_tick & (0x2 << i) != 0 {
            ratio = mul_shift_128(ratio, *multiplier)?;
        }
    }

    // The decomposition computes the reciprocal root; invert for positive ticks.
    if tick.get() > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q64.96, rounding up so the round trip through
    // tick_at_sqrt_price lands on the same tick.
    let mut sqrt = ratio >> 32;
    if !(ratio & ((U256::one() << 32) - U256::one())).is_zero() {
        sqrt += U256::one();
    }
    SqrtPriceQ96::new(sqrt)
}

/// Computes the greatest tick whose sqrt-price is ≤ the given sqrt-price.
///
/// Binary search over [`sqrt_price_at_tick`], so the result is exactly
/// consistent with the forward conversion.
///
/// # Errors
///
/// Returns [`VaultError::InvalidSqrtPrice`] if the value lies outside the
/// sqrt-price range spanned by the valid tick interval.
pub fn tick_at_sqrt_price(sqrt_price: SqrtPriceQ96) -> Result<Tick> {
    let min_sqrt = sqrt_price_at_tick(Tick::MIN)?;
    let max_sqrt = sqrt_price_at_tick(Tick::MAX)?;
    if sqrt_price < min_sqrt || sqrt_price > max_sqrt {
        return Err(VaultError::InvalidSqrtPrice(
            "sqrt price outside valid tick range",
        ));
    }

    let mut lo = Tick::MIN.get();
    let mut hi = Tick::MAX.get();
    // Invariant: sqrt_price_at_tick(lo) <= sqrt_price < sqrt_price_at_tick(hi + 1).
    while lo < hi {
        let mid = midpoint_ceil(lo, hi);
        if sqrt_price_at_tick(Tick::new(mid)?)? <= sqrt_price {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    Tick::new(lo)
}

/// `(ratio × multiplier) >> 128` with a 512-bit intermediate.
fn mul_shift_128(ratio: U256, multiplier: u128) -> Result<U256> {
    let product = ratio.full_mul(U256::from(multiplier));
    u512_to_u256(product >> 128)
}

/// Midpoint rounding towards `hi`, so the search always progresses when
/// `lo + 1 == hi`.
const fn midpoint_ceil(lo: i32, hi: i32) -> i32 {
    // lo and hi are tick indices, far from i32 overflow. div_euclid floors
    // for either sign, so adding one to the sum first yields the ceiling.
    (lo + hi + 1).div_euclid(2)
}
