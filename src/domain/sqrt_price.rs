//! Square-root price in Q64.96 fixed-point representation.

use core::fmt;

use primitive_types::U256;

use crate::error::VaultError;

/// Number of fractional bits in the Q64.96 representation.
pub const SQRT_PRICE_FRACTIONAL_BITS: u32 = 96;

/// The square root of the pool price, encoded as a fixed-point number with
/// 96 fractional bits (Q64.96).
///
/// The integer value is `√price · 2^96` where `price` is the raw token1 /
/// token0 exchange rate. A valid sqrt-price occupies at most 160 bits; the
/// zero value is only produced by converting a zero linear price and never
/// describes a live pool.
///
/// # Examples
///
/// ```
/// use primitive_types::U256;
/// use range_vault::domain::SqrtPriceQ96;
///
/// // √1.0 in Q64.96 is exactly 2^96.
/// let unit = SqrtPriceQ96::new(U256::one() << 96);
/// assert!(unit.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SqrtPriceQ96(U256);

impl SqrtPriceQ96 {
    /// Zero sqrt-price, the image of a zero linear price.
    pub const ZERO: Self = Self(U256::zero());

    /// Creates a new `SqrtPriceQ96` with range validation.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidSqrtPrice`] if the value exceeds 160
    /// bits, the widest sqrt-price any valid tick can produce.
    pub fn new(value: U256) -> crate::error::Result<Self> {
        if value.bits() > 160 {
            return Err(VaultError::InvalidSqrtPrice(
                "sqrt price exceeds 160 bits",
            ));
        }
        Ok(Self(value))
    }

    /// The Q64.96 encoding of `√1.0`, i.e. `2^96`.
    #[must_use]
    pub fn one() -> Self {
        Self(U256::one() << SQRT_PRICE_FRACTIONAL_BITS)
    }

    /// Returns the underlying `U256` value.
    #[must_use]
    pub const fn get(&self) -> U256 {
        self.0
    }

    /// Returns `true` if the sqrt-price is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for SqrtPriceQ96 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
