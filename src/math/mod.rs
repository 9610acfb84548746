//! Fixed-point arithmetic for the vault engine.
//!
//! All math is integer-only: Q64.96 sqrt-prices, full-width intermediate
//! products via `U256`/`U512`, and explicit [`Rounding`](crate::domain::Rounding)
//! on every lossy division. Nothing here touches floating point, so results
//! are bit-for-bit reproducible across platforms.
//!
//! # Layout
//!
//! - [`checked`](CheckedArithmetic) — overflow-safe operations on domain types
//! - [`mul_div`] — full-precision `a × b / d`
//! - price conversions between Q64.96 roots and linear scaled prices
//! - tick math (`1.0001^tick` and its inverse)
//! - liquidity ↔ token-amount conversions over a tick range

mod checked;
mod liquidity;
mod mul_div;
mod price;
mod tick_math;

pub use checked::CheckedArithmetic;
pub use liquidity::{
    amounts_for_liquidity, liquidity_for_amount0, liquidity_for_amount1, liquidity_for_amounts,
};
pub use mul_div::{mul_div, mul_div_u256};
pub use price::{integer_sqrt, price_from_sqrt, sqrt_from_price, sqrt_price_from_ratio};
pub use tick_math::{sqrt_price_at_tick, tick_at_sqrt_price};
