//! Fundamental domain value types used throughout the vault engine.
//!
//! This module contains the core value types that model the vault domain:
//! token amounts, liquidity, shares, ticks and tick ranges, sqrt-prices,
//! account identifiers, and parts-per-million rates. All types use newtypes
//! with validated constructors to enforce invariants.

mod account;
mod amount;
mod liquidity;
mod ppm;
mod rounding;
mod shares;
mod sqrt_price;
mod tick;
mod tick_range;

pub use account::AccountId;
pub use amount::Amount;
pub use liquidity::Liquidity;
pub use ppm::{Ppm, PPM_DENOMINATOR};
pub use rounding::Rounding;
pub use shares::Shares;
pub use sqrt_price::{SqrtPriceQ96, SQRT_PRICE_FRACTIONAL_BITS};
pub use tick::Tick;
pub use tick_range::TickRange;
