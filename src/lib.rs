//! # Range Vault
//!
//! Automated liquidity-management vault engine for concentrated-liquidity
//! AMM pools: range selection, imbalance-corrected rebalancing, and lazy
//! share-weighted fee distribution behind a single controller.
//!
//! The vault holds two tokens, keeps them deployed in a symmetric tick
//! band around a reference price, and issues shares against deposits.
//! Swap fees earned by the position are harvested on every interaction,
//! split into a protocol cut and a user share, and distributed lazily
//! through per-share accumulators so holders pull rewards on their own
//! schedule.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize`/`Deserialize` on domain types and events |
//!
//! # Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! range-vault = "0.1"
//! ```
//!
//! ## Initialize a vault and make a deposit
//!
//! ```rust
//! use range_vault::config::{StrategyParams, VaultConfig};
//! use range_vault::controller::VaultController;
//! use range_vault::domain::{AccountId, Amount, Ppm, Shares, SqrtPriceQ96};
//! use range_vault::pools::{MemoryShares, SimPool};
//!
//! // 1. Describe the strategy: a 10x-spacing band behind a 10-minute
//! //    TWAP guard, 10% protocol fee, 1% corrective-swap impact cap.
//! let strategy = StrategyParams::new(
//!     600,
//!     120,
//!     10,
//!     Ppm::new(100_000),
//!     Ppm::new(10_000),
//! )?;
//! let config = VaultConfig::new(strategy, Shares::new(u128::MAX / 2), 18, 6)?;
//!
//! // 2. Wire the controller to a pool and a share ledger.
//! let pool = SimPool::new(AccountId::from_bytes([1u8; 32]), 60, SqrtPriceQ96::one())?;
//! let owner = AccountId::from_bytes([2u8; 32]);
//! let mut vault = VaultController::new(pool, MemoryShares::new(), config, owner)?;
//!
//! // 3. Seed the first position, then accept public deposits.
//! vault.init(owner, Amount::new(1_000_000), Amount::new(1_000_000))?;
//! let depositor = AccountId::from_bytes([3u8; 32]);
//! let shares = vault.deposit(depositor, Amount::new(500_000), Amount::new(500_000))?;
//! assert!(!shares.is_zero());
//! # Ok::<(), range_vault::error::VaultError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐
//! │    Callers     │  depositors, the owner, permissionless keepers
//! └───────┬───────┘
//!         │ deposit / withdraw / rerange / rebalance / collect_fees
//!         ▼
//! ┌───────────────┐
//! │  Controller    │  orchestration, re-entrancy guard, TWAP deviation gate
//! └───┬───────┬───┘
//!     │       │ RewardLedger (per-share accumulators, checkpoints)
//!     │       ▼
//!     │  ┌───────────────┐
//!     │  │   Accounting   │  rewards, events, governance, config
//!     │  └───────────────┘
//!     │ AmmPool + ShareLedger traits
//!     ▼
//! ┌───────────────┐
//! │   Venue        │  SimPool / MemoryShares, or a real pool adapter
//! └───────┬───────┘
//!         │ liquidity + tick math
//!         ▼
//! ┌───────────────┐
//! │   Domain       │  Amount, Shares, Tick, TickRange, SqrtPriceQ96, …
//! └───────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`Tick`](domain::Tick), [`TickRange`](domain::TickRange), etc. |
//! | [`traits`] | External surfaces: [`AmmPool`](traits::AmmPool), [`ShareLedger`](traits::ShareLedger), [`PaymentSink`](traits::PaymentSink) |
//! | [`config`] | Validated strategy and vault parameters |
//! | [`controller`] | [`VaultController`](controller::VaultController): the full vault lifecycle |
//! | [`range`] | Symmetric band selection around spot or balance-implied ticks |
//! | [`correction`] | Corrective-swap sizing and price limits for rebalancing |
//! | [`rewards`] | [`RewardLedger`](rewards::RewardLedger): lazy share-weighted fee distribution |
//! | [`governance`] | Two-step ownership handover |
//! | [`events`] | Typed observability events and the buffered [`EventLog`](events::EventLog) |
//! | [`pools`] | In-memory [`AmmPool`](traits::AmmPool)/[`ShareLedger`](traits::ShareLedger) implementations |
//! | [`math`] | Checked arithmetic, 512-bit mul-div, tick and liquidity math |
//! | [`error`] | [`VaultError`](error::VaultError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

// Module declarations (always compiled)
pub mod config;
pub mod controller;
pub mod correction;
pub mod domain;
pub mod error;
pub mod events;
pub mod governance;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod range;
pub mod rewards;
pub mod traits;

#[cfg(test)]
mod proptest_properties;
