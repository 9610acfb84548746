//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use range_vault::prelude::*;
//! ```

// Re-export domain types
pub use crate::domain::{
    AccountId, Amount, Liquidity, Ppm, Rounding, Shares, SqrtPriceQ96, Tick, TickRange,
};

// Re-export core traits
pub use crate::traits::{AmmPool, PaymentSink, ShareLedger};

// Re-export math utilities
pub use crate::math::CheckedArithmetic;

// Re-export configuration
pub use crate::config::{StrategyParams, VaultConfig};

// Re-export the controller and its treasury
pub use crate::controller::{Treasury, VaultController};

// Re-export accounting and observability
pub use crate::events::{EventLog, VaultEvent};
pub use crate::governance::Governance;
pub use crate::rewards::RewardLedger;

// Re-export error types
pub use crate::error::{Result, VaultError};

// Re-export in-memory venue implementations
pub use crate::pools::{MemoryShares, SimPool};
