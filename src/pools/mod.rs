//! In-memory implementations of the vault's external surfaces.
//!
//! Production deployments wire [`crate::traits::AmmPool`] and
//! [`crate::traits::ShareLedger`] to a real venue and token. The types
//! here back the same traits with plain data structures so the full
//! vault lifecycle runs deterministically in-process.

mod ledger;
mod sim;

pub use ledger::MemoryShares;
pub use sim::SimPool;
