//! Trait seams between the vault engine and its environment.
//!
//! The controller is generic over these traits: [`AmmPool`] is the venue
//! whose position it manages, [`PaymentSink`] is how that venue pulls
//! tokens, and [`ShareLedger`] is the share token it mints and burns.

mod pool;
mod share_ledger;

pub use pool::{AmmPool, PaymentSink};
pub use share_ledger::ShareLedger;
