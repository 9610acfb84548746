//! Abstraction over the vault share token.
//!
//! Shares represent proportional claims on everything the vault controls.
//! The controller is the only minter and burner; transfers between holders
//! happen outside this trait and do not concern the vault engine, because
//! reward checkpoints are settled *before* any supply change.

use crate::domain::{AccountId, Shares};
use crate::error::Result;

/// Mint/burn interface of the vault share token.
///
/// # Supply invariant
///
/// `total_supply` equals the sum of all balances at all times. Mint and
/// burn are the only operations that change it.
pub trait ShareLedger {
    /// Total shares outstanding.
    #[must_use]
    fn total_supply(&self) -> Shares;

    /// Shares held by `account`. Zero for unknown accounts.
    #[must_use]
    fn balance_of(&self, account: &AccountId) -> Shares;

    /// Creates `shares` new shares and credits them to `account`.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Overflow`](crate::error::VaultError::Overflow)
    /// if the supply or the balance would exceed the representable range.
    fn mint(&mut self, account: AccountId, shares: Shares) -> Result<()>;

    /// Destroys `shares` from `account`'s balance.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InsufficientBalance`](crate::error::VaultError::InsufficientBalance)
    /// if `account` holds fewer than `shares`.
    fn burn(&mut self, account: AccountId, shares: Shares) -> Result<()>;
}
