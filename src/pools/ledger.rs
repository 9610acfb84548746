//! In-memory share ledger.

use std::collections::BTreeMap;

use crate::domain::{AccountId, Shares};
use crate::error::{Result, VaultError};
use crate::traits::ShareLedger;

/// [`ShareLedger`] backed by a map, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryShares {
    supply: Shares,
    balances: BTreeMap<AccountId, Shares>,
}

impl MemoryShares {
    /// Creates an empty ledger with zero supply.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            supply: Shares::ZERO,
            balances: BTreeMap::new(),
        }
    }
}

impl ShareLedger for MemoryShares {
    fn total_supply(&self) -> Shares {
        self.supply
    }

    fn balance_of(&self, account: &AccountId) -> Shares {
        self.balances
            .get(account)
            .copied()
            .unwrap_or(Shares::ZERO)
    }

    fn mint(&mut self, account: AccountId, shares: Shares) -> Result<()> {
        let supply = self
            .supply
            .checked_add(&shares)
            .ok_or(VaultError::Overflow("share supply"))?;
        let balance = self
            .balance_of(&account)
            .checked_add(&shares)
            .ok_or(VaultError::Overflow("share balance"))?;
        self.supply = supply;
        self.balances.insert(account, balance);
        Ok(())
    }

    fn burn(&mut self, account: AccountId, shares: Shares) -> Result<()> {
        let balance = self
            .balance_of(&account)
            .checked_sub(&shares)
            .ok_or(VaultError::InsufficientBalance("share balance"))?;
        let supply = self
            .supply
            .checked_sub(&shares)
            .ok_or(VaultError::InsufficientBalance("share supply"))?;
        self.supply = supply;
        if balance.is_zero() {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, balance);
        }
        Ok(())
    }
}
