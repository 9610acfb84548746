//! Lazy share-weighted fee distribution.
//!
//! Harvested swap fees are split into a protocol cut and a user share, and
//! the user share is folded into two global *per-share* accumulators at
//! 1e18 fixed-point scale. Individual holders are settled lazily: each
//! account carries a checkpoint of the accumulator value it was last
//! settled against, and the difference times its share balance is what it
//! has earned since.
//!
//! # Invariants
//!
//! - The per-share accumulators never decrease.
//! - The sum of all settled-but-unclaimed rewards never exceeds the
//!   `users_fees` headroom, which grows on harvest and shrinks on payout.
//! - Settlement must happen **before** any change to an account's share
//!   balance, otherwise the new balance would be weighted against fees
//!   earned under the old one.

use std::collections::BTreeMap;

use primitive_types::U256;

use crate::domain::{AccountId, Amount, Ppm, Rounding, Shares};
use crate::error::{Result, VaultError};
use crate::math::{mul_div_u256, CheckedArithmetic};

/// Fixed-point scale of the per-share accumulators.
const REWARD_PRECISION: u128 = 1_000_000_000_000_000_000;

/// Per-account settlement state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct UserCheckpoint {
    /// Rewards settled but not yet paid out.
    stored0: Amount,
    stored1: Amount,
    /// Accumulator values this account was last settled against.
    paid0: U256,
    paid1: U256,
}

/// Global and per-account fee distribution state.
#[derive(Debug, Clone, Default)]
pub struct RewardLedger {
    per_share_stored0: U256,
    per_share_stored1: U256,
    users_fees0: Amount,
    users_fees1: Amount,
    protocol_fees0: Amount,
    protocol_fees1: Amount,
    accounts: BTreeMap<AccountId, UserCheckpoint>,
}

impl RewardLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Token0 per-share accumulator, 1e18 scale. Monotone.
    #[must_use]
    pub fn per_share_stored0(&self) -> U256 {
        self.per_share_stored0
    }

    /// Token1 per-share accumulator, 1e18 scale. Monotone.
    #[must_use]
    pub fn per_share_stored1(&self) -> U256 {
        self.per_share_stored1
    }

    /// Remaining user-fee headroom in token0.
    #[must_use]
    pub fn users_fees0(&self) -> Amount {
        self.users_fees0
    }

    /// Remaining user-fee headroom in token1.
    #[must_use]
    pub fn users_fees1(&self) -> Amount {
        self.users_fees1
    }

    /// Protocol fees accrued and not yet withdrawn, token0.
    #[must_use]
    pub fn protocol_fees0(&self) -> Amount {
        self.protocol_fees0
    }

    /// Protocol fees accrued and not yet withdrawn, token1.
    #[must_use]
    pub fn protocol_fees1(&self) -> Amount {
        self.protocol_fees1
    }

    /// Splits a harvested fee batch into the protocol cut and the user
    /// share, crediting both sides' lifetime accumulators.
    ///
    /// The protocol cut is floored, so the user side receives every
    /// remainder unit.
    ///
    /// Returns the user share `(user0, user1)` for subsequent accrual.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Overflow`] if an accumulator would leave the
    /// representable range.
    pub fn split(
        &mut self,
        collected0: Amount,
        collected1: Amount,
        protocol_fee_ppm: Ppm,
    ) -> Result<(Amount, Amount)> {
        let fee0 = protocol_fee_ppm
            .apply(&collected0, Rounding::Down)
            .ok_or(VaultError::Overflow("protocol fee cut overflow"))?;
        let fee1 = protocol_fee_ppm
            .apply(&collected1, Rounding::Down)
            .ok_or(VaultError::Overflow("protocol fee cut overflow"))?;
        let user0 = collected0.safe_sub(&fee0)?;
        let user1 = collected1.safe_sub(&fee1)?;

        self.protocol_fees0 = self.protocol_fees0.safe_add(&fee0)?;
        self.protocol_fees1 = self.protocol_fees1.safe_add(&fee1)?;
        self.users_fees0 = self.users_fees0.safe_add(&user0)?;
        self.users_fees1 = self.users_fees1.safe_add(&user1)?;
        Ok((user0, user1))
    }

    /// Folds a user-share batch into the per-share accumulators.
    ///
    /// `per_share += share · 1e18 / total_shares`, floored. A zero total
    /// supply makes this a no-op: there is nobody to weight the fees over,
    /// and the batch stays in the headroom until supply exists.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Overflow`] if an accumulator would leave the
    /// 256-bit range.
    pub fn accrue(
        &mut self,
        user_share0: Amount,
        user_share1: Amount,
        total_shares: Shares,
    ) -> Result<()> {
        if total_shares.is_zero() {
            return Ok(());
        }
        let total = U256::from(total_shares.get());
        let delta0 = mul_div_u256(
            U256::from(user_share0.get()),
            U256::from(REWARD_PRECISION),
            total,
            Rounding::Down,
        )?;
        let delta1 = mul_div_u256(
            U256::from(user_share1.get()),
            U256::from(REWARD_PRECISION),
            total,
            Rounding::Down,
        )?;
        self.per_share_stored0 = self
            .per_share_stored0
            .checked_add(delta0)
            .ok_or(VaultError::Overflow("per-share accumulator overflow"))?;
        self.per_share_stored1 = self
            .per_share_stored1
            .checked_add(delta1)
            .ok_or(VaultError::Overflow("per-share accumulator overflow"))?;
        Ok(())
    }

    /// Settles `account` against the current accumulators.
    ///
    /// Moves everything earned since the last settlement into the
    /// account's stored balance and advances its checkpoint. Must be
    /// called with the account's share balance *before* any mint or burn
    /// touching it.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Overflow`] if the owed amount leaves the
    /// `u128` range.
    pub fn settle(&mut self, account: AccountId, balance: Shares) -> Result<()> {
        let checkpoint = self.accounts.entry(account).or_default();
        let owed0 = pending(balance, self.per_share_stored0, checkpoint.paid0)?;
        let owed1 = pending(balance, self.per_share_stored1, checkpoint.paid1)?;
        checkpoint.stored0 = checkpoint.stored0.safe_add(&owed0)?;
        checkpoint.stored1 = checkpoint.stored1.safe_add(&owed1)?;
        checkpoint.paid0 = self.per_share_stored0;
        checkpoint.paid1 = self.per_share_stored1;
        Ok(())
    }

    /// Rewards currently claimable by `account`: stored plus anything
    /// earned since the last settlement, without mutating state.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Overflow`] if the owed amount leaves the
    /// `u128` range.
    pub fn claimable(&self, account: &AccountId, balance: Shares) -> Result<(Amount, Amount)> {
        let checkpoint = self.accounts.get(account).copied().unwrap_or_default();
        let owed0 = pending(balance, self.per_share_stored0, checkpoint.paid0)?;
        let owed1 = pending(balance, self.per_share_stored1, checkpoint.paid1)?;
        Ok((
            checkpoint.stored0.safe_add(&owed0)?,
            checkpoint.stored1.safe_add(&owed1)?,
        ))
    }

    /// Deducts a payout from `account`'s stored rewards and the user-fee
    /// headroom. The account must already be settled.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InsufficientFees`] if either amount exceeds
    /// the account's stored balance.
    pub fn claim(&mut self, account: AccountId, amount0: Amount, amount1: Amount) -> Result<()> {
        let checkpoint = self
            .accounts
            .get_mut(&account)
            .ok_or(VaultError::InsufficientFees("account has no settled rewards"))?;
        checkpoint.stored0 = checkpoint
            .stored0
            .checked_sub(&amount0)
            .ok_or(VaultError::InsufficientFees("claim exceeds stored token0 rewards"))?;
        checkpoint.stored1 = checkpoint
            .stored1
            .checked_sub(&amount1)
            .ok_or(VaultError::InsufficientFees("claim exceeds stored token1 rewards"))?;
        self.users_fees0 = self
            .users_fees0
            .checked_sub(&amount0)
            .ok_or(VaultError::InsufficientFees("claim exceeds user fee headroom"))?;
        self.users_fees1 = self
            .users_fees1
            .checked_sub(&amount1)
            .ok_or(VaultError::InsufficientFees("claim exceeds user fee headroom"))?;
        Ok(())
    }

    /// Deducts a protocol withdrawal from the accrued protocol fees.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InsufficientFees`] if either amount exceeds
    /// the accrued balance.
    pub fn collect_protocol(&mut self, amount0: Amount, amount1: Amount) -> Result<()> {
        self.protocol_fees0 = self
            .protocol_fees0
            .checked_sub(&amount0)
            .ok_or(VaultError::InsufficientFees("withdrawal exceeds accrued protocol fees"))?;
        self.protocol_fees1 = self
            .protocol_fees1
            .checked_sub(&amount1)
            .ok_or(VaultError::InsufficientFees("withdrawal exceeds accrued protocol fees"))?;
        Ok(())
    }
}

/// `balance · (global − paid) / 1e18`, floored.
fn pending(balance: Shares, global: U256, paid: U256) -> Result<Amount> {
    // Accumulators are monotone, so the checkpoint can never be ahead.
    let delta = global
        .checked_sub(paid)
        .ok_or(VaultError::Underflow("checkpoint ahead of accumulator"))?;
    let owed = mul_div_u256(
        U256::from(balance.get()),
        delta,
        U256::from(REWARD_PRECISION),
        Rounding::Down,
    )?;
    if owed.bits() > 128 {
        return Err(VaultError::Overflow("owed rewards exceed u128"));
    }
    Ok(Amount::new(owed.as_u128()))
}
