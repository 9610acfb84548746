//! The vault controller: a single managed position plus share accounting.
//!
//! [`VaultController`] owns the whole lifecycle. It keeps exactly one
//! concentrated-liquidity position open at a time, prices deposits and
//! withdrawals in vault shares, harvests swap fees into the
//! [`RewardLedger`], and repositions the range when asked.
//!
//! # Operation ordering
//!
//! Every entry point that can change share supply or position liquidity
//! first runs the same preamble: poke the position, harvest and split any
//! pending fees, fold the user share into the per-share accumulators, and
//! settle the affected account. Only then does the operation itself run.
//! Skipping any of these steps would weight fees against the wrong share
//! balance.
//!
//! # Guards
//!
//! - **Deviation guard**: the spot tick must sit within the configured
//!   distance of the time-weighted average tick; at exactly the limit the
//!   operation proceeds, one tick beyond it aborts.
//! - **Re-entrancy guard**: an explicit in-progress flag rejects nested
//!   calls arriving through payment callbacks.

use primitive_types::U512;

use crate::config::{StrategyParams, VaultConfig};
use crate::correction::{price_limit, swap_amount, swap_direction};
use crate::domain::{
    AccountId, Amount, Liquidity, Rounding, Shares, SqrtPriceQ96, TickRange, PPM_DENOMINATOR,
};
use crate::error::{Result, VaultError};
use crate::events::{EventLog, VaultEvent};
use crate::governance::Governance;
use crate::math::{
    amounts_for_liquidity, liquidity_for_amounts, mul_div, sqrt_price_at_tick, CheckedArithmetic,
};
use crate::range::{base_range, range_from_balances};
use crate::rewards::RewardLedger;
use crate::traits::{AmmPool, PaymentSink, ShareLedger};

/// The vault's idle token holdings, doubling as the payment sink for pool
/// callbacks.
///
/// Every token the vault controls but has not placed into the position
/// lives here. Pool mints and swaps pull their input through
/// [`PaymentSink::pay`], which verifies the calling pool before releasing
/// anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Treasury {
    pool_id: AccountId,
    balance0: Amount,
    balance1: Amount,
}

impl Treasury {
    fn new(pool_id: AccountId) -> Self {
        Self {
            pool_id,
            balance0: Amount::ZERO,
            balance1: Amount::ZERO,
        }
    }

    /// Idle token0.
    #[must_use]
    pub const fn balance0(&self) -> Amount {
        self.balance0
    }

    /// Idle token1.
    #[must_use]
    pub const fn balance1(&self) -> Amount {
        self.balance1
    }

    fn credit(&mut self, amount0: Amount, amount1: Amount) -> Result<()> {
        self.balance0 = self.balance0.safe_add(&amount0)?;
        self.balance1 = self.balance1.safe_add(&amount1)?;
        Ok(())
    }

    fn debit(&mut self, amount0: Amount, amount1: Amount) -> Result<()> {
        self.balance0 = self
            .balance0
            .checked_sub(&amount0)
            .ok_or(VaultError::InsufficientBalance("idle token0 balance"))?;
        self.balance1 = self
            .balance1
            .checked_sub(&amount1)
            .ok_or(VaultError::InsufficientBalance("idle token1 balance"))?;
        Ok(())
    }
}

impl PaymentSink for Treasury {
    fn pay(&mut self, pool: AccountId, amount0: Amount, amount1: Amount) -> Result<()> {
        if pool != self.pool_id {
            return Err(VaultError::UnauthorizedCallback);
        }
        self.debit(amount0, amount1)
    }
}

/// Automated liquidity vault over a single concentrated-liquidity pool.
///
/// Generic over the pool and the share token so the engine can run against
/// an on-chain adapter or an in-memory simulation unchanged.
#[derive(Debug)]
pub struct VaultController<P: AmmPool, L: ShareLedger> {
    pool: P,
    shares: L,
    config: VaultConfig,
    governance: Governance,
    rewards: RewardLedger,
    events: EventLog,
    treasury: Treasury,
    range: Option<TickRange>,
    universal_multiplier: u128,
    finalized: bool,
    entered: bool,
}

impl<P: AmmPool, L: ShareLedger> VaultController<P, L> {
    /// Creates an uninitialized controller. No operation other than
    /// [`init`](Self::init) succeeds until initialization.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfiguration`] if `config` does not
    /// validate.
    pub fn new(pool: P, shares: L, config: VaultConfig, owner: AccountId) -> Result<Self> {
        config.validate()?;
        let pool_id = pool.pool_id();
        Ok(Self {
            pool,
            shares,
            config,
            governance: Governance::new(owner),
            rewards: RewardLedger::new(),
            events: EventLog::new(),
            treasury: Treasury::new(pool_id),
            range: None,
            universal_multiplier: 0,
            finalized: false,
            entered: false,
        })
    }

    // -- read side ----------------------------------------------------------

    /// The pool this vault manages.
    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// Mutable pool access, for simulations that move the market between
    /// vault operations.
    pub fn pool_mut(&mut self) -> &mut P {
        &mut self.pool
    }

    /// The share ledger.
    pub fn share_ledger(&self) -> &L {
        &self.shares
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// The current owner.
    #[must_use]
    pub const fn owner(&self) -> AccountId {
        self.governance.owner()
    }

    /// The active range and its position liquidity, if a position exists.
    #[must_use]
    pub fn position(&self) -> Option<(TickRange, Liquidity)> {
        self.range
            .map(|range| (range, self.pool.position_liquidity(range)))
    }

    /// Idle balances not currently placed in the position.
    #[must_use]
    pub fn idle_balances(&self) -> (Amount, Amount) {
        (self.treasury.balance0(), self.treasury.balance1())
    }

    /// Idle balances net of the fee reserves: harvested rewards still owed
    /// to holders and accrued protocol fees sit idle in the treasury but
    /// belong to the reward ledger, not to the shares. Only the free part
    /// is sliced on withdrawal or placed into the position.
    #[must_use]
    pub fn free_balances(&self) -> (Amount, Amount) {
        let reserved0 = self
            .rewards
            .users_fees0()
            .get()
            .saturating_add(self.rewards.protocol_fees0().get());
        let reserved1 = self
            .rewards
            .users_fees1()
            .get()
            .saturating_add(self.rewards.protocol_fees1().get());
        (
            Amount::new(self.treasury.balance0().get().saturating_sub(reserved0)),
            Amount::new(self.treasury.balance1().get().saturating_sub(reserved1)),
        )
    }

    /// The share exchange-rate multiplier fixed at initialization
    /// (1e6 precision).
    #[must_use]
    pub const fn universal_multiplier(&self) -> u128 {
        self.universal_multiplier
    }

    /// Rewards currently claimable by `account`, including unsettled
    /// accrual.
    ///
    /// # Errors
    ///
    /// Propagates arithmetic errors from the reward projection.
    pub fn claimable(&self, account: &AccountId) -> Result<(Amount, Amount)> {
        self.rewards
            .claimable(account, self.shares.balance_of(account))
    }

    /// Protocol fees accrued and not yet withdrawn.
    #[must_use]
    pub fn accrued_protocol_fees(&self) -> (Amount, Amount) {
        (self.rewards.protocol_fees0(), self.rewards.protocol_fees1())
    }

    /// Takes all buffered events.
    #[must_use]
    pub fn drain_events(&mut self) -> Vec<VaultEvent> {
        self.events.drain()
    }

    // -- governance ----------------------------------------------------------

    /// Nominates a new owner (two-step handover).
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::NotOwner`] for non-owner callers.
    pub fn transfer_ownership(&mut self, caller: AccountId, new_owner: AccountId) -> Result<()> {
        self.governance.transfer_ownership(caller, new_owner)
    }

    /// Completes an ownership handover.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidPendingOwner`] unless `caller` is the
    /// nominated successor.
    pub fn accept_ownership(&mut self, caller: AccountId) -> Result<()> {
        self.governance.accept_ownership(caller)
    }

    /// Replaces the strategy parameters. Owner-only.
    ///
    /// # Errors
    ///
    /// [`VaultError::NotOwner`] or [`VaultError::InvalidConfiguration`].
    pub fn set_strategy(&mut self, caller: AccountId, strategy: StrategyParams) -> Result<()> {
        self.governance.require_owner(&caller)?;
        self.config.set_strategy(strategy)
    }

    /// Replaces the share supply cap. Owner-only.
    ///
    /// # Errors
    ///
    /// [`VaultError::NotOwner`] or [`VaultError::InvalidConfiguration`].
    pub fn set_max_total_supply(&mut self, caller: AccountId, cap: Shares) -> Result<()> {
        self.governance.require_owner(&caller)?;
        self.config.set_max_total_supply(cap)
    }

    // -- lifecycle ------------------------------------------------------------

    /// One-way initialization: opens the first position around the spot
    /// tick, fixes the share exchange rate from the current price, and
    /// mints the initial shares to the caller. Owner-only.
    ///
    /// # Errors
    ///
    /// - [`VaultError::AlreadyInitialized`] on a second call.
    /// - [`VaultError::NotOwner`] for non-owner callers.
    /// - [`VaultError::ZeroAmount`] unless both amounts are positive.
    /// - [`VaultError::PriceDeviation`] if spot strays from the TWAP.
    pub fn init(
        &mut self,
        caller: AccountId,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<Shares> {
        self.enter()?;
        let result = self.init_inner(caller, amount0, amount1);
        self.entered = false;
        result
    }

    fn init_inner(
        &mut self,
        caller: AccountId,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<Shares> {
        if self.finalized {
            return Err(VaultError::AlreadyInitialized);
        }
        self.governance.require_owner(&caller)?;
        require_positive(amount0, amount1)?;
        self.check_deviation()?;

        let spot = self.pool.current_tick()?;
        let range = base_range(spot, self.threshold()?, self.pool.tick_spacing())?;
        self.universal_multiplier = universal_multiplier(
            self.pool.current_sqrt_price(),
            self.config.token0_decimals(),
            self.config.token1_decimals(),
        )?;

        let minted = self.share_value(amount0, amount1)?;
        if minted.is_zero() {
            return Err(VaultError::ZeroShares("initial deposit too small"));
        }
        self.check_supply_cap(minted)?;

        self.treasury.credit(amount0, amount1)?;
        self.place_position(range, amount0, amount1)?;
        self.shares.mint(caller, minted)?;
        self.finalized = true;
        self.events.record(VaultEvent::Deposit {
            account: caller,
            amount0,
            amount1,
            shares: minted,
        });
        Ok(minted)
    }

    /// Deposits both tokens and mints shares at the fixed exchange rate.
    ///
    /// The full amounts enter the vault; whatever the active range cannot
    /// absorb stays idle and is placed at the next reposition. Shares are
    /// priced on the full deposit, so idle and placed tokens are worth the
    /// same to the depositor.
    ///
    /// # Errors
    ///
    /// - [`VaultError::NotInitialized`] before `init`.
    /// - [`VaultError::ZeroAmount`] unless both amounts are positive.
    /// - [`VaultError::SupplyCapExceeded`] if the minted shares would
    ///   push supply above the cap (checked before the pool mint).
    /// - [`VaultError::PriceDeviation`] if spot strays from the TWAP.
    pub fn deposit(
        &mut self,
        caller: AccountId,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<Shares> {
        self.enter()?;
        let result = self.deposit_inner(caller, amount0, amount1);
        self.entered = false;
        result
    }

    fn deposit_inner(
        &mut self,
        caller: AccountId,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<Shares> {
        self.require_initialized()?;
        require_positive(amount0, amount1)?;
        self.check_deviation()?;
        self.harvest_and_settle(Some(caller))?;

        let minted = self.share_value(amount0, amount1)?;
        if minted.is_zero() {
            return Err(VaultError::ZeroShares("deposit too small to mint shares"));
        }
        self.check_supply_cap(minted)?;

        self.treasury.credit(amount0, amount1)?;
        if let Some(range) = self.range {
            let liquidity = self.fundable_liquidity(range, amount0, amount1)?;
            if !liquidity.is_zero() {
                let _ = self.pool.mint(range, liquidity, &mut self.treasury)?;
            }
        }
        self.shares.mint(caller, minted)?;
        self.events.record(VaultEvent::Deposit {
            account: caller,
            amount0,
            amount1,
            shares: minted,
        });
        Ok(minted)
    }

    /// Burns `burned` shares and returns the proportional slice of the
    /// vault's holdings: free idle balances plus position principal. Fee
    /// reserves held for other claimants are left untouched.
    ///
    /// # Errors
    ///
    /// - [`VaultError::ZeroShares`] if `burned` is zero.
    /// - [`VaultError::InsufficientBalance`] if `caller` holds fewer
    ///   shares.
    /// - [`VaultError::PriceDeviation`] if spot strays from the TWAP.
    pub fn withdraw(&mut self, caller: AccountId, burned: Shares) -> Result<(Amount, Amount)> {
        self.enter()?;
        let result = self.withdraw_inner(caller, burned);
        self.entered = false;
        result
    }

    fn withdraw_inner(&mut self, caller: AccountId, burned: Shares) -> Result<(Amount, Amount)> {
        self.require_initialized()?;
        if burned.is_zero() {
            return Err(VaultError::ZeroShares("withdrawal of zero shares"));
        }
        self.check_deviation()?;
        self.harvest_and_settle(Some(caller))?;

        let supply = self.shares.total_supply();
        if supply.is_zero() {
            return Err(VaultError::ZeroShares("no shares outstanding"));
        }

        // Proportional slice of the free idle balances, measured before the
        // position principal is pulled back in. Reserved rewards and
        // protocol fees stay behind for their owners.
        let (free0, free1) = self.free_balances();
        let idle0 = mul_div(free0.get(), burned.get(), supply.get(), Rounding::Down)?;
        let idle1 = mul_div(free1.get(), burned.get(), supply.get(), Rounding::Down)?;

        let (mut out0, mut out1) = (Amount::new(idle0), Amount::new(idle1));
        if let Some(range) = self.range {
            let position = self.pool.position_liquidity(range);
            let slice = mul_div(position.get(), burned.get(), supply.get(), Rounding::Down)?;
            if slice > 0 {
                let (burn0, burn1) = self.pool.burn(range, Liquidity::new(slice))?;
                let (got0, got1) = self.pool.collect(range, burn0, burn1)?;
                self.treasury.credit(got0, got1)?;
                out0 = out0.safe_add(&got0)?;
                out1 = out1.safe_add(&got1)?;
            }
        }

        self.shares.burn(caller, burned)?;
        self.treasury.debit(out0, out1)?;
        self.events.record(VaultEvent::Withdraw {
            account: caller,
            amount0: out0,
            amount1: out1,
            shares: burned,
        });
        Ok((out0, out1))
    }

    /// Tears the position down and reopens it centered on the price the
    /// free balances imply, without swapping. Permissionless.
    ///
    /// # Errors
    ///
    /// - [`VaultError::NotInitialized`] before `init`.
    /// - [`VaultError::PriceDeviation`] if spot strays from the TWAP.
    pub fn rerange(&mut self) -> Result<TickRange> {
        self.enter()?;
        let result = self.rerange_inner();
        self.entered = false;
        result
    }

    fn rerange_inner(&mut self) -> Result<TickRange> {
        self.require_initialized()?;
        self.check_deviation()?;
        self.harvest_and_settle(None)?;
        self.teardown_position()?;

        let threshold = self.threshold()?;
        let spacing = self.pool.tick_spacing();
        let (free0, free1) = self.free_balances();
        let range = match range_from_balances(free0, free1, threshold, spacing)? {
            Some(range) => range,
            // One-sided holdings imply no price; center on spot instead.
            None => base_range(self.pool.current_tick()?, threshold, spacing)?,
        };
        self.place_position(range, free0, free1)?;
        Ok(range)
    }

    /// Tears the position down, swaps up to half the unplaceable excess to
    /// rebalance the holdings, and reopens around the post-swap balances.
    /// Owner-only.
    ///
    /// # Errors
    ///
    /// - [`VaultError::NotOwner`] for non-owner callers.
    /// - [`VaultError::PriceDeviation`] if spot strays from the TWAP.
    pub fn rebalance(&mut self, caller: AccountId) -> Result<TickRange> {
        self.enter()?;
        let result = self.rebalance_inner(caller);
        self.entered = false;
        result
    }

    fn rebalance_inner(&mut self, caller: AccountId) -> Result<TickRange> {
        self.require_initialized()?;
        self.governance.require_owner(&caller)?;
        self.check_deviation()?;
        self.harvest_and_settle(None)?;
        self.teardown_position()?;

        let threshold = self.threshold()?;
        let spacing = self.pool.tick_spacing();
        let trial = base_range(self.pool.current_tick()?, threshold, spacing)?;

        // What of the current free holdings would the trial range absorb?
        let (free0, free1) = self.free_balances();
        let liquidity = self.fundable_liquidity(trial, free0, free1)?;
        let current = self.pool.current_sqrt_price();
        let lower = sqrt_price_at_tick(trial.lower())?;
        let upper = sqrt_price_at_tick(trial.upper())?;
        let (achievable0, achievable1) = if liquidity.is_zero() {
            (Amount::ZERO, Amount::ZERO)
        } else {
            amounts_for_liquidity(current, lower, upper, liquidity)?
        };

        let zero_for_one = swap_direction(free0, free1, achievable0, achievable1, current)?;
        let amount_in = if zero_for_one {
            swap_amount(free0, achievable0)
        } else {
            swap_amount(free1, achievable1)
        };
        if !amount_in.is_zero() {
            let limit = price_limit(
                current,
                self.config.strategy().price_impact_ppm(),
                zero_for_one,
            )?;
            let (_, amount_out) =
                self.pool
                    .swap(zero_for_one, amount_in, limit, &mut self.treasury)?;
            if zero_for_one {
                self.treasury.credit(Amount::ZERO, amount_out)?;
            } else {
                self.treasury.credit(amount_out, Amount::ZERO)?;
            }
        }

        // Re-measure: the swap moved both the balances and the price.
        let (free0, free1) = self.free_balances();
        let range = match range_from_balances(free0, free1, threshold, spacing)? {
            Some(range) => range,
            None => base_range(self.pool.current_tick()?, threshold, spacing)?,
        };
        self.place_position(range, free0, free1)?;
        Ok(range)
    }

    /// Pays out up to the caller's settled rewards.
    ///
    /// Paid from idle balances when possible; otherwise the minimum
    /// liquidity covering the shortfall is burned out of the position.
    ///
    /// # Errors
    ///
    /// - [`VaultError::InsufficientFees`] if a requested amount exceeds
    ///   the caller's claimable rewards.
    /// - [`VaultError::InsufficientBalance`] if neither idle balances nor
    ///   the position can raise the payment.
    pub fn collect_fees(
        &mut self,
        caller: AccountId,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<()> {
        self.enter()?;
        let result = self.collect_fees_inner(caller, amount0, amount1);
        self.entered = false;
        result
    }

    fn collect_fees_inner(
        &mut self,
        caller: AccountId,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<()> {
        self.require_initialized()?;
        self.check_deviation()?;
        self.harvest_and_settle(Some(caller))?;

        self.rewards.claim(caller, amount0, amount1)?;
        self.raise_idle(amount0, amount1)?;
        self.treasury.debit(amount0, amount1)?;
        self.events.record(VaultEvent::RewardPaid {
            account: caller,
            amount0,
            amount1,
        });
        Ok(())
    }

    /// Withdraws accrued protocol fees. Owner-only.
    ///
    /// # Errors
    ///
    /// - [`VaultError::NotOwner`] for non-owner callers.
    /// - [`VaultError::InsufficientFees`] if a requested amount exceeds
    ///   the accrued protocol balance.
    pub fn collect_protocol_fees(
        &mut self,
        caller: AccountId,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<()> {
        self.enter()?;
        let result = self.collect_protocol_fees_inner(caller, amount0, amount1);
        self.entered = false;
        result
    }

    fn collect_protocol_fees_inner(
        &mut self,
        caller: AccountId,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<()> {
        self.require_initialized()?;
        self.governance.require_owner(&caller)?;
        self.check_deviation()?;
        self.harvest_and_settle(None)?;

        self.rewards.collect_protocol(amount0, amount1)?;
        self.raise_idle(amount0, amount1)?;
        self.treasury.debit(amount0, amount1)?;
        self.events
            .record(VaultEvent::ProtocolFeesCollected { amount0, amount1 });
        Ok(())
    }

    // -- internals ------------------------------------------------------------

    fn enter(&mut self) -> Result<()> {
        if self.entered {
            return Err(VaultError::ReentrantCall);
        }
        self.entered = true;
        Ok(())
    }

    fn require_initialized(&self) -> Result<()> {
        if !self.finalized {
            return Err(VaultError::NotInitialized);
        }
        Ok(())
    }

    fn threshold(&self) -> Result<u32> {
        let spacing = u32::try_from(self.pool.tick_spacing())
            .map_err(|_| VaultError::InvalidConfiguration("tick spacing must be positive"))?;
        spacing
            .checked_mul(self.config.strategy().range_multiplier())
            .ok_or(VaultError::InvalidConfiguration(
                "range threshold overflows tick domain",
            ))
    }

    fn check_deviation(&self) -> Result<()> {
        let strategy = self.config.strategy();
        let spot = self.pool.current_tick()?;
        let twap = self
            .pool
            .time_weighted_average_tick(strategy.twap_window())?;
        let deviation = spot.get().abs_diff(twap.get());
        if deviation > strategy.max_twap_deviation() {
            return Err(VaultError::PriceDeviation(
                "spot tick strayed from time-weighted average",
            ));
        }
        Ok(())
    }

    fn check_supply_cap(&self, minted: Shares) -> Result<()> {
        let after = self
            .shares
            .total_supply()
            .checked_add(&minted)
            .ok_or(VaultError::SupplyCapExceeded)?;
        if after > self.config.max_total_supply() {
            return Err(VaultError::SupplyCapExceeded);
        }
        Ok(())
    }

    /// Poke, harvest, split, accrue, and settle `beneficiary` if given.
    fn harvest_and_settle(&mut self, beneficiary: Option<AccountId>) -> Result<()> {
        if let Some(range) = self.range {
            if !self.pool.position_liquidity(range).is_zero() {
                // Zero burn forces the pool to accrue pending fees.
                let _ = self.pool.burn(range, Liquidity::ZERO)?;
                let (fees0, fees1) = self.pool.collect(range, Amount::MAX, Amount::MAX)?;
                if !fees0.is_zero() || !fees1.is_zero() {
                    self.treasury.credit(fees0, fees1)?;
                    let (user0, user1) = self.rewards.split(
                        fees0,
                        fees1,
                        self.config.strategy().protocol_fee_ppm(),
                    )?;
                    self.rewards
                        .accrue(user0, user1, self.shares.total_supply())?;
                    let protocol0 = fees0.saturating_sub(&user0);
                    let protocol1 = fees1.saturating_sub(&user1);
                    self.events.record(VaultEvent::FeesHarvested {
                        collected0: fees0,
                        collected1: fees1,
                        protocol0,
                        protocol1,
                    });
                }
            }
        }
        if let Some(account) = beneficiary {
            self.rewards
                .settle(account, self.shares.balance_of(&account))?;
        }
        Ok(())
    }

    /// Burns all position liquidity and pulls everything owed back into
    /// the treasury. Records the idle-balance snapshot.
    fn teardown_position(&mut self) -> Result<()> {
        if let Some(range) = self.range.take() {
            let position = self.pool.position_liquidity(range);
            if !position.is_zero() {
                let _ = self.pool.burn(range, position)?;
                let (got0, got1) = self.pool.collect(range, Amount::MAX, Amount::MAX)?;
                self.treasury.credit(got0, got1)?;
            }
        }
        let (idle0, idle1) = self.idle_balances();
        self.events.record(VaultEvent::Snapshot {
            idle0,
            idle1,
            tick: self.pool.current_tick()?,
        });
        Ok(())
    }

    /// Liquidity the given amounts can fund at `range` under the current
    /// price.
    fn fundable_liquidity(
        &self,
        range: TickRange,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<Liquidity> {
        let current = self.pool.current_sqrt_price();
        let lower = sqrt_price_at_tick(range.lower())?;
        let upper = sqrt_price_at_tick(range.upper())?;
        liquidity_for_amounts(current, lower, upper, amount0, amount1)
    }

    /// Opens the position at `range` with as much of the given amounts as
    /// it absorbs, and records the reposition.
    fn place_position(&mut self, range: TickRange, amount0: Amount, amount1: Amount) -> Result<()> {
        let liquidity = self.fundable_liquidity(range, amount0, amount1)?;
        let (used0, used1) = if liquidity.is_zero() {
            (Amount::ZERO, Amount::ZERO)
        } else {
            self.pool.mint(range, liquidity, &mut self.treasury)?
        };
        self.range = Some(range);
        self.events.record(VaultEvent::Reposition {
            range,
            amount0: used0,
            amount1: used1,
            liquidity,
        });
        Ok(())
    }

    /// Ensures the treasury can cover `(need0, need1)`, burning the
    /// minimum position liquidity to raise any shortfall.
    fn raise_idle(&mut self, need0: Amount, need1: Amount) -> Result<()> {
        let short0 = need0.saturating_sub(&self.treasury.balance0());
        let short1 = need1.saturating_sub(&self.treasury.balance1());
        if short0.is_zero() && short1.is_zero() {
            return Ok(());
        }
        let range = self.range.ok_or(VaultError::InsufficientBalance(
            "no position to raise payment from",
        ))?;
        let position = self.pool.position_liquidity(range);
        if position.is_zero() {
            return Err(VaultError::InsufficientBalance(
                "position holds no liquidity",
            ));
        }
        let current = self.pool.current_sqrt_price();
        let lower = sqrt_price_at_tick(range.lower())?;
        let upper = sqrt_price_at_tick(range.upper())?;
        let (held0, held1) = amounts_for_liquidity(current, lower, upper, position)?;

        let needed_for = |short: Amount, held: Amount| -> Result<u128> {
            if short.is_zero() {
                return Ok(0);
            }
            if held.is_zero() {
                return Err(VaultError::InsufficientBalance(
                    "position cannot supply the requested token",
                ));
            }
            mul_div(position.get(), short.get(), held.get(), Rounding::Up)
        };
        let burn = needed_for(short0, held0)?.max(needed_for(short1, held1)?);
        let burn = Liquidity::new(burn.min(position.get()));

        let (burn0, burn1) = self.pool.burn(range, burn)?;
        let (got0, got1) = self.pool.collect(range, burn0, burn1)?;
        self.treasury.credit(got0, got1)?;

        if self.treasury.balance0() < need0 || self.treasury.balance1() < need1 {
            return Err(VaultError::InsufficientBalance(
                "position could not cover the payment",
            ));
        }
        Ok(())
    }

    /// Shares for a deposit at the fixed exchange rate:
    /// `amount0 · multiplier / 1e6 + amount1 · 10^dec0 / 10^dec1`.
    fn share_value(&self, amount0: Amount, amount1: Amount) -> Result<Shares> {
        let from0 = mul_div(
            amount0.get(),
            self.universal_multiplier,
            u128::from(PPM_DENOMINATOR),
            Rounding::Down,
        )?;
        let from1 = mul_div(
            amount1.get(),
            pow10(self.config.token0_decimals()),
            pow10(self.config.token1_decimals()),
            Rounding::Down,
        )?;
        let total = from0
            .checked_add(from1)
            .ok_or(VaultError::Overflow("share value overflow"))?;
        Ok(Shares::new(total))
    }
}

/// `10^exp` for validated decimal counts (≤ 38).
fn pow10(exp: u8) -> u128 {
    10u128.pow(u32::from(exp))
}

/// The decimal-normalized price at 1e6 precision:
/// `sqrt² · 1e6 · 10^dec0 / 10^dec1 >> 192`.
///
/// Fixed once at initialization; a multiplier of `1_000_000` means one
/// whole token0 and one whole token1 mint the same shares.
fn universal_multiplier(sqrt_price: SqrtPriceQ96, dec0: u8, dec1: u8) -> Result<u128> {
    let squared: U512 = sqrt_price.get().full_mul(sqrt_price.get());
    let scaled = squared
        .checked_mul(U512::from(u64::from(PPM_DENOMINATOR)))
        .and_then(|v| v.checked_mul(U512::from(pow10(dec0))))
        .ok_or(VaultError::Overflow("share multiplier overflow"))?;
    let multiplier = (scaled / U512::from(pow10(dec1))) >> 192;
    if multiplier > U512::from(u128::MAX) {
        return Err(VaultError::Overflow("share multiplier exceeds u128"));
    }
    let multiplier = multiplier.low_u128();
    if multiplier == 0 {
        return Err(VaultError::InvalidConfiguration(
            "initial price too extreme for share pricing",
        ));
    }
    Ok(multiplier)
}

fn require_positive(amount0: Amount, amount1: Amount) -> Result<()> {
    if amount0.is_zero() {
        return Err(VaultError::ZeroAmount("amount0 must be positive"));
    }
    if amount1.is_zero() {
        return Err(VaultError::ZeroAmount("amount1 must be positive"));
    }
    Ok(())
}
