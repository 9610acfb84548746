//! In-memory concentrated-liquidity pool.
//!
//! [`SimPool`] implements [`AmmPool`] with just enough market mechanics to
//! exercise the vault end to end: positions keyed by range, fee accrual on
//! poke, payment callbacks on mint and swap, and a price that moves when
//! swapped against. Swaps execute at the spot price with the pool as
//! infinite counterparty, then drag the price halfway toward the limit —
//! a deliberate simplification that still produces bounded, direction-
//! correct impact for the vault's rebalancing logic.
//!
//! Tests drive the market from outside through [`SimPool::set_sqrt_price`],
//! [`SimPool::set_twap_tick`], and [`SimPool::credit_fees`].

use std::collections::BTreeMap;

use primitive_types::U256;

use crate::domain::{
    AccountId, Amount, Liquidity, Rounding, SqrtPriceQ96, Tick, TickRange,
    SQRT_PRICE_FRACTIONAL_BITS,
};
use crate::error::{Result, VaultError};
use crate::math::{
    amounts_for_liquidity, mul_div_u256, sqrt_price_at_tick, tick_at_sqrt_price,
    CheckedArithmetic,
};
use crate::traits::{AmmPool, PaymentSink};

#[derive(Debug, Clone, Copy, Default)]
struct PositionState {
    liquidity: Liquidity,
    /// Fees accrued but not yet poked into the collectable balance.
    pending0: Amount,
    pending1: Amount,
    /// Collectable: poked fees plus burned principal.
    owed0: Amount,
    owed1: Amount,
}

/// Deterministic in-memory pool used by the test suite.
#[derive(Debug, Clone)]
pub struct SimPool {
    id: AccountId,
    tick_spacing: i32,
    sqrt_price: SqrtPriceQ96,
    twap_tick: Tick,
    positions: BTreeMap<(i32, i32), PositionState>,
}

impl SimPool {
    /// Creates a pool at the given price with an exactly-converged TWAP.
    ///
    /// # Errors
    ///
    /// - [`VaultError::InvalidConfiguration`] if `tick_spacing` is not
    ///   strictly positive.
    /// - [`VaultError::InvalidSqrtPrice`] if the price maps to no valid
    ///   tick.
    pub fn new(id: AccountId, tick_spacing: i32, sqrt_price: SqrtPriceQ96) -> Result<Self> {
        if tick_spacing <= 0 {
            return Err(VaultError::InvalidConfiguration(
                "tick spacing must be strictly positive",
            ));
        }
        let twap_tick = tick_at_sqrt_price(sqrt_price)?;
        Ok(Self {
            id,
            tick_spacing,
            sqrt_price,
            twap_tick,
            positions: BTreeMap::new(),
        })
    }

    /// Moves the spot price without touching the TWAP.
    pub fn set_sqrt_price(&mut self, sqrt_price: SqrtPriceQ96) {
        self.sqrt_price = sqrt_price;
    }

    /// Pins the reported time-weighted average tick.
    pub fn set_twap_tick(&mut self, tick: Tick) {
        self.twap_tick = tick;
    }

    /// Moves both the spot price and the TWAP to `tick`.
    ///
    /// # Errors
    ///
    /// Propagates tick-conversion errors.
    pub fn move_to_tick(&mut self, tick: Tick) -> Result<()> {
        self.sqrt_price = sqrt_price_at_tick(tick)?;
        self.twap_tick = tick;
        Ok(())
    }

    /// Accrues swap fees onto an existing position, as trading against its
    /// liquidity would.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InsufficientLiquidity`] if the position does
    /// not exist.
    pub fn credit_fees(&mut self, range: TickRange, fee0: Amount, fee1: Amount) -> Result<()> {
        let position = self
            .positions
            .get_mut(&key(range))
            .ok_or(VaultError::InsufficientLiquidity("no such position"))?;
        position.pending0 = position.pending0.safe_add(&fee0)?;
        position.pending1 = position.pending1.safe_add(&fee1)?;
        Ok(())
    }

    fn range_amounts(&self, range: TickRange, liquidity: Liquidity) -> Result<(Amount, Amount)> {
        let lower = sqrt_price_at_tick(range.lower())?;
        let upper = sqrt_price_at_tick(range.upper())?;
        amounts_for_liquidity(self.sqrt_price, lower, upper, liquidity)
    }
}

fn key(range: TickRange) -> (i32, i32) {
    (range.lower().get(), range.upper().get())
}

impl AmmPool for SimPool {
    fn pool_id(&self) -> AccountId {
        self.id
    }

    fn tick_spacing(&self) -> i32 {
        self.tick_spacing
    }

    fn current_sqrt_price(&self) -> SqrtPriceQ96 {
        self.sqrt_price
    }

    fn current_tick(&self) -> Result<Tick> {
        tick_at_sqrt_price(self.sqrt_price)
    }

    fn time_weighted_average_tick(&self, _window: u32) -> Result<Tick> {
        Ok(self.twap_tick)
    }

    fn position_liquidity(&self, range: TickRange) -> Liquidity {
        self.positions
            .get(&key(range))
            .map_or(Liquidity::ZERO, |p| p.liquidity)
    }

    fn mint(
        &mut self,
        range: TickRange,
        liquidity: Liquidity,
        payer: &mut dyn PaymentSink,
    ) -> Result<(Amount, Amount)> {
        if liquidity.is_zero() {
            return Err(VaultError::ZeroLiquidity("mint of zero liquidity"));
        }
        let (amount0, amount1) = self.range_amounts(range, liquidity)?;
        payer.pay(self.id, amount0, amount1)?;
        let position = self.positions.entry(key(range)).or_default();
        position.liquidity = position.liquidity.safe_add(&liquidity)?;
        Ok((amount0, amount1))
    }

    fn burn(&mut self, range: TickRange, liquidity: Liquidity) -> Result<(Amount, Amount)> {
        let (amount0, amount1) = if liquidity.is_zero() {
            (Amount::ZERO, Amount::ZERO)
        } else {
            self.range_amounts(range, liquidity)?
        };
        let position = self
            .positions
            .get_mut(&key(range))
            .ok_or(VaultError::InsufficientLiquidity("no such position"))?;
        position.liquidity = position
            .liquidity
            .checked_sub(&liquidity)
            .ok_or(VaultError::InsufficientLiquidity(
                "burn exceeds position liquidity",
            ))?;
        // Every burn, including the zero-liquidity poke, rolls pending
        // fees into the collectable balance.
        position.owed0 = position.owed0.safe_add(&position.pending0)?;
        position.owed1 = position.owed1.safe_add(&position.pending1)?;
        position.pending0 = Amount::ZERO;
        position.pending1 = Amount::ZERO;
        position.owed0 = position.owed0.safe_add(&amount0)?;
        position.owed1 = position.owed1.safe_add(&amount1)?;
        Ok((amount0, amount1))
    }

    fn collect(
        &mut self,
        range: TickRange,
        max0: Amount,
        max1: Amount,
    ) -> Result<(Amount, Amount)> {
        let Some(position) = self.positions.get_mut(&key(range)) else {
            return Ok((Amount::ZERO, Amount::ZERO));
        };
        let pay0 = position.owed0.min(max0);
        let pay1 = position.owed1.min(max1);
        position.owed0 = position.owed0.saturating_sub(&pay0);
        position.owed1 = position.owed1.saturating_sub(&pay1);
        Ok((pay0, pay1))
    }

    fn swap(
        &mut self,
        zero_for_one: bool,
        amount_in: Amount,
        price_limit: SqrtPriceQ96,
        payer: &mut dyn PaymentSink,
    ) -> Result<(Amount, Amount)> {
        if amount_in.is_zero() {
            return Err(VaultError::ZeroAmount("swap of zero input"));
        }
        if zero_for_one && price_limit > self.sqrt_price {
            return Err(VaultError::InvalidSqrtPrice(
                "limit above spot for a downward swap",
            ));
        }
        if !zero_for_one && price_limit < self.sqrt_price {
            return Err(VaultError::InvalidSqrtPrice(
                "limit below spot for an upward swap",
            ));
        }

        if zero_for_one {
            payer.pay(self.id, amount_in, Amount::ZERO)?;
        } else {
            payer.pay(self.id, Amount::ZERO, amount_in)?;
        }

        // Fill at spot: out = in · price, or in / price.
        let q96 = U256::one() << SQRT_PRICE_FRACTIONAL_BITS;
        let sqrt = self.sqrt_price.get();
        let amount_out = if zero_for_one {
            let scaled = mul_div_u256(U256::from(amount_in.get()), sqrt, q96, Rounding::Down)?;
            mul_div_u256(scaled, sqrt, q96, Rounding::Down)?
        } else {
            let scaled = mul_div_u256(U256::from(amount_in.get()), q96, sqrt, Rounding::Down)?;
            mul_div_u256(scaled, q96, sqrt, Rounding::Down)?
        };
        if amount_out.bits() > 128 {
            return Err(VaultError::Overflow("swap output exceeds u128"));
        }

        // Drag the price halfway to the limit.
        let halfway = (self.sqrt_price.get() + price_limit.get()) >> 1;
        self.sqrt_price = SqrtPriceQ96::new(halfway)?;

        Ok((amount_in, Amount::new(amount_out.as_u128())))
    }
}
