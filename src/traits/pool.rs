//! Abstraction over the concentrated-liquidity pool the vault manages.
//!
//! The vault never owns the pool; it holds exactly one position at a time
//! and drives it through this trait. Implementations wrap whatever the
//! actual venue is — an on-chain pool adapter in production, an in-memory
//! simulation in tests.
//!
//! # Payment model
//!
//! Operations that take tokens *from* the vault ([`AmmPool::mint`] and
//! [`AmmPool::swap`]) do not move balances directly. Instead the pool calls
//! back into the supplied [`PaymentSink`] with the owed amounts, and the
//! sink transfers them. The sink must verify the calling pool's identity
//! before paying; an unexpected caller is
//! [`VaultError::UnauthorizedCallback`](crate::error::VaultError::UnauthorizedCallback).
//!
//! # Fee accrual invariant
//!
//! Swap fees accrue to a position lazily. They become collectable only
//! after the position is touched by a [`AmmPool::mint`] or [`AmmPool::burn`]
//! — burning zero liquidity is the canonical no-op touch ("poke") used to
//! force accrual without changing the position.

use crate::domain::{AccountId, Amount, Liquidity, SqrtPriceQ96, Tick, TickRange};
use crate::error::Result;

/// Receiver of payment callbacks from a pool.
///
/// The pool invokes [`PaymentSink::pay`] exactly once per mint or swap,
/// after computing the owed amounts and before applying the state change.
/// Returning an error aborts the pool operation.
pub trait PaymentSink {
    /// Pays `amount0` of token0 and `amount1` of token1 to the pool
    /// identified by `pool`.
    ///
    /// # Errors
    ///
    /// - [`VaultError::UnauthorizedCallback`](crate::error::VaultError::UnauthorizedCallback)
    ///   if `pool` is not the pool this sink was armed for.
    /// - [`VaultError::InsufficientBalance`](crate::error::VaultError::InsufficientBalance)
    ///   if the sink cannot cover the owed amounts.
    fn pay(&mut self, pool: AccountId, amount0: Amount, amount1: Amount) -> Result<()>;
}

/// A concentrated-liquidity pool as seen by the vault.
///
/// Positions are keyed by [`TickRange`]; all prices are Q64.96 square
/// roots. Mutating operations return the exact token amounts moved so the
/// caller can account for them without re-deriving pool math.
pub trait AmmPool {
    /// Stable identity of this pool, echoed in payment callbacks.
    #[must_use]
    fn pool_id(&self) -> AccountId;

    /// The pool's tick spacing. Position bounds must be multiples of it.
    #[must_use]
    fn tick_spacing(&self) -> i32;

    /// The current instantaneous sqrt-price.
    #[must_use]
    fn current_sqrt_price(&self) -> SqrtPriceQ96;

    /// The tick corresponding to the current sqrt-price.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool reports a sqrt-price outside the valid
    /// tick range.
    fn current_tick(&self) -> Result<Tick>;

    /// The time-weighted average tick over the trailing `window` seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool has no observation history covering
    /// the window.
    fn time_weighted_average_tick(&self, window: u32) -> Result<Tick>;

    /// Liquidity the caller holds in the position keyed by `range`.
    /// Zero if the position does not exist.
    #[must_use]
    fn position_liquidity(&self, range: TickRange) -> Liquidity;

    /// Adds `liquidity` to the position keyed by `range`, collecting the
    /// owed token amounts through `payer`.
    ///
    /// Returns the exact `(amount0, amount1)` taken.
    ///
    /// # Errors
    ///
    /// - [`VaultError::ZeroLiquidity`](crate::error::VaultError::ZeroLiquidity)
    ///   if `liquidity` is zero.
    /// - Any error returned by `payer`.
    fn mint(
        &mut self,
        range: TickRange,
        liquidity: Liquidity,
        payer: &mut dyn PaymentSink,
    ) -> Result<(Amount, Amount)>;

    /// Removes `liquidity` from the position keyed by `range` and credits
    /// the freed token amounts (plus nothing else) as owed to the caller.
    ///
    /// Burning zero liquidity is permitted and acts as a poke: it accrues
    /// pending swap fees into the collectable balance without touching the
    /// position. Returns the `(amount0, amount1)` freed by the burn itself,
    /// which excludes fees.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InsufficientLiquidity`](crate::error::VaultError::InsufficientLiquidity)
    /// if `liquidity` exceeds the position's balance.
    fn burn(&mut self, range: TickRange, liquidity: Liquidity) -> Result<(Amount, Amount)>;

    /// Transfers up to `(max0, max1)` of the tokens owed on the position
    /// keyed by `range` to the caller.
    ///
    /// Owed balances cover both burned principal and accrued fees already
    /// poked into the position. Returns the amounts actually transferred.
    ///
    /// # Errors
    ///
    /// Implementations may fail on transfer errors; collecting from an
    /// empty position is not an error and returns zeros.
    fn collect(&mut self, range: TickRange, max0: Amount, max1: Amount)
        -> Result<(Amount, Amount)>;

    /// Swaps `amount_in` of one token for the other, stopping early if the
    /// price reaches `price_limit`. Input is collected through `payer`.
    ///
    /// `zero_for_one` selects the direction: `true` sells token0 for
    /// token1 and pushes the price down, `false` the opposite.
    ///
    /// Returns `(amount_in_used, amount_out)`.
    ///
    /// # Errors
    ///
    /// - [`VaultError::ZeroAmount`](crate::error::VaultError::ZeroAmount)
    ///   if `amount_in` is zero.
    /// - [`VaultError::InvalidSqrtPrice`](crate::error::VaultError::InvalidSqrtPrice)
    ///   if `price_limit` is on the wrong side of the current price.
    /// - Any error returned by `payer`.
    fn swap(
        &mut self,
        zero_for_one: bool,
        amount_in: Amount,
        price_limit: SqrtPriceQ96,
        payer: &mut dyn PaymentSink,
    ) -> Result<(Amount, Amount)>;
}
