//! Typed observability events.
//!
//! Every state-mutating vault operation records a [`VaultEvent`]. Events
//! go two ways at once: through `tracing` for live structured logs, and
//! into an in-memory buffer that off-chain consumers drain to build their
//! own views (accounting, indexing, alerting).

use crate::domain::{AccountId, Amount, Liquidity, Shares, Tick, TickRange};

/// A state change worth observing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VaultEvent {
    /// Tokens entered the vault and shares were minted.
    Deposit {
        /// Depositing account.
        account: AccountId,
        /// Token0 taken from the depositor.
        amount0: Amount,
        /// Token1 taken from the depositor.
        amount1: Amount,
        /// Shares minted in exchange.
        shares: Shares,
    },
    /// Shares were burned and principal returned.
    Withdraw {
        /// Withdrawing account.
        account: AccountId,
        /// Token0 returned.
        amount0: Amount,
        /// Token1 returned.
        amount1: Amount,
        /// Shares burned.
        shares: Shares,
    },
    /// The vault moved its position to a new range.
    Reposition {
        /// The new active range.
        range: TickRange,
        /// Token0 placed into the new position.
        amount0: Amount,
        /// Token1 placed into the new position.
        amount1: Amount,
        /// Liquidity of the new position.
        liquidity: Liquidity,
    },
    /// Swap fees were collected from the pool and split.
    FeesHarvested {
        /// Total token0 collected.
        collected0: Amount,
        /// Total token1 collected.
        collected1: Amount,
        /// Protocol cut of token0.
        protocol0: Amount,
        /// Protocol cut of token1.
        protocol1: Amount,
    },
    /// A holder was paid accrued rewards.
    RewardPaid {
        /// Receiving account.
        account: AccountId,
        /// Token0 paid.
        amount0: Amount,
        /// Token1 paid.
        amount1: Amount,
    },
    /// The owner withdrew accrued protocol fees.
    ProtocolFeesCollected {
        /// Token0 withdrawn.
        amount0: Amount,
        /// Token1 withdrawn.
        amount1: Amount,
    },
    /// Idle balances observed at a reposition boundary.
    Snapshot {
        /// Idle token0 after the position was torn down.
        idle0: Amount,
        /// Idle token1 after the position was torn down.
        idle1: Amount,
        /// Spot tick at observation time.
        tick: Tick,
    },
}

/// Buffered event sink.
///
/// `record` is infallible: observability must never fail an operation.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    buffer: Vec<VaultEvent>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Emits the event through `tracing` and appends it to the buffer.
    pub fn record(&mut self, event: VaultEvent) {
        match &event {
            VaultEvent::Deposit {
                account,
                amount0,
                amount1,
                shares,
            } => {
                tracing::info!(?account, %amount0, %amount1, ?shares, "deposit");
            }
            VaultEvent::Withdraw {
                account,
                amount0,
                amount1,
                shares,
            } => {
                tracing::info!(?account, %amount0, %amount1, ?shares, "withdraw");
            }
            VaultEvent::Reposition {
                range,
                amount0,
                amount1,
                liquidity,
            } => {
                tracing::info!(%range, %amount0, %amount1, ?liquidity, "reposition");
            }
            VaultEvent::FeesHarvested {
                collected0,
                collected1,
                protocol0,
                protocol1,
            } => {
                tracing::info!(%collected0, %collected1, %protocol0, %protocol1, "fees harvested");
            }
            VaultEvent::RewardPaid {
                account,
                amount0,
                amount1,
            } => {
                tracing::info!(?account, %amount0, %amount1, "reward paid");
            }
            VaultEvent::ProtocolFeesCollected { amount0, amount1 } => {
                tracing::info!(%amount0, %amount1, "protocol fees collected");
            }
            VaultEvent::Snapshot { idle0, idle1, tick } => {
                tracing::debug!(%idle0, %idle1, %tick, "idle balance snapshot");
            }
        }
        self.buffer.push(event);
    }

    /// Takes all buffered events, leaving the log empty.
    #[must_use]
    pub fn drain(&mut self) -> Vec<VaultEvent> {
        std::mem::take(&mut self.buffer)
    }

    /// Buffered events since the last drain.
    #[must_use]
    pub fn events(&self) -> &[VaultEvent] {
        &self.buffer
    }
}
