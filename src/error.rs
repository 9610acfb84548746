//! Unified error types for the vault engine.
//!
//! All fallible operations across the crate return [`VaultError`] as their
//! error type, ensuring a consistent error handling experience for consumers.
//!
//! Failures are synchronous, atomic aborts: a returned error means the
//! operation performed no partial state change. No operation is retried by
//! the engine itself; retrying after a transient condition (for example a
//! [`VaultError::PriceDeviation`]) is the caller's responsibility.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, VaultError>;

/// Unified error enum for every fallible operation in the vault engine.
///
/// Variants carry a `&'static str` describing the specific precondition or
/// arithmetic step that failed, so callers can log actionable context
/// without allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum VaultError {
    /// A deposit amount was zero where a strictly positive value is required.
    #[error("zero amount: {0}")]
    ZeroAmount(&'static str),

    /// A share quantity was zero where a strictly positive value is required.
    #[error("zero shares: {0}")]
    ZeroShares(&'static str),

    /// The desired amounts produce no mintable liquidity at the active range.
    #[error("zero liquidity: {0}")]
    ZeroLiquidity(&'static str),

    /// `init` was called on an already-finalized vault.
    #[error("vault already initialized")]
    AlreadyInitialized,

    /// A state-mutating operation was called before `init`.
    #[error("vault not initialized")]
    NotInitialized,

    /// The caller is not the vault owner.
    #[error("caller is not the owner")]
    NotOwner,

    /// `accept_ownership` was called by an account other than the pending owner.
    #[error("caller is not the pending owner")]
    InvalidPendingOwner,

    /// A state-mutating entry point was re-entered while another was executing.
    #[error("reentrant call into vault controller")]
    ReentrantCall,

    /// A payment callback was invoked by a pool other than the recognized one.
    #[error("payment callback from unrecognized pool")]
    UnauthorizedCallback,

    /// The deposit would push total share supply above the configured cap.
    #[error("deposit exceeds maximum total supply")]
    SupplyCapExceeded,

    /// Spot tick deviates from the time-weighted average beyond tolerance.
    #[error("price deviation beyond tolerance: {0}")]
    PriceDeviation(&'static str),

    /// A tick index is outside the globally valid range.
    #[error("invalid tick: {0}")]
    InvalidTick(&'static str),

    /// A computed tick range is empty, inverted, or misaligned.
    #[error("invalid tick range: {0}")]
    InvalidTickRange(&'static str),

    /// A sqrt-price value is zero or out of the representable Q64.96 range.
    #[error("invalid sqrt price: {0}")]
    InvalidSqrtPrice(&'static str),

    /// A configuration invariant does not hold.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// The pool position lacks the liquidity requested for burning.
    #[error("insufficient liquidity: {0}")]
    InsufficientLiquidity(&'static str),

    /// A fee collection requested more than the accrued or claimable balance.
    #[error("insufficient accrued fees: {0}")]
    InsufficientFees(&'static str),

    /// The vault's idle token balance cannot cover a required payment.
    #[error("insufficient idle balance: {0}")]
    InsufficientBalance(&'static str),

    /// Arithmetic overflow — the value left the representable range.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow — the result would be negative.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,
}
