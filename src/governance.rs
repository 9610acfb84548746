//! Two-step ownership handover.
//!
//! Direct transfer to a mistyped address would brick every owner-gated
//! operation permanently, so handover is split: the current owner nominates
//! a successor, and the successor must prove control of the address by
//! accepting. Until acceptance the current owner stays in charge and may
//! re-nominate.

use crate::domain::AccountId;
use crate::error::{Result, VaultError};

/// Ownership state of the vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Governance {
    owner: AccountId,
    pending_owner: Option<AccountId>,
}

impl Governance {
    /// Creates governance state with an initial owner and no pending
    /// handover.
    #[must_use]
    pub const fn new(owner: AccountId) -> Self {
        Self {
            owner,
            pending_owner: None,
        }
    }

    /// The current owner.
    #[must_use]
    pub const fn owner(&self) -> AccountId {
        self.owner
    }

    /// The nominated successor, if a handover is in progress.
    #[must_use]
    pub const fn pending_owner(&self) -> Option<AccountId> {
        self.pending_owner
    }

    /// Rejects any caller other than the current owner.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::NotOwner`] for non-owner callers.
    pub fn require_owner(&self, caller: &AccountId) -> Result<()> {
        if *caller != self.owner {
            return Err(VaultError::NotOwner);
        }
        Ok(())
    }

    /// Nominates `new_owner` as successor. Owner-only; replaces any
    /// earlier nomination.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::NotOwner`] if `caller` is not the owner.
    pub fn transfer_ownership(&mut self, caller: AccountId, new_owner: AccountId) -> Result<()> {
        self.require_owner(&caller)?;
        self.pending_owner = Some(new_owner);
        Ok(())
    }

    /// Completes the handover. Only the nominated successor may call.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidPendingOwner`] if no handover is in
    /// progress or `caller` is not the nominee.
    pub fn accept_ownership(&mut self, caller: AccountId) -> Result<()> {
        if self.pending_owner != Some(caller) {
            return Err(VaultError::InvalidPendingOwner);
        }
        self.owner = caller;
        self.pending_owner = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn account(tag: u8) -> AccountId {
        AccountId::from_bytes([tag; 32])
    }

    #[test]
    fn owner_gate() {
        let gov = Governance::new(account(1));
        assert!(gov.require_owner(&account(1)).is_ok());
        assert_eq!(gov.require_owner(&account(2)), Err(VaultError::NotOwner));
    }

    #[test]
    fn full_handover() {
        let mut gov = Governance::new(account(1));
        let Ok(()) = gov.transfer_ownership(account(1), account(2)) else {
            panic!("expected Ok");
        };
        // Nomination alone changes nothing.
        assert_eq!(gov.owner(), account(1));
        assert_eq!(gov.pending_owner(), Some(account(2)));
        let Ok(()) = gov.accept_ownership(account(2)) else {
            panic!("expected Ok");
        };
        assert_eq!(gov.owner(), account(2));
        assert_eq!(gov.pending_owner(), None);
    }

    #[test]
    fn only_owner_may_nominate() {
        let mut gov = Governance::new(account(1));
        assert_eq!(
            gov.transfer_ownership(account(2), account(2)),
            Err(VaultError::NotOwner)
        );
    }

    #[test]
    fn only_nominee_may_accept() {
        let mut gov = Governance::new(account(1));
        let Ok(()) = gov.transfer_ownership(account(1), account(2)) else {
            panic!("expected Ok");
        };
        assert_eq!(
            gov.accept_ownership(account(3)),
            Err(VaultError::InvalidPendingOwner)
        );
        // The rejected attempt does not consume the nomination.
        assert_eq!(gov.pending_owner(), Some(account(2)));
    }

    #[test]
    fn accept_without_nomination_rejected() {
        let mut gov = Governance::new(account(1));
        assert_eq!(
            gov.accept_ownership(account(1)),
            Err(VaultError::InvalidPendingOwner)
        );
    }

    #[test]
    fn renomination_replaces_pending() {
        let mut gov = Governance::new(account(1));
        let Ok(()) = gov.transfer_ownership(account(1), account(2)) else {
            panic!("expected Ok");
        };
        let Ok(()) = gov.transfer_ownership(account(1), account(3)) else {
            panic!("expected Ok");
        };
        assert_eq!(
            gov.accept_ownership(account(2)),
            Err(VaultError::InvalidPendingOwner)
        );
        let Ok(()) = gov.accept_ownership(account(3)) else {
            panic!("expected Ok");
        };
        assert_eq!(gov.owner(), account(3));
    }
}
