//! Chain-agnostic account identifier.

/// A generic, chain-agnostic identifier for an account interacting with the
/// vault: a depositor, the owner, or the pool itself.
///
/// Wraps a fixed-size `[u8; 32]` byte array. All 32-byte sequences are
/// considered valid identifiers, so construction is infallible.
///
/// Operations with no specific beneficiary (rerange, rebalance) settle
/// rewards against `Option::<AccountId>::None` rather than a magic
/// sentinel address.
///
/// # Examples
///
/// ```
/// use range_vault::domain::AccountId;
///
/// let id = AccountId::from_bytes([1u8; 32]);
/// assert_eq!(id.as_bytes(), [1u8; 32]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_round_trip() {
        let bytes = [42u8; 32];
        assert_eq!(AccountId::from_bytes(bytes).as_bytes(), bytes);
    }

    #[test]
    fn equality_same_bytes() {
        assert_eq!(
            AccountId::from_bytes([1u8; 32]),
            AccountId::from_bytes([1u8; 32])
        );
        assert_ne!(
            AccountId::from_bytes([1u8; 32]),
            AccountId::from_bytes([2u8; 32])
        );
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(AccountId::from_bytes([0u8; 32]) < AccountId::from_bytes([1u8; 32]));
    }
}
