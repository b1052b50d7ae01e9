//! Validator accounts and the ordered set of authorities for a block.

use std::{fmt, str::FromStr};

use primitive_types::H256;
use serde::{Deserialize, Serialize};

use crate::consensus::{Decode, Encode, EncodeDecodeError};

/// A 32-byte account identifier.
///
/// Serializes as `0x`-prefixed hex and SCALE-encodes as its raw bytes, like
/// [`H256`] underneath.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AccountId(H256);

impl AccountId {
    pub const fn new(id: H256) -> Self {
        AccountId(id)
    }

    pub const fn from_byte_array(bytes: [u8; 32]) -> Self {
        AccountId(H256(bytes))
    }

    /// Copies an account id out of a slice of exactly 32 bytes.
    ///
    /// # Errors
    ///
    /// * `InvalidLength` - When the slice has any other length
    pub fn from_slice(bytes: &[u8]) -> Result<Self, EncodeDecodeError> {
        crate::hashes::hash_from_slice(bytes).map(AccountId)
    }

    pub fn as_byte_array(&self) -> &[u8; 32] {
        self.0.as_fixed_bytes()
    }

    pub fn as_h256(&self) -> &H256 {
        &self.0
    }
}

impl From<[u8; 32]> for AccountId {
    fn from(bytes: [u8; 32]) -> Self {
        AccountId::from_byte_array(bytes)
    }
}

impl From<H256> for AccountId {
    fn from(id: H256) -> Self {
        AccountId(id)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({:#x})", self.0)
    }
}

/// Parses hex with or without a `0x` prefix.
impl FromStr for AccountId {
    type Err = EncodeDecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        AccountId::from_slice(&hex::decode(digits)?)
    }
}

/// Ordered validator set that was active when a block was produced.
///
/// Authors are assigned round-robin by slot, so the order of the set is
/// significant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidatorSet {
    validators: Vec<AccountId>,
}

impl ValidatorSet {
    pub fn new(validators: Vec<AccountId>) -> Self {
        ValidatorSet { validators }
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn validators(&self) -> &[AccountId] {
        &self.validators
    }

    pub fn get(&self, index: usize) -> Option<&AccountId> {
        self.validators.get(index)
    }

    /// Returns the validator assigned to `slot`.
    ///
    /// # Returns
    ///
    /// * `None` - If the set is empty
    /// * `Some(AccountId)` - The validator at index `slot mod len`
    pub fn by_slot(&self, slot: u64) -> Option<&AccountId> {
        let len = u64::try_from(self.validators.len()).ok()?;
        let index = slot.checked_rem(len)?;
        self.validators.get(usize::try_from(index).ok()?)
    }
}

impl From<Vec<AccountId>> for ValidatorSet {
    fn from(validators: Vec<AccountId>) -> Self {
        ValidatorSet::new(validators)
    }
}

impl FromIterator<AccountId> for ValidatorSet {
    fn from_iter<I: IntoIterator<Item = AccountId>>(iter: I) -> Self {
        ValidatorSet::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ValidatorSet {
    type Item = &'a AccountId;
    type IntoIter = std::slice::Iter<'a, AccountId>;

    fn into_iter(self) -> Self::IntoIter {
        self.validators.iter()
    }
}
