//! Identifiers used throughout `TokenSwap`.
//!
//! Accounts and tokens share one 20-byte [`Address`] space. Offers are keyed
//! by a monotonically assigned [`OfferId`] where `0` is reserved.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::ExchangeError;

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

/// Raw token amount in the token's smallest unit.
pub type Amount = u128;

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 20-byte account or token identifier.
///
/// Renders as `0x`-prefixed lowercase hex. Parsing accepts either case, so
/// checksummed and plain spellings of the same address compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(pub [u8; constants::ADDRESS_LEN]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Self = Self([0u8; constants::ADDRESS_LEN]);

    #[must_use]
    pub fn from_bytes(bytes: [u8; constants::ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; constants::ADDRESS_LEN] {
        &self.0
    }

    /// Deterministic address derived from a label.
    ///
    /// The same label always yields the same address, which keeps fixtures
    /// and configuration files reproducible.
    #[must_use]
    pub fn deterministic(label: &str) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(constants::ADDRESS_DOMAIN);
        hasher.update(label.as_bytes());
        let hash = hasher.finalize();
        let mut bytes = [0u8; constants::ADDRESS_LEN];
        bytes.copy_from_slice(&hash[..constants::ADDRESS_LEN]);
        Self(bytes)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let raw = hex::decode(digits).map_err(|_| ExchangeError::InvalidAddress(s.to_string()))?;
        let bytes: [u8; constants::ADDRESS_LEN] = raw
            .try_into()
            .map_err(|_| ExchangeError::InvalidAddress(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Address {
    type Error = ExchangeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.to_string()
    }
}

// ---------------------------------------------------------------------------
// OfferId
// ---------------------------------------------------------------------------

/// Identifier of a standing offer.
///
/// Assigned from a strictly increasing counter that starts at
/// [`constants::FIRST_OFFER_ID`]. `OfferId(0)` is the reserved
/// "no offer" sentinel and never names a real offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OfferId(pub u64);

impl OfferId {
    /// The reserved sentinel.
    pub const NONE: Self = Self(constants::NO_OFFER);

    #[must_use]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// The following id, or `None` once the counter is exhausted.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offer:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
