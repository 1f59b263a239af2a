//! Offer types.
//!
//! An [`Offer`] is immutable once registered: it is created from a
//! [`NewOffer`] when the store assigns its id, and leaves the store whole
//! on buy or cancel.

use serde::{Deserialize, Serialize};

use crate::{Address, Amount, OfferId};

/// Terms of an offer before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOffer {
    pub owner: Address,
    pub from_token: Address,
    pub from_amount: Amount,
    pub to_token: Address,
    pub to_amount: Amount,
}

impl NewOffer {
    /// Attach the id assigned by the store.
    #[must_use]
    pub fn into_offer(self, id: OfferId) -> Offer {
        Offer {
            id,
            owner: self.owner,
            from_token: self.from_token,
            from_amount: self.from_amount,
            to_token: self.to_token,
            to_amount: self.to_amount,
        }
    }
}

/// A standing swap proposal: `owner` gives `from_amount` of `from_token`
/// in exchange for `to_amount` of `to_token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    /// The account that created the offer.
    pub owner: Address,
    /// Token the owner gives.
    pub from_token: Address,
    pub from_amount: Amount,
    /// Token the owner wants.
    pub to_token: Address,
    pub to_amount: Amount,
}

impl Offer {
    #[must_use]
    pub fn is_owned_by(&self, account: &Address) -> bool {
        self.owner == *account
    }

    /// Whether either side of the offer names `token`.
    #[must_use]
    pub fn involves(&self, token: &Address) -> bool {
        self.from_token == *token || self.to_token == *token
    }

    /// The offer's terms without its id.
    #[must_use]
    pub fn terms(&self) -> NewOffer {
        NewOffer {
            owner: self.owner,
            from_token: self.from_token,
            from_amount: self.from_amount,
            to_token: self.to_token,
            to_amount: self.to_amount,
        }
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl NewOffer {
    /// Offer from the account labelled `owner`, swapping `from_amount` of
    /// token "token-a" for `to_amount` of token "token-b".
    pub fn dummy(owner: &str, from_amount: Amount, to_amount: Amount) -> Self {
        Self {
            owner: Address::deterministic(owner),
            from_token: Address::deterministic("token-a"),
            from_amount,
            to_token: Address::deterministic("token-b"),
            to_amount,
        }
    }
}
