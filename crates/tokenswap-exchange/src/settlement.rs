//! Settlement of a bought offer.
//!
//! Buying an offer moves tokens in both directions:
//! 1. **Payment**: `to_amount` of `to_token`, buyer → seller
//! 2. **Delivery**: `from_amount` of `from_token`, seller → buyer
//!
//! Both legs are checked up front and then submitted to the ledger as one
//! batch. The caller commits its own state (removing the offer) only after
//! [`Settlement::execute`] returns `Ok`.

use tokenswap_ledger::{TokenLedger, Transfer};
use tokenswap_types::{Address, ExchangeError, Offer, OfferId, Result};

/// The pair of transfers that realizes a swap.
#[derive(Debug, Clone)]
pub struct Settlement {
    offer_id: OfferId,
    payment: Transfer,
    delivery: Transfer,
}

impl Settlement {
    /// Build the settlement of `offer` bought by `buyer`, with `operator`
    /// as the spender on both legs.
    #[must_use]
    pub fn for_offer(offer: &Offer, buyer: Address, operator: Address) -> Self {
        Self {
            offer_id: offer.id,
            payment: Transfer {
                token: offer.to_token,
                spender: operator,
                from: buyer,
                to: offer.owner,
                amount: offer.to_amount,
            },
            delivery: Transfer {
                token: offer.from_token,
                spender: operator,
                from: offer.owner,
                to: buyer,
                amount: offer.from_amount,
            },
        }
    }

    #[must_use]
    pub fn offer_id(&self) -> OfferId {
        self.offer_id
    }

    /// Buyer → seller leg.
    #[must_use]
    pub fn payment(&self) -> &Transfer {
        &self.payment
    }

    /// Seller → buyer leg.
    #[must_use]
    pub fn delivery(&self) -> &Transfer {
        &self.delivery
    }

    /// Check the buyer can fund the payment leg.
    ///
    /// # Errors
    /// - `InsufficientBalance` if the buyer holds too little `to_token`
    /// - `InsufficientAllowance` if the buyer has not authorized the operator
    pub fn check_payer<L: TokenLedger>(&self, ledger: &L) -> Result<()> {
        check_leg(ledger, &self.payment)
    }

    /// Check both legs, payment first.
    pub fn preflight<L: TokenLedger>(&self, ledger: &L) -> Result<()> {
        check_leg(ledger, &self.payment)?;
        check_leg(ledger, &self.delivery)
    }

    /// Preflight, then submit both legs as a single ledger batch.
    ///
    /// On `Err`, the ledger is unchanged.
    pub fn execute<L: TokenLedger>(&self, ledger: &mut L) -> Result<()> {
        self.preflight(ledger)?;
        ledger.apply_transfers(&[self.delivery.clone(), self.payment.clone()])
    }
}

/// Balance first, then allowance, matching the order callers see errors in
/// when creating an offer.
pub(crate) fn check_leg<L: TokenLedger>(ledger: &L, leg: &Transfer) -> Result<()> {
    let available = ledger.balance_of(&leg.token, &leg.from)?;
    if available < leg.amount {
        return Err(ExchangeError::InsufficientBalance {
            token: leg.token,
            account: leg.from,
            needed: leg.amount,
            available,
        });
    }

    let allowed = ledger.allowance(&leg.token, &leg.from, &leg.spender)?;
    if allowed < leg.amount {
        return Err(ExchangeError::InsufficientAllowance {
            token: leg.token,
            owner: leg.from,
            spender: leg.spender,
            needed: leg.amount,
            allowed,
        });
    }
    Ok(())
}
