//! The exchange service: whitelist administration, offer lifecycle and
//! swap settlement over a [`TokenLedger`].
//!
//! ## Operation Flow
//!
//! ```text
//! create_offer: same-token → whitelist(from, to) → balance → allowance → store.add → OfferCreated
//! cancel_offer: id != 0 → exists → owner == caller → store.remove → OfferRemoved
//! buy_offer:    exists → buyer != owner → buyer balance/allowance
//!                      → Settlement.execute (both legs, one batch)
//!                      → store.remove → OfferBought, OfferRemoved
//! ```
//!
//! Every mutating operation takes `&mut self` and the authenticated caller
//! explicitly. All checks run before the first mutation, and the store is
//! only touched after the ledger batch has committed, so a rejected call
//! leaves no trace.

use tokenswap_ledger::{TokenLedger, Transfer};
use tokenswap_store::OfferStore;
use tokenswap_types::{
    Address, Amount, EventRecord, ExchangeConfig, ExchangeError, ExchangeEvent, NewOffer, Offer,
    OfferId, Result, Token, constants,
};

use crate::events::EventLog;
use crate::settlement::{Settlement, check_leg};
use crate::whitelist::Whitelist;

/// Peer-to-peer swap exchange over whitelisted tokens.
#[derive(Debug)]
pub struct ExchangeService<L: TokenLedger> {
    /// Admin; fixed at construction.
    owner: Address,
    /// Spender the traders authorize on their tokens.
    operator: Address,
    whitelist: Whitelist,
    offers: OfferStore,
    ledger: L,
    events: EventLog,
}

impl<L: TokenLedger> ExchangeService<L> {
    /// Create an exchange and whitelist `config.initial_whitelist`.
    ///
    /// # Errors
    /// - `Configuration` if the config is inconsistent
    /// - `UnknownToken` if the ledger has no metadata for a listed token
    pub fn new(config: ExchangeConfig, ledger: L) -> Result<Self> {
        config.validate()?;
        let ExchangeConfig {
            owner,
            operator,
            initial_whitelist,
        } = config;

        let mut whitelist = Whitelist::new();
        for address in initial_whitelist {
            whitelist.insert(ledger.token_info(&address)?);
        }

        tracing::info!(
            engine = constants::ENGINE_NAME,
            version = constants::VERSION,
            owner = %owner,
            operator = %operator,
            tokens = whitelist.len(),
            "Exchange initialized"
        );

        Ok(Self {
            owner,
            operator,
            whitelist,
            offers: OfferStore::new(),
            ledger,
            events: EventLog::new(),
        })
    }

    // =================================================================
    // Whitelist administration
    // =================================================================

    /// Whitelist a token, caching its metadata from the ledger.
    ///
    /// Re-whitelisting an already listed token refreshes the cached
    /// metadata.
    ///
    /// # Errors
    /// - `Unauthorized` unless `caller` is the owner
    /// - `UnknownToken` if the ledger does not know the token
    pub fn whitelist_token(&mut self, token: Address, caller: Address) -> Result<()> {
        self.require_owner(caller)?;
        let info = self.ledger.token_info(&token)?;
        let symbol = info.symbol.clone();
        let replaced = self.whitelist.insert(info);
        tracing::info!(
            token = %token,
            symbol = %symbol,
            refreshed = replaced.is_some(),
            "Token whitelisted"
        );
        Ok(())
    }

    /// Remove a token from the whitelist.
    ///
    /// Offers already referencing the token are left alone.
    ///
    /// # Errors
    /// Returns `Unauthorized` unless `caller` is the owner.
    pub fn unwhitelist_token(&mut self, token: Address, caller: Address) -> Result<()> {
        self.require_owner(caller)?;
        let removed = self.whitelist.remove(&token);
        let open_offers = self
            .offers
            .get_all()
            .iter()
            .filter(|o| o.involves(&token))
            .count();
        tracing::info!(
            token = %token,
            was_listed = removed.is_some(),
            open_offers,
            "Token unwhitelisted"
        );
        Ok(())
    }

    // =================================================================
    // Offer lifecycle
    // =================================================================

    /// Post an offer: `caller` gives `from_amount` of `from_token` for
    /// `to_amount` of `to_token`.
    ///
    /// No tokens move now. The caller's balance and allowance are checked so
    /// that the offer is fundable when posted; they are checked again when
    /// it is bought.
    ///
    /// # Errors
    /// In check order: `SameToken`, `TokenNotWhitelisted` (from, then to),
    /// `InsufficientBalance`, `InsufficientAllowance`.
    pub fn create_offer(
        &mut self,
        from_token: Address,
        from_amount: Amount,
        to_token: Address,
        to_amount: Amount,
        caller: Address,
    ) -> Result<OfferId> {
        if from_token == to_token {
            return Err(ExchangeError::SameToken(from_token));
        }
        for token in [from_token, to_token] {
            if !self.whitelist.contains(&token) {
                return Err(ExchangeError::TokenNotWhitelisted(token));
            }
        }

        let deposit = Transfer {
            token: from_token,
            spender: self.operator,
            from: caller,
            to: self.operator,
            amount: from_amount,
        };
        check_leg(&self.ledger, &deposit)?;

        let id = self.offers.add(NewOffer {
            owner: caller,
            from_token,
            from_amount,
            to_token,
            to_amount,
        })?;
        self.events.emit(ExchangeEvent::OfferCreated(id));

        tracing::info!(
            offer = %id,
            owner = %caller,
            from_token = %from_token,
            from_amount,
            to_token = %to_token,
            to_amount,
            "Offer created"
        );
        Ok(id)
    }

    /// Withdraw an offer. Only its owner may do so.
    ///
    /// # Errors
    /// `InvalidOfferId` for id 0, `OfferNotFound`, then `Unauthorized`.
    pub fn cancel_offer(&mut self, id: OfferId, caller: Address) -> Result<Offer> {
        let offer = self.offers.get(id)?;
        if !offer.is_owned_by(&caller) {
            tracing::warn!(offer = %id, caller = %caller, owner = %offer.owner, "Cancel by non-owner rejected");
            return Err(ExchangeError::Unauthorized { caller });
        }

        let offer = self.offers.remove(id)?;
        self.events.emit(ExchangeEvent::OfferRemoved(id));

        tracing::info!(offer = %id, owner = %caller, "Offer cancelled");
        Ok(offer)
    }

    /// Take an offer: the buyer pays `to_amount` of `to_token` to the owner
    /// and receives `from_amount` of `from_token` from the owner, atomically.
    ///
    /// # Errors
    /// - `InvalidOfferId` / `OfferNotFound` if there is no such offer
    /// - `SelfTrade` if `caller` owns the offer
    /// - `InsufficientBalance` / `InsufficientAllowance` naming the buyer,
    ///   or the seller if their funding changed since the offer was posted
    /// - any ledger failure
    ///
    /// On error the offer stays in the store and no tokens have moved.
    pub fn buy_offer(&mut self, id: OfferId, caller: Address) -> Result<Offer> {
        let offer = self.offers.get(id)?;
        if offer.is_owned_by(&caller) {
            tracing::warn!(offer = %id, caller = %caller, "Self-trade blocked");
            return Err(ExchangeError::SelfTrade(id));
        }

        let settlement = Settlement::for_offer(offer, caller, self.operator);
        settlement.check_payer(&self.ledger)?;
        if let Err(err) = settlement.execute(&mut self.ledger) {
            tracing::warn!(offer = %id, buyer = %caller, error = %err, "Settlement failed");
            return Err(err);
        }

        // Both legs committed; the offer is known to be present.
        let offer = self.offers.remove(id)?;
        self.events.emit(ExchangeEvent::OfferBought(id));
        self.events.emit(ExchangeEvent::OfferRemoved(id));

        tracing::info!(
            offer = %id,
            seller = %offer.owner,
            buyer = %caller,
            "Offer bought"
        );
        Ok(offer)
    }

    // =================================================================
    // Queries
    // =================================================================

    /// All active offers. Order is arbitrary but stable between mutations.
    #[must_use]
    pub fn get_offers(&self) -> &[Offer] {
        self.offers.get_all()
    }

    /// Look up one offer.
    pub fn offer(&self, id: OfferId) -> Result<&Offer> {
        self.offers.get(id)
    }

    /// Active offers posted by `owner`.
    #[must_use]
    pub fn offers_of(&self, owner: &Address) -> Vec<Offer> {
        self.offers.offers_of(owner).cloned().collect()
    }

    #[must_use]
    pub fn is_token_whitelisted(&self, token: &Address) -> bool {
        self.whitelist.contains(token)
    }

    /// Whitelisted tokens with their cached metadata, in address order.
    #[must_use]
    pub fn whitelisted_tokens(&self) -> Vec<Token> {
        self.whitelist.iter().cloned().collect()
    }

    /// Cached metadata of a whitelisted token.
    #[must_use]
    pub fn token(&self, address: &Address) -> Option<&Token> {
        self.whitelist.get(address)
    }

    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    #[must_use]
    pub fn is_owner(&self, account: &Address) -> bool {
        self.owner == *account
    }

    /// The account traders must authorize as spender.
    #[must_use]
    pub fn operator(&self) -> Address {
        self.operator
    }

    /// Events not yet drained, oldest first.
    #[must_use]
    pub fn events(&self) -> &[EventRecord] {
        self.events.records()
    }

    /// Hand pending events to an indexer.
    pub fn drain_events(&mut self) -> Vec<EventRecord> {
        self.events.drain()
    }

    #[must_use]
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the token backend (minting, approvals).
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    fn require_owner(&self, caller: Address) -> Result<()> {
        if caller != self.owner {
            tracing::warn!(caller = %caller, "Admin operation by non-owner rejected");
            return Err(ExchangeError::Unauthorized { caller });
        }
        Ok(())
    }
}
