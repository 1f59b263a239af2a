//! Dense registry of active offers.
//!
//! Offers live in a contiguous `Vec<Offer>` (the arena). An auxiliary
//! `HashMap<OfferId, usize>` records each offer's current slot so that
//! lookup, membership and removal are all O(1).
//!
//! Removal is swap-and-pop: the last offer moves into the vacated slot and
//! its index entry is rewritten. The arena never has gaps, at the cost of
//! enumeration order changing after a removal.

use std::collections::HashMap;

use tokenswap_types::{Address, ExchangeError, NewOffer, Offer, OfferId, Result, constants};

/// The authoritative collection of active offers.
#[derive(Debug)]
pub struct OfferStore {
    /// Dense arena; order is insertion order until the first removal.
    offers: Vec<Offer>,
    /// `OfferId -> slot in offers`.
    index: HashMap<OfferId, usize>,
    /// Id handed out by the next `add`. Never decreases.
    next_id: OfferId,
}

impl OfferStore {
    /// Create an empty store whose first offer will get id 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            offers: Vec::new(),
            index: HashMap::new(),
            next_id: OfferId(constants::FIRST_OFFER_ID),
        }
    }

    // =================================================================
    // Mutation
    // =================================================================

    /// Register an offer and return its freshly assigned id.
    ///
    /// # Errors
    /// Returns `OfferIdsExhausted` once the id counter cannot advance. The
    /// store is unchanged in that case.
    pub fn add(&mut self, terms: NewOffer) -> Result<OfferId> {
        let id = self.next_id;
        self.next_id = id.next().ok_or(ExchangeError::OfferIdsExhausted)?;

        let slot = self.offers.len();
        self.offers.push(terms.into_offer(id));
        self.index.insert(id, slot);

        tracing::debug!(offer = %id, slot, size = self.offers.len(), "Offer stored");
        Ok(id)
    }

    /// Remove an offer by id, returning it.
    ///
    /// # Errors
    /// Returns `OfferNotFound` if no active offer has this id.
    pub fn remove(&mut self, id: OfferId) -> Result<Offer> {
        let slot = self
            .index
            .remove(&id)
            .ok_or(ExchangeError::OfferNotFound(id))?;

        let removed = self.offers.swap_remove(slot);
        debug_assert_eq!(removed.id, id);

        // swap_remove moved the former last offer into `slot`, unless the
        // removed offer was itself the last one.
        if let Some(moved) = self.offers.get(slot) {
            self.index.insert(moved.id, slot);
            tracing::debug!(offer = %id, moved = %moved.id, slot, "Offer removed, slot reused");
        } else {
            tracing::debug!(offer = %id, slot, "Offer removed from tail");
        }

        Ok(removed)
    }

    // =================================================================
    // Queries
    // =================================================================

    /// Check if an offer exists.
    #[must_use]
    pub fn contains(&self, id: OfferId) -> bool {
        self.index.contains_key(&id)
    }

    /// Look up an offer by id.
    ///
    /// # Errors
    /// - `InvalidOfferId` for the reserved id `0`
    /// - `OfferNotFound` if no active offer has this id
    pub fn get(&self, id: OfferId) -> Result<&Offer> {
        if id.is_none() {
            return Err(ExchangeError::InvalidOfferId);
        }
        let slot = self
            .index
            .get(&id)
            .ok_or(ExchangeError::OfferNotFound(id))?;
        Ok(&self.offers[*slot])
    }

    /// All active offers, in arena order.
    ///
    /// The order is stable until the next `remove`.
    #[must_use]
    pub fn get_all(&self) -> &[Offer] {
        &self.offers
    }

    /// Active offers created by `owner`.
    pub fn offers_of<'a>(&'a self, owner: &'a Address) -> impl Iterator<Item = &'a Offer> + 'a {
        self.offers.iter().filter(move |o| o.is_owned_by(owner))
    }

    /// Number of active offers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    /// Returns `true` if there are no active offers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    /// The id the next `add` will assign.
    #[must_use]
    pub fn next_id(&self) -> OfferId {
        self.next_id
    }
}

impl Default for OfferStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::{Rng, SeedableRng, rngs::StdRng};
    use tokenswap_types::*;

    use super::*;

    fn fixtures() -> Vec<NewOffer> {
        vec![
            NewOffer::dummy("user1", 1, 2),
            NewOffer::dummy("user2", 3, 4),
            NewOffer::dummy("user1", 5, 6),
            NewOffer::dummy("user2", 7, 8),
            NewOffer::dummy("user1", 9, 10),
            NewOffer::dummy("user2", 11, 12),
        ]
    }

    fn filled() -> OfferStore {
        let mut store = OfferStore::new();
        for terms in fixtures() {
            store.add(terms).unwrap();
        }
        store
    }

    fn ids(store: &OfferStore) -> Vec<u64> {
        store.get_all().iter().map(|o| o.id.0).collect()
    }

    /// Every index entry points at the offer carrying that id.
    fn assert_index_consistent(store: &OfferStore) {
        assert_eq!(store.index.len(), store.offers.len());
        for (slot, offer) in store.offers.iter().enumerate() {
            assert_eq!(store.index.get(&offer.id), Some(&slot));
        }
    }

    // -----------------------------------------------------------------
    // add
    // -----------------------------------------------------------------

    #[test]
    fn add_first_offer_gets_id_one() {
        let mut store = OfferStore::new();
        let id = store.add(NewOffer::dummy("user1", 1, 2)).unwrap();
        assert_eq!(id, OfferId(1));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_all()[0].terms(), NewOffer::dummy("user1", 1, 2));
    }

    #[test]
    fn add_appends_in_order() {
        let store = filled();
        assert_eq!(ids(&store), vec![1, 2, 3, 4, 5, 6]);
        for (offer, terms) in store.get_all().iter().zip(fixtures()) {
            assert_eq!(offer.terms(), terms);
        }
        assert_index_consistent(&store);
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut store = OfferStore::new();
        let first = store.add(NewOffer::dummy("user1", 1, 2)).unwrap();
        store.remove(first).unwrap();
        let second = store.add(NewOffer::dummy("user2", 3, 4)).unwrap();

        assert_eq!(second, OfferId(2));
        assert_eq!(ids(&store), vec![2]);
        assert_eq!(store.next_id(), OfferId(3));
    }

    #[test]
    fn add_fails_when_ids_run_out() {
        let mut store = OfferStore::new();
        store.next_id = OfferId(u64::MAX - 1);

        let last = store.add(NewOffer::dummy("user1", 1, 2)).unwrap();
        assert_eq!(last, OfferId(u64::MAX - 1));

        let err = store.add(NewOffer::dummy("user2", 3, 4)).unwrap_err();
        assert_eq!(err, ExchangeError::OfferIdsExhausted);
        assert_eq!(ids(&store), vec![u64::MAX - 1]);
        assert_eq!(store.next_id(), OfferId(u64::MAX));
        assert_index_consistent(&store);
    }

    // -----------------------------------------------------------------
    // remove
    // -----------------------------------------------------------------

    #[test]
    fn remove_only_offer() {
        let mut store = OfferStore::new();
        let id = store.add(NewOffer::dummy("user1", 1, 2)).unwrap();
        let removed = store.remove(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(store.is_empty());
        assert!(!store.contains(id));
        assert_index_consistent(&store);
    }

    #[test]
    fn remove_first_moves_last_into_its_slot() {
        let mut store = OfferStore::new();
        for terms in fixtures().into_iter().take(3) {
            store.add(terms).unwrap();
        }
        store.remove(OfferId(1)).unwrap();
        assert_eq!(ids(&store), vec![3, 2]);
        assert_eq!(store.get(OfferId(3)).unwrap().from_amount, 5);
        assert_eq!(store.get(OfferId(2)).unwrap().from_amount, 3);
        assert_index_consistent(&store);
    }

    #[test]
    fn remove_middle() {
        let mut store = OfferStore::new();
        for terms in fixtures().into_iter().take(3) {
            store.add(terms).unwrap();
        }
        store.remove(OfferId(2)).unwrap();
        assert_eq!(ids(&store), vec![1, 3]);
        assert_index_consistent(&store);
    }

    #[test]
    fn remove_last_keeps_order() {
        let mut store = OfferStore::new();
        for terms in fixtures().into_iter().take(3) {
            store.add(terms).unwrap();
        }
        store.remove(OfferId(3)).unwrap();
        assert_eq!(ids(&store), vec![1, 2]);
        assert_index_consistent(&store);
    }

    #[test]
    fn remove_twice_fails() {
        let mut store = filled();
        store.remove(OfferId(4)).unwrap();
        let err = store.remove(OfferId(4)).unwrap_err();
        assert_eq!(err, ExchangeError::OfferNotFound(OfferId(4)));
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn remove_unknown_leaves_store_untouched() {
        let mut store = filled();
        let before = store.get_all().to_vec();
        assert!(matches!(
            store.remove(OfferId(45)),
            Err(ExchangeError::OfferNotFound(OfferId(45)))
        ));
        assert!(store.remove(OfferId::NONE).is_err());
        assert_eq!(store.get_all(), before.as_slice());
    }

    // -----------------------------------------------------------------
    // contains / get
    // -----------------------------------------------------------------

    #[test]
    fn contains_added_offers_only() {
        let store = filled();
        for i in 1..=6 {
            assert!(store.contains(OfferId(i)));
        }
        assert!(!store.contains(OfferId(7)));
        assert!(!store.contains(OfferId::NONE));
    }

    #[test]
    fn does_not_contain_removed_offer() {
        let mut store = filled();
        store.remove(OfferId(2)).unwrap();
        for i in 1..=6 {
            assert_eq!(store.contains(OfferId(i)), i != 2);
        }
    }

    #[test]
    fn get_zero_is_invalid() {
        let store = filled();
        assert_eq!(store.get(OfferId::NONE).unwrap_err(), ExchangeError::InvalidOfferId);
        assert_eq!(
            OfferStore::new().get(OfferId::NONE).unwrap_err(),
            ExchangeError::InvalidOfferId
        );
    }

    #[test]
    fn get_unknown_is_not_found() {
        let store = filled();
        assert_eq!(
            store.get(OfferId(45)).unwrap_err(),
            ExchangeError::OfferNotFound(OfferId(45))
        );
    }

    #[test]
    fn get_from_beginning_middle_and_end() {
        let store = filled();
        let terms = fixtures();
        for id in [1usize, 3, 6] {
            let offer = store.get(OfferId(id as u64)).unwrap();
            assert_eq!(offer.id.0, id as u64);
            assert_eq!(offer.terms(), terms[id - 1]);
        }
    }

    #[test]
    fn offers_of_filters_by_owner() {
        let store = filled();
        let user1 = Address::deterministic("user1");
        let mine: Vec<u64> = store.offers_of(&user1).map(|o| o.id.0).collect();
        assert_eq!(mine, vec![1, 3, 5]);
    }

    // -----------------------------------------------------------------
    // Model check
    // -----------------------------------------------------------------

    #[test]
    fn random_add_remove_matches_model() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut store = OfferStore::new();
        let mut model: BTreeMap<OfferId, NewOffer> = BTreeMap::new();
        let mut added = 0usize;
        let mut removed = 0usize;

        for step in 0..2_000u128 {
            if model.is_empty() || rng.gen_bool(0.55) {
                let terms = NewOffer::dummy("user1", step, step + 1);
                let id = store.add(terms.clone()).unwrap();
                assert!(model.insert(id, terms).is_none(), "id {id} reused");
                added += 1;
            } else {
                let victim = *model
                    .keys()
                    .nth(rng.gen_range(0..model.len()))
                    .unwrap();
                let offer = store.remove(victim).unwrap();
                assert_eq!(offer.terms(), model.remove(&victim).unwrap());
                removed += 1;
            }

            assert_eq!(store.len(), added - removed);
            for (id, terms) in &model {
                assert_eq!(&store.get(*id).unwrap().terms(), terms);
            }
        }
        assert_index_consistent(&store);
    }
}
