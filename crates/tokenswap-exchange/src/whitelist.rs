//! Admin-controlled set of tokens eligible for new offers.
//!
//! Whitelisting caches the token's metadata; unwhitelisting drops it. The
//! set only gates offer creation. Offers created while a token was listed
//! stay buyable and cancellable after it is removed.

use std::collections::BTreeMap;

use tokenswap_types::{Address, Token};

/// Whitelisted tokens keyed by address, enumerated in address order.
#[derive(Debug, Default)]
pub struct Whitelist {
    tokens: BTreeMap<Address, Token>,
}

impl Whitelist {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tokens: BTreeMap::new(),
        }
    }

    /// Add a token, overwriting any cached metadata. Returns the entry it
    /// replaced, if the token was already listed.
    pub fn insert(&mut self, token: Token) -> Option<Token> {
        self.tokens.insert(token.address, token)
    }

    /// Remove a token. Returns its cached metadata if it was listed.
    pub fn remove(&mut self, address: &Address) -> Option<Token> {
        self.tokens.remove(address)
    }

    #[must_use]
    pub fn contains(&self, address: &Address) -> bool {
        self.tokens.contains_key(address)
    }

    #[must_use]
    pub fn get(&self, address: &Address) -> Option<&Token> {
        self.tokens.get(address)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(label: &str, symbol: &str) -> Token {
        Token::new(Address::deterministic(label), label, symbol, 18)
    }

    #[test]
    fn insert_and_contains() {
        let mut wl = Whitelist::new();
        assert!(wl.is_empty());
        assert!(wl.insert(token("token-a", "TKA")).is_none());
        assert!(wl.contains(&Address::deterministic("token-a")));
        assert!(!wl.contains(&Address::deterministic("token-b")));
        assert_eq!(wl.len(), 1);
    }

    #[test]
    fn reinsert_overwrites_metadata() {
        let mut wl = Whitelist::new();
        wl.insert(token("token-a", "OLD"));
        let replaced = wl.insert(token("token-a", "NEW")).unwrap();
        assert_eq!(replaced.symbol, "OLD");
        assert_eq!(
            wl.get(&Address::deterministic("token-a")).unwrap().symbol,
            "NEW"
        );
        assert_eq!(wl.len(), 1);
    }

    #[test]
    fn remove_returns_cached_entry() {
        let mut wl = Whitelist::new();
        wl.insert(token("token-a", "TKA"));
        let removed = wl.remove(&Address::deterministic("token-a")).unwrap();
        assert_eq!(removed.symbol, "TKA");
        assert!(wl.remove(&Address::deterministic("token-a")).is_none());
        assert!(wl.is_empty());
    }

    #[test]
    fn iterates_in_address_order() {
        let mut wl = Whitelist::new();
        for label in ["token-c", "token-a", "token-b"] {
            wl.insert(token(label, label));
        }
        let addrs: Vec<Address> = wl.iter().map(|t| t.address).collect();
        let mut sorted = addrs.clone();
        sorted.sort();
        assert_eq!(addrs, sorted);
    }
}
