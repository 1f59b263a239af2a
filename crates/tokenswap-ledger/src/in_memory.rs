//! In-memory token ledger.
//!
//! Tracks per-(token, account) balances and per-(token, owner, spender)
//! allowances for any number of registered tokens. Transfer batches are
//! validated against a scratch projection first and only then committed,
//! so a failing batch leaves every balance and allowance unchanged.

use std::collections::HashMap;

use tokenswap_types::{Address, Amount, ExchangeError, Result, Token};

use crate::ledger::{TokenLedger, Transfer};

/// An allowance of `Amount::MAX` is never consumed.
pub const UNLIMITED_ALLOWANCE: Amount = Amount::MAX;

/// State of a single token.
#[derive(Debug, Clone)]
struct TokenBook {
    info: Token,
    balances: HashMap<Address, Amount>,
    /// `(owner, spender) -> remaining allowance`.
    allowances: HashMap<(Address, Address), Amount>,
    /// Sum of all mints. Transfers never change it.
    total_supply: Amount,
}

impl TokenBook {
    fn new(info: Token) -> Self {
        Self {
            info,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            total_supply: 0,
        }
    }

    fn balance(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }
}

/// Reference [`TokenLedger`] holding every token in process memory.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    tokens: HashMap<Address, TokenBook>,
}

impl InMemoryLedger {
    /// Create a new ledger with no tokens.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tokens: HashMap::new(),
        }
    }

    /// Register a token. Re-registering replaces the metadata and keeps
    /// existing balances and allowances.
    pub fn register_token(&mut self, info: Token) {
        match self.tokens.get_mut(&info.address) {
            Some(book) => book.info = info,
            None => {
                self.tokens.insert(info.address, TokenBook::new(info));
            }
        }
    }

    /// Create `amount` new tokens in `account`.
    ///
    /// # Errors
    /// - `UnknownToken` if the token is not registered
    /// - `Ledger` if the balance or total supply would overflow
    pub fn mint(&mut self, token: &Address, account: &Address, amount: Amount) -> Result<()> {
        let book = self.book_mut(token)?;
        let supply = book
            .total_supply
            .checked_add(amount)
            .ok_or_else(|| overflow(token, "total supply"))?;
        let balance = book
            .balance(account)
            .checked_add(amount)
            .ok_or_else(|| overflow(token, "balance"))?;
        book.total_supply = supply;
        book.balances.insert(*account, balance);
        Ok(())
    }

    /// Set `spender`'s allowance over `owner`'s tokens to exactly `amount`.
    pub fn approve(
        &mut self,
        token: &Address,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<()> {
        let book = self.book_mut(token)?;
        book.allowances.insert((*owner, *spender), amount);
        Ok(())
    }

    /// Raise an allowance, saturating at [`UNLIMITED_ALLOWANCE`].
    pub fn increase_allowance(
        &mut self,
        token: &Address,
        owner: &Address,
        spender: &Address,
        added: Amount,
    ) -> Result<()> {
        let book = self.book_mut(token)?;
        let next = book.allowance(owner, spender).saturating_add(added);
        book.allowances.insert((*owner, *spender), next);
        Ok(())
    }

    /// Lower an allowance.
    ///
    /// # Errors
    /// Returns `Ledger` if the allowance would go below zero.
    pub fn decrease_allowance(
        &mut self,
        token: &Address,
        owner: &Address,
        spender: &Address,
        subtracted: Amount,
    ) -> Result<()> {
        let book = self.book_mut(token)?;
        let next = book
            .allowance(owner, spender)
            .checked_sub(subtracted)
            .ok_or_else(|| ExchangeError::Ledger {
                reason: format!("{token}: decreased allowance below zero"),
            })?;
        book.allowances.insert((*owner, *spender), next);
        Ok(())
    }

    /// Total minted supply of a token.
    pub fn total_supply(&self, token: &Address) -> Result<Amount> {
        Ok(self.book(token)?.total_supply)
    }

    /// Verify that the sum of all balances equals the minted supply.
    ///
    /// # Errors
    /// Returns `Ledger` if the two disagree.
    pub fn verify_supply(&self, token: &Address) -> Result<()> {
        let book = self.book(token)?;
        let held = book
            .balances
            .values()
            .try_fold(0 as Amount, |acc, b| acc.checked_add(*b))
            .ok_or_else(|| overflow(token, "balance sum"))?;
        if held != book.total_supply {
            return Err(ExchangeError::Ledger {
                reason: format!(
                    "{token}: balances sum to {held}, total supply is {}",
                    book.total_supply
                ),
            });
        }
        Ok(())
    }

    fn book(&self, token: &Address) -> Result<&TokenBook> {
        self.tokens
            .get(token)
            .ok_or(ExchangeError::UnknownToken(*token))
    }

    fn book_mut(&mut self, token: &Address) -> Result<&mut TokenBook> {
        self.tokens
            .get_mut(token)
            .ok_or(ExchangeError::UnknownToken(*token))
    }
}

/// Pending effects of a transfer batch, layered over the committed state.
#[derive(Default)]
struct Projection {
    balances: HashMap<(Address, Address), Amount>,
    allowances: HashMap<(Address, Address, Address), Amount>,
}

impl Projection {
    fn balance(&self, book: &TokenBook, account: &Address) -> Amount {
        self.balances
            .get(&(book.info.address, *account))
            .copied()
            .unwrap_or_else(|| book.balance(account))
    }

    fn allowance(&self, book: &TokenBook, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(book.info.address, *owner, *spender))
            .copied()
            .unwrap_or_else(|| book.allowance(owner, spender))
    }

    fn stage(&mut self, book: &TokenBook, t: &Transfer) -> Result<()> {
        let allowed = self.allowance(book, &t.from, &t.spender);
        if allowed < t.amount {
            return Err(ExchangeError::InsufficientAllowance {
                token: t.token,
                owner: t.from,
                spender: t.spender,
                needed: t.amount,
                allowed,
            });
        }

        let available = self.balance(book, &t.from);
        if available < t.amount {
            return Err(ExchangeError::InsufficientBalance {
                token: t.token,
                account: t.from,
                needed: t.amount,
                available,
            });
        }

        if allowed != UNLIMITED_ALLOWANCE {
            self.allowances
                .insert((t.token, t.from, t.spender), allowed - t.amount);
        }
        self.balances.insert((t.token, t.from), available - t.amount);

        // Read the recipient after debiting: `from == to` must net to zero.
        let credited = self
            .balance(book, &t.to)
            .checked_add(t.amount)
            .ok_or_else(|| overflow(&t.token, "balance"))?;
        self.balances.insert((t.token, t.to), credited);
        Ok(())
    }
}

impl TokenLedger for InMemoryLedger {
    fn token_info(&self, token: &Address) -> Result<Token> {
        Ok(self.book(token)?.info.clone())
    }

    fn balance_of(&self, token: &Address, account: &Address) -> Result<Amount> {
        Ok(self.book(token)?.balance(account))
    }

    fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> Result<Amount> {
        Ok(self.book(token)?.allowance(owner, spender))
    }

    fn apply_transfers(&mut self, transfers: &[Transfer]) -> Result<()> {
        // Step 1: stage every leg (no committed state is touched)
        let mut projection = Projection::default();
        for t in transfers {
            let book = self.book(&t.token)?;
            projection.stage(book, t)?;
        }

        // Step 2: commit
        for ((token, account), balance) in projection.balances {
            let book = self.book_mut(&token)?;
            book.balances.insert(account, balance);
        }
        for ((token, owner, spender), allowance) in projection.allowances {
            let book = self.book_mut(&token)?;
            book.allowances.insert((owner, spender), allowance);
        }

        tracing::debug!(legs = transfers.len(), "Transfer batch committed");
        Ok(())
    }
}

fn overflow(token: &Address, what: &str) -> ExchangeError {
    ExchangeError::Ledger {
        reason: format!("{token}: {what} overflow"),
    }
}
