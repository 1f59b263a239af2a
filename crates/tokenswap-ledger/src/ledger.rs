//! The token provider boundary.
//!
//! The exchange never holds balances itself. It reads balances and
//! allowances from a [`TokenLedger`] and asks it to move tokens on traders'
//! behalf. Any error returned here aborts the enclosing exchange operation.

use serde::{Deserialize, Serialize};
use tokenswap_types::{Address, Amount, Result, Token};

/// One `transferFrom`-style movement: `spender` moves `amount` of `token`
/// from `from` to `to`, consuming `from`'s allowance to `spender`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub token: Address,
    pub spender: Address,
    pub from: Address,
    pub to: Address,
    pub amount: Amount,
}

/// Balance, allowance and transfer operations of a set of tokens.
pub trait TokenLedger {
    /// Metadata of a token.
    ///
    /// # Errors
    /// Returns `UnknownToken` if the ledger does not know the token.
    fn token_info(&self, token: &Address) -> Result<Token>;

    /// Balance of `account` in `token`.
    fn balance_of(&self, token: &Address, account: &Address) -> Result<Amount>;

    /// How much of `owner`'s `token` balance `spender` may move.
    fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> Result<Amount>;

    /// Apply a batch of transfers as one unit.
    ///
    /// Implementations must be all-or-nothing: on `Err`, no balance or
    /// allowance has changed.
    fn apply_transfers(&mut self, transfers: &[Transfer]) -> Result<()>;

    /// Apply a single transfer.
    fn transfer_from(&mut self, transfer: Transfer) -> Result<()> {
        self.apply_transfers(std::slice::from_ref(&transfer))
    }
}
