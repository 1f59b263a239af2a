//! Error types for the `TokenSwap` exchange.
//!
//! All errors use the `SW_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Offer errors
//! - 2xx: Token / whitelist errors
//! - 3xx: Funds errors (balance, allowance, ledger)
//! - 4xx: Authorization errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::{Address, Amount, OfferId};

/// Central error enum for all `TokenSwap` operations.
///
/// Every variant is a synchronous rejection: the operation that produced it
/// left no state behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    // =================================================================
    // Offer Errors (1xx)
    // =================================================================
    /// Offer id `0` is reserved and never refers to an offer.
    #[error("SW_ERR_100: Invalid offer ID")]
    InvalidOfferId,

    /// No active offer carries this id.
    #[error("SW_ERR_101: Offer not found: {0}")]
    OfferNotFound(OfferId),

    /// Both sides of the offer name the same token.
    #[error("SW_ERR_102: Same token on both sides of the offer: {0}")]
    SameToken(Address),

    /// The offer owner tried to buy their own offer.
    #[error("SW_ERR_103: Owner cannot buy their own offer: {0}")]
    SelfTrade(OfferId),

    /// Every offer id has been handed out.
    #[error("SW_ERR_104: Offer ids exhausted")]
    OfferIdsExhausted,

    // =================================================================
    // Token Errors (2xx)
    // =================================================================
    /// The token is not on the exchange whitelist.
    #[error("SW_ERR_200: Token is not whitelisted: {0}")]
    TokenNotWhitelisted(Address),

    /// The ledger does not know this token.
    #[error("SW_ERR_201: Unknown token: {0}")]
    UnknownToken(Address),

    /// A base-unit / display-unit conversion was not representable.
    #[error("SW_ERR_202: Amount conversion failed: {reason}")]
    AmountConversion { reason: String },

    /// A string could not be parsed as an address.
    #[error("SW_ERR_203: Invalid address: {0}")]
    InvalidAddress(String),

    // =================================================================
    // Funds Errors (3xx)
    // =================================================================
    /// The account holds less of the token than the operation needs.
    #[error(
        "SW_ERR_300: Insufficient balance of {token} for {account}: need {needed}, have {available}"
    )]
    InsufficientBalance {
        token: Address,
        account: Address,
        needed: Amount,
        available: Amount,
    },

    /// The account has not authorized the spender for enough of the token.
    #[error(
        "SW_ERR_301: Insufficient allowance of {token} from {owner} to {spender}: need {needed}, allowed {allowed}"
    )]
    InsufficientAllowance {
        token: Address,
        owner: Address,
        spender: Address,
        needed: Amount,
        allowed: Amount,
    },

    /// The token ledger rejected or failed an operation.
    #[error("SW_ERR_302: Ledger failure: {reason}")]
    Ledger { reason: String },

    // =================================================================
    // Authorization Errors (4xx)
    // =================================================================
    /// The caller is not allowed to perform this operation.
    #[error("SW_ERR_400: Unauthorized caller: {caller}")]
    Unauthorized { caller: Address },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("SW_ERR_900: Configuration error: {0}")]
    Configuration(String),

    /// Serialization / deserialization error.
    #[error("SW_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// I/O error (disk).
    #[error("SW_ERR_902: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, ExchangeError>;

impl From<std::io::Error> for ExchangeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
