//! System-wide constants for the `TokenSwap` exchange.

/// Prefix carried by every error message.
pub const ERROR_CODE_PREFIX: &str = "SW_ERR_";

/// Length of an account / token address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Domain tag mixed into [`crate::Address::deterministic`].
pub const ADDRESS_DOMAIN: &[u8] = b"tokenswap:address:v1:";

/// Reserved offer id meaning "no offer".
pub const NO_OFFER: u64 = 0;

/// First id handed out by a fresh offer store.
pub const FIRST_OFFER_ID: u64 = 1;

/// Largest token precision representable as a display decimal.
pub const MAX_TOKEN_DECIMALS: u8 = 28;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "TokenSwap";
