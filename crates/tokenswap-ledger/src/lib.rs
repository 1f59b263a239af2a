//! # tokenswap-ledger
//!
//! The boundary between the exchange and the tokens it trades.
//!
//! - **[`TokenLedger`]**: what the exchange consumes: token metadata,
//!   `balance_of`, `allowance`, and all-or-nothing transfer batches
//! - **[`InMemoryLedger`]**: reference implementation used by tests and
//!   embedders without an external token backend
//!
//! ## Settlement Flow
//!
//! ```text
//! Exchange.buy_offer() → Settlement.preflight() → TokenLedger.apply_transfers([seller→buyer, buyer→seller])
//! ```

pub mod in_memory;
pub mod ledger;

pub use in_memory::{InMemoryLedger, UNLIMITED_ALLOWANCE};
pub use ledger::{TokenLedger, Transfer};
