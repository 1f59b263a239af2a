//! # tokenswap-store
//!
//! The offer registry: an append/remove collection of active offers keyed by
//! a monotonically increasing [`OfferId`](tokenswap_types::OfferId).
//!
//! | Operation  | Cost  |
//! |------------|-------|
//! | `add`      | O(1)  |
//! | `remove`   | O(1)  |
//! | `contains` | O(1)  |
//! | `get`      | O(1)  |
//! | `get_all`  | O(1)* |
//!
//! \* borrows the dense arena directly.
//!
//! Nothing here knows about tokens, balances or callers; the exchange
//! service layers authorization and settlement on top.

pub mod offer_store;

pub use offer_store::OfferStore;
