//! # tokenswap-exchange
//!
//! The transactional façade over the offer store.
//!
//! ## Architecture
//!
//! 1. **Whitelist**: admin-managed set of tokens allowed in new offers
//! 2. **`OfferStore`** (from `tokenswap-store`): active offers by id
//! 3. **Settlement**: the two-leg unit of work that realizes a swap
//! 4. **`EventLog`**: `OfferCreated` / `OfferBought` / `OfferRemoved` records
//! 5. **`ExchangeService`**: owns all of the above plus the token ledger, and
//!    is the only thing allowed to mutate them
//!
//! Callers are always passed in explicitly; the service never infers
//! identity.

pub mod events;
pub mod service;
pub mod settlement;
pub mod whitelist;

pub use events::EventLog;
pub use service::ExchangeService;
pub use settlement::Settlement;
pub use whitelist::Whitelist;
