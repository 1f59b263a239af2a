//! Events surfaced to observers (indexers, UIs).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::OfferId;

/// A state change observers can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExchangeEvent {
    /// A new offer was registered.
    OfferCreated(OfferId),
    /// An offer was bought; always followed by `OfferRemoved` for the same id.
    OfferBought(OfferId),
    /// An offer left the store (bought or cancelled).
    OfferRemoved(OfferId),
}

impl ExchangeEvent {
    #[must_use]
    pub fn offer_id(&self) -> OfferId {
        match self {
            Self::OfferCreated(id) | Self::OfferBought(id) | Self::OfferRemoved(id) => *id,
        }
    }
}

impl std::fmt::Display for ExchangeEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OfferCreated(id) => write!(f, "OfferCreated({})", id.0),
            Self::OfferBought(id) => write!(f, "OfferBought({})", id.0),
            Self::OfferRemoved(id) => write!(f, "OfferRemoved({})", id.0),
        }
    }
}

/// An emitted event with its position in the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Strictly increasing across the life of the exchange.
    pub sequence: u64,
    pub event: ExchangeEvent,
    pub emitted_at: DateTime<Utc>,
}
