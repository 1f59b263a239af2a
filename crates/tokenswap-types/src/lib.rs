//! # tokenswap-types
//!
//! Shared types, errors, and configuration for the **`TokenSwap`** exchange.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Address`], [`OfferId`], [`Amount`]
//! - **Offer model**: [`Offer`], [`NewOffer`]
//! - **Token model**: [`Token`]
//! - **Events**: [`ExchangeEvent`], [`EventRecord`]
//! - **Configuration**: [`ExchangeConfig`]
//! - **Errors**: [`ExchangeError`] with `SW_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod offer;
pub mod token;

// Re-export all primary types at crate root for ergonomic imports:
//   use tokenswap_types::{Offer, OfferId, Address, ...};

pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use offer::*;
pub use token::*;

// Constants are accessed via `tokenswap_types::constants::FOO`
// (not re-exported to avoid name collisions).
