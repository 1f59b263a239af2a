//! Configuration for an exchange instance.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Address, ExchangeError, Result};

/// Construction-time settings of an exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Admin account; the only caller allowed to edit the whitelist.
    /// Fixed for the life of the exchange.
    pub owner: Address,
    /// The exchange's own account. Traders grant it allowances so it can
    /// move tokens on their behalf at settlement.
    pub operator: Address,
    /// Tokens whitelisted when the exchange is constructed.
    #[serde(default)]
    pub initial_whitelist: Vec<Address>,
}

impl ExchangeConfig {
    #[must_use]
    pub fn new(owner: Address, operator: Address) -> Self {
        Self {
            owner,
            operator,
            initial_whitelist: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_whitelist(mut self, tokens: impl IntoIterator<Item = Address>) -> Self {
        self.initial_whitelist.extend(tokens);
        self
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.owner.is_zero() {
            return Err(ExchangeError::Configuration(
                "owner must not be the zero address".into(),
            ));
        }
        if self.operator.is_zero() {
            return Err(ExchangeError::Configuration(
                "operator must not be the zero address".into(),
            ));
        }
        if self.owner == self.operator {
            return Err(ExchangeError::Configuration(
                "owner and operator must be distinct accounts".into(),
            ));
        }

        let mut seen = HashSet::new();
        for token in &self.initial_whitelist {
            if !seen.insert(token) {
                return Err(ExchangeError::Configuration(format!(
                    "token {token} listed twice in initial_whitelist"
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}
