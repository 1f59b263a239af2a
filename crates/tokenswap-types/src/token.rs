//! Token descriptors and base-unit / display-unit conversion.
//!
//! A [`Token`] is the metadata the exchange caches when a token is
//! whitelisted. Amounts on the wire are always raw base units; the
//! conversion helpers here exist for presentation layers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Address, Amount, ExchangeError, Result, constants};

/// A tradeable asset descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Unique key of the token.
    pub address: Address,
    /// Display name (e.g., "Wrapped Ether").
    pub name: String,
    /// Ticker symbol (e.g., "WETH").
    pub symbol: String,
    /// Number of decimal places one display unit is split into.
    pub decimals: u8,
}

impl Token {
    #[must_use]
    pub fn new(
        address: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
    ) -> Self {
        Self {
            address,
            name: name.into(),
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Convert a raw base-unit amount into display units.
    ///
    /// `1_500` of a 3-decimal token becomes `1.5`.
    pub fn to_display(&self, amount: Amount) -> Result<Decimal> {
        let scale = self.checked_scale()?;
        let mantissa = i128::try_from(amount).map_err(|_| ExchangeError::AmountConversion {
            reason: format!("{amount} {} exceeds display range", self.symbol),
        })?;
        let value = Decimal::try_from_i128_with_scale(mantissa, scale).map_err(|e| {
            ExchangeError::AmountConversion {
                reason: format!("{amount} {}: {e}", self.symbol),
            }
        })?;
        Ok(value.normalize())
    }

    /// Convert a display-unit amount into raw base units.
    ///
    /// Fails on negative values and on values finer than the token's
    /// smallest unit.
    pub fn from_display(&self, value: Decimal) -> Result<Amount> {
        let scale = self.checked_scale()?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ExchangeError::AmountConversion {
                reason: format!("negative amount {value} {}", self.symbol),
            });
        }

        let value = value.normalize();
        if value.scale() > scale {
            return Err(ExchangeError::AmountConversion {
                reason: format!(
                    "{value} {} is finer than {} decimals",
                    self.symbol, self.decimals
                ),
            });
        }

        let factor = 10i128.pow(scale - value.scale());
        let base = value
            .mantissa()
            .checked_mul(factor)
            .and_then(|v| Amount::try_from(v).ok())
            .ok_or_else(|| ExchangeError::AmountConversion {
                reason: format!("{value} {} overflows base units", self.symbol),
            })?;
        Ok(base)
    }

    fn checked_scale(&self) -> Result<u32> {
        if self.decimals > constants::MAX_TOKEN_DECIMALS {
            return Err(ExchangeError::AmountConversion {
                reason: format!(
                    "{} has {} decimals, max {}",
                    self.symbol,
                    self.decimals,
                    constants::MAX_TOKEN_DECIMALS
                ),
            });
        }
        Ok(u32::from(self.decimals))
    }
}
