//! Immutable account-state snapshots.
//!
//! A snapshot is an explicit context object handed to the components that
//! need display data. Setters consume the snapshot and return a new one;
//! callers that want to keep the old value clone first.

use crate::api::types::{MarketMap, Rate, SpendLimitsResponse};

/// Display-facing account state fetched from the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountSnapshot {
    pub prices: Option<MarketMap<f64>>,
    pub rates: Option<MarketMap<Rate>>,
    pub balances: Option<MarketMap<f64>>,
    pub withdraw_limits: Option<MarketMap<f64>>,
    pub borrow_limits: Option<MarketMap<f64>>,
    pub deposit_limits: Option<MarketMap<f64>>,
    pub health: Option<f64>,
    pub spend_limits: Option<SpendLimitsResponse>,
    /// Bearer token for the internal card API.
    pub card_token: Option<String>,
}

impl AccountSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prices(self, prices: MarketMap<f64>) -> Self {
        Self {
            prices: Some(prices),
            ..self
        }
    }

    pub fn with_rates(self, rates: MarketMap<Rate>) -> Self {
        Self {
            rates: Some(rates),
            ..self
        }
    }

    pub fn with_balances(self, balances: MarketMap<f64>) -> Self {
        Self {
            balances: Some(balances),
            ..self
        }
    }

    pub fn with_withdraw_limits(self, limits: MarketMap<f64>) -> Self {
        Self {
            withdraw_limits: Some(limits),
            ..self
        }
    }

    pub fn with_borrow_limits(self, limits: MarketMap<f64>) -> Self {
        Self {
            borrow_limits: Some(limits),
            ..self
        }
    }

    pub fn with_deposit_limits(self, limits: MarketMap<f64>) -> Self {
        Self {
            deposit_limits: Some(limits),
            ..self
        }
    }

    pub fn with_health(self, health: f64) -> Self {
        Self {
            health: Some(health),
            ..self
        }
    }

    pub fn with_spend_limits(self, spend_limits: SpendLimitsResponse) -> Self {
        Self {
            spend_limits: Some(spend_limits),
            ..self
        }
    }

    pub fn with_card_token(self, token: String) -> Self {
        Self {
            card_token: Some(token),
            ..self
        }
    }

    /// Markets holding a positive balance (withdrawal candidates).
    pub fn collateral_markets(&self) -> Vec<u16> {
        self.balances
            .as_ref()
            .map(|balances| {
                balances
                    .iter()
                    .filter(|(_, amount)| **amount > 0.0)
                    .map(|(index, _)| *index)
                    .collect()
            })
            .unwrap_or_default()
    }
}
