//! Market identifiers.

use serde::{Deserialize, Serialize};

/// Identifier for a supported asset/token, used across balance, price and
/// rate lookups.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct MarketIndex(pub u16);

/// The USDC market; card spend limits are denominated in it.
pub const MARKET_INDEX_USDC: MarketIndex = MarketIndex(0);

impl std::fmt::Display for MarketIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for MarketIndex {
    fn from(index: u16) -> Self {
        Self(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_from() {
        assert_eq!(MarketIndex::from(5).to_string(), "5");
        assert_eq!(MARKET_INDEX_USDC.0, 0);
    }
}
