//! User actions that resolve to server-built transactions.
//!
//! Each action maps to a `GET /program/build-tx/{path}` endpoint; the
//! query-parameter names are part of the backend contract.

use crate::state::market::MarketIndex;

/// Parameters for a collateral deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositParams {
    /// Wallet address, base58.
    pub address: String,
    pub amount_base_units: u64,
    pub market_index: MarketIndex,
    /// Apply the deposit against an outstanding loan first.
    pub repaying_loan: bool,
    pub use_max_amount: bool,
}

/// Parameters for a collateral withdrawal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawParams {
    pub address: String,
    pub amount_base_units: u64,
    pub market_index: MarketIndex,
    /// Permit the withdrawal to open a loan position.
    pub allow_loan: bool,
    pub use_max_amount: bool,
}

/// Parameters for adjusting the card spend limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendLimitParams {
    pub address: String,
    /// Per-transaction cap, USDC base units.
    pub transaction_limit_base_units: u64,
    /// Per-timeframe cap, USDC base units.
    pub timeframe_limit_base_units: u64,
    /// Timeframe length in seconds.
    pub timeframe_secs: u64,
}

/// A transaction-producing user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxAction {
    Deposit(DepositParams),
    Withdraw(WithdrawParams),
    AdjustSpendLimit(SpendLimitParams),
}

impl TxAction {
    /// Path segment under `/program/build-tx/`.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            TxAction::Deposit(_) => "deposit",
            TxAction::Withdraw(_) => "withdraw",
            TxAction::AdjustSpendLimit(_) => "spend-limit",
        }
    }

    /// Query parameters in the backend's naming.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        match self {
            TxAction::Deposit(p) => vec![
                ("address", p.address.clone()),
                ("amountBaseUnits", p.amount_base_units.to_string()),
                ("repayingLoan", p.repaying_loan.to_string()),
                ("marketIndex", p.market_index.to_string()),
                ("useMaxAmount", p.use_max_amount.to_string()),
            ],
            TxAction::Withdraw(p) => vec![
                ("address", p.address.clone()),
                ("allowLoan", p.allow_loan.to_string()),
                ("amountBaseUnits", p.amount_base_units.to_string()),
                ("marketIndex", p.market_index.to_string()),
                ("useMaxAmount", p.use_max_amount.to_string()),
            ],
            TxAction::AdjustSpendLimit(p) => vec![
                ("address", p.address.clone()),
                (
                    "spendLimitTransactionBaseUnits",
                    p.transaction_limit_base_units.to_string(),
                ),
                (
                    "spendLimitTimeframeBaseUnits",
                    p.timeframe_limit_base_units.to_string(),
                ),
                ("spendLimitTimeframe", p.timeframe_secs.to_string()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_query_params() {
        let action = TxAction::Deposit(DepositParams {
            address: "wallet123".to_string(),
            amount_base_units: 5_000_000,
            market_index: MarketIndex(0),
            repaying_loan: true,
            use_max_amount: false,
        });

        assert_eq!(action.endpoint_path(), "deposit");
        let params = action.query_params();
        assert!(params.contains(&("address", "wallet123".to_string())));
        assert!(params.contains(&("amountBaseUnits", "5000000".to_string())));
        assert!(params.contains(&("repayingLoan", "true".to_string())));
        assert!(params.contains(&("useMaxAmount", "false".to_string())));
    }

    #[test]
    fn test_spend_limit_endpoint() {
        let action = TxAction::AdjustSpendLimit(SpendLimitParams {
            address: "wallet123".to_string(),
            transaction_limit_base_units: 100_000_000,
            timeframe_limit_base_units: 500_000_000,
            timeframe_secs: 86_400,
        });

        assert_eq!(action.endpoint_path(), "spend-limit");
        let params = action.query_params();
        assert!(params.contains(&("spendLimitTimeframe", "86400".to_string())));
    }
}
