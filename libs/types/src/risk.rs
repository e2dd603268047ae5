//! Risk calculator inputs and results
//!
//! Plain value records passed to and returned from the position risk
//! calculator. Constructed fresh for every calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Market snapshot the position is evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketParameters {
    /// GCR: total contract collateral / total contract tokens
    pub global_collateral_ratio: Decimal,
    /// Minimum priced CR before a position can be liquidated
    pub collateral_requirement: Decimal,
    /// Latest price from the price feed
    pub latest_price: Decimal,
    /// The feed quotes the inverse pair
    pub price_feed_inverted: bool,
}

/// A proposed deposit/mint. Deltas are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionInput {
    pub collateral_delta: Decimal,
    pub token_delta: Decimal,
}

impl TransactionInput {
    /// Mint `token_delta` tokens backed by `collateral_delta` new collateral
    pub fn mint(collateral_delta: Decimal, token_delta: Decimal) -> Self {
        Self {
            collateral_delta,
            token_delta,
        }
    }

    /// Collateral-only deposit
    pub fn deposit(collateral_delta: Decimal) -> Self {
        Self {
            collateral_delta,
            token_delta: Decimal::ZERO,
        }
    }
}

/// Position after a transaction is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resultant {
    pub collateral: Decimal,
    pub tokens: Decimal,
}

/// Eligibility flags gating a mint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Eligibility {
    /// Resultant debt is non-zero but under the contract minimum
    pub below_min_tokens: bool,
    /// The transaction's own CR is under the GCR
    pub transaction_below_gcr: bool,
    /// The resultant position's CR is under the GCR
    pub resultant_below_gcr: bool,
    /// Both of the above: the mint is blocked
    pub below_gcr: bool,
    /// Priced resultant CR is under the collateral requirement
    pub below_requirement: bool,
}

impl Eligibility {
    /// Check if any flag blocks the transaction
    pub fn is_blocked(&self) -> bool {
        self.below_gcr || self.below_min_tokens || self.below_requirement
    }
}

/// Full risk evaluation of a proposed transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskResult {
    pub resultant_collateral: Decimal,
    pub resultant_tokens: Decimal,
    pub resultant_cr: Decimal,
    pub priced_resultant_cr: Decimal,
    pub transaction_cr: Decimal,
    pub liquidation_price: Decimal,
    pub eligibility: Eligibility,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_has_no_token_delta() {
        let tx = TransactionInput::deposit(Decimal::from(200));
        assert_eq!(tx.collateral_delta, Decimal::from(200));
        assert_eq!(tx.token_delta, Decimal::ZERO);
    }

    #[test]
    fn test_eligibility_blocked() {
        assert!(!Eligibility::default().is_blocked());

        // transaction under GCR alone does not block
        let flags = Eligibility {
            transaction_below_gcr: true,
            ..Default::default()
        };
        assert!(!flags.is_blocked());

        let flags = Eligibility {
            below_requirement: true,
            ..Default::default()
        };
        assert!(flags.is_blocked());
    }

    #[test]
    fn test_market_parameters_serialization() {
        let market = MarketParameters {
            global_collateral_ratio: Decimal::new(15, 1),
            collateral_requirement: Decimal::new(125, 2),
            latest_price: Decimal::new(3, 2),
            price_feed_inverted: false,
        };
        let json = serde_json::to_string(&market).unwrap();
        // decimals travel as strings
        assert!(json.contains("\"global_collateral_ratio\":\"1.5\""));
        let restored: MarketParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, market);
    }
}
