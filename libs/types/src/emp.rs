//! Expiring Multi Party contract parameters
//!
//! Read once per render from the EMP contract and never mutated.

use crate::errors::AmountError;
use crate::numeric::{wei_string, TokenAmount, FIXED_POINT_DECIMALS};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Static EMP parameters relevant to a sponsor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmpParameters {
    /// Minimum token debt an open position must carry, raw wei
    #[serde(with = "wei_string")]
    pub min_sponsor_tokens: u128,
    /// Collateral requirement ratio as an 18-decimal fixed-point value
    #[serde(with = "wei_string")]
    pub collateral_requirement: u128,
    /// Price identifier the position is valued against (e.g. "ETH/BTC")
    pub price_identifier: String,
    /// Contract expiration
    pub expiration: DateTime<Utc>,
}

impl EmpParameters {
    /// Collateral requirement as a plain ratio (e.g. 1.25)
    pub fn collateral_requirement_ratio(&self) -> Result<Decimal, AmountError> {
        TokenAmount::new(self.collateral_requirement, FIXED_POINT_DECIMALS)?.to_decimal()
    }

    /// Minimum sponsor tokens scaled by the given decimals.
    pub fn min_sponsor_tokens_in(&self, decimals: u8) -> Result<Decimal, AmountError> {
        TokenAmount::new(self.min_sponsor_tokens, decimals)?.to_decimal()
    }

    /// Minimum sponsor tokens as shown by the position manager.
    ///
    /// Known issue: the value is a synthetic-token amount but is scaled by
    /// the *collateral* token's decimals. Both are 18 for most contracts;
    /// for a 6- or 8-decimal collateral the displayed minimum is off by
    /// `10^(18 - decimals)`. Kept as-is until the intended scaling is
    /// confirmed; use `min_sponsor_tokens_in` with the synthetic decimals
    /// for the corrected value.
    pub fn min_sponsor_tokens_display(&self, collateral_decimals: u8) -> Result<Decimal, AmountError> {
        self.min_sponsor_tokens_in(collateral_decimals)
    }

    /// Check if the contract has passed its expiration
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiration
    }
}

/// Contract-wide totals, used to derive the global collateral ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractTotals {
    /// Total collateral locked across all positions, collateral wei
    pub total_collateral: TokenAmount,
    /// Total synthetic tokens outstanding, synthetic wei
    pub total_tokens: TokenAmount,
}
