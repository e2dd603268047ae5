//! Position context: the chain snapshot every form preview reads
//!
//! The UI assembles a `PositionContext` from its providers (wallet, EMP,
//! price feed) on each render and hands it to the preview functions together
//! with the raw text-field values.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::emp::{ContractTotals, EmpParameters};
use types::errors::AmountError;
use types::numeric::TokenAmount;
use types::position::{Position, SponsorPosition};
use types::risk::MarketParameters;
use types::token::{Allowance, TokenInfo};

use crate::config::CalculatorConfig;
use crate::risk::global_collateral_ratio;

/// Sponsor's wallet holdings of one token and the EMP's allowance on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAccount {
    pub token: TokenInfo,
    pub balance: TokenAmount,
    pub allowance: Allowance,
}

impl TokenAccount {
    /// Wallet balance in display units
    pub fn balance(&self) -> Result<Decimal, AmountError> {
        self.balance.to_decimal()
    }

    /// Check if the EMP must be approved before pulling `amount`
    pub fn needs_allowance(&self, amount: Decimal) -> bool {
        !self.allowance.covers(amount)
    }
}

/// Everything a form preview needs to know about the chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionContext {
    pub sponsor: SponsorPosition,
    pub collateral: TokenAccount,
    pub synthetic: TokenAccount,
    pub emp: EmpParameters,
    pub totals: ContractTotals,
    /// Latest price from the price feed
    pub latest_price: Decimal,
    /// Evaluation time, for the expiry check
    pub now: DateTime<Utc>,
}

impl PositionContext {
    /// Sponsor position in display units
    pub fn position(&self) -> Result<Position, AmountError> {
        self.sponsor.to_position()
    }

    /// Global collateral ratio from the contract totals
    pub fn gcr(&self) -> Result<Decimal, AmountError> {
        global_collateral_ratio(&self.totals)
    }

    /// Market snapshot for the risk calculator
    pub fn market(&self, config: &CalculatorConfig) -> Result<MarketParameters, AmountError> {
        Ok(MarketParameters {
            global_collateral_ratio: self.gcr()?,
            collateral_requirement: self.emp.collateral_requirement_ratio()?,
            latest_price: self.latest_price,
            price_feed_inverted: config.is_price_feed_inverted(&self.synthetic.token.symbol),
        })
    }

    /// Minimum sponsor tokens, as displayed (see
    /// [`EmpParameters::min_sponsor_tokens_display`] for the scaling caveat)
    pub fn min_sponsor_tokens(&self) -> Result<Decimal, AmountError> {
        self.emp.min_sponsor_tokens_display(self.collateral.token.decimals)
    }

    /// Check if the contract has expired
    pub fn is_expired(&self) -> bool {
        self.emp.is_expired(self.now)
    }
}

/// Read a text-field value; anything unparsable counts as zero.
pub fn parse_input(input: &str) -> Decimal {
    let trimmed = input.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO)
}

/// Form amount as fed to the risk computation; negative input counts as zero.
pub(crate) fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// `a - b`, floored at zero.
pub(crate) fn subtract_floor_zero(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).unwrap_or(Decimal::ZERO).max(Decimal::ZERO)
}
