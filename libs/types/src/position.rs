//! Sponsor position types
//!
//! `SponsorPosition` is the raw snapshot read from the EMP contract (wei
//! amounts plus the pending-withdrawal flag). `Position` is the decimal view
//! of it that the risk calculator consumes.

use crate::errors::AmountError;
use crate::numeric::TokenAmount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Decimal view of a position: locked collateral and outstanding token debt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub collateral: Decimal,
    pub tokens: Decimal,
}

impl Position {
    /// Create a new position
    pub fn new(collateral: Decimal, tokens: Decimal) -> Self {
        Self { collateral, tokens }
    }

    /// Check if the sponsor has no open position
    pub fn is_empty(&self) -> bool {
        self.collateral.is_zero() && self.tokens.is_zero()
    }
}

/// Raw sponsor position snapshot as read from the contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SponsorPosition {
    /// Locked collateral, in collateral-token wei
    pub collateral: TokenAmount,
    /// Outstanding synthetic debt, in synthetic-token wei
    pub tokens: TokenAmount,
    /// A slow withdrawal request is waiting for its liveness period
    pub pending_withdrawal: bool,
}

impl SponsorPosition {
    /// Create a snapshot without a pending withdrawal
    pub fn new(collateral: TokenAmount, tokens: TokenAmount) -> Self {
        Self {
            collateral,
            tokens,
            pending_withdrawal: false,
        }
    }

    /// Mark the snapshot as having a pending withdrawal request
    pub fn with_pending_withdrawal(mut self, pending: bool) -> Self {
        self.pending_withdrawal = pending;
        self
    }

    /// Convert to the decimal view used by the calculator
    pub fn to_position(&self) -> Result<Position, AmountError> {
        Ok(Position::new(
            self.collateral.to_decimal()?,
            self.tokens.to_decimal()?,
        ))
    }
}
