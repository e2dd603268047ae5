//! Error types for the position manager
//!
//! Comprehensive error taxonomy using thiserror. The risk calculator itself
//! never fails; these errors only arise at the boundaries (parsing user
//! input, decoding chain values, validating a form before submission).

use thiserror::Error;

/// Top-level position manager error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PositionError {
    #[error("Amount error: {0}")]
    Amount(#[from] AmountError),

    #[error("Address error: {0}")]
    Address(#[from] AddressError),

    #[error("{0}")]
    Form(#[from] FormError),
}

/// Fixed-point amount conversion errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AmountError {
    #[error("Unsupported token decimals: {decimals} (max 28)")]
    UnsupportedDecimals { decimals: u8 },

    #[error("Invalid amount: {input:?}")]
    InvalidAmount { input: String },

    #[error("Invalid wei value: {input:?}")]
    InvalidWei { input: String },

    #[error("Negative amount: {value}")]
    Negative { value: String },

    #[error("Amount does not fit in the fixed-point range")]
    Overflow,
}

/// Contract / token address errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AddressError {
    #[error("Address must start with 0x")]
    MissingPrefix,

    #[error("Address must be 20 bytes, got {len} hex characters")]
    InvalidLength { len: usize },

    #[error("Invalid hex in address: {0}")]
    InvalidHex(String),
}

/// Form validation errors surfaced to the user before a transaction is built
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Collateral and Token amounts must be positive")]
    NonPositiveAmounts,

    #[error("Collateral amount must be positive.")]
    NonPositiveCollateral,

    #[error("Token amount must be positive.")]
    NonPositiveTokens,

    #[error("You need to cancel or execute your pending withdrawal request first.")]
    PendingWithdrawal,

    #[error("The contract has expired")]
    Expired,
}
