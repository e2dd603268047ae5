//! Guided-input suggestions for the Max (tokens) and Min (collateral) helpers
//!
//! Both helpers target the GCR to encourage capital efficiency. Which side of
//! the position drives the target depends on the current CR:
//!
//! - current CR < GCR: new positions must be created at a transaction CR
//!   above the GCR, so only the transaction's own amounts count.
//! - current CR >= GCR: the resultant position is brought to the GCR.
//!
//! Rounding is biased in opposite directions. Suggesting slightly fewer
//! tokens can only raise the CR; suggesting slightly less collateral could
//! push it under the GCR, so collateral is biased up.

use rust_decimal::Decimal;
use types::position::Position;

use crate::config::CalculatorConfig;
use crate::risk::{compute_cr, compute_max_tokens_for_gcr, compute_min_collateral_for_gcr, round_display};

/// Largest token amount to mint alongside `collateral_to_deposit`.
pub fn suggest_max_tokens(
    gcr: Decimal,
    position: &Position,
    collateral_to_deposit: Decimal,
    config: &CalculatorConfig,
) -> Decimal {
    let current_cr = compute_cr(position.collateral, position.tokens);
    let raw = if current_cr < gcr {
        compute_max_tokens_for_gcr(gcr, collateral_to_deposit, Decimal::ZERO)
    } else {
        let resultant_collateral = position
            .collateral
            .checked_add(collateral_to_deposit)
            .unwrap_or(Decimal::MAX);
        compute_max_tokens_for_gcr(gcr, resultant_collateral, position.tokens)
    };

    let biased = raw.checked_sub(config.token_epsilon).unwrap_or(Decimal::ZERO);
    round_display(biased, config.display_dp).max(Decimal::ZERO)
}

/// Smallest collateral amount to deposit alongside `tokens_to_mint`.
pub fn suggest_min_collateral(
    gcr: Decimal,
    position: &Position,
    tokens_to_mint: Decimal,
    config: &CalculatorConfig,
) -> Decimal {
    let current_cr = compute_cr(position.collateral, position.tokens);
    let raw = if current_cr < gcr {
        compute_min_collateral_for_gcr(gcr, tokens_to_mint, Decimal::ZERO)
    } else {
        let resultant_tokens = position
            .tokens
            .checked_add(tokens_to_mint)
            .unwrap_or(Decimal::MAX);
        compute_min_collateral_for_gcr(gcr, resultant_tokens, position.collateral)
    };

    if raw.is_zero() {
        return Decimal::ZERO;
    }

    let biased = raw.checked_add(config.collateral_epsilon).unwrap_or(Decimal::MAX);
    round_display(biased, config.display_dp)
}
