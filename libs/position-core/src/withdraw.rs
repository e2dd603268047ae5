//! Withdraw preview: remove collateral from a position
//!
//! A withdrawal that leaves the position at or above the GCR executes
//! instantly. Anything else goes through a slow withdrawal request that must
//! wait out the contract's liveness period, during which it can be disputed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use types::errors::{FormError, PositionError};
use types::numeric::TokenAmount;

use crate::config::CalculatorConfig;
use crate::context::{non_negative, parse_input, subtract_floor_zero, PositionContext};
use crate::risk::{compute_cr, compute_liquidation_price, compute_priced_cr, round_display};

/// How the withdrawal will be executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WithdrawalKind {
    /// Resultant CR stays at or above the GCR: `withdraw`
    Instant,
    /// Resultant CR falls under the GCR: `requestWithdrawal`
    Request,
}

/// What the Withdraw form shows for the current input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawPreview {
    pub collateral_to_withdraw: Decimal,
    pub resultant_collateral: Decimal,
    pub resultant_cr: Decimal,
    pub priced_resultant_cr: Decimal,
    pub liquidation_price: Decimal,
    pub kind: WithdrawalKind,
    /// Amount exceeds the collateral locked in the position
    pub exceeds_position: bool,
    pub below_requirement: bool,
    pub pending_withdrawal: bool,
    pub expired: bool,
    pub can_submit: bool,
}

/// Evaluate the Withdraw form.
pub fn preview(
    ctx: &PositionContext,
    collateral_input: &str,
    config: &CalculatorConfig,
) -> Result<WithdrawPreview, PositionError> {
    let collateral_to_withdraw = parse_input(collateral_input);
    let position = ctx.position()?;
    let market = ctx.market(config)?;
    let dp = config.display_dp;

    let exceeds_position = collateral_to_withdraw > position.collateral;
    let resultant_collateral =
        subtract_floor_zero(position.collateral, non_negative(collateral_to_withdraw));
    let resultant_cr = compute_cr(resultant_collateral, position.tokens);
    let priced_resultant_cr = round_display(compute_priced_cr(resultant_cr, market.latest_price), dp);
    let liquidation_price = round_display(
        compute_liquidation_price(
            resultant_collateral,
            position.tokens,
            market.collateral_requirement,
            market.price_feed_inverted,
        ),
        dp,
    );

    // no debt left means nothing can be under-collateralized
    let has_debt = position.tokens > Decimal::ZERO;
    let kind = if !has_debt || resultant_cr >= market.global_collateral_ratio {
        WithdrawalKind::Instant
    } else {
        WithdrawalKind::Request
    };
    let below_requirement = has_debt && priced_resultant_cr < market.collateral_requirement;

    debug!(
        resultant_collateral = %resultant_collateral,
        resultant_cr = %resultant_cr,
        kind = ?kind,
        "Withdraw preview computed"
    );

    let pending_withdrawal = ctx.sponsor.pending_withdrawal;
    let expired = ctx.is_expired();
    let can_submit = collateral_to_withdraw > Decimal::ZERO
        && !exceeds_position
        && !pending_withdrawal
        && !expired;

    Ok(WithdrawPreview {
        collateral_to_withdraw,
        resultant_collateral,
        resultant_cr,
        priced_resultant_cr,
        liquidation_price,
        kind,
        exceeds_position,
        below_requirement,
        pending_withdrawal,
        expired,
        can_submit,
    })
}

/// Convert the form input into a withdrawal amount.
pub fn build_request(ctx: &PositionContext, collateral_input: &str) -> Result<TokenAmount, PositionError> {
    let collateral = parse_input(collateral_input);
    if collateral <= Decimal::ZERO {
        return Err(FormError::NonPositiveCollateral.into());
    }
    if ctx.sponsor.pending_withdrawal {
        return Err(FormError::PendingWithdrawal.into());
    }
    if ctx.is_expired() {
        return Err(FormError::Expired.into());
    }
    Ok(TokenAmount::from_decimal_truncating(collateral, ctx.collateral.token.decimals)?)
}
