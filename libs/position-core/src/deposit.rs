//! Deposit preview: add collateral to an existing position

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use types::errors::{FormError, PositionError};
use types::numeric::TokenAmount;
use types::risk::TransactionInput;

use crate::config::CalculatorConfig;
use crate::context::{non_negative, parse_input, PositionContext};
use crate::risk::{compute_cr, compute_liquidation_price, compute_priced_cr, compute_resultant, round_display};

/// What the Deposit form shows for the current input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositPreview {
    pub collateral_to_deposit: Decimal,
    pub resultant_collateral: Decimal,
    pub resultant_cr: Decimal,
    pub priced_resultant_cr: Decimal,
    pub liquidation_price: Decimal,
    pub balance_too_low: bool,
    pub needs_allowance: bool,
    /// A pending withdrawal must be cancelled or executed first
    pub pending_withdrawal: bool,
    pub expired: bool,
    pub can_submit: bool,
}

/// Evaluate the Deposit form.
pub fn preview(
    ctx: &PositionContext,
    collateral_input: &str,
    config: &CalculatorConfig,
) -> Result<DepositPreview, PositionError> {
    let collateral_to_deposit = parse_input(collateral_input);
    let position = ctx.position()?;
    let market = ctx.market(config)?;
    let dp = config.display_dp;

    let resultant = compute_resultant(
        &position,
        &TransactionInput::deposit(non_negative(collateral_to_deposit)),
    );
    let resultant_cr = compute_cr(resultant.collateral, resultant.tokens);
    let priced_resultant_cr = round_display(compute_priced_cr(resultant_cr, market.latest_price), dp);
    let liquidation_price = round_display(
        compute_liquidation_price(
            resultant.collateral,
            resultant.tokens,
            market.collateral_requirement,
            market.price_feed_inverted,
        ),
        dp,
    );

    debug!(
        resultant_collateral = %resultant.collateral,
        resultant_cr = %resultant_cr,
        "Deposit preview computed"
    );

    let balance_too_low = ctx.collateral.balance()? < collateral_to_deposit;
    let needs_allowance = ctx.collateral.needs_allowance(collateral_to_deposit);
    let pending_withdrawal = ctx.sponsor.pending_withdrawal;
    let expired = ctx.is_expired();

    let can_submit = !balance_too_low
        && !needs_allowance
        && !pending_withdrawal
        && !expired
        && collateral_to_deposit > Decimal::ZERO;

    Ok(DepositPreview {
        collateral_to_deposit,
        resultant_collateral: resultant.collateral,
        resultant_cr,
        priced_resultant_cr,
        liquidation_price,
        balance_too_low,
        needs_allowance,
        pending_withdrawal,
        expired,
        can_submit,
    })
}

/// Convert the form input into a `deposit` amount.
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
