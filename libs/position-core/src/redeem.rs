//! Redeem preview: burn synthetic tokens for a pro-rata share of collateral
//!
//! Redeeming returns `collateral × tokens_redeemed / tokens_outstanding`, so
//! the position's CR is unchanged. The only position-side constraint is the
//! minimum sponsor token amount: a partial redeem may not leave a non-zero
//! debt under it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use types::errors::{FormError, PositionError};
use types::numeric::TokenAmount;

use crate::config::CalculatorConfig;
use crate::context::{parse_input, subtract_floor_zero, PositionContext};
use crate::risk::{compute_cr, compute_priced_cr, round_display};

/// What the Redeem form shows for the current input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedeemPreview {
    pub tokens_to_redeem: Decimal,
    /// Collateral returned to the sponsor, at display precision
    pub collateral_returned: Decimal,
    pub resultant_collateral: Decimal,
    pub resultant_tokens: Decimal,
    pub resultant_cr: Decimal,
    pub priced_resultant_cr: Decimal,
    /// Amount exceeds the position's outstanding debt
    pub exceeds_position: bool,
    /// Amount exceeds the synthetic tokens held in the wallet
    pub balance_too_low: bool,
    pub needs_allowance: bool,
    pub below_min_tokens: bool,
    pub can_submit: bool,
}

/// Evaluate the Redeem form.
pub fn preview(
    ctx: &PositionContext,
    tokens_input: &str,
    config: &CalculatorConfig,
) -> Result<RedeemPreview, PositionError> {
    let tokens_to_redeem = parse_input(tokens_input);
    let position = ctx.position()?;
    let market = ctx.market(config)?;
    let min_sponsor_tokens = ctx.min_sponsor_tokens()?;
    let dp = config.display_dp;

    let exceeds_position = tokens_to_redeem > position.tokens;
    let redeemed = tokens_to_redeem.max(Decimal::ZERO).min(position.tokens);
    let collateral_returned = pro_rata_collateral(position.collateral, position.tokens, redeemed);

    let resultant_tokens = subtract_floor_zero(position.tokens, redeemed);
    let resultant_collateral = subtract_floor_zero(position.collateral, collateral_returned);
    let resultant_cr = compute_cr(resultant_collateral, resultant_tokens);
    let priced_resultant_cr = round_display(compute_priced_cr(resultant_cr, market.latest_price), dp);
    let below_min_tokens = resultant_tokens < min_sponsor_tokens && !resultant_tokens.is_zero();

    debug!(
        collateral_returned = %collateral_returned,
        resultant_tokens = %resultant_tokens,
        "Redeem preview computed"
    );

    let balance_too_low = ctx.synthetic.balance()? < tokens_to_redeem;
    let needs_allowance = ctx.synthetic.needs_allowance(tokens_to_redeem);
    let can_submit = tokens_to_redeem > Decimal::ZERO
        && !exceeds_position
        && !balance_too_low
        && !needs_allowance
        && !below_min_tokens;

    Ok(RedeemPreview {
        tokens_to_redeem,
        collateral_returned: round_display(collateral_returned, dp),
        resultant_collateral,
        resultant_tokens,
        resultant_cr,
        priced_resultant_cr,
        exceeds_position,
        balance_too_low,
        needs_allowance,
        below_min_tokens,
        can_submit,
    })
}

/// Convert the form input into a `redeem` amount.
pub fn build_request(ctx: &PositionContext, tokens_input: &str) -> Result<TokenAmount, PositionError> {
    let tokens = parse_input(tokens_input);
    if tokens <= Decimal::ZERO {
        return Err(FormError::NonPositiveTokens.into());
    }
    Ok(TokenAmount::from_decimal_truncating(tokens, ctx.synthetic.token.decimals)?)
}

/// `collateral × redeemed / tokens`, or zero without debt.
fn pro_rata_collateral(collateral: Decimal, tokens: Decimal, redeemed: Decimal) -> Decimal {
    if tokens.is_zero() {
        return Decimal::ZERO;
    }
    if redeemed == tokens {
        return collateral;
    }
    collateral
        .checked_mul(redeemed)
        .and_then(|v| v.checked_div(tokens))
        .unwrap_or(Decimal::ZERO)
}
