//! Mint preview: create synthetic tokens against new collateral
//!
//! Combines the risk evaluation with the wallet-side checks (balance,
//! allowance, expiry) that decide whether the Mint button is enabled.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use types::errors::{FormError, PositionError};
use types::numeric::TokenAmount;
use types::risk::{RiskResult, TransactionInput};

use crate::config::CalculatorConfig;
use crate::context::{non_negative, parse_input, PositionContext};
use crate::risk::{compute_cr, compute_priced_cr, evaluate_with_precision, round_display};
use crate::suggest::{suggest_max_tokens, suggest_min_collateral};

/// What the Mint form shows for the current inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MintPreview {
    pub collateral_to_deposit: Decimal,
    pub tokens_to_create: Decimal,
    pub gcr: Decimal,
    pub priced_gcr: Decimal,
    pub priced_transaction_cr: Decimal,
    pub min_sponsor_tokens: Decimal,
    pub collateral_requirement: Decimal,
    pub risk: RiskResult,
    /// Liquidation price at display precision
    pub liquidation_price: Decimal,
    /// Liquidation price is positive and far under the latest price
    pub liquidation_price_warning: bool,
    pub balance_too_low: bool,
    pub needs_allowance: bool,
    pub expired: bool,
    pub can_submit: bool,
}

/// Amounts to pass to the EMP's `create`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRequest {
    pub collateral: TokenAmount,
    pub tokens: TokenAmount,
}

/// Evaluate the Mint form.
pub fn preview(
    ctx: &PositionContext,
    collateral_input: &str,
    tokens_input: &str,
    config: &CalculatorConfig,
) -> Result<MintPreview, PositionError> {
    let collateral_to_deposit = parse_input(collateral_input);
    let tokens_to_create = parse_input(tokens_input);

    let position = ctx.position()?;
    let market = ctx.market(config)?;
    let min_sponsor_tokens = ctx.min_sponsor_tokens()?;
    let dp = config.display_dp;

    let tx = TransactionInput::mint(
        non_negative(collateral_to_deposit),
        non_negative(tokens_to_create),
    );
    let risk = evaluate_with_precision(&position, &market, &tx, min_sponsor_tokens, dp);

    debug!(
        gcr = %market.global_collateral_ratio,
        resultant_collateral = %risk.resultant_collateral,
        resultant_tokens = %risk.resultant_tokens,
        collateral_requirement = %market.collateral_requirement,
        "Mint preview computed"
    );

    let priced_gcr = round_display(
        compute_priced_cr(market.global_collateral_ratio, market.latest_price),
        dp,
    );
    let priced_transaction_cr =
        round_display(compute_priced_cr(risk.transaction_cr, market.latest_price), dp);

    let liquidation_price = round_display(risk.liquidation_price, dp);
    let warning_floor = (Decimal::ONE - config.liquidation_warning_threshold)
        .checked_mul(market.latest_price)
        .unwrap_or(Decimal::MAX);
    let liquidation_price_warning =
        liquidation_price > Decimal::ZERO && liquidation_price < warning_floor;

    let balance_too_low = ctx.collateral.balance()? < collateral_to_deposit;
    let needs_allowance = ctx.collateral.needs_allowance(collateral_to_deposit);
    let expired = ctx.is_expired();

    let can_submit = !risk.eligibility.below_gcr
        && !balance_too_low
        && !risk.eligibility.below_requirement
        && !risk.eligibility.below_min_tokens
        && !needs_allowance
        && !expired
        && collateral_to_deposit >= Decimal::ZERO
        && tokens_to_create > Decimal::ZERO;

    Ok(MintPreview {
        collateral_to_deposit,
        tokens_to_create,
        gcr: market.global_collateral_ratio,
        priced_gcr,
        priced_transaction_cr,
        min_sponsor_tokens,
        collateral_requirement: market.collateral_requirement,
        risk,
        liquidation_price,
        liquidation_price_warning,
        balance_too_low,
        needs_allowance,
        expired,
        can_submit,
    })
}

/// Convert the form inputs into `create` amounts.
///
/// Collateral may be zero (minting against excess collateral); tokens must be
/// positive.
pub fn build_request(
    ctx: &PositionContext,
    collateral_input: &str,
    tokens_input: &str,
) -> Result<MintRequest, PositionError> {
    let collateral = parse_input(collateral_input);
    let tokens = parse_input(tokens_input);
    if collateral < Decimal::ZERO || tokens <= Decimal::ZERO {
        return Err(FormError::NonPositiveAmounts.into());
    }
    if ctx.is_expired() {
        return Err(FormError::Expired.into());
    }

    let request = MintRequest {
        collateral: TokenAmount::from_decimal_truncating(collateral, ctx.collateral.token.decimals)?,
        tokens: TokenAmount::from_decimal_truncating(tokens, ctx.synthetic.token.decimals)?,
    };
    debug!(collateral = %request.collateral, tokens = %request.tokens, "Mint request built");
    Ok(request)
}

/// Max helper for the tokens field, given the collateral field.
pub fn max_tokens(
    ctx: &PositionContext,
    collateral_input: &str,
    config: &CalculatorConfig,
) -> Result<Decimal, PositionError> {
    let position = ctx.position()?;
    let gcr = ctx.gcr()?;
    Ok(suggest_max_tokens(gcr, &position, parse_input(collateral_input), config))
}

/// Min helper for the collateral field, given the tokens field.
pub fn min_collateral(
    ctx: &PositionContext,
    tokens_input: &str,
    config: &CalculatorConfig,
) -> Result<Decimal, PositionError> {
    let position = ctx.position()?;
    let gcr = ctx.gcr()?;
    Ok(suggest_min_collateral(gcr, &position, parse_input(tokens_input), config))
}

/// Current CR of the sponsor's position, before any input is applied.
pub fn current_cr(ctx: &PositionContext) -> Result<Decimal, PositionError> {
    let position = ctx.position()?;
    Ok(compute_cr(position.collateral, position.tokens))
}
