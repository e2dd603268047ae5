//! Position Risk Calculator: collateral ratios and liquidation price
//!
//! Pure functions over decimal snapshots. Every function is total: a zero
//! divisor (no debt, no price, no requirement) or an arithmetic overflow
//! yields the zero sentinel instead of failing. Nothing here logs or keeps
//! state, so the UI may call it on every keystroke.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use types::emp::ContractTotals;
use types::errors::AmountError;
use types::position::Position;
use types::risk::{Eligibility, MarketParameters, Resultant, RiskResult, TransactionInput};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Display precision for ratios and prices (4 dp).
pub const DISPLAY_DP: u32 = 4;

// ---------------------------------------------------------------------------
// Core operations
// ---------------------------------------------------------------------------

/// Apply a deposit/mint to a position.
///
/// Overflow saturates at `Decimal::MAX`.
pub fn compute_resultant(position: &Position, tx: &TransactionInput) -> Resultant {
    Resultant {
        collateral: saturating_add(position.collateral, tx.collateral_delta),
        tokens: saturating_add(position.tokens, tx.token_delta),
    }
}

/// CR = collateral / tokens, or `0` when there is no debt.
pub fn compute_cr(collateral: Decimal, tokens: Decimal) -> Decimal {
    if tokens > Decimal::ZERO {
        sentinel_div(collateral, tokens)
    } else {
        Decimal::ZERO
    }
}

/// CR expressed in price terms: ratio / latest price, or `0` without a price.
pub fn compute_priced_cr(ratio: Decimal, latest_price: Decimal) -> Decimal {
    if latest_price.is_zero() {
        return Decimal::ZERO;
    }
    sentinel_div(ratio, latest_price)
}

/// Price at which the position's priced CR falls to the requirement.
///
/// Non-inverted: `collateral / (tokens × requirement)`
/// Inverted:     `tokens × requirement / collateral`
///
/// Returns `0` for an empty side of the position or a zero requirement.
pub fn compute_liquidation_price(
    collateral: Decimal,
    tokens: Decimal,
    collateral_requirement: Decimal,
    inverted: bool,
) -> Decimal {
    if collateral.is_zero() || tokens.is_zero() {
        return Decimal::ZERO;
    }

    let debt_at_requirement = match tokens.checked_mul(collateral_requirement) {
        Some(v) => v,
        None => return Decimal::ZERO,
    };

    if inverted {
        sentinel_div(debt_at_requirement, collateral)
    } else {
        sentinel_div(collateral, debt_at_requirement)
    }
}

/// Tokens that can be added on top of `starting_tokens` while keeping
/// `available_collateral / tokens` at the GCR.
///
/// `available_collateral / gcr - starting_tokens`, or `0` when `gcr <= 0`.
/// May be negative; callers clamp when presenting a suggestion.
pub fn compute_max_tokens_for_gcr(
    gcr: Decimal,
    available_collateral: Decimal,
    starting_tokens: Decimal,
) -> Decimal {
    if gcr <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let capacity = sentinel_div(available_collateral, gcr);
    capacity.checked_sub(starting_tokens).unwrap_or(Decimal::ZERO)
}

/// Collateral that must be added to `starting_collateral` for
/// `token_amount` of debt to sit at the GCR.
///
/// `gcr × token_amount - starting_collateral`, clamped at `0` when the
/// position is already sufficiently collateralized.
pub fn compute_min_collateral_for_gcr(
    gcr: Decimal,
    token_amount: Decimal,
    starting_collateral: Decimal,
) -> Decimal {
    let required = gcr.checked_mul(token_amount).unwrap_or(Decimal::MAX);
    let missing = required
        .checked_sub(starting_collateral)
        .unwrap_or(Decimal::ZERO);
    missing.max(Decimal::ZERO)
}

/// Global collateral ratio from contract totals.
pub fn global_collateral_ratio(totals: &ContractTotals) -> Result<Decimal, AmountError> {
    Ok(compute_cr(
        totals.total_collateral.to_decimal()?,
        totals.total_tokens.to_decimal()?,
    ))
}

// ---------------------------------------------------------------------------
// Eligibility
// ---------------------------------------------------------------------------

/// Inputs to [`evaluate_eligibility`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityInputs {
    pub transaction_cr: Decimal,
    pub resultant_cr: Decimal,
    pub gcr: Decimal,
    pub resultant_tokens: Decimal,
    pub min_tokens: Decimal,
    pub priced_resultant_cr: Decimal,
    pub collateral_requirement: Decimal,
}

/// Derive the flags that gate a mint.
///
/// A mint is blocked by the GCR only when the transaction CR **and** the
/// resultant CR are both under the GCR. A transaction that is individually
/// under-collateralized is allowed if the resultant position stays at or
/// above the GCR.
pub fn evaluate_eligibility(inputs: &EligibilityInputs) -> Eligibility {
    let below_min_tokens =
        inputs.resultant_tokens < inputs.min_tokens && !inputs.resultant_tokens.is_zero();
    let transaction_below_gcr = inputs.transaction_cr < inputs.gcr;
    let resultant_below_gcr = inputs.resultant_cr < inputs.gcr;
    let below_requirement = inputs.priced_resultant_cr >= Decimal::ZERO
        && inputs.priced_resultant_cr < inputs.collateral_requirement;

    Eligibility {
        below_min_tokens,
        transaction_below_gcr,
        resultant_below_gcr,
        below_gcr: transaction_below_gcr && resultant_below_gcr,
        below_requirement,
    }
}

// ---------------------------------------------------------------------------
// Full evaluation
// ---------------------------------------------------------------------------

/// Evaluate a proposed transaction at the default display precision.
pub fn evaluate(
    position: &Position,
    market: &MarketParameters,
    tx: &TransactionInput,
    min_tokens: Decimal,
) -> RiskResult {
    evaluate_with_precision(position, market, tx, min_tokens, DISPLAY_DP)
}

/// Evaluate a proposed transaction.
///
/// The priced resultant CR is rounded to `display_dp` before it is compared
/// against the requirement, so the flag always agrees with the value shown.
pub fn evaluate_with_precision(
    position: &Position,
    market: &MarketParameters,
    tx: &TransactionInput,
    min_tokens: Decimal,
    display_dp: u32,
) -> RiskResult {
    let resultant = compute_resultant(position, tx);
    let transaction_cr = compute_cr(tx.collateral_delta, tx.token_delta);
    let resultant_cr = compute_cr(resultant.collateral, resultant.tokens);
    let priced_resultant_cr =
        round_display(compute_priced_cr(resultant_cr, market.latest_price), display_dp);

    let liquidation_price = compute_liquidation_price(
        resultant.collateral,
        resultant.tokens,
        market.collateral_requirement,
        market.price_feed_inverted,
    );

    let eligibility = evaluate_eligibility(&EligibilityInputs {
        transaction_cr,
        resultant_cr,
        gcr: market.global_collateral_ratio,
        resultant_tokens: resultant.tokens,
        min_tokens,
        priced_resultant_cr,
        collateral_requirement: market.collateral_requirement,
    });

    RiskResult {
        resultant_collateral: resultant.collateral,
        resultant_tokens: resultant.tokens,
        resultant_cr,
        priced_resultant_cr,
        transaction_cr,
        liquidation_price,
        eligibility,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Round to display precision, HALF_UP.
pub fn round_display(v: Decimal, dp: u32) -> Decimal {
    v.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Division with the zero sentinel for a zero divisor or overflow.
fn sentinel_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(Decimal::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use types::numeric::TokenAmount;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn market(gcr: &str, requirement: &str, price: &str) -> MarketParameters {
        MarketParameters {
            global_collateral_ratio: dec(gcr),
            collateral_requirement: dec(requirement),
            latest_price: dec(price),
            price_feed_inverted: false,
        }
    }

    #[test]
    fn test_compute_resultant_deposit() {
        let position = Position::new(Decimal::from(1000), Decimal::from(500));
        let tx = TransactionInput::deposit(Decimal::from(200));

        let resultant = compute_resultant(&position, &tx);
        assert_eq!(resultant.collateral, Decimal::from(1200));
        assert_eq!(resultant.tokens, Decimal::from(500));
        assert_eq!(compute_cr(resultant.collateral, resultant.tokens), dec("2.4"));
    }

    #[test]
    fn test_compute_resultant_saturates() {
        let position = Position::new(Decimal::MAX, Decimal::ZERO);
        let tx = TransactionInput::deposit(Decimal::ONE);
        assert_eq!(compute_resultant(&position, &tx).collateral, Decimal::MAX);
    }

    #[test]
    fn test_cr_zero_tokens() {
        assert_eq!(compute_cr(Decimal::from(1000), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_priced_cr() {
        assert_eq!(compute_priced_cr(dec("2.4"), dec("1.2")), Decimal::TWO);
        assert_eq!(compute_priced_cr(dec("2.4"), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_liquidation_price_non_inverted() {
        // 1200 / (500 × 1.2) = 2
        let price = compute_liquidation_price(
            Decimal::from(1200),
            Decimal::from(500),
            dec("1.2"),
            false,
        );
        assert_eq!(price, Decimal::TWO);
    }

    #[test]
    fn test_liquidation_price_inverted() {
        // 500 × 1.2 / 1200 = 0.5
        let price = compute_liquidation_price(
            Decimal::from(1200),
            Decimal::from(500),
            dec("1.2"),
            true,
        );
        assert_eq!(price, dec("0.5"));
    }

    #[test]
    fn test_liquidation_price_zero_sentinels() {
        let req = dec("1.25");
        assert_eq!(compute_liquidation_price(Decimal::ZERO, Decimal::from(5), req, false), Decimal::ZERO);
        assert_eq!(compute_liquidation_price(Decimal::from(5), Decimal::ZERO, req, false), Decimal::ZERO);
        assert_eq!(compute_liquidation_price(Decimal::ZERO, Decimal::from(5), req, true), Decimal::ZERO);
        assert_eq!(
            compute_liquidation_price(Decimal::from(5), Decimal::from(5), Decimal::ZERO, false),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_max_tokens_for_gcr() {
        assert_eq!(
            compute_max_tokens_for_gcr(Decimal::TWO, Decimal::from(1000), Decimal::ZERO),
            Decimal::from(500)
        );
        assert_eq!(
            compute_max_tokens_for_gcr(Decimal::TWO, Decimal::from(1000), Decimal::from(100)),
            Decimal::from(400)
        );
    }

    #[test]
    fn test_max_tokens_without_gcr() {
        assert_eq!(
            compute_max_tokens_for_gcr(Decimal::ZERO, Decimal::from(1000), Decimal::ZERO),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_min_collateral_for_gcr() {
        assert_eq!(
            compute_min_collateral_for_gcr(Decimal::TWO, Decimal::from(300), Decimal::from(100)),
            Decimal::from(500)
        );
    }

    #[test]
    fn test_min_collateral_clamped() {
        // already over-collateralized
        assert_eq!(
            compute_min_collateral_for_gcr(Decimal::TWO, Decimal::from(300), Decimal::from(1000)),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_eligibility_resultant_compliant_not_blocked() {
        let flags = evaluate_eligibility(&EligibilityInputs {
            transaction_cr: dec("1.2"),
            resultant_cr: dec("1.8"),
            gcr: dec("1.5"),
            resultant_tokens: Decimal::from(100),
            min_tokens: Decimal::from(10),
            priced_resultant_cr: dec("1.8"),
            collateral_requirement: dec("1.25"),
        });
        assert!(flags.transaction_below_gcr);
        assert!(!flags.resultant_below_gcr);
        assert!(!flags.below_gcr);
    }

    #[test]
    fn test_eligibility_both_below_blocked() {
        let flags = evaluate_eligibility(&EligibilityInputs {
            transaction_cr: dec("1.2"),
            resultant_cr: dec("1.3"),
            gcr: dec("1.5"),
            resultant_tokens: Decimal::from(100),
            min_tokens: Decimal::from(10),
            priced_resultant_cr: dec("1.3"),
            collateral_requirement: dec("1.25"),
        });
        assert!(flags.transaction_below_gcr);
        assert!(flags.resultant_below_gcr);
        assert!(flags.below_gcr);
    }

    #[test]
    fn test_eligibility_transaction_compliant_not_blocked() {
        // resultant under GCR but the transaction itself is above it
        let flags = evaluate_eligibility(&EligibilityInputs {
            transaction_cr: dec("2.0"),
            resultant_cr: dec("1.3"),
            gcr: dec("1.5"),
            resultant_tokens: Decimal::from(100),
            min_tokens: Decimal::ZERO,
            priced_resultant_cr: dec("1.3"),
            collateral_requirement: dec("1.25"),
        });
        assert!(!flags.below_gcr);
    }

    #[test]
    fn test_eligibility_zero_tokens_not_below_min() {
        let flags = evaluate_eligibility(&EligibilityInputs {
            transaction_cr: Decimal::ZERO,
            resultant_cr: Decimal::ZERO,
            gcr: Decimal::ZERO,
            resultant_tokens: Decimal::ZERO,
            min_tokens: Decimal::from(100),
            priced_resultant_cr: Decimal::ZERO,
            collateral_requirement: dec("1.25"),
        });
        assert!(!flags.below_min_tokens);
    }

    #[test]
    fn test_eligibility_below_min_tokens() {
        let flags = evaluate_eligibility(&EligibilityInputs {
            transaction_cr: Decimal::from(3),
            resultant_cr: Decimal::from(3),
            gcr: Decimal::TWO,
            resultant_tokens: Decimal::from(50),
            min_tokens: Decimal::from(100),
            priced_resultant_cr: Decimal::from(3),
            collateral_requirement: dec("1.25"),
        });
        assert!(flags.below_min_tokens);
        assert!(!flags.below_requirement);
    }

    #[test]
    fn test_eligibility_zero_priced_cr_below_requirement() {
        let flags = evaluate_eligibility(&EligibilityInputs {
            transaction_cr: Decimal::ZERO,
            resultant_cr: Decimal::ZERO,
            gcr: Decimal::ZERO,
            resultant_tokens: Decimal::ZERO,
            min_tokens: Decimal::ZERO,
            priced_resultant_cr: Decimal::ZERO,
            collateral_requirement: dec("1.25"),
        });
        assert!(flags.below_requirement);
    }

    #[test]
    fn test_evaluate_mint() {
        // Position 1000 / 500, mint 100 tokens with 300 collateral at price 1
        let position = Position::new(Decimal::from(1000), Decimal::from(500));
        let tx = TransactionInput::mint(Decimal::from(300), Decimal::from(100));
        let result = evaluate(&position, &market("1.5", "1.25", "1"), &tx, Decimal::from(10));

        assert_eq!(result.resultant_collateral, Decimal::from(1300));
        assert_eq!(result.resultant_tokens, Decimal::from(600));
        assert_eq!(result.transaction_cr, Decimal::from(3));
        assert_eq!(result.priced_resultant_cr, dec("2.1667"));
        assert!(!result.eligibility.is_blocked());
    }

    #[test]
    fn test_evaluate_priced_cr_rounded_before_comparison() {
        // 1.24996 would be below 1.25, but the displayed 1.2500 is not
        let position = Position::new(dec("124.996"), Decimal::from(100));
        let tx = TransactionInput::default();
        let result = evaluate(&position, &market("1", "1.25", "1"), &tx, Decimal::ZERO);

        assert_eq!(result.priced_resultant_cr, dec("1.25"));
        assert!(!result.eligibility.below_requirement);
    }

    #[test]
    fn test_evaluate_zero_price() {
        let position = Position::new(Decimal::from(1000), Decimal::from(500));
        let tx = TransactionInput::deposit(Decimal::from(200));
        let result = evaluate(&position, &market("1.5", "1.25", "0"), &tx, Decimal::ZERO);

        assert_eq!(result.priced_resultant_cr, Decimal::ZERO);
        assert!(result.eligibility.below_requirement);
    }

    #[test]
    fn test_global_collateral_ratio() {
        let totals = ContractTotals {
            total_collateral: TokenAmount::new(3_000_000_000, 6).unwrap(),
            total_tokens: TokenAmount::new(2_000_000_000_000_000_000_000, 18).unwrap(),
        };
        assert_eq!(global_collateral_ratio(&totals).unwrap(), dec("1.5"));
    }

    #[test]
    fn test_global_collateral_ratio_empty_contract() {
        let totals = ContractTotals {
            total_collateral: TokenAmount::zero(18).unwrap(),
            total_tokens: TokenAmount::zero(18).unwrap(),
        };
        assert_eq!(global_collateral_ratio(&totals).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_round_display() {
        assert_eq!(round_display(dec("1.23455"), 4), dec("1.2346"));
        assert_eq!(round_display(dec("1.23454"), 4), dec("1.2345"));
    }
}
