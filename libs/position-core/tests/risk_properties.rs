//! Property tests for the position risk calculator
//!
//! Covers the sentinel guarantees, the liquidation price monotonicity, the
//! double-condition GCR gate and the safety of both guided-input
//! suggestions after their epsilon rounding.

use position_core::config::CalculatorConfig;
use position_core::risk::{
    compute_cr, compute_liquidation_price, compute_max_tokens_for_gcr,
    compute_min_collateral_for_gcr, compute_priced_cr, compute_resultant, evaluate_eligibility,
    EligibilityInputs,
};
use position_core::suggest::{suggest_max_tokens, suggest_min_collateral};
use proptest::prelude::*;
use rust_decimal::Decimal;
use types::position::Position;
use types::risk::TransactionInput;

/// GCR between 1.00 and 10.00
fn gcr() -> impl Strategy<Value = Decimal> {
    (100i64..=1_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Whole-unit amount between 1 and 1 000 000
fn amount() -> impl Strategy<Value = Decimal> {
    (1u64..=1_000_000u64).prop_map(Decimal::from)
}

/// Amount with up to 6 decimals
fn fractional_amount() -> impl Strategy<Value = Decimal> {
    (0i64..=1_000_000_000_000i64).prop_map(|units| Decimal::new(units, 6))
}

fn ratio(a: i64, b: i64, scale: u32) -> EligibilityInputs {
    EligibilityInputs {
        transaction_cr: Decimal::new(a, scale),
        resultant_cr: Decimal::new(b, scale),
        gcr: Decimal::new(15, 1),
        resultant_tokens: Decimal::from(100),
        min_tokens: Decimal::ZERO,
        priced_resultant_cr: Decimal::new(b, scale),
        collateral_requirement: Decimal::ONE,
    }
}

#[test]
fn test_double_condition_examples() {
    // transactionCR 1.2, resultantCR 1.8, GCR 1.5 → allowed
    assert!(!evaluate_eligibility(&ratio(12, 18, 1)).below_gcr);
    // transactionCR 1.2, resultantCR 1.3, GCR 1.5 → blocked
    assert!(evaluate_eligibility(&ratio(12, 13, 1)).below_gcr);
}

#[test]
fn test_resultant_example() {
    let position = Position::new(Decimal::from(1000), Decimal::from(500));
    let resultant = compute_resultant(&position, &TransactionInput::deposit(Decimal::from(200)));
    assert_eq!(resultant.collateral, Decimal::from(1200));
    assert_eq!(resultant.tokens, Decimal::from(500));
    assert_eq!(compute_cr(resultant.collateral, resultant.tokens), Decimal::new(24, 1));
}

#[test]
fn test_gcr_helpers_examples() {
    assert_eq!(
        compute_max_tokens_for_gcr(Decimal::TWO, Decimal::from(1000), Decimal::ZERO),
        Decimal::from(500)
    );
    assert_eq!(
        compute_min_collateral_for_gcr(Decimal::TWO, Decimal::from(300), Decimal::from(100)),
        Decimal::from(500)
    );
}

#[test]
fn test_liquidation_price_strictly_decreasing_example() {
    let req = Decimal::new(125, 2);
    let one = compute_liquidation_price(Decimal::from(1000), Decimal::from(100), req, false);
    let two = compute_liquidation_price(Decimal::from(1000), Decimal::from(200), req, false);
    assert!(one > two);
}

proptest! {
    /// No debt: CR is the zero sentinel.
    #[test]
    fn cr_zero_tokens_is_zero(collateral in fractional_amount()) {
        prop_assert_eq!(compute_cr(collateral, Decimal::ZERO), Decimal::ZERO);
    }

    /// No price: priced CR is the zero sentinel.
    #[test]
    fn priced_cr_zero_price_is_zero(ratio in fractional_amount()) {
        prop_assert_eq!(compute_priced_cr(ratio, Decimal::ZERO), Decimal::ZERO);
    }

    /// An empty side of the position has no liquidation price.
    #[test]
    fn liquidation_price_empty_side_is_zero(
        value in fractional_amount(),
        req in gcr(),
        inverted in any::<bool>(),
    ) {
        prop_assert_eq!(compute_liquidation_price(Decimal::ZERO, value, req, inverted), Decimal::ZERO);
        prop_assert_eq!(compute_liquidation_price(value, Decimal::ZERO, req, inverted), Decimal::ZERO);
    }

    /// More debt never raises the (non-inverted) liquidation price.
    #[test]
    fn liquidation_price_decreasing_in_tokens(
        collateral in amount(),
        tokens in amount(),
        extra in amount(),
        req in gcr(),
    ) {
        let lower_debt = compute_liquidation_price(collateral, tokens, req, false);
        let higher_debt = compute_liquidation_price(collateral, tokens + extra, req, false);
        prop_assert!(higher_debt <= lower_debt);
    }

    /// The mint is blocked exactly when both CRs are under the GCR.
    #[test]
    fn gcr_gate_requires_both_conditions(
        transaction_cr in fractional_amount(),
        resultant_cr in fractional_amount(),
        gcr in gcr(),
    ) {
        let flags = evaluate_eligibility(&EligibilityInputs {
            transaction_cr,
            resultant_cr,
            gcr,
            resultant_tokens: Decimal::from(100),
            min_tokens: Decimal::ZERO,
            priced_resultant_cr: resultant_cr,
            collateral_requirement: Decimal::ONE,
        });
        prop_assert_eq!(flags.below_gcr, transaction_cr < gcr && resultant_cr < gcr);
        prop_assert_eq!(flags.transaction_below_gcr, transaction_cr < gcr);
        prop_assert_eq!(flags.resultant_below_gcr, resultant_cr < gcr);
    }

    /// Min collateral never goes negative.
    #[test]
    fn min_collateral_non_negative(
        gcr in gcr(),
        tokens in fractional_amount(),
        starting in fractional_amount(),
    ) {
        prop_assert!(compute_min_collateral_for_gcr(gcr, tokens, starting) >= Decimal::ZERO);
    }

    /// Max-tokens suggestion for a new position keeps the CR at or above GCR.
    #[test]
    fn max_tokens_suggestion_is_safe_for_new_position(gcr in gcr(), deposit in amount()) {
        let config = CalculatorConfig::default();
        let suggested = suggest_max_tokens(gcr, &Position::default(), deposit, &config);
        prop_assume!(suggested > Decimal::ZERO);
        prop_assert!(compute_cr(deposit, suggested) >= gcr);
    }

    /// Max-tokens suggestion on a position above GCR keeps the resultant at or above GCR.
    #[test]
    fn max_tokens_suggestion_is_safe_for_existing_position(
        gcr in gcr(),
        tokens in (1u64..=100_000u64).prop_map(Decimal::from),
        headroom_cents in 0i64..=500i64,
        deposit in (0u64..=1_000_000u64).prop_map(Decimal::from),
    ) {
        let collateral = tokens * (gcr + Decimal::new(headroom_cents, 2));
        let position = Position::new(collateral, tokens);
        let config = CalculatorConfig::default();

        let suggested = suggest_max_tokens(gcr, &position, deposit, &config);
        prop_assume!(suggested > Decimal::ZERO);
        prop_assert!(compute_cr(collateral + deposit, tokens + suggested) >= gcr);
    }

    /// Min-collateral suggestion for a new position keeps the CR at or above GCR.
    #[test]
    fn min_collateral_suggestion_is_safe_for_new_position(gcr in gcr(), tokens in amount()) {
        let config = CalculatorConfig::default();
        let suggested = suggest_min_collateral(gcr, &Position::default(), tokens, &config);
        prop_assert!(compute_cr(suggested, tokens) >= gcr);
    }

    /// Min-collateral suggestion on a position above GCR keeps the resultant at or above GCR.
    #[test]
    fn min_collateral_suggestion_is_safe_for_existing_position(
        gcr in gcr(),
        tokens in (1u64..=100_000u64).prop_map(Decimal::from),
        headroom_cents in 0i64..=500i64,
        mint in amount(),
    ) {
        let collateral = tokens * (gcr + Decimal::new(headroom_cents, 2));
        let position = Position::new(collateral, tokens);
        let config = CalculatorConfig::default();

        let suggested = suggest_min_collateral(gcr, &position, mint, &config);
        prop_assert!(compute_cr(collateral + suggested, tokens + mint) >= gcr);
    }
}
