// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! Risk scoring and repayment planning for medical debt records.
//!
//! Everything in this crate is a pure function of its arguments: no I/O, no
//! shared state, no wall-clock reads. Identical inputs always produce
//! identical outputs, so callers may invoke it concurrently without
//! synchronization.

mod recompute;
mod summary;

pub use recompute::apply_update;
pub use summary::{project_summary, PayoffProjection};

use medipay_model::{
    DebtInput, RiskLevel, RiskResult, ValidationError, REPAYMENT_MONTHS_MAX,
    REPAYMENT_MONTHS_MIN,
};
use std::fmt::{Display, Formatter};

/// Credit scores at or above this value contribute zero risk.
const CREDIT_SCORE_CEILING: i64 = 700;

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EngineError {
    InvalidInput(ValidationError),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(reason) => write!(f, "{reason}"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Compute the risk score, classification, and repayment plan for one set of
/// financial inputs.
///
/// The risk score is derived from the full debt amount and income,
/// independent of the down payment; the repayment plan is derived from the
/// amount remaining after the down payment. Rounding happens once, at the
/// end of each field's derivation: score to 4 decimals, monetary fields to 2.
pub fn compute(input: &DebtInput) -> Result<RiskResult, EngineError> {
    if input.income <= 0.0 {
        return Err(EngineError::InvalidInput(ValidationError::NotPositive(
            "income",
        )));
    }
    if input.down_payment < 0.0 {
        return Err(EngineError::InvalidInput(ValidationError::Negative(
            "down_payment",
        )));
    }
    if input.down_payment >= input.debt_amount {
        return Err(EngineError::InvalidInput(
            ValidationError::DownPaymentNotBelowDebt,
        ));
    }

    let amount_after_down_payment = (input.debt_amount - input.down_payment).max(0.0);

    let dti = input.debt_amount / input.income;
    let credit_factor =
        (CREDIT_SCORE_CEILING - input.credit_score.min(CREDIT_SCORE_CEILING)) as f64
            / CREDIT_SCORE_CEILING as f64;
    let risk_score = round4((dti * credit_factor).clamp(0.0, 1.0));
    let risk_level = RiskLevel::for_score(risk_score);

    let months = input
        .repayment_months
        .clamp(REPAYMENT_MONTHS_MIN, REPAYMENT_MONTHS_MAX);

    let (recommended_monthly_payment, total_interest, estimated_payoff_months) =
        if amount_after_down_payment <= 0.0 {
            (0.0, 0.0, 0)
        } else if input.interest_rate <= 0.0 {
            (round2(amount_after_down_payment / months as f64), 0.0, months)
        } else {
            let monthly_rate = input.interest_rate / 12.0;
            if monthly_rate <= 0.0 {
                // Unreachable with a positive annual rate; keep the
                // zero-interest plan as the fallback.
                (round2(amount_after_down_payment / months as f64), 0.0, months)
            } else {
                let growth = (1.0 + monthly_rate).powi(months as i32);
                let payment = round2(
                    amount_after_down_payment * (monthly_rate * growth) / (growth - 1.0),
                );
                let interest = round2(
                    (payment * months as f64 - amount_after_down_payment).max(0.0),
                );
                (payment, interest, months)
            }
        };

    Ok(RiskResult {
        risk_score,
        risk_level,
        recommended_monthly_payment,
        total_interest,
        amount_after_down_payment: round2(amount_after_down_payment),
        estimated_payoff_months,
    })
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use medipay_model::REPAYMENT_MONTHS_DEFAULT;

    fn input(debt: f64, income: f64, score: i64) -> DebtInput {
        DebtInput {
            patient_name: "Jane Doe".to_string(),
            provider: "Carle Hospital".to_string(),
            debt_amount: debt,
            income,
            credit_score: score,
            repayment_months: REPAYMENT_MONTHS_DEFAULT,
            interest_rate: 0.0,
            down_payment: 0.0,
        }
    }

    #[test]
    fn zero_interest_plan_splits_principal_evenly() {
        let result = compute(&input(12_000.0, 55_000.0, 640)).expect("compute");
        // dti = 12000/55000, credit_factor = 60/700.
        assert_eq!(result.risk_score, 0.0187);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.recommended_monthly_payment, 500.00);
        assert_eq!(result.total_interest, 0.0);
        assert_eq!(result.amount_after_down_payment, 12_000.0);
        assert_eq!(result.estimated_payoff_months, 24);
    }

    #[test]
    fn low_credit_score_raises_risk() {
        let result = compute(&input(22_000.0, 38_000.0, 580)).expect("compute");
        // dti = 22000/38000, credit_factor = 120/700.
        assert_eq!(result.risk_score, 0.0992);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn credit_score_above_ceiling_contributes_zero_risk() {
        let result = compute(&input(5_000.0, 95_000.0, 780)).expect("compute");
        assert_eq!(result.risk_score, 0.0);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.recommended_monthly_payment, 208.33);
        assert_eq!(result.estimated_payoff_months, 24);
    }

    #[test]
    fn risk_score_clamps_to_one() {
        let result = compute(&input(500_000.0, 10_000.0, 300)).expect("compute");
        assert_eq!(result.risk_score, 1.0);
        assert_eq!(result.risk_level, RiskLevel::High);
    }

    #[test]
    fn boundary_scores_classify_medium_and_high() {
        // dti 0.4 * credit_factor 0.5 = 0.2 exactly.
        let result = compute(&input(4_000.0, 10_000.0, 350)).expect("compute");
        assert_eq!(result.risk_score, 0.2);
        assert_eq!(result.risk_level, RiskLevel::Medium);

        // dti 1.0 * credit_factor 0.5 = 0.5 exactly.
        let result = compute(&input(10_000.0, 10_000.0, 350)).expect("compute");
        assert_eq!(result.risk_score, 0.5);
        assert_eq!(result.risk_level, RiskLevel::High);
    }

    #[test]
    fn amortizing_plan_matches_annuity_formula() {
        let mut input = input(12_000.0, 55_000.0, 640);
        input.interest_rate = 0.12;
        let result = compute(&input).expect("compute");
        // 12% APR over 24 months: the textbook annuity payment is 564.88.
        assert_eq!(result.recommended_monthly_payment, 564.88);
        assert_eq!(result.total_interest, 1_557.12);
        assert_eq!(result.estimated_payoff_months, 24);
        // payment * months - principal == total interest, up to rounding.
        let implied = result.recommended_monthly_payment * 24.0 - 12_000.0;
        assert!((implied - result.total_interest).abs() < 0.005);
    }

    #[test]
    fn near_total_down_payment_still_amortizes() {
        let mut input = input(10_000.0, 55_000.0, 640);
        input.down_payment = 9_999.99;
        input.repayment_months = 12;
        input.interest_rate = 0.1;
        let result = compute(&input).expect("compute");
        assert_eq!(result.amount_after_down_payment, 0.01);
        assert_eq!(result.recommended_monthly_payment, 0.0);
        assert_eq!(result.total_interest, 0.0);
        assert_eq!(result.estimated_payoff_months, 12);
    }

    #[test]
    fn down_payment_reduces_plan_but_not_risk() {
        let mut with_down = input(12_000.0, 55_000.0, 640);
        with_down.down_payment = 6_000.0;
        let baseline = compute(&input(12_000.0, 55_000.0, 640)).expect("compute");
        let reduced = compute(&with_down).expect("compute");
        assert_eq!(reduced.risk_score, baseline.risk_score);
        assert_eq!(reduced.amount_after_down_payment, 6_000.0);
        assert_eq!(reduced.recommended_monthly_payment, 250.00);
    }

    #[test]
    fn down_payment_at_debt_amount_is_rejected() {
        let mut input = input(10_000.0, 55_000.0, 640);
        input.down_payment = 10_000.0;
        assert_eq!(
            compute(&input).expect_err("down payment == debt"),
            EngineError::InvalidInput(ValidationError::DownPaymentNotBelowDebt)
        );
    }

    #[test]
    fn non_positive_income_and_negative_down_payment_are_rejected() {
        let zero_income = input(10_000.0, 0.0, 640);
        assert_eq!(
            compute(&zero_income).expect_err("zero income"),
            EngineError::InvalidInput(ValidationError::NotPositive("income"))
        );

        let mut negative_down = input(10_000.0, 55_000.0, 640);
        negative_down.down_payment = -1.0;
        assert_eq!(
            compute(&negative_down).expect_err("negative down payment"),
            EngineError::InvalidInput(ValidationError::Negative("down_payment"))
        );
    }

    #[test]
    fn repayment_months_are_clamped_into_range() {
        let mut input = input(12_000.0, 55_000.0, 640);
        input.repayment_months = 500;
        let result = compute(&input).expect("compute");
        assert_eq!(result.estimated_payoff_months, REPAYMENT_MONTHS_MAX);
        assert_eq!(result.recommended_monthly_payment, 100.00);

        input.repayment_months = 0;
        let result = compute(&input).expect("compute");
        assert_eq!(result.estimated_payoff_months, 1);
        assert_eq!(result.recommended_monthly_payment, 12_000.00);
    }

    #[test]
    fn compute_is_deterministic() {
        let mut sample = input(22_000.0, 38_000.0, 580);
        sample.interest_rate = 0.07;
        sample.down_payment = 1_500.0;
        let first = compute(&sample).expect("compute");
        let second = compute(&sample).expect("compute");
        assert_eq!(first, second);
        assert_eq!(
            first.risk_score.to_bits(),
            second.risk_score.to_bits()
        );
        assert_eq!(
            first.recommended_monthly_payment.to_bits(),
            second.recommended_monthly_payment.to_bits()
        );
    }
}
