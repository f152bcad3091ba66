// SPDX-License-Identifier: Apache-2.0

use crate::round2;
use medipay_model::DebtRecord;

/// Read-only payoff projection over a stored record.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoffProjection {
    pub amount_remaining: f64,
    pub estimated_payoff_months: i64,
}

/// Project a payoff timeline from the stored plan without re-invoking the
/// engine: amount remaining divided by the recommended monthly payment.
///
/// This uses simple division, so for amortizing plans it may disagree
/// slightly with the stored `estimated_payoff_months` (which follows the
/// amortization schedule). The divergence is expected and not reconciled.
#[must_use]
pub fn project_summary(record: &DebtRecord) -> PayoffProjection {
    let amount_remaining = (record.input.debt_amount - record.input.down_payment).max(0.0);
    let estimated_payoff_months =
        if record.risk.recommended_monthly_payment <= 0.0 || amount_remaining <= 0.0 {
            record.input.repayment_months
        } else {
            ((amount_remaining / record.risk.recommended_monthly_payment).round() as i64).max(1)
        };
    PayoffProjection {
        amount_remaining: round2(amount_remaining),
        estimated_payoff_months,
    }
}
