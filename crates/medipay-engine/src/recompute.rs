// SPDX-License-Identifier: Apache-2.0

use crate::{compute, EngineError};
use medipay_model::{DebtChanges, DebtRecord};

/// Merge a partial change set onto an existing record and recompute the
/// derived risk fields when any financial field was touched.
///
/// All-or-nothing: on a validation failure nothing is applied — the existing
/// record is untouched and the error is surfaced to the caller. Changes that
/// are disjoint from the recompute trigger set (display-only fields) leave
/// the derived fields byte-identical.
///
/// The caller resolves the record before calling in; an absent id is the
/// store's `NotFound`, not this function's concern. Timestamps are likewise
/// applied by the store — this function stays deterministic.
pub fn apply_update(
    existing: &DebtRecord,
    changes: &DebtChanges,
) -> Result<DebtRecord, EngineError> {
    let mut merged = existing.input.clone();
    if let Some(name) = &changes.patient_name {
        merged.patient_name = name.clone();
    }
    if let Some(provider) = &changes.provider {
        merged.provider = provider.clone();
    }
    if let Some(amount) = changes.debt_amount {
        merged.debt_amount = amount;
    }
    if let Some(income) = changes.income {
        merged.income = income;
    }
    if let Some(score) = changes.credit_score {
        merged.credit_score = score;
    }
    if let Some(months) = changes.repayment_months {
        merged.repayment_months = months;
    }
    if let Some(rate) = changes.interest_rate {
        merged.interest_rate = rate;
    }
    if let Some(down) = changes.down_payment {
        merged.down_payment = down;
    }

    let risk = if changes.touches_financial_fields() {
        compute(&merged)?
    } else {
        existing.risk.clone()
    };

    Ok(DebtRecord {
        id: existing.id,
        input: merged,
        risk,
        created_at: existing.created_at.clone(),
        updated_at: existing.updated_at.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use medipay_model::{DebtInput, ValidationError};

    fn record() -> DebtRecord {
        let input = DebtInput {
            patient_name: "Jane Doe".to_string(),
            provider: "Carle Hospital".to_string(),
            debt_amount: 12_000.0,
            income: 55_000.0,
            credit_score: 640,
            repayment_months: 24,
            interest_rate: 0.0,
            down_payment: 0.0,
        };
        let risk = compute(&input).expect("compute");
        DebtRecord {
            id: 7,
            input,
            risk,
            created_at: "2026-08-01T12:00:00Z".to_string(),
            updated_at: "2026-08-01T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn display_only_change_leaves_derived_fields_untouched() {
        let existing = record();
        let changes = DebtChanges {
            patient_name: Some("Janet Doe".to_string()),
            ..DebtChanges::default()
        };
        let updated = apply_update(&existing, &changes).expect("apply");
        assert_eq!(updated.input.patient_name, "Janet Doe");
        assert_eq!(updated.input.provider, existing.input.provider);
        assert_eq!(updated.risk, existing.risk);
    }

    #[test]
    fn trigger_field_change_rederives_all_risk_fields() {
        let existing = record();
        let changes = DebtChanges {
            credit_score: Some(580),
            ..DebtChanges::default()
        };
        let updated = apply_update(&existing, &changes).expect("apply");

        let mut merged = existing.input.clone();
        merged.credit_score = 580;
        let fresh = compute(&merged).expect("compute");
        assert_eq!(updated.risk, fresh);
        assert_ne!(updated.risk.risk_score, existing.risk.risk_score);
        // Unspecified fields retain the existing values.
        assert_eq!(updated.input.income, existing.input.income);
        assert_eq!(updated.input.patient_name, existing.input.patient_name);
    }

    #[test]
    fn merged_invariant_violation_applies_nothing() {
        let existing = record();
        let changes = DebtChanges {
            down_payment: Some(existing.input.debt_amount),
            ..DebtChanges::default()
        };
        let err = apply_update(&existing, &changes).expect_err("down payment >= debt");
        assert_eq!(
            err,
            EngineError::InvalidInput(ValidationError::DownPaymentNotBelowDebt)
        );
    }

    #[test]
    fn lowering_debt_below_down_payment_is_rejected() {
        let mut existing = record();
        existing.input.down_payment = 5_000.0;
        existing.risk = compute(&existing.input).expect("compute");
        let changes = DebtChanges {
            debt_amount: Some(4_000.0),
            ..DebtChanges::default()
        };
        let err = apply_update(&existing, &changes).expect_err("debt below down payment");
        assert_eq!(
            err,
            EngineError::InvalidInput(ValidationError::DownPaymentNotBelowDebt)
        );
    }

    #[test]
    fn empty_change_set_is_a_no_op() {
        let existing = record();
        let updated = apply_update(&existing, &DebtChanges::default()).expect("apply");
        assert_eq!(updated, existing);
    }

    #[test]
    fn recompute_matches_fresh_compute_for_every_trigger_field() {
        let existing = record();
        let change_sets = [
            DebtChanges {
                income: Some(48_000.0),
                ..DebtChanges::default()
            },
            DebtChanges {
                debt_amount: Some(15_000.0),
                ..DebtChanges::default()
            },
            DebtChanges {
                interest_rate: Some(0.08),
                ..DebtChanges::default()
            },
            DebtChanges {
                down_payment: Some(2_000.0),
                ..DebtChanges::default()
            },
            DebtChanges {
                repayment_months: Some(36),
                ..DebtChanges::default()
            },
        ];
        for changes in change_sets {
            let updated = apply_update(&existing, &changes).expect("apply");
            assert_eq!(updated.risk, compute(&updated.input).expect("compute"));
        }
    }
}
