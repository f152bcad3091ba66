// SPDX-License-Identifier: Apache-2.0

use crate::ApiError;
use medipay_model::{
    DebtChanges, DebtInput, DebtRecord, RiskLevel, REPAYMENT_MONTHS_DEFAULT,
};
use serde::{Deserialize, Serialize};

fn default_repayment_months() -> i64 {
    REPAYMENT_MONTHS_DEFAULT
}

/// Body of `POST /v1/debts`. Plan fields default the way the engine
/// documents them: 24 months, zero interest, zero down payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateDebtRequest {
    pub patient_name: String,
    pub provider: String,
    pub income: f64,
    pub debt_amount: f64,
    pub credit_score: i64,
    #[serde(default = "default_repayment_months")]
    pub repayment_months: i64,
    #[serde(default)]
    pub interest_rate: f64,
    #[serde(default)]
    pub down_payment: f64,
}

impl CreateDebtRequest {
    /// Trim the identity fields and validate the domain invariants.
    pub fn into_input(self) -> Result<DebtInput, ApiError> {
        let input = DebtInput {
            patient_name: self.patient_name.trim().to_string(),
            provider: self.provider.trim().to_string(),
            debt_amount: self.debt_amount,
            income: self.income,
            credit_score: self.credit_score,
            repayment_months: self.repayment_months,
            interest_rate: self.interest_rate,
            down_payment: self.down_payment,
        };
        input
            .validate()
            .map_err(|e| ApiError::validation_failed(&e.to_string()))?;
        Ok(input)
    }
}

/// Body of `PATCH /v1/debts/{id}`: any subset of the create fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateDebtRequest {
    pub patient_name: Option<String>,
    pub provider: Option<String>,
    pub income: Option<f64>,
    pub debt_amount: Option<f64>,
    pub credit_score: Option<i64>,
    pub repayment_months: Option<i64>,
    pub interest_rate: Option<f64>,
    pub down_payment: Option<f64>,
}

impl UpdateDebtRequest {
    pub fn into_changes(self) -> Result<DebtChanges, ApiError> {
        let changes = DebtChanges {
            patient_name: self.patient_name.map(|v| v.trim().to_string()),
            provider: self.provider.map(|v| v.trim().to_string()),
            debt_amount: self.debt_amount,
            income: self.income,
            credit_score: self.credit_score,
            repayment_months: self.repayment_months,
            interest_rate: self.interest_rate,
            down_payment: self.down_payment,
        };
        changes
            .validate()
            .map_err(|e| ApiError::validation_failed(&e.to_string()))?;
        Ok(changes)
    }
}

/// Full record as returned by get/list/update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DebtRecordDto {
    pub id: i64,
    pub patient_name: String,
    pub provider: String,
    pub income: f64,
    pub debt_amount: f64,
    pub credit_score: i64,
    pub repayment_months: i64,
    pub interest_rate: f64,
    pub down_payment: f64,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub recommended_monthly_payment: f64,
    pub total_interest: f64,
    pub amount_after_down_payment: f64,
    pub estimated_payoff_months: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&DebtRecord> for DebtRecordDto {
    fn from(record: &DebtRecord) -> Self {
        Self {
            id: record.id,
            patient_name: record.input.patient_name.clone(),
            provider: record.input.provider.clone(),
            income: record.input.income,
            debt_amount: record.input.debt_amount,
            credit_score: record.input.credit_score,
            repayment_months: record.input.repayment_months,
            interest_rate: record.input.interest_rate,
            down_payment: record.input.down_payment,
            risk_score: record.risk.risk_score,
            risk_level: record.risk.risk_level,
            recommended_monthly_payment: record.risk.recommended_monthly_payment,
            total_interest: record.risk.total_interest,
            amount_after_down_payment: record.risk.amount_after_down_payment,
            estimated_payoff_months: record.risk.estimated_payoff_months,
            created_at: record.created_at.clone(),
            updated_at: record.updated_at.clone(),
        }
    }
}

/// Body of the 201 response to `POST /v1/debts`: the id plus the computed
/// risk and plan fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateDebtResponseDto {
    pub id: i64,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub recommended_monthly_payment: f64,
    pub total_interest: f64,
    pub amount_after_down_payment: f64,
    pub estimated_payoff_months: i64,
}

impl From<&DebtRecord> for CreateDebtResponseDto {
    fn from(record: &DebtRecord) -> Self {
        Self {
            id: record.id,
            risk_score: record.risk.risk_score,
            risk_level: record.risk.risk_level,
            recommended_monthly_payment: record.risk.recommended_monthly_payment,
            total_interest: record.risk.total_interest,
            amount_after_down_payment: record.risk.amount_after_down_payment,
            estimated_payoff_months: record.risk.estimated_payoff_months,
        }
    }
}

/// Body of `GET /v1/debts/{id}/summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DebtSummaryDto {
    pub id: i64,
    pub patient_name: String,
    pub provider: String,
    pub debt_amount: f64,
    pub down_payment: f64,
    pub amount_remaining: f64,
    pub risk_level: RiskLevel,
    pub recommended_monthly_payment: f64,
    pub total_interest: f64,
    pub estimated_payoff_months: i64,
}

/// Paged list response with the total count across all pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListDebtsResponseDto {
    pub items: Vec<DebtRecordDto>,
    pub total: u64,
    pub limit: usize,
    pub offset: usize,
}

/// Body of `POST /v1/checkout/sessions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateCheckoutRequest {
    pub debt_id: i64,
    pub success_url: Option<String>,
    pub cancel_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiErrorCode;

    #[test]
    fn create_request_fills_plan_defaults() {
        let req: CreateDebtRequest = serde_json::from_str(
            r#"{"patient_name":"Jane Doe","provider":"Carle Hospital","income":55000,"debt_amount":12000,"credit_score":640}"#,
        )
        .expect("deserialize");
        assert_eq!(req.repayment_months, 24);
        assert_eq!(req.interest_rate, 0.0);
        assert_eq!(req.down_payment, 0.0);
    }

    #[test]
    fn create_request_trims_identity_fields() {
        let req: CreateDebtRequest = serde_json::from_str(
            r#"{"patient_name":"  Jane Doe ","provider":" Carle ","income":55000,"debt_amount":12000,"credit_score":640}"#,
        )
        .expect("deserialize");
        let input = req.into_input().expect("valid input");
        assert_eq!(input.patient_name, "Jane Doe");
        assert_eq!(input.provider, "Carle");
    }

    #[test]
    fn create_request_rejects_domain_violations() {
        let req: CreateDebtRequest = serde_json::from_str(
            r#"{"patient_name":"Jane","provider":"Carle","income":55000,"debt_amount":10000,"credit_score":640,"down_payment":10000}"#,
        )
        .expect("deserialize");
        let err = req.into_input().expect_err("down payment == debt");
        assert_eq!(err.code, ApiErrorCode::ValidationFailed);
        assert_eq!(err.message, "down payment must be less than debt amount");
    }

    #[test]
    fn create_request_rejects_unknown_fields() {
        let result = serde_json::from_str::<CreateDebtRequest>(
            r#"{"patient_name":"Jane","provider":"Carle","income":55000,"debt_amount":12000,"credit_score":640,"riskScore":1}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn update_request_with_no_fields_is_an_empty_change_set() {
        let req: UpdateDebtRequest = serde_json::from_str("{}").expect("deserialize");
        let changes = req.into_changes().expect("valid changes");
        assert!(changes.is_empty());
        assert!(!changes.touches_financial_fields());
    }

    #[test]
    fn update_request_range_violations_fail_before_merge() {
        let req: UpdateDebtRequest =
            serde_json::from_str(r#"{"credit_score":200}"#).expect("deserialize");
        let err = req.into_changes().expect_err("score below floor");
        assert_eq!(err.code, ApiErrorCode::ValidationFailed);
    }
}
