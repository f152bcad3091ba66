// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const NAME_MAX_LEN: usize = 255;
pub const CREDIT_SCORE_MIN: i64 = 300;
pub const CREDIT_SCORE_MAX: i64 = 850;
pub const REPAYMENT_MONTHS_MIN: i64 = 1;
pub const REPAYMENT_MONTHS_MAX: i64 = 120;
pub const REPAYMENT_MONTHS_DEFAULT: i64 = 24;
pub const INTEREST_RATE_MAX: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ValidationError {
    Empty(&'static str),
    TooLong(&'static str, usize),
    NotPositive(&'static str),
    Negative(&'static str),
    CreditScoreRange(i64),
    RepaymentMonthsRange(i64),
    InterestRateRange(f64),
    DownPaymentNotBelowDebt,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
            Self::NotPositive(name) => write!(f, "{name} must be greater than 0"),
            Self::Negative(name) => write!(f, "{name} must not be negative"),
            Self::CreditScoreRange(got) => write!(
                f,
                "credit_score must be in [{CREDIT_SCORE_MIN}, {CREDIT_SCORE_MAX}], got {got}"
            ),
            Self::RepaymentMonthsRange(got) => write!(
                f,
                "repayment_months must be in [{REPAYMENT_MONTHS_MIN}, {REPAYMENT_MONTHS_MAX}], got {got}"
            ),
            Self::InterestRateRange(got) => {
                write!(f, "interest_rate must be in [0, {INTEREST_RATE_MAX}], got {got}")
            }
            Self::DownPaymentNotBelowDebt => {
                f.write_str("down payment must be less than debt amount")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// The five financial inputs to a risk calculation plus identity text fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DebtInput {
    pub patient_name: String,
    pub provider: String,
    pub debt_amount: f64,
    pub income: f64,
    pub credit_score: i64,
    pub repayment_months: i64,
    pub interest_rate: f64,
    pub down_payment: f64,
}

impl DebtInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name("patient_name", &self.patient_name)?;
        validate_name("provider", &self.provider)?;
        if self.debt_amount <= 0.0 {
            return Err(ValidationError::NotPositive("debt_amount"));
        }
        if self.income <= 0.0 {
            return Err(ValidationError::NotPositive("income"));
        }
        if !(CREDIT_SCORE_MIN..=CREDIT_SCORE_MAX).contains(&self.credit_score) {
            return Err(ValidationError::CreditScoreRange(self.credit_score));
        }
        if !(REPAYMENT_MONTHS_MIN..=REPAYMENT_MONTHS_MAX).contains(&self.repayment_months) {
            return Err(ValidationError::RepaymentMonthsRange(self.repayment_months));
        }
        if !(0.0..=INTEREST_RATE_MAX).contains(&self.interest_rate) {
            return Err(ValidationError::InterestRateRange(self.interest_rate));
        }
        if self.down_payment < 0.0 {
            return Err(ValidationError::Negative("down_payment"));
        }
        if self.down_payment >= self.debt_amount {
            return Err(ValidationError::DownPaymentNotBelowDebt);
        }
        Ok(())
    }
}

/// Partial update to a debt record. Absent fields retain the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DebtChanges {
    pub patient_name: Option<String>,
    pub provider: Option<String>,
    pub debt_amount: Option<f64>,
    pub income: Option<f64>,
    pub credit_score: Option<i64>,
    pub repayment_months: Option<i64>,
    pub interest_rate: Option<f64>,
    pub down_payment: Option<f64>,
}

impl DebtChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.touches_financial_fields() && self.patient_name.is_none() && self.provider.is_none()
    }

    /// True when the change set intersects the recompute trigger set
    /// (income, debt_amount, credit_score, interest_rate, down_payment,
    /// repayment_months).
    #[must_use]
    pub fn touches_financial_fields(&self) -> bool {
        self.debt_amount.is_some()
            || self.income.is_some()
            || self.credit_score.is_some()
            || self.repayment_months.is_some()
            || self.interest_rate.is_some()
            || self.down_payment.is_some()
    }

    /// Per-field range checks on the fields that are present. Cross-field
    /// invariants (down payment vs. debt amount) are checked after the merge.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.patient_name {
            validate_name("patient_name", name)?;
        }
        if let Some(name) = &self.provider {
            validate_name("provider", name)?;
        }
        if let Some(amount) = self.debt_amount {
            if amount <= 0.0 {
                return Err(ValidationError::NotPositive("debt_amount"));
            }
        }
        if let Some(income) = self.income {
            if income <= 0.0 {
                return Err(ValidationError::NotPositive("income"));
            }
        }
        if let Some(score) = self.credit_score {
            if !(CREDIT_SCORE_MIN..=CREDIT_SCORE_MAX).contains(&score) {
                return Err(ValidationError::CreditScoreRange(score));
            }
        }
        if let Some(months) = self.repayment_months {
            if !(REPAYMENT_MONTHS_MIN..=REPAYMENT_MONTHS_MAX).contains(&months) {
                return Err(ValidationError::RepaymentMonthsRange(months));
            }
        }
        if let Some(rate) = self.interest_rate {
            if !(0.0..=INTEREST_RATE_MAX).contains(&rate) {
                return Err(ValidationError::InterestRateRange(rate));
            }
        }
        if let Some(down) = self.down_payment {
            if down < 0.0 {
                return Err(ValidationError::Negative("down_payment"));
            }
        }
        Ok(())
    }
}

fn validate_name(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field));
    }
    if value.len() > NAME_MAX_LEN {
        return Err(ValidationError::TooLong(field, NAME_MAX_LEN));
    }
    Ok(())
}
