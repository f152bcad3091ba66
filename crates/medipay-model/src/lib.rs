// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub mod debt;
pub mod record;
pub mod risk;

pub use debt::{
    DebtChanges, DebtInput, ValidationError, CREDIT_SCORE_MAX, CREDIT_SCORE_MIN,
    INTEREST_RATE_MAX, NAME_MAX_LEN, REPAYMENT_MONTHS_DEFAULT, REPAYMENT_MONTHS_MAX,
    REPAYMENT_MONTHS_MIN,
};
pub use record::DebtRecord;
pub use risk::{RiskLevel, RiskResult};

pub const CRATE_NAME: &str = "medipay-model";
