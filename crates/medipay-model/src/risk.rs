// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Risk score at or above this boundary classifies as Medium.
pub const MEDIUM_FLOOR: f64 = 0.2;
/// Risk score at or above this boundary classifies as High.
pub const HIGH_FLOOR: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classification is total over the score range: `< 0.2` Low,
    /// `[0.2, 0.5)` Medium, `>= 0.5` High.
    #[must_use]
    pub fn for_score(score: f64) -> Self {
        if score < MEDIUM_FLOOR {
            Self::Low
        } else if score < HIGH_FLOOR {
            Self::Medium
        } else {
            Self::High
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            _ => None,
        }
    }
}

impl Display for RiskLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable output of one risk calculation. All monetary fields are rounded
/// to 2 decimal places, the score to 4.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiskResult {
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub recommended_monthly_payment: f64,
    pub total_interest: f64,
    pub amount_after_down_payment: f64,
    pub estimated_payoff_months: i64,
}
