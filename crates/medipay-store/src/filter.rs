// SPDX-License-Identifier: Apache-2.0

use medipay_model::RiskLevel;
use rusqlite::types::Value;

/// Optional list filters: risk level is an exact match, the text filters are
/// case-insensitive substring matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebtFilter {
    pub risk_level: Option<RiskLevel>,
    pub provider: Option<String>,
    pub patient_name: Option<String>,
}

impl DebtFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.risk_level.is_none() && self.provider.is_none() && self.patient_name.is_none()
    }
}

#[must_use]
pub fn escape_like_fragment(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        match c {
            '!' | '%' | '_' => {
                out.push('!');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Build the WHERE clause and positional params shared by the list query and
/// its COUNT twin. SQLite LIKE is case-insensitive for ASCII, matching the
/// contract's case-insensitive substring filters.
#[must_use]
pub fn build_where(filter: &DebtFilter) -> (String, Vec<Value>) {
    let mut where_parts: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    if let Some(level) = filter.risk_level {
        where_parts.push("risk_level = ?".to_string());
        params.push(Value::Text(level.as_str().to_string()));
    }
    if let Some(provider) = &filter.provider {
        where_parts.push("provider LIKE ? ESCAPE '!'".to_string());
        params.push(Value::Text(format!("%{}%", escape_like_fragment(provider))));
    }
    if let Some(patient) = &filter.patient_name {
        where_parts.push("patient_name LIKE ? ESCAPE '!'".to_string());
        params.push(Value::Text(format!("%{}%", escape_like_fragment(patient))));
    }

    let clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    (clause, params)
}
