// SPDX-License-Identifier: Apache-2.0

use crate::ApiError;
use medipay_model::RiskLevel;
use std::collections::BTreeMap;

pub const LIST_LIMIT_DEFAULT: usize = 20;
pub const LIST_LIMIT_MAX: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDebtsParams {
    pub risk_level: Option<RiskLevel>,
    pub provider: Option<String>,
    pub patient_name: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

pub fn parse_list_debts_params(
    query: &BTreeMap<String, String>,
) -> Result<ListDebtsParams, ApiError> {
    parse_list_debts_params_with_limit(query, LIST_LIMIT_DEFAULT, LIST_LIMIT_MAX)
}

pub fn parse_list_debts_params_with_limit(
    query: &BTreeMap<String, String>,
    default_limit: usize,
    max_limit: usize,
) -> Result<ListDebtsParams, ApiError> {
    let risk_level = if let Some(raw) = query.get("risk_level") {
        Some(RiskLevel::parse(raw).ok_or_else(|| ApiError::invalid_param("risk_level", raw))?)
    } else {
        None
    };

    let limit = if let Some(raw) = query.get("limit") {
        let value = raw
            .parse::<usize>()
            .map_err(|_| ApiError::invalid_param("limit", raw))?;
        if value == 0 || value > max_limit {
            return Err(ApiError::invalid_param("limit", raw));
        }
        value
    } else {
        default_limit
    };

    let offset = if let Some(raw) = query.get("offset") {
        raw.parse::<usize>()
            .map_err(|_| ApiError::invalid_param("offset", raw))?
    } else {
        0
    };

    Ok(ListDebtsParams {
        risk_level,
        provider: query.get("provider").cloned().filter(|v| !v.is_empty()),
        patient_name: query
            .get("patient_name")
            .cloned()
            .filter(|v| !v.is_empty()),
        limit,
        offset,
    })
}
