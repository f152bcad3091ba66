// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    InvalidQueryParameter,
    ValidationFailed,
    DebtNotFound,
    GatewayUnconfigured,
    GatewayRejected,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
        }
    }

    #[must_use]
    pub fn invalid_param(name: &str, value: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidQueryParameter,
            format!("invalid query parameter: {name}"),
            json!({"parameter": name, "value": value}),
        )
    }

    #[must_use]
    pub fn validation_failed(reason: &str) -> Self {
        Self::new(
            ApiErrorCode::ValidationFailed,
            reason,
            json!({"reason": reason}),
        )
    }

    #[must_use]
    pub fn debt_not_found(id: i64) -> Self {
        Self::new(
            ApiErrorCode::DebtNotFound,
            "debt not found",
            json!({"id": id}),
        )
    }

    #[must_use]
    pub fn gateway_unconfigured() -> Self {
        Self::new(
            ApiErrorCode::GatewayUnconfigured,
            "checkout gateway is not configured; set the gateway secret key",
            json!({}),
        )
    }

    #[must_use]
    pub fn gateway_rejected(reason: &str) -> Self {
        Self::new(
            ApiErrorCode::GatewayRejected,
            "checkout gateway rejected the session",
            json!({"reason": reason}),
        )
    }

    #[must_use]
    pub fn internal(message: &str) -> Self {
        Self::new(ApiErrorCode::Internal, message, json!({}))
    }
}

const _: fn() = || {
    fn assert_traits<T: Serialize + for<'de> Deserialize<'de>>() {}
    assert_traits::<ApiError>();
};
