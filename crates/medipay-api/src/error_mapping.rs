// SPDX-License-Identifier: Apache-2.0

use crate::{ApiError, ApiErrorCode};

pub const API_ERROR_SCHEMA_REF: &str = "#/components/schemas/ApiError";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiErrorMapping {
    pub status_code: u16,
    pub schema_ref: &'static str,
}

#[must_use]
pub fn map_error(error: &ApiError) -> ApiErrorMapping {
    let status_code = match error.code {
        ApiErrorCode::InvalidQueryParameter
        | ApiErrorCode::ValidationFailed
        | ApiErrorCode::GatewayRejected => 400,
        ApiErrorCode::DebtNotFound => 404,
        ApiErrorCode::GatewayUnconfigured => 503,
        _ => 500,
    };

    ApiErrorMapping {
        status_code,
        schema_ref: API_ERROR_SCHEMA_REF,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_400_family() {
        assert_eq!(map_error(&ApiError::invalid_param("limit", "0")).status_code, 400);
        assert_eq!(
            map_error(&ApiError::validation_failed("income must be greater than 0")).status_code,
            400
        );
        assert_eq!(map_error(&ApiError::debt_not_found(1)).status_code, 404);
    }

    #[test]
    fn gateway_and_internal_errors_map_to_server_family() {
        assert_eq!(map_error(&ApiError::gateway_unconfigured()).status_code, 503);
        assert_eq!(map_error(&ApiError::gateway_rejected("bad key")).status_code, 400);
        assert_eq!(map_error(&ApiError::internal("boom")).status_code, 500);
    }
}
