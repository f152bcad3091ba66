// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub mod dto;
pub mod error_mapping;
pub mod errors;
pub mod openapi;
pub mod params;

pub use dto::{
    CreateCheckoutRequest, CreateDebtRequest, CreateDebtResponseDto, DebtRecordDto,
    DebtSummaryDto, ListDebtsResponseDto, UpdateDebtRequest,
};
pub use error_mapping::{map_error, ApiErrorMapping};
pub use errors::{ApiError, ApiErrorCode};
pub use openapi::openapi_v1_spec;

pub const CRATE_NAME: &str = "medipay-api";
pub const API_VERSION: &str = "v1";
