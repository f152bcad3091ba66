use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use medipay_api::{
    map_error, params::parse_list_debts_params, ApiError, CreateCheckoutRequest,
    CreateDebtRequest, CreateDebtResponseDto, DebtRecordDto, DebtSummaryDto,
    ListDebtsResponseDto, UpdateDebtRequest,
};
use medipay_engine::{apply_update, compute, project_summary};
use medipay_store::{DebtFilter, StoreError, StoreErrorCode};
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use tracing::{info, warn};

pub(crate) fn api_error_response(err: ApiError) -> Response {
    let status = StatusCode::from_u16(map_error(&err).status_code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({"error": err}))).into_response()
}

fn store_error_response(err: StoreError) -> Response {
    match err.code {
        StoreErrorCode::NotFound => api_error_response(ApiError::new(
            medipay_api::ApiErrorCode::DebtNotFound,
            err.message.clone(),
            json!({}),
        )),
        StoreErrorCode::Validation => api_error_response(ApiError::validation_failed(&err.message)),
        _ => {
            warn!(error = %err, "store failure");
            api_error_response(ApiError::internal("storage unavailable"))
        }
    }
}

pub(crate) async fn healthz_handler() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

pub(crate) async fn openapi_handler() -> impl IntoResponse {
    Json(medipay_api::openapi_v1_spec())
}

pub(crate) async fn create_debt_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateDebtRequest>,
) -> Response {
    let input = match request.into_input() {
        Ok(input) => input,
        Err(err) => return api_error_response(err),
    };
    let risk = match compute(&input) {
        Ok(risk) => risk,
        Err(err) => return api_error_response(ApiError::validation_failed(&err.to_string())),
    };
    match state.store.insert(&input, &risk) {
        Ok(record) => {
            info!(
                id = record.id,
                risk_level = %record.risk.risk_level,
                "debt record created"
            );
            (
                StatusCode::CREATED,
                Json(CreateDebtResponseDto::from(&record)),
            )
                .into_response()
        }
        Err(err) => store_error_response(err),
    }
}

pub(crate) async fn get_debt_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Response {
    match state.store.get(id) {
        Ok(Some(record)) => Json(DebtRecordDto::from(&record)).into_response(),
        Ok(None) => api_error_response(ApiError::debt_not_found(id)),
        Err(err) => store_error_response(err),
    }
}

pub(crate) async fn list_debts_handler(
    State(state): State<AppState>,
    Query(raw): Query<HashMap<String, String>>,
) -> Response {
    let query: BTreeMap<String, String> = raw.into_iter().collect();
    let params = match parse_list_debts_params(&query) {
        Ok(params) => params,
        Err(err) => return api_error_response(err),
    };
    let filter = DebtFilter {
        risk_level: params.risk_level,
        provider: params.provider.clone(),
        patient_name: params.patient_name.clone(),
    };
    match state.store.list(&filter, params.limit, params.offset) {
        Ok(page) => Json(ListDebtsResponseDto {
            items: page.items.iter().map(DebtRecordDto::from).collect(),
            total: page.total,
            limit: params.limit,
            offset: params.offset,
        })
        .into_response(),
        Err(err) => store_error_response(err),
    }
}

pub(crate) async fn update_debt_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateDebtRequest>,
) -> Response {
    let changes = match request.into_changes() {
        Ok(changes) => changes,
        Err(err) => return api_error_response(err),
    };
    match state
        .store
        .update_with(id, |existing| apply_update(existing, &changes))
    {
        Ok(record) => {
            info!(
                id = record.id,
                recomputed = changes.touches_financial_fields(),
                "debt record updated"
            );
            Json(DebtRecordDto::from(&record)).into_response()
        }
        Err(err) => store_error_response(err),
    }
}

pub(crate) async fn delete_debt_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Response {
    match state.store.delete(id) {
        Ok(removed) => {
            if removed {
                info!(id, "debt record deleted");
            }
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => store_error_response(err),
    }
}

pub(crate) async fn debt_summary_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Response {
    let record = match state.store.get(id) {
        Ok(Some(record)) => record,
        Ok(None) => return api_error_response(ApiError::debt_not_found(id)),
        Err(err) => return store_error_response(err),
    };
    let projection = project_summary(&record);
    Json(DebtSummaryDto {
        id: record.id,
        patient_name: record.input.patient_name.clone(),
        provider: record.input.provider.clone(),
        debt_amount: record.input.debt_amount,
        down_payment: record.input.down_payment,
        amount_remaining: projection.amount_remaining,
        risk_level: record.risk.risk_level,
        recommended_monthly_payment: record.risk.recommended_monthly_payment,
        total_interest: record.risk.total_interest,
        estimated_payoff_months: projection.estimated_payoff_months,
    })
    .into_response()
}

pub(crate) async fn create_checkout_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateCheckoutRequest>,
) -> Response {
    if !state.checkout.is_configured() {
        return api_error_response(ApiError::gateway_unconfigured());
    }
    let record = match state.store.get(request.debt_id) {
        Ok(Some(record)) => record,
        Ok(None) => return api_error_response(ApiError::debt_not_found(request.debt_id)),
        Err(err) => return store_error_response(err),
    };
    let amount_cents = crate::checkout::amount_cents(record.risk.recommended_monthly_payment);
    if amount_cents < crate::checkout::GATEWAY_MIN_AMOUNT_CENTS {
        return api_error_response(ApiError::validation_failed(
            "payment amount must be at least $0.50",
        ));
    }
    match state
        .checkout
        .create_session(
            &record,
            amount_cents,
            request.success_url.as_deref(),
            request.cancel_url.as_deref(),
        )
        .await
    {
        Ok(session) => {
            info!(debt_id = record.id, session_id = %session.session_id, "checkout session created");
            Json(json!({"url": session.url, "session_id": session.session_id})).into_response()
        }
        Err(reason) => api_error_response(ApiError::gateway_rejected(&reason)),
    }
}
