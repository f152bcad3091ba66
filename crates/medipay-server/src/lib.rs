#![forbid(unsafe_code)]

mod checkout;
mod http;

pub use checkout::{CheckoutGateway, CheckoutSession, DEFAULT_GATEWAY_BASE_URL};

use axum::routing::{get, post};
use axum::Router;
use medipay_store::DebtStore;
use std::sync::Arc;

pub const CRATE_NAME: &str = "medipay-server";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DebtStore>,
    pub checkout: Arc<CheckoutGateway>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<DebtStore>) -> Self {
        Self::with_gateway(store, CheckoutGateway::unconfigured())
    }

    #[must_use]
    pub fn with_gateway(store: Arc<DebtStore>, checkout: CheckoutGateway) -> Self {
        Self {
            store,
            checkout: Arc::new(checkout),
        }
    }
}

#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/v1/openapi.json", get(http::handlers::openapi_handler))
        .route(
            "/v1/debts",
            post(http::handlers::create_debt_handler).get(http::handlers::list_debts_handler),
        )
        .route(
            "/v1/debts/:id",
            get(http::handlers::get_debt_handler)
                .patch(http::handlers::update_debt_handler)
                .delete(http::handlers::delete_debt_handler),
        )
        .route(
            "/v1/debts/:id/summary",
            get(http::handlers::debt_summary_handler),
        )
        .route(
            "/v1/checkout/sessions",
            post(http::handlers::create_checkout_handler),
        )
        .with_state(state)
}
