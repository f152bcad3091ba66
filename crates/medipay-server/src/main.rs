#![forbid(unsafe_code)]

use medipay_server::{build_router, AppState, CheckoutGateway};
use medipay_store::DebtStore;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("MEDIPAY_LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr = env::var("MEDIPAY_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let db_path = PathBuf::from(
        env::var("MEDIPAY_DB_PATH").unwrap_or_else(|_| "medical_debt.sqlite".to_string()),
    );

    let store = DebtStore::open(&db_path)
        .map_err(|e| format!("failed to open store at {}: {e}", db_path.display()))?;

    let gateway = CheckoutGateway::new(
        env::var("MEDIPAY_GATEWAY_SECRET_KEY").ok(),
        env::var("MEDIPAY_GATEWAY_BASE_URL")
            .unwrap_or_else(|_| medipay_server::DEFAULT_GATEWAY_BASE_URL.to_string()),
    );
    if !gateway.is_configured() {
        info!("checkout gateway key not set; /v1/checkout/sessions will return 503");
    }

    let state = AppState::with_gateway(Arc::new(store), gateway);
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind failed on {bind_addr}: {e}"))?;
    info!("medipay-server listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))
}
