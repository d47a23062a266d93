use std::{env, sync::Arc};

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

use axum::{Router, routing::post};
use llm_service::MessagesBackend;
use tokio::signal;
use tracing::{error, info};

pub use crate::core::app_state::AppState;
pub use crate::error_handler::{AppError, AppResult};

use crate::{
    middleware_layer::cors::with_cors_headers,
    routes::generate::generate_take_route::{generate_take, method_not_allowed, preflight},
};

/// Listen address used when `API_ADDRESS` is not set.
pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:3000";

/// Builds the HTTP surface around an already-loaded state.
pub fn router<B>(state: AppState<B>) -> Router
where
    B: MessagesBackend + 'static,
{
    let app = Router::new().route(
        "/api/generate",
        post(generate_take::<B>)
            .options(preflight)
            .fallback(method_not_allowed),
    );

    with_cors_headers(app).with_state(Arc::new(state))
}

pub async fn start() -> Result<(), AppError> {
    let host_url = env::var("API_ADDRESS")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_ADDRESS.to_string());

    let state = AppState::from_env()?;
    let app = router(state);

    // Bind to address
    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %host_url, "bar-talk api listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("bar-talk api stopped");
    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        // Without a signal handler the server runs until killed.
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
