//! POST /api/generate: one bar-talk take for a (sport, location) pair.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Local;
use llm_service::MessagesBackend;
use take_engine::{GenerationResult, TakeRequest};
use tracing::{debug, error, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
};

/// Handler: POST /api/generate
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:3000/api/generate \
///   -H 'content-type: application/json' \
///   -d '{"sport":"basketball","location":"Boston"}'
/// ```
#[instrument(name = "generate_take_route", skip_all)]
pub async fn generate_take<B: MessagesBackend + 'static>(
    State(state): State<Arc<AppState<B>>>,
    payload: Result<Json<TakeRequest>, JsonRejection>,
) -> AppResult<Json<GenerationResult>> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(%rejection, "rejected take request body");
        AppError::from(rejection)
    })?;

    let Some(generator) = state.generator.as_ref() else {
        error!("take requested but upstream credential is not configured");
        return Err(AppError::ServerConfig);
    };

    let today = Local::now().date_naive();
    let result = generator.generate(&request, today).await.map_err(|e| {
        error!(error = %e, "take generation failed");
        AppError::from(e)
    })?;

    Ok(Json(result))
}

/// Handler: OPTIONS /api/generate (CORS preflight).
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any other method on /api/generate.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
