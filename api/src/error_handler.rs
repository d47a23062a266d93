use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use llm_service::AiLlmError;
use serde::Serialize;
use take_engine::TakeError;
use thiserror::Error;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] AiLlmError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("Missing sport or location")]
    MissingInput,

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Credential absent at request time. Details stay in the server log.
    #[error("Server configuration error")]
    ServerConfig,

    // --- Upstream ---
    #[error("Failed to generate take")]
    Upstream { detail: Option<String> },

    #[error("No content generated")]
    NoContent,
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::MissingInput => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,

            // 5xx
            AppError::Config(_)
            | AppError::Bind(_)
            | AppError::Server(_)
            | AppError::ServerConfig
            | AppError::Upstream { .. }
            | AppError::NoContent => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Caller-facing message. Upstream detail is appended when known.
    fn public_message(&self) -> String {
        match self {
            AppError::Upstream {
                detail: Some(detail),
            } => format!("{self}: {detail}"),
            AppError::Config(_) => AppError::ServerConfig.to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Any malformed body is reported the same way as missing fields.
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(_: axum::extract::rejection::JsonRejection) -> Self {
        AppError::MissingInput
    }
}

impl From<TakeError> for AppError {
    fn from(err: TakeError) -> Self {
        match err {
            TakeError::MissingInput => AppError::MissingInput,
            TakeError::EmptyContent => AppError::NoContent,
            TakeError::Upstream(e) => {
                let detail = e
                    .upstream_detail()
                    .map(str::to_string)
                    .or_else(|| match &e {
                        AiLlmError::HttpTransport(t) => Some(t.to_string()),
                        _ => None,
                    });
                AppError::Upstream { detail }
            }
        }
    }
}
