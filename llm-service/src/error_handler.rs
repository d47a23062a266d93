//! Unified error handling for `llm-service`.
//!
//! This module exposes a single top-level error type [`AiLlmError`] for the whole
//! library, and groups domain-specific errors in nested enums ([`ConfigError`],
//! [`ProviderError`]). Small helpers for reading/validating environment variables
//! are provided and return the unified [`Result<T>`] alias.
//!
//! All messages include the suffix `[LLM Service]` to simplify attribution in logs.

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Errors reported by (or decoded from) the upstream provider.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Underlying HTTP transport error (connect, reset, timeout).
    #[error("[LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

impl AiLlmError {
    /// Whether a later attempt of the same call may succeed.
    ///
    /// Throttling/overload and transport failures are transient. Everything
    /// else (bad request, auth, decode) will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        match self {
            AiLlmError::Provider(p) => p.is_transient(),
            AiLlmError::HttpTransport(e) => !e.is_builder(),
            AiLlmError::Config(_) => false,
        }
    }

    /// Upstream-provided message, when the failure carries one.
    pub fn upstream_detail(&self) -> Option<&str> {
        match self {
            AiLlmError::Provider(ProviderError::Upstream { message, .. }) => Some(message),
            AiLlmError::Provider(ProviderError::RateLimited { message, .. }) => Some(message),
            _ => None,
        }
    }
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A number failed to parse (limits, timeouts).
    #[error("[LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_MAX_TOKENS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `ANTHROPIC_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// Model name was empty.
    #[error("[LLM Service] model name must not be empty")]
    EmptyModel,
}

/* ------------------------------------------------------------------------- */
/* Provider errors                                                           */
/* ------------------------------------------------------------------------- */

/// Short description of a non-success HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpError {
    /// HTTP status returned by upstream.
    pub status: StatusCode,
    /// Request URL.
    pub url: String,
    /// Trimmed snippet of the response body.
    pub snippet: String,
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {} from {}: {}", self.status, self.url, self.snippet)
    }
}

/// Failures attributed to the upstream Messages API.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API key configured for the client.
    #[error("[LLM Service] missing API key")]
    MissingApiKey,

    /// The endpoint is empty or does not start with http/https.
    #[error("[LLM Service] invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Upstream throttled the call (`429` / `rate_limit_error`).
    #[error("[LLM Service] rate limited: {message}")]
    RateLimited {
        /// Upstream message, if any.
        message: String,
        /// `retry-after` header in seconds when present.
        retry_after_secs: Option<u64>,
    },

    /// Upstream is temporarily overloaded (`529` / `overloaded_error`).
    #[error("[LLM Service] upstream overloaded: {0}")]
    Overloaded(String),

    /// Upstream returned an error descriptor (`{"type":"error","error":{..}}`).
    #[error("[LLM Service] upstream {kind}: {message}")]
    Upstream {
        /// Upstream error type, e.g. `invalid_request_error`.
        kind: String,
        /// Upstream error message.
        message: String,
    },

    /// Non-success status without a decodable error descriptor.
    #[error("[LLM Service] {0}")]
    HttpStatus(HttpError),

    /// Response payload could not be decoded as expected.
    #[error("[LLM Service] decode error: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Throttling and overload are the only transient provider failures.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProviderError::RateLimited { .. } | ProviderError::Overloaded(_)
        )
    }

    /// Maps an upstream error descriptor to a typed error.
    pub fn from_descriptor(kind: &str, message: &str, retry_after_secs: Option<u64>) -> Self {
        match kind {
            "rate_limit_error" => ProviderError::RateLimited {
                message: message.to_string(),
                retry_after_secs,
            },
            "overloaded_error" => ProviderError::Overloaded(message.to_string()),
            _ => ProviderError::Upstream {
                kind: kind.to_string(),
                message: message.to_string(),
            },
        }
    }
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Reads an optional, non-empty environment variable.
pub fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parses an optional `u32` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a valid `u32`.
pub fn env_opt_u32(name: &'static str) -> Result<Option<u32>> {
    match env_opt(name) {
        Some(v) => v.trim().parse::<u32>().map(Some).map_err(|_| {
            AiLlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u32",
            })
        }),
        None => Ok(None),
    }
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a valid `u64`.
pub fn env_opt_u64(name: &'static str) -> Result<Option<u64>> {
    match env_opt(name) {
        Some(v) => v.trim().parse::<u64>().map(Some).map_err(|_| {
            AiLlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            })
        }),
        None => Ok(None),
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers                                                        */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the string does not start with
/// a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Trims a response body to a short single-line snippet for logs and errors.
pub fn make_snippet(body: &str) -> String {
    const MAX: usize = 300;
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.len() <= MAX {
        return flat;
    }
    let mut end = MAX;
    while end > 0 && !flat.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &flat[..end])
}
