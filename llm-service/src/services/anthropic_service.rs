//! Anthropic Messages API service.
//!
//! Minimal, non-streaming client around `POST {endpoint}/v1/messages`.
//!
//! Constructor validation:
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//!
//! Errors are normalized via unified error types in `error_handler`.

use std::time::{Duration, Instant};

use reqwest::header;
use tracing::{debug, error, info};

use crate::{
    backend::MessagesBackend,
    config::llm_model_config::LlmModelConfig,
    error_handler::{AiLlmError, HttpError, ProviderError, make_snippet},
    messages::{ChatPrompt, MessagesRequest, MessagesResponse},
};

/// Thin client for the Messages API.
///
/// Keeps a preconfigured `reqwest::Client` (timeout and auth/version headers
/// baked in), so one instance is shared across requests.
#[derive(Debug)]
pub struct AnthropicService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_messages: String,
}

impl AnthropicService {
    /// Creates a new [`AnthropicService`] from the given config.
    ///
    /// # Errors
    /// - [`ProviderError::MissingApiKey`] if `cfg.api_key` is `None` or blank
    /// - [`ProviderError::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        // 1) API key must be present.
        let api_key = cfg
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ProviderError::MissingApiKey)?;

        // 2) Endpoint must use http/https.
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::InvalidEndpoint(cfg.endpoint.clone()).into());
        }

        // 3) HTTP client: timeout + default headers.
        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-api-key",
            header::HeaderValue::from_str(api_key).map_err(|e| {
                ProviderError::Decode(format!("invalid API key header: {e}"))
            })?,
        );
        headers.insert(
            "anthropic-version",
            header::HeaderValue::from_str(&cfg.api_version).map_err(|e| {
                ProviderError::Decode(format!("invalid version header: {e}"))
            })?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_messages = format!("{}/v1/messages", base);

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            api_version = %cfg.api_version,
            timeout_secs = timeout.as_secs(),
            "AnthropicService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_messages,
        })
    }

    /// Performs a **non-streaming** `/v1/messages` request.
    ///
    /// # Errors
    /// - [`ProviderError::RateLimited`] / [`ProviderError::Overloaded`] for throttling
    /// - [`ProviderError::Upstream`] when the body carries an error descriptor
    /// - [`ProviderError::HttpStatus`] for other non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - [`ProviderError::Decode`] if the JSON cannot be parsed
    pub async fn messages(&self, prompt: &ChatPrompt) -> Result<MessagesResponse, AiLlmError> {
        let started = Instant::now();
        let body = MessagesRequest::from_cfg(&self.cfg, prompt);

        debug!(
            model = %self.cfg.model,
            system_len = prompt.system.len(),
            prompt_len = prompt.user.len(),
            web_search = prompt.web_search,
            "POST {}", self.url_messages
        );

        let resp = self
            .client
            .post(&self.url_messages)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let retry_after_secs = resp
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let text = resp.text().await?;

        if !status.is_success() {
            let snippet = make_snippet(&text);
            error!(
                %status,
                url = %self.url_messages,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "/v1/messages returned non-success status"
            );
            return Err(classify_failure(
                status,
                &self.url_messages,
                &text,
                retry_after_secs,
            )
            .into());
        }

        let out = parse_success_body(&text, retry_after_secs).map_err(|e| {
            error!(
                error = %e,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "/v1/messages 2xx body could not be used"
            );
            e
        })?;

        info!(
            model = %self.cfg.model,
            blocks = out.content.len(),
            stop_reason = out.stop_reason.as_deref().unwrap_or("-"),
            latency_ms = started.elapsed().as_millis(),
            "messages call completed"
        );

        Ok(out)
    }
}

impl MessagesBackend for AnthropicService {
    async fn create_message(&self, prompt: &ChatPrompt) -> Result<MessagesResponse, AiLlmError> {
        self.messages(prompt).await
    }
}

/// Decodes a 2xx body. An error descriptor in the body still counts as a failure.
fn parse_success_body(
    body: &str,
    retry_after_secs: Option<u64>,
) -> Result<MessagesResponse, ProviderError> {
    let out: MessagesResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::Decode(format!("serde error: {e}; expected `content[]`")))?;

    match &out.error {
        Some(desc) => Err(ProviderError::from_descriptor(
            &desc.kind,
            &desc.message,
            retry_after_secs,
        )),
        None => Ok(out),
    }
}

/// Maps a non-2xx reply to a typed error.
///
/// The error descriptor in the body wins when present; otherwise the status
/// alone decides (`429` → rate limited, `529` → overloaded).
fn classify_failure(
    status: reqwest::StatusCode,
    url: &str,
    body: &str,
    retry_after_secs: Option<u64>,
) -> ProviderError {
    if let Ok(MessagesResponse {
        error: Some(desc), ..
    }) = serde_json::from_str::<MessagesResponse>(body)
    {
        return ProviderError::from_descriptor(&desc.kind, &desc.message, retry_after_secs);
    }

    match status.as_u16() {
        429 => ProviderError::RateLimited {
            message: make_snippet(body),
            retry_after_secs,
        },
        529 => ProviderError::Overloaded(make_snippet(body)),
        _ => ProviderError::HttpStatus(HttpError {
            status,
            url: url.to_string(),
            snippet: make_snippet(body),
        }),
    }
}
