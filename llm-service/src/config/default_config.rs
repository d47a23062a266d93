//! Default Messages API config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `CLAUDE_API_KEY`      = API key (optional here; absence is reported per request)
//! - `ANTHROPIC_URL`       = API base URL (default `https://api.anthropic.com`)
//! - `ANTHROPIC_MODEL`     = model id (default `claude-sonnet-4-20250514`)
//! - `ANTHROPIC_VERSION`   = protocol version header (default `2023-06-01`)
//! - `LLM_MAX_TOKENS`      = max tokens, u32 (default `400`)
//! - `LLM_TIMEOUT_SECS`    = request timeout, u64 (default `60`)
//! - `WEB_SEARCH_MAX_USES` = optional cap on searches per call, u32

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{
        AiLlmError, ConfigError, env_opt, env_opt_u32, env_opt_u64, validate_http_endpoint,
    },
};

pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_API_VERSION: &str = "2023-06-01";
pub const DEFAULT_MAX_TOKENS: u32 = 400;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Constructs the Messages API config from environment.
///
/// The API key is read but not required: the server still starts without it
/// and reports a configuration error on each request instead.
///
/// # Errors
///
/// - [`ConfigError::InvalidFormat`] if `ANTHROPIC_URL` is not http(s)
/// - [`ConfigError::InvalidNumber`] if a numeric variable does not parse
pub fn config_anthropic() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = env_opt("ANTHROPIC_URL").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    validate_http_endpoint("ANTHROPIC_URL", endpoint.trim())?;

    let model = env_opt("ANTHROPIC_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let api_version =
        env_opt("ANTHROPIC_VERSION").unwrap_or_else(|| DEFAULT_API_VERSION.to_string());
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_TOKENS);
    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);
    let web_search_max_uses = env_opt_u32("WEB_SEARCH_MAX_USES")?;

    let cfg = LlmModelConfig {
        model: model.trim().to_string(),
        endpoint: endpoint.trim().to_string(),
        api_key: env_opt("CLAUDE_API_KEY").map(|k| k.trim().to_string()),
        api_version,
        max_tokens,
        timeout_secs: Some(timeout_secs),
        web_search_max_uses,
    };
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Checks a hand-built config for obvious mistakes.
///
/// # Errors
/// [`ConfigError::EmptyModel`] or [`ConfigError::InvalidFormat`].
pub fn validate_config(cfg: &LlmModelConfig) -> Result<(), AiLlmError> {
    if cfg.model.trim().is_empty() {
        return Err(ConfigError::EmptyModel.into());
    }
    validate_http_endpoint("ANTHROPIC_URL", cfg.endpoint.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LlmModelConfig {
        LlmModelConfig {
            model: DEFAULT_MODEL.into(),
            endpoint: DEFAULT_ENDPOINT.into(),
            api_key: None,
            api_version: DEFAULT_API_VERSION.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: None,
            web_search_max_uses: None,
        }
    }

    #[test]
    fn blank_model_is_rejected() {
        let cfg = LlmModelConfig {
            model: "  ".into(),
            ..sample()
        };
        assert!(matches!(
            validate_config(&cfg),
            Err(AiLlmError::Config(ConfigError::EmptyModel))
        ));
    }

    #[test]
    fn non_http_endpoint_is_rejected() {
        let cfg = LlmModelConfig {
            endpoint: "ftp://example.com".into(),
            ..sample()
        };
        assert!(validate_config(&cfg).is_err());
        assert!(validate_config(&sample()).is_ok());
    }

    #[test]
    fn blank_key_is_not_a_credential() {
        let cfg = LlmModelConfig {
            api_key: Some("   ".into()),
            ..sample()
        };
        assert!(!cfg.has_credentials());
        assert!(!sample().has_credentials());
    }
}
