use llm_service::{
    AiLlmError, config::default_config::config_anthropic,
    services::anthropic_service::AnthropicService,
};
use take_engine::{TakeGenerator, cfg::retry_policy_from_env};
use tracing::{error, info};

/// Shared state for all HTTP handlers.
///
/// `generator` is `None` when the upstream credential is not configured; the
/// server still answers, and take requests fail with a configuration error.
pub struct AppState<B> {
    pub generator: Option<TakeGenerator<B>>,
}

impl<B> AppState<B> {
    pub fn new(generator: TakeGenerator<B>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// State without credentials.
    pub fn unconfigured() -> Self {
        Self { generator: None }
    }
}

impl AppState<AnthropicService> {
    /// Load shared state from environment variables.
    ///
    /// # Errors
    /// Invalid (as opposed to missing) configuration, including retry knobs, or a
    /// client that cannot be built.
    pub fn from_env() -> Result<Self, AiLlmError> {
        let cfg = config_anthropic()?;
        let policy = retry_policy_from_env()?;

        if !cfg.has_credentials() {
            error!("CLAUDE_API_KEY is not set; take requests will fail until it is configured");
            return Ok(Self::unconfigured());
        }

        info!(
            model = %cfg.model,
            max_attempts = policy.max_attempts,
            base_delay_ms = policy.base_delay.as_millis() as u64,
            "take generator configured"
        );

        let service = AnthropicService::new(cfg)?;
        Ok(Self::new(TakeGenerator::new(service, policy)))
    }
}
