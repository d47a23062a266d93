//! Runtime knobs loaded from environment variables.

use std::time::Duration;

use llm_service::{
    AiLlmError,
    error_handler::{env_opt_u32, env_opt_u64},
};

use crate::retry::RetryPolicy;

/// Retry policy from `TAKE_RETRY_ATTEMPTS` / `TAKE_RETRY_BASE_MS`.
///
/// Unset values fall back to 3 attempts and a 2000ms base.
///
/// # Errors
/// [`llm_service::ConfigError::InvalidNumber`] if either variable is set but
/// does not parse.
pub fn retry_policy_from_env() -> Result<RetryPolicy, AiLlmError> {
    let dflt = RetryPolicy::default();
    Ok(RetryPolicy {
        max_attempts: env_opt_u32("TAKE_RETRY_ATTEMPTS")?.unwrap_or(dflt.max_attempts),
        base_delay: env_opt_u64("TAKE_RETRY_BASE_MS")?
            .map(Duration::from_millis)
            .unwrap_or(dflt.base_delay),
    })
}
