//! The seam between callers and the Messages API client.

use std::future::Future;

use crate::{
    error_handler::AiLlmError,
    messages::{ChatPrompt, MessagesResponse},
};

/// Anything that can answer a single-turn [`ChatPrompt`].
///
/// Implemented by [`crate::services::anthropic_service::AnthropicService`];
/// tests provide scripted fakes.
pub trait MessagesBackend: Send + Sync {
    /// Sends one request and returns the raw structured response.
    fn create_message(
        &self,
        prompt: &ChatPrompt,
    ) -> impl Future<Output = Result<MessagesResponse, AiLlmError>> + Send;
}
