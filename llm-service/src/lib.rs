//! Messages API client used by the take generator.
//!
//! - [`services::anthropic_service::AnthropicService`]: non-streaming `/v1/messages` client
//! - [`backend::MessagesBackend`]: the trait callers depend on
//! - [`config`]: model config and env loading
//! - [`error_handler`]: unified errors, retryability classification
//! - [`telemetry`]: library-scoped tracing layer

pub mod backend;
pub mod config;
pub mod error_handler;
pub mod messages;
pub mod services;
pub mod telemetry;

pub use backend::MessagesBackend;
pub use error_handler::{AiLlmError, ConfigError, ProviderError};
pub use messages::{ChatPrompt, ContentBlock, ErrorDescriptor, MessagesResponse};
