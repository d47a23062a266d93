/// Configuration for Messages API invocations.
///
/// # Fields
///
/// - `model`: The model identifier (e.g., `"claude-sonnet-4-20250514"`).
/// - `endpoint`: API base URL (e.g., `"https://api.anthropic.com"`).
/// - `api_key`: Credential sent as `x-api-key`. `None` means the client
///   cannot be built; callers decide how to surface that.
/// - `api_version`: Value of the `anthropic-version` protocol header.
/// - `max_tokens`: Maximum number of tokens to generate.
/// - `timeout_secs`: Optional request timeout in seconds.
/// - `web_search_max_uses`: Optional cap on server-side searches per call.
///
/// # Examples
///
/// ```
/// use llm_service::config::llm_model_config::LlmModelConfig;
///
/// let cfg = LlmModelConfig {
///     model: "claude-sonnet-4-20250514".to_string(),
///     endpoint: "https://api.anthropic.com".to_string(),
///     api_key: Some("sk-ant-...".to_string()),
///     api_version: "2023-06-01".to_string(),
///     max_tokens: 400,
///     timeout_secs: Some(60),
///     web_search_max_uses: None,
/// };
/// assert!(cfg.has_credentials());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmModelConfig {
    /// Model identifier string.
    pub model: String,

    /// API base URL (without the `/v1/messages` suffix).
    pub endpoint: String,

    /// API key for authentication.
    pub api_key: Option<String>,

    /// Protocol version header value.
    pub api_version: String,

    /// Maximum number of tokens to generate.
    pub max_tokens: u32,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,

    /// Optional `max_uses` for the web search tool.
    pub web_search_max_uses: Option<u32>,
}

impl LlmModelConfig {
    /// True when a non-blank API key is configured.
    pub fn has_credentials(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }
}
