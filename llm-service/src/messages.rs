//! Wire types for `POST /v1/messages`.
//!
//! Only the subset this service sends and reads is modeled. Unknown content
//! block kinds (tool use, search results, citations) deserialize into
//! [`ContentBlock::Other`] and are skipped by text extraction.

use serde::{Deserialize, Serialize};

use crate::config::llm_model_config::LlmModelConfig;

/// Tool type id of the server-side web search tool.
pub const WEB_SEARCH_TOOL_TYPE: &str = "web_search_20250305";

/// A system + user prompt pair, plus whether the search tool is declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
    pub web_search: bool,
}

/// Request body for `/v1/messages` (non-streaming).
#[derive(Debug, Serialize)]
pub(crate) struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<RequestMessage<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ToolDeclaration>,
}

impl<'a> MessagesRequest<'a> {
    /// Builds a single-turn request from config and prompt.
    pub(crate) fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a ChatPrompt) -> Self {
        let tools = if prompt.web_search {
            vec![ToolDeclaration::web_search(cfg.web_search_max_uses)]
        } else {
            Vec::new()
        };

        Self {
            model: &cfg.model,
            max_tokens: cfg.max_tokens,
            system: &prompt.system,
            messages: vec![RequestMessage {
                role: "user",
                content: &prompt.user,
            }],
            tools,
        }
    }
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Server tool declaration.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDeclaration {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u32>,
}

impl ToolDeclaration {
    pub fn web_search(max_uses: Option<u32>) -> Self {
        Self {
            kind: WEB_SEARCH_TOOL_TYPE,
            name: "web_search",
            max_uses,
        }
    }
}

/// Response body for `/v1/messages`.
///
/// A successful reply carries `content`; a failed one carries `error`.
/// Both fields default so either shape decodes.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub error: Option<ErrorDescriptor>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

impl MessagesResponse {
    /// Convenience constructor for a reply made of text blocks.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            content: texts
                .into_iter()
                .map(|t| ContentBlock::Text { text: t.into() })
                .collect(),
            ..Self::default()
        }
    }
}

/// One typed unit of a response.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Upstream error descriptor: `{"type": "...", "message": "..."}`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ErrorDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cfg() -> LlmModelConfig {
        LlmModelConfig {
            model: "claude-sonnet-4-20250514".into(),
            endpoint: "https://api.anthropic.com".into(),
            api_key: Some("k".into()),
            api_version: "2023-06-01".into(),
            max_tokens: 400,
            timeout_secs: None,
            web_search_max_uses: Some(3),
        }
    }

    #[test]
    fn request_declares_web_search_tool() {
        let cfg = cfg();
        let prompt = ChatPrompt {
            system: "sys".into(),
            user: "hi".into(),
            web_search: true,
        };
        let body = serde_json::to_value(MessagesRequest::from_cfg(&cfg, &prompt)).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "claude-sonnet-4-20250514",
                "max_tokens": 400,
                "system": "sys",
                "messages": [{"role": "user", "content": "hi"}],
                "tools": [{"type": "web_search_20250305", "name": "web_search", "max_uses": 3}]
            })
        );
    }

    #[test]
    fn request_without_search_omits_tools() {
        let cfg = cfg();
        let prompt = ChatPrompt {
            system: "sys".into(),
            user: "hi".into(),
            web_search: false,
        };
        let body = serde_json::to_value(MessagesRequest::from_cfg(&cfg, &prompt)).unwrap();
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn response_keeps_block_order_and_tags_unknown_kinds() {
        let raw = json!({
            "id": "msg_1",
            "type": "message",
            "content": [
                {"type": "text", "text": "Let me look."},
                {
                    "type": "server_tool_use",
                    "id": "t1",
                    "name": "web_search",
                    "input": {"query": "celtics"}
                },
                {"type": "web_search_tool_result", "tool_use_id": "t1", "content": []},
                {"type": "text", "text": "\"Celtics won.\""}
            ],
            "stop_reason": "end_turn"
        });
        let resp: MessagesResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(resp.content.len(), 4);
        assert_eq!(
            resp.content[0],
            ContentBlock::Text {
                text: "Let me look.".into()
            }
        );
        assert_eq!(resp.content[1], ContentBlock::Other);
        assert_eq!(resp.stop_reason.as_deref(), Some("end_turn"));
        assert!(resp.error.is_none());
    }

    #[test]
    fn error_body_decodes() {
        let raw = json!({
            "type": "error",
            "error": {
                "type": "rate_limit_error",
                "message": "Number of requests has exceeded your rate limit"
            }
        });
        let resp: MessagesResponse = serde_json::from_value(raw).unwrap();
        assert!(resp.content.is_empty());
        let err = resp.error.unwrap();
        assert_eq!(err.kind, "rate_limit_error");
    }
}
