use llm_service::{ContentBlock, MessagesResponse};

/// Concatenates the text of every `text` block, in order.
///
/// Returns `None` when there is no text block or the joined text is blank.
pub fn collect_text(response: &MessagesResponse) -> Option<String> {
    let joined: String = response
        .content
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Other => None,
        })
        .collect();

    if joined.trim().is_empty() {
        None
    } else {
        Some(joined)
    }
}
