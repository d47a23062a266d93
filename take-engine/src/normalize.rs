//! Quote normalizer: forces free model text into the shape `"<take>"`.
//!
//! The model is told to answer with a single quoted take, but free-text
//! generation drifts: it narrates its search, adds a "Here's a take:" lead-in,
//! or trails off with meta commentary. [`PIPELINE`] is a fixed, ordered list
//! of small named steps that repair the common cases. It is a heuristic, not a
//! parser: multiple quoted spans or quotes embedded mid-sentence are not
//! disambiguated.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

const QUOTE: char = '"';

lazy_static! {
    /// Conversational lead-in up through the first quotation mark.
    static ref QUOTED_PREAMBLE: Regex = Regex::new(
        r#"(?i)^(?:here[’']s|here is|let me|i[’']ll|i will|searching|looking|sure|okay|alright|based on)[^"]*""#
    )
    .expect("valid quoted preamble regex");

    /// Search narration or "Here's" lead-in, up to and including the first
    /// sentence terminator. Openers like "Looking at" or "Based on" are content.
    static ref UNQUOTED_PREAMBLE: Regex = Regex::new(
        r#"(?i)^(?:let me search|i[’']ll search|here[’']s|here is|searching)[^.!?:]*[.!?:]\s*"#
    )
    .expect("valid unquoted preamble regex");
}

/// One named cleanup transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeStep {
    /// Trim surrounding whitespace.
    Trim,
    /// Replace typographic double quotes with `"`.
    StraightenQuotes,
    /// Drop a lead-in such as `Let me search...` up to the first `"`.
    StripQuotedPreamble,
    /// No `"` anywhere: drop a known lead-in sentence and wrap the rest.
    WrapUnquoted,
    /// Prepend `"` if missing.
    EnsureLeadingQuote,
    /// End at the last `"`, or append one if there is none after the first char.
    EnsureTrailingQuote,
}

/// The pipeline applied to every upstream reply, in order.
pub const PIPELINE: [NormalizeStep; 6] = [
    NormalizeStep::Trim,
    NormalizeStep::StraightenQuotes,
    NormalizeStep::StripQuotedPreamble,
    NormalizeStep::WrapUnquoted,
    NormalizeStep::EnsureLeadingQuote,
    NormalizeStep::EnsureTrailingQuote,
];

impl NormalizeStep {
    pub fn name(self) -> &'static str {
        match self {
            NormalizeStep::Trim => "trim",
            NormalizeStep::StraightenQuotes => "straighten_quotes",
            NormalizeStep::StripQuotedPreamble => "strip_quoted_preamble",
            NormalizeStep::WrapUnquoted => "wrap_unquoted",
            NormalizeStep::EnsureLeadingQuote => "ensure_leading_quote",
            NormalizeStep::EnsureTrailingQuote => "ensure_trailing_quote",
        }
    }

    pub fn apply(self, text: &str) -> String {
        match self {
            NormalizeStep::Trim => text.trim().to_string(),
            NormalizeStep::StraightenQuotes => straighten_quotes(text),
            NormalizeStep::StripQuotedPreamble => {
                QUOTED_PREAMBLE.replace(text, "\"").into_owned()
            }
            NormalizeStep::WrapUnquoted => wrap_unquoted(text),
            NormalizeStep::EnsureLeadingQuote => {
                if text.starts_with(QUOTE) {
                    text.to_string()
                } else {
                    format!("{QUOTE}{text}")
                }
            }
            NormalizeStep::EnsureTrailingQuote => ensure_trailing_quote(text),
        }
    }
}

/// Runs the full [`PIPELINE`] over `raw`.
///
/// # Example
/// ```
/// use take_engine::normalize::normalize_quote;
///
/// let out = normalize_quote(r#"Let me search for that. "Celtics looked rough last night.""#);
/// assert_eq!(out, r#""Celtics looked rough last night.""#);
/// ```
pub fn normalize_quote(raw: &str) -> String {
    normalize_with(&PIPELINE, raw)
}

/// Runs `steps` in order, tracing every step that changed the text.
pub fn normalize_with(steps: &[NormalizeStep], raw: &str) -> String {
    steps.iter().fold(raw.to_string(), |text, step| {
        let next = step.apply(&text);
        if next != text {
            trace!(step = step.name(), before = %text, after = %next, "normalize step applied");
        }
        next
    })
}

fn straighten_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => QUOTE,
            other => other,
        })
        .collect()
}

fn wrap_unquoted(text: &str) -> String {
    if text.contains(QUOTE) {
        return text.to_string();
    }
    let stripped = UNQUOTED_PREAMBLE.replace(text, "");
    // A reply that is nothing but a lead-in keeps its text.
    let body = if stripped.trim().is_empty() {
        text
    } else {
        stripped.trim()
    };
    format!("{QUOTE}{body}{QUOTE}")
}

fn ensure_trailing_quote(text: &str) -> String {
    if text.len() > 1 && text.ends_with(QUOTE) {
        return text.to_string();
    }
    match text.rfind(QUOTE) {
        Some(idx) if idx > 0 => text[..=idx].to_string(),
        _ => format!("{text}{QUOTE}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_normalized_is_unchanged() {
        assert_eq!(normalize_quote(r#""Foo bar.""#), r#""Foo bar.""#);
        let once = normalize_quote("Here's a take: the Lakers are on fire right now.");
        assert_eq!(normalize_quote(&once), once);
    }

    #[test]
    fn search_narration_before_quote_is_dropped() {
        assert_eq!(
            normalize_quote(r#"Let me search for that. "Celtics looked rough last night.""#),
            r#""Celtics looked rough last night.""#
        );
    }

    #[test]
    fn unquoted_reply_loses_preamble_and_gets_wrapped() {
        assert_eq!(
            normalize_quote("Here's a take: the Lakers are on fire right now."),
            r#""the Lakers are on fire right now.""#
        );
    }

    #[test]
    fn content_openers_are_not_preamble() {
        assert_eq!(
            normalize_quote("Looking at tonight, the Celtics host the Knicks. Big game."),
            r#""Looking at tonight, the Celtics host the Knicks. Big game.""#
        );
        assert_eq!(
            normalize_quote("Based on my search, the Celtics are 10-2. Tatum is cooking."),
            r#""Based on my search, the Celtics are 10-2. Tatum is cooking.""#
        );
        assert_eq!(
            normalize_quote("Let me tell you, the Pats defense is legit. Scary."),
            r#""Let me tell you, the Pats defense is legit. Scary.""#
        );
    }

    #[test]
    fn search_narration_sentence_is_dropped() {
        assert_eq!(
            normalize_quote("I'll search for the latest. The Bills finally beat KC."),
            r#""The Bills finally beat KC.""#
        );
    }

    #[test]
    fn unquoted_reply_without_preamble_is_wrapped_whole() {
        assert_eq!(
            normalize_quote("  The Bruins' power play is finally clicking.  "),
            r#""The Bruins' power play is finally clicking.""#
        );
    }

    #[test]
    fn trailing_meta_text_is_cut_at_last_quote() {
        assert_eq!(
            normalize_quote(r#""Dodgers bullpen is cooked." Let me know if you want more!"#),
            r#""Dodgers bullpen is cooked.""#
        );
    }

    #[test]
    fn missing_closing_quote_is_appended() {
        assert_eq!(
            normalize_quote(r#""Mahomes is doing Mahomes things."#),
            r#""Mahomes is doing Mahomes things.""#
        );
    }

    #[test]
    fn curly_quotes_are_straightened() {
        assert_eq!(
            normalize_quote("I’ll search for that. “Caitlin Clark is must-watch TV.”"),
            r#""Caitlin Clark is must-watch TV.""#
        );
    }

    #[test]
    fn preamble_match_is_case_insensitive() {
        assert_eq!(
            NormalizeStep::StripQuotedPreamble.apply(r#"SEARCHING the web... "Go Pack Go.""#),
            r#""Go Pack Go.""#
        );
    }

    #[test]
    fn preamble_only_reply_keeps_its_text() {
        assert_eq!(
            NormalizeStep::WrapUnquoted.apply("Let me search."),
            r#""Let me search.""#
        );
    }

    #[test]
    fn wrap_unquoted_ignores_text_with_quotes() {
        let s = r#"Word "here" and there"#;
        assert_eq!(NormalizeStep::WrapUnquoted.apply(s), s);
    }

    #[test]
    fn leading_quote_step() {
        assert_eq!(NormalizeStep::EnsureLeadingQuote.apply("abc\""), "\"abc\"");
        assert_eq!(NormalizeStep::EnsureLeadingQuote.apply("\"abc"), "\"abc");
    }

    #[test]
    fn trailing_quote_step_handles_lone_quote() {
        assert_eq!(NormalizeStep::EnsureTrailingQuote.apply("\""), "\"\"");
        assert_eq!(NormalizeStep::EnsureTrailingQuote.apply("\"abc"), "\"abc\"");
    }

    #[test]
    fn stray_mid_quote_truncates() {
        // Inherited behavior: a closing quote mid-reply wins over later text.
        assert_eq!(
            normalize_quote(r#""He said "no way" and then left"#),
            r#""He said "no way""#
        );
    }

    #[test]
    fn pipeline_order_is_fixed() {
        let names: Vec<_> = PIPELINE.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            [
                "trim",
                "straighten_quotes",
                "strip_quoted_preamble",
                "wrap_unquoted",
                "ensure_leading_quote",
                "ensure_trailing_quote"
            ]
        );
    }
}
