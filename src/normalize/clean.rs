//! Text cleaner: recover a JSON candidate from noisy model output.

use super::diagnostics::{Diagnostics, Stage};
use regex::Regex;
use serde::de::IgnoredAny;
use std::sync::LazyLock;

/// Candidate returned when no JSON payload can be recovered.
pub const EMPTY_OBJECT: &str = "{}";

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)```[ \t]*json\b(.*?)```").unwrap());

/// Strip formatting noise around an embedded JSON payload.
///
/// Never fails: returns [`EMPTY_OBJECT`] when the text is empty or when it
/// is prose with no parseable `{...}` span.
pub fn clean(raw: &str, diagnostics: &mut Diagnostics) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        diagnostics.debug(Stage::Clean, "empty input");
        return EMPTY_OBJECT.to_string();
    }

    let text = match JSON_FENCE.captures(trimmed).and_then(|caps| caps.get(1)) {
        Some(interior) => {
            diagnostics.debug(Stage::Clean, "extracted fenced json block");
            interior.as_str().trim()
        }
        None => trimmed,
    };

    if text.starts_with('{') || text.starts_with('[') {
        return text.to_string();
    }

    match extract_object_span(text) {
        Some(span) => {
            diagnostics.debug(
                Stage::Clean,
                format!("extracted json object span ({} bytes)", span.len()),
            );
            span.to_string()
        }
        None => {
            diagnostics.debug(Stage::Clean, "no json payload found");
            EMPTY_OBJECT.to_string()
        }
    }
}

/// Find the first `{` to the last `}` and keep it only if it parses.
fn extract_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    let span = &text[start..=end];
    serde_json::from_str::<IgnoredAny>(span).ok().map(|_| span)
}
