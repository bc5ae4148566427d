//! Acceptance gate for upstream responses and canned fallback readings.
//!
//! Callers that request a reading from the upstream service check the raw
//! response with [`accept`] before storing it. A rejected response is
//! replaced by a [`fallback_reading`], a short Markdown text explaining that
//! the service is unavailable; it renders through the normal pipeline like
//! any other prose answer.

mod fallback;

pub use fallback::{
    fallback_reading, Subject, TarotCard, TarotSpread, DEFAULT_BIRTH_DATE, DEFAULT_NAME,
    DEFAULT_QUESTION,
};

use crate::normalize::{clean, schema, Diagnostics, EMPTY_OBJECT};
use serde_json::Value;
use thiserror::Error;

/// Which reading was requested from the upstream service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadingKind {
    /// Short reading (`tongQuan`, `diemNoiBat`)
    Basic,
    /// Full reading with the grouped destiny overview
    Detailed,
    /// Numerology chart (JSON, no fixed required fields)
    Numerology,
    /// Single-card tarot reading (Markdown prose)
    TarotSingleCard,
    /// Three-card tarot spread (Markdown prose)
    TarotThreeCards,
}

impl ReadingKind {
    /// Minimum trimmed response length in characters.
    pub fn min_length(&self) -> usize {
        match self {
            ReadingKind::Basic => 50,
            ReadingKind::Detailed => 100,
            _ => 1,
        }
    }

    /// Fields that must be present with a non-empty value.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            ReadingKind::Basic => &schema::BASIC_REQUIRED,
            ReadingKind::Detailed => &schema::DETAILED_REQUIRED,
            _ => &[],
        }
    }

    /// Check whether the service is asked for a JSON payload.
    ///
    /// Tarot readings come back as Markdown and are accepted as text.
    pub fn expects_json(&self) -> bool {
        !matches!(self, ReadingKind::TarotSingleCard | ReadingKind::TarotThreeCards)
    }

    /// Get a stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingKind::Basic => "basic",
            ReadingKind::Detailed => "detailed",
            ReadingKind::Numerology => "numerology",
            ReadingKind::TarotSingleCard => "tarot_single_card",
            ReadingKind::TarotThreeCards => "tarot_three_cards",
        }
    }
}

/// Why a response was not accepted.
#[derive(Error, Debug)]
pub enum Rejection {
    /// Response is empty or too short to hold a reading.
    #[error("response too short: {length} characters (minimum {minimum})")]
    TooShort { length: usize, minimum: usize },

    /// No JSON payload could be found in the response.
    #[error("response does not contain JSON")]
    NotJson,

    /// The extracted payload is not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Required fields are absent or empty.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
}

/// Check a raw response and return its cleaned payload.
///
/// JSON kinds return the recovered JSON object; prose kinds return the
/// trimmed text.
///
/// # Errors
///
/// Returns a [`Rejection`] when the response is too short, carries no JSON
/// payload, does not parse, or lacks one of the kind's required fields.
pub fn accept(response: &str, kind: ReadingKind) -> Result<String, Rejection> {
    let length = response.trim().chars().count();
    if length < kind.min_length() {
        return Err(Rejection::TooShort {
            length,
            minimum: kind.min_length(),
        });
    }

    if !kind.expects_json() {
        log::debug!("accepted {} reading ({} characters)", kind.as_str(), length);
        return Ok(response.trim().to_string());
    }

    let cleaned = clean(response, &mut Diagnostics::new());
    if cleaned == EMPTY_OBJECT {
        return Err(Rejection::NotJson);
    }

    let value: Value = serde_json::from_str(&cleaned).map_err(Rejection::InvalidJson)?;
    let missing: Vec<String> = kind
        .required_fields()
        .iter()
        .filter(|field| !value.get(**field).is_some_and(is_filled))
        .map(|field| field.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(Rejection::MissingFields(missing));
    }

    log::debug!(
        "accepted {} reading ({} characters of JSON)",
        kind.as_str(),
        cleaned.len()
    );
    Ok(cleaned)
}

/// A required value counts when it is not null, false, zero or blank text.
fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => true,
    }
}

/// Accept a response, or log the rejection and return a fallback reading.
pub fn accept_or_fallback(response: &str, kind: ReadingKind, subject: &Subject) -> String {
    match accept(response, kind) {
        Ok(cleaned) => cleaned,
        Err(rejection) => {
            let preview: String = response.chars().take(200).collect();
            log::warn!(
                "rejected {} reading: {} (response starts with {:?})",
                kind.as_str(),
                rejection,
                preview
            );
            fallback_reading(kind, subject)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: &str = r#"{"tongQuan": "Một tổng quan đủ dài cho bài kiểm tra", "diemNoiBat": "Kiên trì"}"#;

    #[test]
    fn test_accept_basic() {
        let cleaned = accept(BASIC, ReadingKind::Basic).unwrap();
        assert_eq!(cleaned, BASIC);
    }

    #[test]
    fn test_accept_strips_fence() {
        let raw = format!("```json\n{}\n```", BASIC);
        assert_eq!(accept(&raw, ReadingKind::Basic).unwrap(), BASIC);
    }

    #[test]
    fn test_too_short() {
        let err = accept("  {\"tongQuan\": \"x\"}  ", ReadingKind::Basic).unwrap_err();
        assert!(matches!(err, Rejection::TooShort { length: 17, minimum: 50 }));
    }

    #[test]
    fn test_detailed_needs_longer_response() {
        assert!(matches!(
            accept(BASIC, ReadingKind::Detailed),
            Err(Rejection::TooShort { minimum: 100, .. })
        ));
    }

    #[test]
    fn test_not_json() {
        let prose = "Xin lỗi, hiện tại tôi không thể thực hiện phân tích tử vi cho bạn được.";
        assert!(matches!(accept(prose, ReadingKind::Basic), Err(Rejection::NotJson)));
    }

    #[test]
    fn test_invalid_json() {
        let raw = "{\"tongQuan\": \"x\", \"diemNoiBat\": \"y\", oops this is not json at all}";
        assert!(matches!(
            accept(raw, ReadingKind::Basic),
            Err(Rejection::InvalidJson(_))
        ));
    }

    #[test]
    fn test_missing_fields() {
        let raw = r#"{"tongQuan": "Một tổng quan đủ dài cho bài kiểm tra", "diemNoiBat": ""}"#;
        let err = accept(raw, ReadingKind::Basic).unwrap_err();
        assert!(matches!(&err, Rejection::MissingFields(fields) if fields == &["diemNoiBat"]));
        assert_eq!(err.to_string(), "missing required fields: diemNoiBat");
    }

    #[test]
    fn test_is_filled() {
        assert!(!is_filled(&Value::Null));
        assert!(!is_filled(&serde_json::json!(0)));
        assert!(!is_filled(&serde_json::json!("  ")));
        assert!(is_filled(&serde_json::json!({})));
        assert!(is_filled(&serde_json::json!(1.5)));
    }

    #[test]
    fn test_tarot_accepts_prose() {
        let raw = "  ## Ý nghĩa lá bài\nMặt Trời mang lại niềm vui.\n";
        let accepted = accept(raw, ReadingKind::TarotSingleCard).unwrap();
        assert_eq!(accepted, "## Ý nghĩa lá bài\nMặt Trời mang lại niềm vui.");
        assert!(matches!(
            accept("   ", ReadingKind::TarotThreeCards),
            Err(Rejection::TooShort { length: 0, minimum: 1 })
        ));
    }

    #[test]
    fn test_numerology_needs_json_only() {
        let raw = r#"{"lifePathNumber": 7}"#;
        assert_eq!(accept(raw, ReadingKind::Numerology).unwrap(), raw);
        assert!(matches!(
            accept("Không có dữ liệu.", ReadingKind::Numerology),
            Err(Rejection::NotJson)
        ));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ReadingKind::TarotThreeCards.as_str(), "tarot_three_cards");
        assert!(ReadingKind::Numerology.expects_json());
        assert!(!ReadingKind::TarotSingleCard.expects_json());
        assert!(ReadingKind::Numerology.required_fields().is_empty());
    }

    #[test]
    fn test_accept_or_fallback() {
        let subject = Subject::new();
        assert_eq!(accept_or_fallback(BASIC, ReadingKind::Basic, &subject), BASIC);
        let fallback = accept_or_fallback("", ReadingKind::Basic, &subject);
        assert!(fallback.contains("Người dùng"));
    }
}
