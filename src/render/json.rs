//! JSON rendering for normalized documents.

use crate::error::{Error, Result};
use crate::model::{ContentKind, Document, Section};
use crate::normalize::schema;
use serde_json::{Map, Value};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc)?,
        JsonFormat::Compact => serde_json::to_string(doc)?,
    };
    Ok(json)
}

/// Rebuild the upstream JSON object a structured document came from.
///
/// Sections map back to their source keys, groups to nested objects, and an
/// error document to `{"error": message}`. Feeding the result back through
/// the pipeline yields the same document for well-formed readings.
///
/// # Errors
///
/// [`Error::NotStructured`] when the document was built from prose or a
/// section carries no source key.
pub fn to_source_json(doc: &Document, format: JsonFormat) -> Result<String> {
    if !doc.origin().is_structured() {
        return Err(Error::NotStructured);
    }

    let object = if doc.is_error() {
        let mut object = Map::new();
        let message = doc.sections().first().map(source_text).unwrap_or_default();
        object.insert(schema::ERROR.to_string(), Value::String(message));
        object
    } else {
        sections_to_object(doc.sections())?
    };

    let value = Value::Object(object);
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&value)?,
        JsonFormat::Compact => serde_json::to_string(&value)?,
    };
    Ok(json)
}

fn sections_to_object(sections: &[Section]) -> Result<Map<String, Value>> {
    let mut object = Map::new();
    for section in sections {
        let key = section.key.clone().ok_or(Error::NotStructured)?;
        let value = if section.is_group() {
            Value::Object(sections_to_object(&section.subsections)?)
        } else {
            Value::String(source_text(section))
        };
        object.insert(key, value);
    }
    Ok(object)
}

fn source_text(section: &Section) -> String {
    match section.content_kind {
        ContentKind::PlainText => section.content.clone(),
        ContentKind::MarkedUpText => section.plain_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Origin, SectionRole};

    fn basic() -> Document {
        Document::from_sections(
            Origin::Basic,
            vec![
                Section::plain("Overview", "x").with_key("tongQuan"),
                Section::plain("Note", "n")
                    .with_role(SectionRole::Note)
                    .with_key("luuY"),
                Section::plain("Highlights", "y").with_key("diemNoiBat"),
            ],
        )
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&basic(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"origin\": \"basic\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&basic(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_source_json_keeps_display_order() {
        let json = to_source_json(&basic(), JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"tongQuan":"x","diemNoiBat":"y","luuY":"n"}"#);
    }

    #[test]
    fn test_source_json_groups() {
        let doc = Document::from_sections(
            Origin::Detailed,
            vec![Section::group(
                "Destiny",
                vec![Section::plain("Career", "c").with_key("congDanh")],
            )
            .with_key("vanMenhTongQuan")],
        );
        let json = to_source_json(&doc, JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"vanMenhTongQuan":{"congDanh":"c"}}"#);
    }

    #[test]
    fn test_source_json_error() {
        let doc = Document::error("System Error", "rate limited");
        let json = to_source_json(&doc, JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"error":"rate limited"}"#);
    }

    #[test]
    fn test_source_json_rejects_prose() {
        let doc = Document::from_sections(Origin::Headings, vec![Section::marked_up("A", "a")]);
        assert!(matches!(
            to_source_json(&doc, JsonFormat::Compact),
            Err(Error::NotStructured)
        ));
    }

    #[test]
    fn test_source_json_requires_keys() {
        let doc = Document::from_sections(Origin::Generic, vec![Section::plain("A", "a")]);
        assert!(matches!(
            to_source_json(&doc, JsonFormat::Pretty),
            Err(Error::NotStructured)
        ));
    }
}
