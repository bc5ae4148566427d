//! Shape classifier: match a JSON candidate against the known reading schemas.

use super::diagnostics::{Diagnostics, Stage};
use super::schema;
use serde_json::{Map, Value};

/// A non-blank text field of the source object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Source key
    pub key: String,
    /// Text value
    pub value: String,
}

/// The four attributes of the detailed destiny overview.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinyOverview {
    pub career: Option<String>,
    pub wealth: Option<String>,
    pub relationships: Option<String>,
    pub health: Option<String>,
}

/// A reading matching the detailed schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailedReading {
    pub introduction: String,
    pub stems_and_calendar: String,
    pub element_and_polarity: String,
    pub fixed_factors: Option<String>,
    pub palaces: Option<String>,
    pub main_stars: Option<String>,
    pub destiny: DestinyOverview,
    pub conclusion: Option<String>,
}

/// A reading matching the basic schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicReading {
    pub overview: String,
    pub highlights: String,
    /// Further text fields beyond the core two, in source order
    pub extras: Vec<Field>,
}

/// Result of testing a candidate against the known shapes.
///
/// Shapes are tested in declaration order of the variants below (error
/// first), so an object satisfying several predicates always lands in the
/// first one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedShape {
    /// The upstream service reported a failure
    ErrorPayload(String),
    /// Detailed reading schema
    Detailed(DetailedReading),
    /// Basic reading schema
    Basic(BasicReading),
    /// Unknown schema with at least one text field
    GenericObject(Vec<Field>),
    /// Not JSON, not an object, or nothing usable inside
    NotParseable,
}

impl ClassifiedShape {
    /// Get a stable lowercase name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            ClassifiedShape::ErrorPayload(_) => "error_payload",
            ClassifiedShape::Detailed(_) => "detailed",
            ClassifiedShape::Basic(_) => "basic",
            ClassifiedShape::GenericObject(_) => "generic_object",
            ClassifiedShape::NotParseable => "not_parseable",
        }
    }
}

/// Classified shape plus the note extracted before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub shape: ClassifiedShape,
    pub note: Option<String>,
}

impl Classification {
    fn not_parseable() -> Self {
        Self {
            shape: ClassifiedShape::NotParseable,
            note: None,
        }
    }
}

/// Parse a candidate strictly and classify it.
pub fn classify(candidate: &str, diagnostics: &mut Diagnostics) -> Classification {
    let value: Value = match serde_json::from_str(candidate) {
        Ok(value) => value,
        Err(e) => {
            diagnostics.debug(Stage::Classify, format!("json parse failed: {}", e));
            return Classification::not_parseable();
        }
    };

    let Value::Object(object) = value else {
        diagnostics.debug(Stage::Classify, "top-level json value is not an object");
        return Classification::not_parseable();
    };

    let note = text(&object, schema::NOTE).map(str::to_string);
    let shape = classify_object(&object, diagnostics);
    diagnostics.debug(
        Stage::Classify,
        format!(
            "shape {} (note: {})",
            shape.name(),
            if note.is_some() { "yes" } else { "no" }
        ),
    );

    Classification { shape, note }
}

fn classify_object(object: &Map<String, Value>, diagnostics: &mut Diagnostics) -> ClassifiedShape {
    if let Some(message) = error_message(object) {
        return ClassifiedShape::ErrorPayload(message);
    }

    if let Some(detailed) = detailed(object) {
        return ClassifiedShape::Detailed(detailed);
    }

    if let (Some(Value::String(overview)), Some(Value::String(highlights))) =
        (object.get(schema::OVERVIEW), object.get(schema::HIGHLIGHTS))
    {
        return ClassifiedShape::Basic(BasicReading {
            overview: overview.clone(),
            highlights: highlights.clone(),
            extras: text_fields(object, &[schema::OVERVIEW, schema::HIGHLIGHTS, schema::NOTE]),
        });
    }

    let fields = text_fields(object, &[schema::NOTE]);
    if fields.is_empty() {
        diagnostics.warn(
            Stage::Classify,
            format!(
                "json object has no usable text fields (keys: {})",
                object.keys().cloned().collect::<Vec<_>>().join(", ")
            ),
        );
        return ClassifiedShape::NotParseable;
    }

    diagnostics.warn(
        Stage::Classify,
        format!("unknown json structure, keeping {} text fields", fields.len()),
    );
    ClassifiedShape::GenericObject(fields)
}

/// `error`/`message` text, or the `message` of an `error` object.
fn error_message(object: &Map<String, Value>) -> Option<String> {
    for key in [schema::ERROR, schema::MESSAGE] {
        if let Some(message) = text(object, key) {
            return Some(message.to_string());
        }
    }

    match object.get(schema::ERROR) {
        Some(Value::Object(inner)) => text(inner, schema::MESSAGE).map(str::to_string),
        _ => None,
    }
}

fn detailed(object: &Map<String, Value>) -> Option<DetailedReading> {
    let introduction = string(object, schema::INTRODUCTION)?;
    let stems_and_calendar = string(object, schema::STEMS_AND_CALENDAR)?;
    let element_and_polarity = string(object, schema::ELEMENT_AND_POLARITY)?;
    let Some(Value::Object(destiny)) = object.get(schema::DESTINY_OVERVIEW) else {
        return None;
    };

    Some(DetailedReading {
        introduction: introduction.to_string(),
        stems_and_calendar: stems_and_calendar.to_string(),
        element_and_polarity: element_and_polarity.to_string(),
        fixed_factors: string(object, schema::FIXED_FACTORS).map(str::to_string),
        palaces: string(object, schema::PALACES).map(str::to_string),
        main_stars: string(object, schema::MAIN_STARS).map(str::to_string),
        destiny: DestinyOverview {
            career: string(destiny, schema::CAREER).map(str::to_string),
            wealth: string(destiny, schema::WEALTH).map(str::to_string),
            relationships: string(destiny, schema::RELATIONSHIPS).map(str::to_string),
            health: string(destiny, schema::HEALTH).map(str::to_string),
        },
        conclusion: string(object, schema::CONCLUSION).map(str::to_string),
    })
}

/// Any string value, blank or not.
fn string<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}

/// A non-blank string value.
fn text<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    string(object, key).filter(|s| !s.trim().is_empty())
}

/// Non-blank top-level text fields in source order, minus `excluded` keys.
fn text_fields(object: &Map<String, Value>, excluded: &[&str]) -> Vec<Field> {
    object
        .iter()
        .filter(|(key, _)| !excluded.contains(&key.as_str()))
        .filter_map(|(key, value)| match value {
            Value::String(s) if !s.trim().is_empty() => Some(Field {
                key: key.clone(),
                value: s.clone(),
            }),
            _ => None,
        })
        .collect()
}
