//! Document-level types.

use super::{Section, SectionRole, LINE_BREAK};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized reading: an ordered list of sections.
///
/// Documents are only built through [`Document::from_sections`] (also used
/// when deserializing), which enforces the display invariants:
///
/// - an error section, when present, is the only section;
/// - at most one note section exists and it is the last one;
/// - group sections carry no own content;
/// - no section is empty;
/// - nesting is at most one level deep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DocumentRepr")]
pub struct Document {
    origin: Origin,
    sections: Vec<Section>,
}

#[derive(Deserialize)]
struct DocumentRepr {
    origin: Origin,
    sections: Vec<Section>,
}

impl From<DocumentRepr> for Document {
    fn from(repr: DocumentRepr) -> Self {
        Document::from_sections(repr.origin, repr.sections)
    }
}

impl Document {
    /// Create an empty document.
    pub fn empty() -> Self {
        Self {
            origin: Origin::Empty,
            sections: Vec::new(),
        }
    }

    /// Build a document from sections, enforcing the display invariants.
    pub fn from_sections(origin: Origin, sections: Vec<Section>) -> Self {
        let mut normal = Vec::with_capacity(sections.len());
        let mut notes = Vec::new();

        for section in sections {
            let Some(section) = tidy(section) else {
                continue;
            };
            match section.role {
                SectionRole::Error => {
                    return Self {
                        origin,
                        sections: vec![section],
                    };
                }
                SectionRole::Note => notes.push(section),
                SectionRole::Normal => normal.push(section),
            }
        }

        if let Some(note) = merge_notes(notes) {
            normal.push(note);
        }

        Self {
            origin,
            sections: normal,
        }
    }

    /// Create a document holding a single error notice.
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::from_sections(
            Origin::Error,
            vec![Section::plain(title, message).with_role(SectionRole::Error)],
        )
    }

    /// Get the strategy that produced this document.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Get the sections in display order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Iterate over the sections in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    /// Get the number of top-level sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if the document has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Check if the document is a terminal error notice.
    pub fn is_error(&self) -> bool {
        self.sections.first().is_some_and(Section::is_error)
    }

    /// Get the note section, if any.
    pub fn note(&self) -> Option<&Section> {
        self.sections.last().filter(|s| s.is_note())
    }

    /// Get section titles in display order (top level only).
    pub fn titles(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.title.as_str()).collect()
    }

    /// Find a top-level section by title.
    pub fn find(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// Consume the document and return its sections.
    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.sections
            .iter()
            .map(|section| {
                if section.is_group() {
                    section
                        .subsections
                        .iter()
                        .map(Section::plain_text)
                        .collect::<Vec<_>>()
                        .join("\n\n")
                } else {
                    section.plain_text()
                }
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

/// Which normalization strategy produced a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Empty input
    Empty,
    /// Upstream-declared error payload
    Error,
    /// Detailed reading schema
    Detailed,
    /// Basic reading schema
    Basic,
    /// JSON object matching no known schema
    Generic,
    /// Short system notice
    Notice,
    /// Markdown split on level-2 headings
    Headings,
    /// Prose split on paragraph breaks
    Paragraphs,
    /// Whole input wrapped as one section
    CatchAll,
}

impl Origin {
    /// Get a stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Empty => "empty",
            Origin::Error => "error",
            Origin::Detailed => "detailed",
            Origin::Basic => "basic",
            Origin::Generic => "generic",
            Origin::Notice => "notice",
            Origin::Headings => "headings",
            Origin::Paragraphs => "paragraphs",
            Origin::CatchAll => "catch_all",
        }
    }

    /// Check if the document came from structured JSON.
    pub fn is_structured(&self) -> bool {
        matches!(
            self,
            Origin::Error | Origin::Detailed | Origin::Basic | Origin::Generic
        )
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize one top-level section; `None` when nothing is left to show.
fn tidy(mut section: Section) -> Option<Section> {
    section.subsections = std::mem::take(&mut section.subsections)
        .into_iter()
        .filter_map(|mut sub| {
            sub.subsections.clear();
            sub.role = SectionRole::Normal;
            (!sub.is_empty()).then_some(sub)
        })
        .collect();

    if section.is_group() {
        section.content.clear();
    }

    (!section.is_empty()).then_some(section)
}

fn merge_notes(notes: Vec<Section>) -> Option<Section> {
    let mut notes = notes.into_iter();
    let first = notes.next()?;

    Some(notes.fold(first, |acc, next| {
        let (mut acc, next) = if acc.content_kind == next.content_kind {
            (acc, next)
        } else {
            (acc.into_marked_up(), next.into_marked_up())
        };
        let separator = match acc.content_kind {
            super::ContentKind::PlainText => "\n",
            super::ContentKind::MarkedUpText => LINE_BREAK,
        };
        acc.content.push_str(separator);
        acc.content.push_str(&next.content);
        acc
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentKind;

    #[test]
    fn test_document_empty() {
        let doc = Document::empty();
        assert!(doc.is_empty());
        assert_eq!(doc.origin(), Origin::Empty);
        assert!(doc.note().is_none());
    }

    #[test]
    fn test_error_section_is_exclusive() {
        let doc = Document::from_sections(
            Origin::Generic,
            vec![
                Section::plain("A", "a"),
                Section::plain("Oops", "failed").with_role(SectionRole::Error),
                Section::plain("B", "b"),
            ],
        );
        assert_eq!(doc.len(), 1);
        assert!(doc.is_error());
        assert_eq!(doc.sections()[0].content, "failed");
    }

    #[test]
    fn test_note_moves_last() {
        let doc = Document::from_sections(
            Origin::Basic,
            vec![
                Section::plain("Note", "careful").with_role(SectionRole::Note),
                Section::plain("A", "a"),
            ],
        );
        assert_eq!(doc.titles(), vec!["A", "Note"]);
        assert_eq!(doc.note().map(|n| n.content.as_str()), Some("careful"));
    }

    #[test]
    fn test_multiple_notes_are_merged() {
        let doc = Document::from_sections(
            Origin::Paragraphs,
            vec![
                Section::marked_up("Note", "one").with_role(SectionRole::Note),
                Section::marked_up("A", "a"),
                Section::plain("Note 2", "two\nlines").with_role(SectionRole::Note),
            ],
        );
        assert_eq!(doc.len(), 2);
        let note = doc.note().unwrap();
        assert_eq!(note.title, "Note");
        assert_eq!(note.content_kind, ContentKind::MarkedUpText);
        assert_eq!(note.content, "one<br />two<br />lines");
        assert_eq!(doc.iter().filter(|s| s.is_note()).count(), 1);
    }

    #[test]
    fn test_empty_sections_are_dropped() {
        let doc = Document::from_sections(
            Origin::Generic,
            vec![
                Section::plain("Blank", "   "),
                Section::group("Group", vec![Section::plain("Child", "")]),
                Section::plain("Kept", "x"),
            ],
        );
        assert_eq!(doc.titles(), vec!["Kept"]);
    }

    #[test]
    fn test_group_content_is_cleared_and_nesting_flattened() {
        let mut child = Section::plain("Child", "c");
        child.subsections.push(Section::plain("Grandchild", "g"));
        let mut group = Section::group("Group", vec![child]);
        group.content = "stray".to_string();

        let doc = Document::from_sections(Origin::Detailed, vec![group]);
        let group = &doc.sections()[0];
        assert!(group.content.is_empty());
        assert!(group.subsections[0].subsections.is_empty());
    }

    #[test]
    fn test_deserialize_enforces_invariants() {
        let json = r#"{
            "origin": "basic",
            "sections": [
                {"title": "N", "content": "n", "content_kind": "plain_text", "role": "note"},
                {"title": "A", "content": "a", "content_kind": "plain_text", "role": "normal"}
            ]
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.titles(), vec!["A", "N"]);
    }

    #[test]
    fn test_plain_text() {
        let doc = Document::from_sections(
            Origin::Headings,
            vec![
                Section::marked_up("A", "foo<br />"),
                Section::group("G", vec![Section::plain("S", "bar")]),
            ],
        );
        assert_eq!(doc.plain_text(), "foo\n\nbar");
    }
}
