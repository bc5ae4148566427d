//! Section-level types.

use serde::{Deserialize, Serialize};

/// Line-break marker embedded in [`ContentKind::MarkedUpText`] content.
pub const LINE_BREAK: &str = "<br />";

/// A titled block of display content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Human-readable heading
    pub title: String,

    /// Body text; see `content_kind` for how line breaks are encoded
    pub content: String,

    /// How line breaks are encoded in `content`
    pub content_kind: ContentKind,

    /// Display role
    pub role: SectionRole,

    /// Nested sections (one level deep)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<Section>,

    /// Upstream JSON field this section was built from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Section {
    /// Create a plain-text section with preserved newlines.
    pub fn plain(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            content_kind: ContentKind::PlainText,
            role: SectionRole::Normal,
            subsections: Vec::new(),
            key: None,
        }
    }

    /// Create a section whose content carries [`LINE_BREAK`] markers.
    pub fn marked_up(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            content_kind: ContentKind::MarkedUpText,
            ..Self::plain(title, content)
        }
    }

    /// Create a grouping section that only holds subsections.
    pub fn group(title: impl Into<String>, subsections: Vec<Section>) -> Self {
        Self {
            subsections,
            ..Self::plain(title, String::new())
        }
    }

    /// Set the display role.
    pub fn with_role(mut self, role: SectionRole) -> Self {
        self.role = role;
        self
    }

    /// Record the source field key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Check if this is the advisory note.
    pub fn is_note(&self) -> bool {
        self.role == SectionRole::Note
    }

    /// Check if this is a terminal error notice.
    pub fn is_error(&self) -> bool {
        self.role == SectionRole::Error
    }

    /// Check if this section is a group of subsections.
    pub fn is_group(&self) -> bool {
        !self.subsections.is_empty()
    }

    /// Check if the section has nothing to display.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty() && self.subsections.is_empty()
    }

    /// Get the content as display lines, decoding line-break markers.
    ///
    /// Trailing empty lines are dropped.
    pub fn content_lines(&self) -> Vec<&str> {
        let mut lines: Vec<&str> = match self.content_kind {
            ContentKind::PlainText => self.content.lines().collect(),
            ContentKind::MarkedUpText => self
                .content
                .split(LINE_BREAK)
                .flat_map(|part| part.split('\n'))
                .collect(),
        };
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        lines
    }

    /// Get plain text content with newlines.
    pub fn plain_text(&self) -> String {
        self.content_lines().join("\n")
    }

    /// Convert content to the marked-up encoding.
    pub(crate) fn into_marked_up(mut self) -> Self {
        if self.content_kind == ContentKind::PlainText {
            self.content = self.content.replace('\n', LINE_BREAK);
            self.content_kind = ContentKind::MarkedUpText;
        }
        self
    }
}

/// Encoding of line breaks in section content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Literal newlines (structured sources)
    #[default]
    PlainText,
    /// [`LINE_BREAK`] markers (prose sources)
    MarkedUpText,
}

/// Display role of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionRole {
    /// Regular content
    #[default]
    Normal,
    /// Advisory block, always rendered last
    Note,
    /// Terminal failure notice, the only section of its document
    Error,
}
