//! Rendering options and configuration.

/// Options for rendering normalized documents.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Markdown level of top-level section headings (1-5); subsections are
    /// rendered one level deeper
    pub heading_level: u8,

    /// How note and error sections are rendered
    pub note_style: NoteStyle,

    /// Keep line breaks inside section bodies as hard breaks
    pub preserve_line_breaks: bool,

    /// Include YAML frontmatter with the document origin
    pub include_frontmatter: bool,

    /// Indentation of subsections in plain text output
    pub text_indent: usize,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the top-level heading level.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 5);
        self
    }

    /// Set the note rendering style.
    pub fn with_note_style(mut self, style: NoteStyle) -> Self {
        self.note_style = style;
        self
    }

    /// Enable or disable hard line breaks.
    pub fn with_line_breaks(mut self, preserve: bool) -> Self {
        self.preserve_line_breaks = preserve;
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Set the plain text subsection indent.
    pub fn with_text_indent(mut self, indent: usize) -> Self {
        self.text_indent = indent;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            heading_level: 2,
            note_style: NoteStyle::Callout,
            preserve_line_breaks: true,
            include_frontmatter: false,
            text_indent: 2,
        }
    }
}

/// How note and error sections stand out in Markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteStyle {
    /// GitHub-style alert blockquote (`> [!NOTE]`, `> [!CAUTION]`)
    #[default]
    Callout,
    /// Regular heading like any other section
    Heading,
}
