//! # augur
//!
//! Normalization of generated reading responses for Rust.
//!
//! An upstream text service answers reading requests with anything from
//! strict JSON to fenced JSON, prose with headings, bare paragraphs, a short
//! status message, or nothing at all. This library turns any of those into
//! an ordered [`Document`] of titled sections, preferring the most structured
//! interpretation available.
//!
//! ## Quick Start
//!
//! ```
//! use augur::{normalize, render};
//!
//! let raw = "```json\n{\"tongQuan\": \"Một năm nhiều thay đổi.\", \"diemNoiBat\": \"Kiên trì.\"}\n```";
//! let doc = normalize(raw);
//! assert_eq!(doc.titles(), vec!["Tổng Quan", "Điểm Nổi Bật"]);
//!
//! let markdown = render::to_markdown(&doc, &render::RenderOptions::default())?;
//! println!("{}", markdown);
//! # Ok::<(), augur::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Total**: every input yields a valid document, never a panic or error
//! - **Schema aware**: detailed and basic readings keep their canonical order
//! - **Prose fallback**: heading and keyword based segmentation
//! - **Configurable**: thresholds and keyword tables per locale
//! - **Parallel batches**: uses Rayon for many responses at once

pub mod acceptance;
pub mod error;
pub mod model;
pub mod normalize;
pub mod render;

// Re-export commonly used types
pub use acceptance::{
    accept, accept_or_fallback, fallback_reading, ReadingKind, Rejection, Subject, TarotCard,
    TarotSpread,
};
pub use error::{Error, Result};
pub use model::{ContentKind, Document, Origin, Section, SectionRole, LINE_BREAK};
pub use normalize::{
    Diagnostic, Diagnostics, KeywordRule, Locale, NormalizeOptions, NormalizeStrategy, Normalized,
    Stage, Vocabulary,
};
pub use render::{JsonFormat, NoteStyle, RenderOptions};

use rayon::prelude::*;
use std::io::Read;
use std::path::Path;

/// Normalize a response with default options.
///
/// # Example
///
/// ```
/// use augur::{normalize, SectionRole};
///
/// let doc = normalize(r#"{"error": "rate limited"}"#);
/// assert_eq!(doc.len(), 1);
/// assert_eq!(doc.sections()[0].role, SectionRole::Error);
/// ```
pub fn normalize(raw: &str) -> Document {
    normalize::run(raw, &NormalizeOptions::default()).document
}

/// Normalize a response with custom options, keeping diagnostics.
///
/// # Example
///
/// ```
/// use augur::{normalize_with_options, Locale, NormalizeOptions};
///
/// let options = NormalizeOptions::new().with_locale(Locale::English);
/// let normalized = normalize_with_options("## Career\nSteady growth.", &options);
/// assert_eq!(normalized.document.titles(), vec!["Career"]);
/// normalized.diagnostics.emit();
/// ```
pub fn normalize_with_options(raw: &str, options: &NormalizeOptions) -> Normalized {
    normalize::run(raw, options)
}

/// Normalize many responses, in parallel unless the options say otherwise.
///
/// Output order matches input order.
pub fn normalize_batch<S>(inputs: &[S], options: &NormalizeOptions) -> Vec<Document>
where
    S: AsRef<str> + Sync,
{
    if options.parallel {
        inputs
            .par_iter()
            .map(|raw| normalize::run(raw.as_ref(), options).document)
            .collect()
    } else {
        inputs
            .iter()
            .map(|raw| normalize::run(raw.as_ref(), options).document)
            .collect()
    }
}

/// Read a response from a file and normalize it.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
///
/// # Example
///
/// ```no_run
/// let doc = augur::normalize_file("response.txt")?;
/// println!("{} sections", doc.len());
/// # Ok::<(), augur::Error>(())
/// ```
pub fn normalize_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let data = std::fs::read(path)?;
    Ok(normalize(&String::from_utf8_lossy(&data)))
}

/// Read a response from a reader and normalize it.
pub fn normalize_reader<R: Read>(mut reader: R) -> Result<Document> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(normalize(&String::from_utf8_lossy(&data)))
}

/// Builder for normalizing and rendering responses.
///
/// # Example
///
/// ```
/// use augur::{Augur, Locale};
///
/// let markdown = Augur::new()
///     .with_locale(Locale::English)
///     .with_frontmatter()
///     .normalize("Service temporarily unavailable.")
///     .to_markdown()?;
/// assert!(markdown.contains("[!NOTE]"));
/// # Ok::<(), augur::Error>(())
/// ```
pub struct Augur {
    normalize_options: NormalizeOptions,
    render_options: RenderOptions,
}

impl Augur {
    /// Create a new Augur builder.
    pub fn new() -> Self {
        Self {
            normalize_options: NormalizeOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Use a built-in locale vocabulary.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.normalize_options = self.normalize_options.with_locale(locale);
        self
    }

    /// Use a custom vocabulary.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.normalize_options = self.normalize_options.with_vocabulary(vocabulary);
        self
    }

    /// Set the short notice threshold in characters.
    pub fn with_short_notice_limit(mut self, max_chars: usize) -> Self {
        self.normalize_options = self.normalize_options.with_short_notice_limit(max_chars);
        self
    }

    /// Set the introduction paragraph threshold in characters.
    pub fn with_intro_limit(mut self, max_chars: usize) -> Self {
        self.normalize_options = self.normalize_options.with_intro_limit(max_chars);
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.normalize_options = self.normalize_options.sequential();
        self
    }

    /// Set the top-level heading level for Markdown.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.render_options = self.render_options.with_heading_level(level);
        self
    }

    /// Set the note rendering style.
    pub fn with_note_style(mut self, style: NoteStyle) -> Self {
        self.render_options = self.render_options.with_note_style(style);
        self
    }

    /// Enable frontmatter in Markdown output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Normalize a response and return a result wrapper.
    pub fn normalize(&self, raw: &str) -> AugurResult {
        let Normalized {
            document,
            diagnostics,
        } = normalize::run(raw, &self.normalize_options);
        AugurResult {
            document,
            diagnostics,
            render_options: self.render_options.clone(),
        }
    }

    /// Read a response from a file and normalize it.
    pub fn normalize_file<P: AsRef<Path>>(&self, path: P) -> Result<AugurResult> {
        let data = std::fs::read(path)?;
        Ok(self.normalize(&String::from_utf8_lossy(&data)))
    }

    /// Normalize many responses.
    pub fn normalize_batch<S>(&self, inputs: &[S]) -> Vec<Document>
    where
        S: AsRef<str> + Sync,
    {
        normalize_batch(inputs, &self.normalize_options)
    }
}

impl Default for Augur {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of normalizing one response.
pub struct AugurResult {
    /// The normalized document
    pub document: Document,
    /// Events recorded while normalizing
    pub diagnostics: Diagnostics,
    /// Render options to use
    render_options: RenderOptions,
}

impl AugurResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Rebuild the upstream JSON object.
    pub fn to_source_json(&self, format: JsonFormat) -> Result<String> {
        render::to_source_json(&self.document, format)
    }

    /// Forward diagnostics to the `log` facade.
    pub fn emit_diagnostics(&self) {
        self.diagnostics.emit();
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_augur_builder() {
        let augur = Augur::new()
            .with_locale(Locale::English)
            .with_frontmatter()
            .with_short_notice_limit(10);

        assert_eq!(augur.normalize_options.short_notice_max_chars, 10);
        assert_eq!(augur.normalize_options.vocabulary.titles().note, "Note");
        assert!(augur.render_options.include_frontmatter);
    }

    #[test]
    fn test_augur_builder_default() {
        let builder = Augur::default();
        assert!(builder.normalize_options.parallel);
        assert!(!builder.render_options.include_frontmatter);
    }

    #[test]
    fn test_augur_builder_sequential() {
        let builder = Augur::new().sequential();
        assert!(!builder.normalize_options.parallel);
    }

    #[test]
    fn test_augur_builder_chained() {
        let builder = Augur::new()
            .with_intro_limit(80)
            .with_heading_level(3)
            .with_note_style(NoteStyle::Heading);

        assert_eq!(builder.normalize_options.intro_max_chars, 80);
        assert_eq!(builder.render_options.heading_level, 3);
        assert_eq!(builder.render_options.note_style, NoteStyle::Heading);
    }

    #[test]
    fn test_augur_result_renders() {
        let result = Augur::new().normalize(r#"{"tongQuan": "x", "diemNoiBat": "y"}"#);
        assert_eq!(result.document().origin(), Origin::Basic);
        assert_eq!(
            result.to_markdown().unwrap(),
            "## Tổng Quan\n\nx\n\n## Điểm Nổi Bật\n\ny"
        );
        assert_eq!(result.to_text().unwrap(), "Tổng Quan\nx\n\nĐiểm Nổi Bật\ny");
        assert_eq!(
            result.to_source_json(JsonFormat::Compact).unwrap(),
            r#"{"tongQuan":"x","diemNoiBat":"y"}"#
        );
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_normalize_reader_invalid_utf8() {
        let data: &[u8] = &[0xFF, 0xFE, b'o', b'k'];
        let doc = normalize_reader(data).unwrap();
        assert_eq!(doc.origin(), Origin::Notice);
        assert_eq!(doc.sections()[0].content, "\u{FFFD}\u{FFFD}ok");
    }

    #[test]
    fn test_normalize_file_missing() {
        let result = normalize_file("/nonexistent/response.txt");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_batch_keeps_order() {
        let inputs = vec!["## A\nfoo", "", r#"{"error": "down"}"#];
        let parallel = normalize_batch(&inputs, &NormalizeOptions::default());
        let sequential = normalize_batch(&inputs, &NormalizeOptions::new().sequential());

        assert_eq!(parallel, sequential);
        assert_eq!(parallel[0].origin(), Origin::Headings);
        assert!(parallel[1].is_empty());
        assert!(parallel[2].is_error());
    }
}
