//! Response normalization pipeline.
//!
//! Raw upstream text flows one way through an ordered chain of strategies:
//!
//! 1. [`Structured`]: clean, classify and build from an embedded JSON object;
//! 2. [`ShortNotice`]: wrap a short status message as a single note;
//! 3. [`Segmented`]: split prose on headings or paragraphs.
//!
//! The first strategy returning a document wins. Every stage is total, so
//! [`run`] always produces a valid [`Document`].

pub mod build;
pub mod classify;
pub mod clean;
pub mod diagnostics;
pub mod options;
pub mod schema;
pub mod segment;
pub mod vocabulary;

pub use build::{build, title_from_key};
pub use classify::{classify, Classification, ClassifiedShape, Field};
pub use clean::{clean, EMPTY_OBJECT};
pub use diagnostics::{Diagnostic, Diagnostics, Stage};
pub use options::{NormalizeOptions, DEFAULT_INTRO_MAX_CHARS, DEFAULT_SHORT_NOTICE_MAX_CHARS};
pub use segment::{catch_all, mark_line_breaks, segment, HEADING_MARKER};
pub use vocabulary::{KeywordRule, Locale, Titles, Vocabulary};

use crate::model::{Document, Origin, Section, SectionRole};
use std::borrow::Cow;
use unicode_normalization::{is_nfc, UnicodeNormalization};

/// One step of the fallback chain.
pub trait NormalizeStrategy: Send + Sync {
    /// Get a short name for diagnostics.
    fn name(&self) -> &'static str;

    /// Try to produce a document; `None` passes control to the next strategy.
    fn apply(
        &self,
        input: &str,
        options: &NormalizeOptions,
        diagnostics: &mut Diagnostics,
    ) -> Option<Document>;
}

/// Recover and build from structured JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct Structured;

impl NormalizeStrategy for Structured {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn apply(
        &self,
        input: &str,
        options: &NormalizeOptions,
        diagnostics: &mut Diagnostics,
    ) -> Option<Document> {
        let candidate = clean(input, diagnostics);
        let classification = classify(&candidate, diagnostics);
        build(classification, options.vocabulary.titles(), diagnostics)
    }
}

/// Treat a short, single-block message as a system notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortNotice;

impl ShortNotice {
    /// Check whether the text qualifies as a short notice.
    pub fn qualifies(text: &str, max_chars: usize) -> bool {
        !text.contains("\n\n") && !text.contains("##") && text.chars().count() < max_chars
    }
}

impl NormalizeStrategy for ShortNotice {
    fn name(&self) -> &'static str {
        "short_notice"
    }

    fn apply(
        &self,
        input: &str,
        options: &NormalizeOptions,
        diagnostics: &mut Diagnostics,
    ) -> Option<Document> {
        let text = input.trim();
        if !Self::qualifies(text, options.short_notice_max_chars) {
            return None;
        }

        diagnostics.debug(
            Stage::Notice,
            format!("short message ({} chars) kept as notice", text.chars().count()),
        );
        let titles = options.vocabulary.titles();
        Some(Document::from_sections(
            Origin::Notice,
            vec![Section::marked_up(&titles.system_notice, mark_line_breaks(text))
                .with_role(SectionRole::Note)],
        ))
    }
}

/// Split prose into sections.
#[derive(Debug, Clone, Copy, Default)]
pub struct Segmented;

impl NormalizeStrategy for Segmented {
    fn name(&self) -> &'static str {
        "segmented"
    }

    fn apply(
        &self,
        input: &str,
        options: &NormalizeOptions,
        diagnostics: &mut Diagnostics,
    ) -> Option<Document> {
        Some(segment(input, options, diagnostics))
    }
}

/// The built-in strategy chain, strongest interpretation first.
pub static DEFAULT_STRATEGIES: [&dyn NormalizeStrategy; 3] = [&Structured, &ShortNotice, &Segmented];

/// A document plus the diagnostics recorded while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// The normalized document
    pub document: Document,
    /// Events recorded by the pipeline stages
    pub diagnostics: Diagnostics,
}

impl Normalized {
    /// Forward diagnostics to the `log` facade and return the document.
    pub fn into_logged(self) -> Document {
        self.diagnostics.emit();
        self.document
    }
}

/// Run the default strategy chain.
pub fn run(raw: &str, options: &NormalizeOptions) -> Normalized {
    run_with(&DEFAULT_STRATEGIES, raw, options)
}

/// Run a custom strategy chain.
///
/// When no strategy produces a document, the input is wrapped as a single
/// catch-all section.
pub fn run_with(
    strategies: &[&dyn NormalizeStrategy],
    raw: &str,
    options: &NormalizeOptions,
) -> Normalized {
    let mut diagnostics = Diagnostics::new();

    if raw.trim().is_empty() {
        diagnostics.debug(Stage::Prepare, "empty input");
        return Normalized {
            document: Document::empty(),
            diagnostics,
        };
    }

    let input = prepare(raw, options, &mut diagnostics);

    for strategy in strategies {
        if let Some(document) = strategy.apply(&input, options, &mut diagnostics) {
            diagnostics.debug(
                Stage::Prepare,
                format!(
                    "strategy {} produced {} sections",
                    strategy.name(),
                    document.len()
                ),
            );
            return Normalized {
                document,
                diagnostics,
            };
        }
    }

    diagnostics.warn(Stage::Segment, "no strategy matched, wrapping whole input");
    Normalized {
        document: catch_all(&input, options.vocabulary.titles()),
        diagnostics,
    }
}

/// Apply Unicode and line ending normalization.
pub fn prepare<'a>(
    raw: &'a str,
    options: &NormalizeOptions,
    diagnostics: &mut Diagnostics,
) -> Cow<'a, str> {
    let mut text = Cow::Borrowed(raw);

    if options.normalize_line_endings && text.contains('\r') {
        diagnostics.debug(Stage::Prepare, "normalized line endings");
        text = Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"));
    }

    if options.normalize_unicode && !is_nfc(&text) {
        diagnostics.debug(Stage::Prepare, "applied NFC normalization");
        text = Cow::Owned(text.nfc().collect());
    }

    text
}
