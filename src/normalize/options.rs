//! Normalization options and configuration.

use super::vocabulary::{Locale, Vocabulary};
use std::sync::Arc;

/// Default length below which an unstructured response is a system notice.
pub const DEFAULT_SHORT_NOTICE_MAX_CHARS: usize = 500;

/// Default length below which the first prose paragraph is an introduction.
pub const DEFAULT_INTRO_MAX_CHARS: usize = 200;

/// Options for normalizing upstream responses.
///
/// Thresholds are counted in Unicode scalar values and were tuned for
/// Vietnamese readings; revisit them together with the vocabulary when
/// deploying for another locale.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Unstructured input shorter than this, with no paragraph break or
    /// heading marker, becomes a single system notice
    pub short_notice_max_chars: usize,

    /// First prose paragraph shorter than this is titled as an introduction
    pub intro_max_chars: usize,

    /// Rewrite input to Unicode NFC before building sections; keyword
    /// matching is NFC-insensitive either way, so this only changes the
    /// displayed content
    pub normalize_unicode: bool,

    /// Convert CRLF and CR line endings to LF
    pub normalize_line_endings: bool,

    /// Use parallel processing for batches
    pub parallel: bool,

    /// Titles and keyword rules
    pub vocabulary: Arc<Vocabulary>,
}

impl NormalizeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the short notice threshold.
    pub fn with_short_notice_limit(mut self, max_chars: usize) -> Self {
        self.short_notice_max_chars = max_chars;
        self
    }

    /// Set the introduction paragraph threshold.
    pub fn with_intro_limit(mut self, max_chars: usize) -> Self {
        self.intro_max_chars = max_chars;
        self
    }

    /// Enable or disable rewriting content to Unicode NFC.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self
    }

    /// Enable or disable line ending normalization.
    pub fn with_line_ending_normalization(mut self, enabled: bool) -> Self {
        self.normalize_line_endings = enabled;
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Use a built-in locale vocabulary.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.vocabulary = locale.vocabulary();
        self
    }

    /// Use a custom vocabulary.
    pub fn with_vocabulary(mut self, vocabulary: impl Into<Arc<Vocabulary>>) -> Self {
        self.vocabulary = vocabulary.into();
        self
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            short_notice_max_chars: DEFAULT_SHORT_NOTICE_MAX_CHARS,
            intro_max_chars: DEFAULT_INTRO_MAX_CHARS,
            normalize_unicode: false,
            normalize_line_endings: true,
            parallel: true,
            vocabulary: Vocabulary::vietnamese(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = NormalizeOptions::default();
        assert_eq!(options.short_notice_max_chars, 500);
        assert_eq!(options.intro_max_chars, 200);
        assert!(!options.normalize_unicode);
        assert!(options.parallel);
        assert_eq!(options.vocabulary.titles().catch_all, "Phân tích tử vi");
    }

    #[test]
    fn test_builder_chained() {
        let options = NormalizeOptions::new()
            .with_short_notice_limit(80)
            .with_intro_limit(40)
            .with_unicode_normalization(true)
            .with_locale(Locale::English)
            .sequential();

        assert_eq!(options.short_notice_max_chars, 80);
        assert_eq!(options.intro_max_chars, 40);
        assert!(options.normalize_unicode);
        assert!(!options.parallel);
        assert_eq!(options.vocabulary.titles().catch_all, "Reading");
    }
}
