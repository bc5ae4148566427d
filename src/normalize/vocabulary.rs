//! Canonical titles and keyword rules for a deployment locale.
//!
//! The upstream service answers in Vietnamese, so [`Vocabulary::vietnamese`]
//! is the default. The keyword table is plain data: rules are tried in
//! order and the first match names the paragraph. Text is matched in NFC
//! form, so decomposed input finds the same rules without being rewritten.

use crate::error::Result;
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::sync::{Arc, LazyLock};
use unicode_normalization::{is_nfc, UnicodeNormalization};

static VIETNAMESE: LazyLock<Arc<Vocabulary>> = LazyLock::new(|| Arc::new(build_vietnamese()));
static ENGLISH: LazyLock<Arc<Vocabulary>> = LazyLock::new(|| Arc::new(build_english()));

/// Supported built-in locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// Vietnamese (upstream default)
    #[default]
    Vietnamese,
    /// English
    English,
}

impl Locale {
    /// Get the shared built-in vocabulary for this locale.
    pub fn vocabulary(self) -> Arc<Vocabulary> {
        match self {
            Locale::Vietnamese => Vocabulary::vietnamese(),
            Locale::English => Vocabulary::english(),
        }
    }
}

/// Section titles used by the builders and the segmenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Titles {
    /// Detailed: general introduction
    pub introduction: String,
    /// Detailed: heavenly stems, earthly branches and lunar calendar
    pub stems_and_calendar: String,
    /// Detailed: sound element and yin/yang polarity
    pub element_and_polarity: String,
    /// Detailed: fixed factors of the birth year
    pub fixed_factors: String,
    /// Detailed: life and body palaces
    pub palaces: String,
    /// Detailed: main stars and their meaning
    pub main_stars: String,
    /// Detailed: grouped destiny overview
    pub destiny_overview: String,
    /// Destiny overview: career
    pub career: String,
    /// Destiny overview: wealth
    pub wealth: String,
    /// Destiny overview: relationships
    pub relationships: String,
    /// Destiny overview: health
    pub health: String,
    /// Detailed: conclusion and advice
    pub conclusion: String,
    /// Basic: overview
    pub overview: String,
    /// Basic: highlights
    pub highlights: String,
    /// Advisory note
    pub note: String,
    /// Upstream-declared error
    pub error: String,
    /// Short status message from the upstream service
    pub system_notice: String,
    /// Markdown content before the first heading
    pub untitled: String,
    /// Short first paragraph of prose
    pub opening_paragraph: String,
    /// Prefix for positional titles ("Section 3")
    pub section_prefix: String,
    /// Whole input wrapped as one section
    pub catch_all: String,
}

impl Titles {
    /// Build the positional fallback title (1-based).
    pub fn positional(&self, number: usize) -> String {
        format!("{} {}", self.section_prefix, number)
    }
}

/// One entry of the paragraph classification table.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pattern: Regex,
    title: String,
    is_note: bool,
}

impl KeywordRule {
    /// Compile a rule. Patterns always match case-insensitively.
    pub fn new(pattern: &str, title: impl Into<String>, is_note: bool) -> Result<Self> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            pattern,
            title: title.into(),
            is_note,
        })
    }

    /// Check whether the text matches this rule.
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(&nfc(text))
    }

    /// Check whether a single match spans the whole text.
    pub fn matches_whole(&self, text: &str) -> bool {
        let text = nfc(text);
        self.pattern
            .find_iter(&text)
            .any(|m| m.start() == 0 && m.end() == text.len())
    }

    /// Get the title assigned on a match.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Check whether matching paragraphs are notes.
    pub fn is_note(&self) -> bool {
        self.is_note
    }

    /// Get the source pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Titles plus the ordered keyword table.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    titles: Titles,
    rules: Vec<KeywordRule>,
}

impl Vocabulary {
    /// Create a vocabulary from titles and an ordered rule table.
    pub fn new(titles: Titles, rules: Vec<KeywordRule>) -> Self {
        Self { titles, rules }
    }

    /// Get the shared Vietnamese vocabulary.
    pub fn vietnamese() -> Arc<Vocabulary> {
        Arc::clone(&VIETNAMESE)
    }

    /// Get the shared English vocabulary.
    pub fn english() -> Arc<Vocabulary> {
        Arc::clone(&ENGLISH)
    }

    /// Replace the keyword table.
    pub fn with_rules(mut self, rules: Vec<KeywordRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Get the titles.
    pub fn titles(&self) -> &Titles {
        &self.titles
    }

    /// Get the keyword rules in match order.
    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// Find the first rule matching the text.
    pub fn match_rule(&self, text: &str) -> Option<&KeywordRule> {
        self.rules.iter().find(|rule| rule.matches(text))
    }

    /// Check whether a heading names the advisory note.
    ///
    /// The whole title must be the note title or a note keyword, optionally
    /// followed by `:` or `.`. Headings that only mention one are not notes.
    pub fn is_note_title(&self, title: &str) -> bool {
        let title = title.trim().trim_end_matches([':', '.']).trim_end();
        if title.is_empty() {
            return false;
        }
        if nfc(title).to_lowercase() == nfc(&self.titles.note).to_lowercase() {
            return true;
        }
        self.rules
            .iter()
            .filter(|rule| rule.is_note)
            .any(|rule| rule.matches_whole(title))
    }
}

fn nfc(text: &str) -> Cow<'_, str> {
    if is_nfc(text) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.nfc().collect())
    }
}

fn builtin(pattern: &str, title: &str, is_note: bool) -> KeywordRule {
    KeywordRule::new(pattern, title, is_note).expect("built-in keyword pattern")
}

fn build_vietnamese() -> Vocabulary {
    let titles = Titles {
        introduction: "Giới Thiệu Chung".into(),
        stems_and_calendar: "Can Chi và Lịch Âm".into(),
        element_and_polarity: "Nạp Âm và Âm Dương Mạng".into(),
        fixed_factors: "Các Yếu Tố Cố Định".into(),
        palaces: "Cung Mệnh và Cung Thân".into(),
        main_stars: "Các Sao Chính và Ý Nghĩa".into(),
        destiny_overview: "Vận Mệnh Tổng Quan".into(),
        career: "Công Danh".into(),
        wealth: "Tài Lộc".into(),
        relationships: "Tình Duyên".into(),
        health: "Sức Khỏe".into(),
        conclusion: "Kết Luận và Lời Khuyên".into(),
        overview: "Tổng Quan".into(),
        highlights: "Điểm Nổi Bật".into(),
        note: "Lưu Ý".into(),
        error: "Lỗi từ hệ thống".into(),
        system_notice: "Thông báo từ hệ thống".into(),
        untitled: "Nội dung tử vi".into(),
        opening_paragraph: "Giới thiệu".into(),
        section_prefix: "Phần".into(),
        catch_all: "Phân tích tử vi".into(),
    };

    let rules = vec![
        builtin(r"\b(giới thiệu|tổng quan|tổng quát)\b", "Tổng Quan", false),
        builtin(
            r"\b(điểm nổi bật|điểm mạnh|đặc điểm|tính cách)\b",
            "Điểm Nổi Bật",
            false,
        ),
        builtin(r"\b(can chi|lịch âm)\b", "Can Chi và Lịch Âm", false),
        builtin(
            r"\b(nạp âm|âm dương|mệnh|mạng)\b",
            "Nạp Âm và Âm Dương Mạng",
            false,
        ),
        builtin(r"\b(cung mệnh|cung thân)\b", "Cung Mệnh / Thân", false),
        builtin(r"\b(sao chính|ý nghĩa|tinh tú)\b", "Sao Chính và Ý Nghĩa", false),
        builtin(
            r"\b(vận mệnh|tổng quan vận mệnh|vận số|vận hạn)\b",
            "Vận Mệnh Tổng Quan",
            false,
        ),
        builtin(
            r"\b(công danh|sự nghiệp|nghề nghiệp|công việc)\b",
            "Công Danh",
            false,
        ),
        builtin(r"\b(tài lộc|tiền bạc|tài chính|của cải)\b", "Tài Lộc", false),
        builtin(
            r"\b(tình duyên|hôn nhân|vợ chồng|bạn đời|tình cảm)\b",
            "Tình Duyên",
            false,
        ),
        builtin(r"\b(sức khỏe|bệnh tật|thể trạng)\b", "Sức Khỏe", false),
        builtin(
            r"\b(kết luận|lời khuyên|lời dặn|nhận xét|đề xuất)\b",
            "Kết Luận và Lời Khuyên",
            false,
        ),
        builtin(
            r"\b(lưu ý|chú ý|cảnh báo|ghi nhớ|để ý)\b",
            "Lưu Ý",
            true,
        ),
    ];

    Vocabulary::new(titles, rules)
}

fn build_english() -> Vocabulary {
    let titles = Titles {
        introduction: "Introduction".into(),
        stems_and_calendar: "Stems and Lunar Calendar".into(),
        element_and_polarity: "Element and Yin-Yang".into(),
        fixed_factors: "Fixed Factors".into(),
        palaces: "Life and Body Palaces".into(),
        main_stars: "Main Stars and Meaning".into(),
        destiny_overview: "Destiny Overview".into(),
        career: "Career".into(),
        wealth: "Wealth".into(),
        relationships: "Relationships".into(),
        health: "Health".into(),
        conclusion: "Conclusion and Advice".into(),
        overview: "Overview".into(),
        highlights: "Highlights".into(),
        note: "Note".into(),
        error: "System Error".into(),
        system_notice: "System Notice".into(),
        untitled: "Reading Content".into(),
        opening_paragraph: "Introduction".into(),
        section_prefix: "Section".into(),
        catch_all: "Reading".into(),
    };

    let rules = vec![
        builtin(r"\b(introduction|overview|in general)\b", "Overview", false),
        builtin(
            r"\b(highlights?|strengths?|traits?|personality)\b",
            "Highlights",
            false,
        ),
        builtin(
            r"\b(heavenly stems?|earthly branch(es)?|lunar calendar)\b",
            "Stems and Lunar Calendar",
            false,
        ),
        builtin(r"\b(element|yin|yang)\b", "Element and Yin-Yang", false),
        builtin(r"\b(life palace|body palace)\b", "Life and Body Palaces", false),
        builtin(r"\b(main stars?|constellations?)\b", "Main Stars and Meaning", false),
        builtin(r"\b(destiny|fortune|luck)\b", "Destiny Overview", false),
        builtin(r"\b(career|profession|job|work)\b", "Career", false),
        builtin(r"\b(wealth|money|finances?|financial)\b", "Wealth", false),
        builtin(
            r"\b(love|marriage|relationships?|partner|romance)\b",
            "Relationships",
            false,
        ),
        builtin(r"\b(health|illness|wellbeing)\b", "Health", false),
        builtin(
            r"\b(conclusion|advice|recommend(ation)?s?|in summary)\b",
            "Conclusion and Advice",
            false,
        ),
        builtin(r"\b(note|caution|warning|remember)\b", "Note", true),
    ];

    Vocabulary::new(titles, rules)
}
