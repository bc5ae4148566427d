//! Markdown segmenter: carve prose responses into titled sections.
//!
//! Used only when no structured payload could be recovered. Text with
//! level-2 headings is split on those headings; anything else is split on
//! blank lines and each paragraph is titled from the keyword table.

use super::diagnostics::{Diagnostics, Stage};
use super::options::NormalizeOptions;
use super::vocabulary::{Titles, Vocabulary};
use crate::model::{Document, Origin, Section, SectionRole, LINE_BREAK};
use regex::Regex;
use std::sync::LazyLock;

/// Marker that opens a section in heading mode.
pub const HEADING_MARKER: &str = "## ";

static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[ \t]*\n").unwrap());

/// Segment prose into a document.
///
/// Always returns a document; degenerate input ends up in a single
/// catch-all section.
pub fn segment(raw: &str, options: &NormalizeOptions, diagnostics: &mut Diagnostics) -> Document {
    let vocabulary = options.vocabulary.as_ref();

    let document = if raw.contains(HEADING_MARKER) {
        by_headings(raw, vocabulary, diagnostics)
    } else {
        by_paragraphs(raw, options, diagnostics)
    };

    if document.is_empty() {
        diagnostics.warn(Stage::Segment, "no sections found, wrapping whole input");
        return catch_all(raw, vocabulary.titles());
    }
    document
}

/// Wrap the whole input as one section.
pub fn catch_all(raw: &str, titles: &Titles) -> Document {
    Document::from_sections(
        Origin::CatchAll,
        vec![Section::marked_up(&titles.catch_all, mark_line_breaks(raw.trim()))],
    )
}

/// Replace newlines with the line-break marker.
pub fn mark_line_breaks(text: &str) -> String {
    text.replace('\n', LINE_BREAK)
}

fn by_headings(raw: &str, vocabulary: &Vocabulary, diagnostics: &mut Diagnostics) -> Document {
    let titles = vocabulary.titles();
    let mut sections = Vec::new();
    let mut current = Section::marked_up(&titles.untitled, String::new());
    let mut headings = 0usize;

    for line in raw.lines().map(str::trim) {
        if let Some(heading) = heading_text(line) {
            headings += 1;
            let mut title = heading_title(heading);
            if title.is_empty() {
                title = titles.positional(headings);
            }
            let role = if vocabulary.is_note_title(&title) {
                SectionRole::Note
            } else {
                SectionRole::Normal
            };
            let next = Section::marked_up(title, String::new()).with_role(role);
            sections.push(std::mem::replace(&mut current, next));
        } else if !line.is_empty() {
            current.content.push_str(line);
            current.content.push_str(LINE_BREAK);
        }
    }
    sections.push(current);

    diagnostics.debug(
        Stage::Segment,
        format!("split on {} level-2 headings", headings),
    );
    Document::from_sections(Origin::Headings, sections)
}

/// Text after a level-2 marker; a bare `##` is an empty heading.
fn heading_text(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("##")?;
    (rest.is_empty() || rest.starts_with(char::is_whitespace)).then_some(rest)
}

/// Strip trailing `#`s and wrapping bold markers from a heading.
fn heading_title(heading: &str) -> String {
    let title = heading.trim().trim_end_matches('#').trim();
    let title = title
        .strip_prefix("**")
        .and_then(|t| t.strip_suffix("**"))
        .unwrap_or(title);
    title.trim().to_string()
}

fn by_paragraphs(
    raw: &str,
    options: &NormalizeOptions,
    diagnostics: &mut Diagnostics,
) -> Document {
    let vocabulary = options.vocabulary.as_ref();
    let titles = vocabulary.titles();

    let sections: Vec<Section> = PARAGRAPH_BREAK
        .split(raw)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .enumerate()
        .map(|(index, paragraph)| {
            let content = mark_line_breaks(paragraph);
            if index == 0 && paragraph.chars().count() < options.intro_max_chars {
                return Section::marked_up(&titles.opening_paragraph, content);
            }
            match vocabulary.match_rule(paragraph) {
                Some(rule) if rule.is_note() => {
                    Section::marked_up(rule.title(), content).with_role(SectionRole::Note)
                }
                Some(rule) => Section::marked_up(rule.title(), content),
                None => Section::marked_up(titles.positional(index + 1), content),
            }
        })
        .collect();

    diagnostics.debug(
        Stage::Segment,
        format!("split into {} paragraphs", sections.len()),
    );
    Document::from_sections(Origin::Paragraphs, sections)
}
