//! Section builder: map classified shapes onto canonical section lists.

use super::classify::{BasicReading, Classification, ClassifiedShape, DetailedReading, Field};
use super::diagnostics::{Diagnostics, Stage};
use super::schema;
use super::vocabulary::Titles;
use crate::model::{Document, Origin, Section, SectionRole};

/// Build a document from a classification.
///
/// Returns `None` only for [`ClassifiedShape::NotParseable`]. An error
/// payload short-circuits to a single error section and drops the note.
pub fn build(
    classification: Classification,
    titles: &Titles,
    diagnostics: &mut Diagnostics,
) -> Option<Document> {
    let Classification { shape, note } = classification;

    let (origin, mut sections) = match shape {
        ClassifiedShape::ErrorPayload(message) => {
            diagnostics.warn(Stage::Build, format!("upstream error: {}", message));
            return Some(Document::from_sections(
                Origin::Error,
                vec![Section::plain(&titles.error, message)
                    .with_role(SectionRole::Error)
                    .with_key(schema::ERROR)],
            ));
        }
        ClassifiedShape::Detailed(reading) => {
            (Origin::Detailed, detailed(reading, titles, diagnostics))
        }
        ClassifiedShape::Basic(reading) => (Origin::Basic, basic(reading, titles)),
        ClassifiedShape::GenericObject(fields) => {
            (Origin::Generic, fields_to_sections(fields, 0, titles))
        }
        ClassifiedShape::NotParseable => return None,
    };

    if let Some(note) = note {
        sections.push(
            Section::plain(&titles.note, note)
                .with_role(SectionRole::Note)
                .with_key(schema::NOTE),
        );
    }

    diagnostics.debug(
        Stage::Build,
        format!("built {} sections from {} reading", sections.len(), origin),
    );
    Some(Document::from_sections(origin, sections))
}

fn detailed(
    reading: DetailedReading,
    titles: &Titles,
    diagnostics: &mut Diagnostics,
) -> Vec<Section> {
    let DetailedReading {
        introduction,
        stems_and_calendar,
        element_and_polarity,
        fixed_factors,
        palaces,
        main_stars,
        destiny,
        conclusion,
    } = reading;

    let mut sections = Vec::with_capacity(9);
    push_text(&mut sections, &titles.introduction, schema::INTRODUCTION, Some(introduction));
    push_text(
        &mut sections,
        &titles.stems_and_calendar,
        schema::STEMS_AND_CALENDAR,
        Some(stems_and_calendar),
    );
    push_text(
        &mut sections,
        &titles.element_and_polarity,
        schema::ELEMENT_AND_POLARITY,
        Some(element_and_polarity),
    );
    push_text(&mut sections, &titles.fixed_factors, schema::FIXED_FACTORS, fixed_factors);
    push_text(&mut sections, &titles.palaces, schema::PALACES, palaces);
    push_text(&mut sections, &titles.main_stars, schema::MAIN_STARS, main_stars);

    let mut subsections = Vec::with_capacity(4);
    push_text(&mut subsections, &titles.career, schema::CAREER, destiny.career);
    push_text(&mut subsections, &titles.wealth, schema::WEALTH, destiny.wealth);
    push_text(
        &mut subsections,
        &titles.relationships,
        schema::RELATIONSHIPS,
        destiny.relationships,
    );
    push_text(&mut subsections, &titles.health, schema::HEALTH, destiny.health);

    if subsections.is_empty() {
        diagnostics.warn(Stage::Build, "destiny overview has no usable attributes");
    } else {
        sections.push(
            Section::group(&titles.destiny_overview, subsections)
                .with_key(schema::DESTINY_OVERVIEW),
        );
    }

    push_text(&mut sections, &titles.conclusion, schema::CONCLUSION, conclusion);
    sections
}

/// Push a plain section when the value is non-blank text.
fn push_text(sections: &mut Vec<Section>, title: &str, key: &str, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        sections.push(Section::plain(title, value).with_key(key));
    }
}

fn basic(reading: BasicReading, titles: &Titles) -> Vec<Section> {
    let mut sections = vec![
        Section::plain(&titles.overview, reading.overview).with_key(schema::OVERVIEW),
        Section::plain(&titles.highlights, reading.highlights).with_key(schema::HIGHLIGHTS),
    ];
    let offset = sections.len();
    sections.extend(fields_to_sections(reading.extras, offset, titles));
    sections
}

/// One section per field, titled from its key.
fn fields_to_sections(fields: Vec<Field>, offset: usize, titles: &Titles) -> Vec<Section> {
    fields
        .into_iter()
        .enumerate()
        .map(|(index, field)| {
            let mut title = title_from_key(&field.key);
            if title.is_empty() {
                title = titles.positional(offset + index + 1);
            }
            Section::plain(title, field.value).with_key(field.key)
        })
        .collect()
}

/// Turn a camelCase, snake_case or kebab-case key into a spaced title.
///
/// `ketQuaKhac` becomes `Ket Qua Khac`; `userID` becomes `User ID`.
pub fn title_from_key(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 8);
    let mut prev: Option<char> = None;

    for c in key.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            spaced.push(' ');
            prev = None;
            continue;
        }
        if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_numeric()) {
            spaced.push(' ');
        }
        spaced.push(c);
        prev = Some(c);
    }

    spaced
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::classify::DestinyOverview;
    use crate::normalize::vocabulary::Vocabulary;

    fn titles() -> Titles {
        Vocabulary::vietnamese().titles().clone()
    }

    #[test]
    fn test_title_from_key() {
        assert_eq!(title_from_key("ketQuaKhac"), "Ket Qua Khac");
        assert_eq!(title_from_key("tong_quan"), "Tong Quan");
        assert_eq!(title_from_key("lucky-number"), "Lucky Number");
        assert_eq!(title_from_key("userID"), "User ID");
        assert_eq!(title_from_key("day2Summary"), "Day2 Summary");
        assert_eq!(title_from_key("ý_nghĩa"), "Ý Nghĩa");
        assert_eq!(title_from_key("__"), "");
    }

    #[test]
    fn test_empty_key_gets_positional_title() {
        let sections = fields_to_sections(
            vec![Field {
                key: String::new(),
                value: "v".into(),
            }],
            2,
            &titles(),
        );
        assert_eq!(sections[0].title, "Phần 3");
    }

    #[test]
    fn test_not_parseable_builds_nothing() {
        let classification = Classification {
            shape: ClassifiedShape::NotParseable,
            note: Some("n".into()),
        };
        assert!(build(classification, &titles(), &mut Diagnostics::new()).is_none());
    }

    #[test]
    fn test_error_drops_note() {
        let classification = Classification {
            shape: ClassifiedShape::ErrorPayload("boom".into()),
            note: Some("n".into()),
        };
        let doc = build(classification, &titles(), &mut Diagnostics::new()).unwrap();
        assert_eq!(doc.len(), 1);
        assert!(doc.is_error());
        assert_eq!(doc.sections()[0].title, "Lỗi từ hệ thống");
    }

    #[test]
    fn test_detailed_skips_blank_fields_and_empty_group() {
        let reading = DetailedReading {
            introduction: "intro".into(),
            stems_and_calendar: "  ".into(),
            element_and_polarity: "nap am".into(),
            fixed_factors: None,
            palaces: Some(String::new()),
            main_stars: Some("stars".into()),
            destiny: DestinyOverview {
                career: Some(" ".into()),
                ..Default::default()
            },
            conclusion: Some("end".into()),
        };
        let mut diagnostics = Diagnostics::new();
        let doc = build(
            Classification {
                shape: ClassifiedShape::Detailed(reading),
                note: None,
            },
            &titles(),
            &mut diagnostics,
        )
        .unwrap();

        assert_eq!(
            doc.titles(),
            vec![
                "Giới Thiệu Chung",
                "Nạp Âm và Âm Dương Mạng",
                "Các Sao Chính và Ý Nghĩa",
                "Kết Luận và Lời Khuyên"
            ]
        );
        assert!(diagnostics.has_stage(Stage::Build));
    }

    #[test]
    fn test_basic_extras_follow_core_fields() {
        let reading = BasicReading {
            overview: "x".into(),
            highlights: "y".into(),
            extras: vec![Field {
                key: "conSoMayMan".into(),
                value: "7".into(),
            }],
        };
        let doc = build(
            Classification {
                shape: ClassifiedShape::Basic(reading),
                note: Some("n".into()),
            },
            &titles(),
            &mut Diagnostics::new(),
        )
        .unwrap();

        assert_eq!(
            doc.titles(),
            vec!["Tổng Quan", "Điểm Nổi Bật", "Con So May Man", "Lưu Ý"]
        );
        assert_eq!(doc.sections()[2].key.as_deref(), Some("conSoMayMan"));
    }
}
