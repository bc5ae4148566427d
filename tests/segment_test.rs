//! Integration tests for the prose fallback path.

use augur::normalize::{segment, Diagnostics, KeywordRule, Vocabulary};
use augur::{normalize, normalize_with_options, NormalizeOptions, Origin, SectionRole};

fn long_paragraph(seed: &str) -> String {
    seed.repeat(250 / seed.chars().count() + 1)
}

#[test]
fn test_markdown_reading_with_preamble_and_note() {
    let raw = "Dưới đây là phân tích của bạn.\n\n\
               ## Tổng Quan\n\
               Năm nay nhiều cơ hội.\n\
               Hãy chủ động.\n\n\
               ## Lưu Ý\n\
               Thiếu giờ sinh.\n\n\
               ## **Công Danh**\n\
               Thăng tiến.";
    let doc = normalize(raw);

    assert_eq!(doc.origin(), Origin::Headings);
    assert_eq!(
        doc.titles(),
        vec!["Nội dung tử vi", "Tổng Quan", "Công Danh", "Lưu Ý"]
    );
    assert_eq!(
        doc.sections()[1].content,
        "Năm nay nhiều cơ hội.<br />Hãy chủ động.<br />"
    );
    assert_eq!(doc.note().unwrap().role, SectionRole::Note);
}

#[test]
fn test_deeper_headings_stay_in_content() {
    let doc = normalize("## Tài Lộc\n### Chi tiết\nỔn định");
    assert_eq!(doc.titles(), vec!["Tài Lộc"]);
    assert_eq!(doc.sections()[0].content, "### Chi tiết<br />Ổn định<br />");
}

#[test]
fn test_only_whole_note_headings_are_notes() {
    let doc = normalize("## Sức khỏe cần chú ý\nngủ sớm\n## Công Danh\ntốt\n## Lưu Ý\nx");
    assert_eq!(doc.titles(), vec!["Sức khỏe cần chú ý", "Công Danh", "Lưu Ý"]);
    let roles: Vec<SectionRole> = doc.sections().iter().map(|s| s.role).collect();
    assert_eq!(
        roles,
        vec![SectionRole::Normal, SectionRole::Normal, SectionRole::Note]
    );
    assert_eq!(doc.note().unwrap().content, "x<br />");
}

#[test]
fn test_paragraph_classification_order() {
    let intro = long_paragraph("Chào bạn thân mến. ");
    let raw = format!(
        "{intro}\n\n\
         Vận hạn năm nay khá tốt.\n\n\
         Sức khỏe cần chú ý.\n\n\
         Lời khuyên: giữ bình tĩnh.\n\n\
         Một đoạn không rõ chủ đề."
    );
    let doc = normalize(&raw);

    assert_eq!(doc.origin(), Origin::Paragraphs);
    // "chú ý" matches the note rule, but health comes first in the table
    assert_eq!(
        doc.titles(),
        vec![
            "Phần 1",
            "Vận Mệnh Tổng Quan",
            "Sức Khỏe",
            "Kết Luận và Lời Khuyên",
            "Phần 5"
        ]
    );
}

#[test]
fn test_note_paragraph_moves_last() {
    let raw = "Mở đầu ngắn.\n\nCảnh báo: thông tin chưa đầy đủ.\n\nCông việc thuận lợi.";
    let doc = normalize(raw);
    assert_eq!(doc.titles(), vec!["Giới thiệu", "Công Danh", "Lưu Ý"]);
    assert!(doc.sections()[2].is_note());
}

#[test]
fn test_intro_limit_is_configurable() {
    let options = NormalizeOptions::new().with_intro_limit(5);
    let doc = normalize_with_options("Mở đầu ngắn.\n\nĐoạn hai.", &options).document;
    assert_eq!(doc.titles(), vec!["Phần 1", "Phần 2"]);
}

#[test]
fn test_custom_keyword_rules() {
    let rules = vec![
        KeywordRule::new(r"\bla bàn\b", "La Bàn", false).unwrap(),
        KeywordRule::new(r"\bghi chú\b", "Ghi Chú", true).unwrap(),
    ];
    let vocabulary = Vocabulary::vietnamese().as_ref().clone().with_rules(rules);
    let options = NormalizeOptions::new().with_vocabulary(vocabulary);

    let raw = format!(
        "{}\n\nGhi chú cuối.\n\nHướng la bàn tốt.",
        long_paragraph("Không khớp. ")
    );
    let doc = segment(&raw, &options, &mut Diagnostics::new());
    assert_eq!(doc.titles(), vec!["Phần 1", "La Bàn", "Ghi Chú"]);
}

#[test]
fn test_whitespace_only_separators() {
    let doc = normalize("Đoạn một.\n \t \nTài chính tốt.\n\n\n\nSức khỏe ổn.");
    assert_eq!(doc.titles(), vec!["Giới thiệu", "Tài Lộc", "Sức Khỏe"]);
}

#[test]
fn test_catch_all_for_empty_headings() {
    let doc = normalize("## \n## \n\n## ");
    assert_eq!(doc.origin(), Origin::CatchAll);
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.titles(), vec!["Phân tích tử vi"]);
}
