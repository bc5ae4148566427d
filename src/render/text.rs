//! Plain text rendering for normalized documents.

use crate::error::Result;
use crate::model::{Document, Section};

use super::RenderOptions;

/// Convert a document to plain text.
///
/// Each section is its title followed by its body; subsections are indented
/// by `options.text_indent` spaces.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut output = String::new();
    let indent = " ".repeat(options.text_indent);

    for section in doc {
        push_section(&mut output, section, "");
        for sub in &section.subsections {
            push_section(&mut output, sub, &indent);
        }
    }

    Ok(output.trim().to_string())
}

fn push_section(output: &mut String, section: &Section, indent: &str) {
    output.push_str(indent);
    output.push_str(section.title.trim());
    output.push('\n');
    for line in section.content_lines() {
        if !line.trim().is_empty() {
            output.push_str(indent);
            output.push_str(line.trim_end());
        }
        output.push('\n');
    }
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Origin;

    #[test]
    fn test_to_text() {
        let doc = Document::from_sections(
            Origin::Detailed,
            vec![
                Section::plain("Intro", "Hello,\nworld!"),
                Section::group("Overview", vec![Section::plain("Career", "good")]),
            ],
        );

        let result = to_text(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(
            result,
            "Intro\nHello,\nworld!\n\nOverview\n\n  Career\n  good"
        );
    }

    #[test]
    fn test_marked_up_lines() {
        let doc = Document::from_sections(
            Origin::Headings,
            vec![Section::marked_up("A", "foo<br />bar<br />")],
        );
        let result = to_text(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(result, "A\nfoo\nbar");
    }
}
