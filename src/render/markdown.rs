//! Markdown rendering for normalized documents.

use crate::error::Result;
use crate::model::{Document, Section, SectionRole};

use super::{NoteStyle, RenderOptions};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(self, doc: &Document) -> Result<String> {
        let mut output = String::new();

        if self.options.include_frontmatter {
            output.push_str("---\n");
            output.push_str(&format!("origin: {}\n", doc.origin()));
            output.push_str(&format!("sections: {}\n", doc.len()));
            output.push_str("---\n\n");
        }

        for section in doc {
            self.render_section(&mut output, section);
        }

        Ok(output.trim().to_string())
    }

    fn render_section(&self, output: &mut String, section: &Section) {
        match (section.role, self.options.note_style) {
            (SectionRole::Note, NoteStyle::Callout) => self.render_callout(output, "NOTE", section),
            (SectionRole::Error, NoteStyle::Callout) => {
                self.render_callout(output, "CAUTION", section)
            }
            _ => {
                self.render_heading(output, &section.title, self.options.heading_level);
                self.render_body(output, &section.content_lines());
                for sub in &section.subsections {
                    self.render_heading(output, &sub.title, self.options.heading_level + 1);
                    self.render_body(output, &sub.content_lines());
                }
            }
        }
    }

    fn render_heading(&self, output: &mut String, title: &str, level: u8) {
        output.push_str(&"#".repeat(level as usize));
        output.push(' ');
        output.push_str(title.trim());
        output.push_str("\n\n");
    }

    fn render_body(&self, output: &mut String, lines: &[&str]) {
        if lines.is_empty() {
            return;
        }
        for (i, line) in lines.iter().enumerate() {
            let line = line.trim_end();
            output.push_str(line);
            if self.hard_break_after(lines, i) {
                output.push_str("  ");
            }
            output.push('\n');
        }
        output.push('\n');
    }

    fn render_callout(&self, output: &mut String, kind: &str, section: &Section) {
        output.push_str(&format!("> [!{}]\n", kind));
        output.push_str(&format!("> **{}**\n", section.title.trim()));

        let lines = section.content_lines();
        for (i, line) in lines.iter().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                output.push_str(">\n");
                continue;
            }
            output.push_str("> ");
            output.push_str(line);
            if self.hard_break_after(&lines, i) {
                output.push_str("  ");
            }
            output.push('\n');
        }
        output.push('\n');
    }

    /// Two trailing spaces between consecutive non-blank lines.
    fn hard_break_after(&self, lines: &[&str], index: usize) -> bool {
        self.options.preserve_line_breaks
            && !lines[index].trim().is_empty()
            && lines.get(index + 1).is_some_and(|next| !next.trim().is_empty())
    }
}
