//! Rendering module for turning normalized documents into output formats.
//!
//! Implements the display contract for non-UI consumers: error documents
//! render as a single notice, notes render last and visually distinct,
//! subsections render one level under their parent, and line-break markers
//! render as line breaks.

mod json;
mod markdown;
mod options;
mod text;

pub use json::{to_json, to_source_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::{NoteStyle, RenderOptions};
pub use text::to_text;
