//! Document model types for normalized readings.
//!
//! This module defines the output of the normalization pipeline. A
//! [`Document`] is an ordered list of [`Section`]s, built fresh for every
//! upstream response and never mutated afterwards.

mod document;
mod section;

pub use document::{Document, Origin};
pub use section::{ContentKind, Section, SectionRole, LINE_BREAK};
