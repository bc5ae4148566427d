//! Diagnostic events recorded while normalizing.
//!
//! The pipeline itself never logs. Each stage appends a [`Diagnostic`] and
//! the caller decides whether to forward them to the `log` facade with
//! [`Diagnostics::emit`].

use log::Level;
use std::fmt;

/// Pipeline stage that recorded a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Input preparation (Unicode and line endings)
    Prepare,
    /// Text cleaner
    Clean,
    /// Shape classifier
    Classify,
    /// Section builder
    Build,
    /// Short notice heuristic
    Notice,
    /// Markdown segmenter
    Segment,
}

impl Stage {
    /// Get a stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Prepare => "prepare",
            Stage::Clean => "clean",
            Stage::Classify => "classify",
            Stage::Build => "build",
            Stage::Notice => "notice",
            Stage::Segment => "segment",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Stage that recorded the event
    pub stage: Stage,
    /// Suggested log level
    pub level: Level,
    /// Human-readable description
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)
    }
}

/// Ordered collection of diagnostics for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    events: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event.
    pub fn push(&mut self, stage: Stage, level: Level, message: impl Into<String>) {
        self.events.push(Diagnostic {
            stage,
            level,
            message: message.into(),
        });
    }

    /// Record a debug-level event.
    pub fn debug(&mut self, stage: Stage, message: impl Into<String>) {
        self.push(stage, Level::Debug, message);
    }

    /// Record a warning.
    pub fn warn(&mut self, stage: Stage, message: impl Into<String>) {
        self.push(stage, Level::Warn, message);
    }

    /// Iterate over events in recording order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.events.iter()
    }

    /// Get the number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Check if any event was recorded by a stage.
    pub fn has_stage(&self, stage: Stage) -> bool {
        self.events.iter().any(|d| d.stage == stage)
    }

    /// Forward every event to the `log` facade.
    pub fn emit(&self) {
        for event in &self.events {
            log::log!(target: "augur", event.level, "{}", event);
        }
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
