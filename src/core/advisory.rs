//! Advisory messages produced by hook rules.

use serde::{Deserialize, Serialize};

/// Which rule produced an advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    /// A filesystem search tool appears in a shell command.
    SearchTool,
    /// A destructive flag or operation appears in a shell command.
    DangerousCommand,
    /// The built-in Grep tool is about to run.
    GrepTool,
    /// The prompt asks about earlier work.
    MemoryRecall,
    /// The prompt asks for something to be built.
    BuildIntent,
    /// Session welcome banner.
    Welcome,
    /// A task was created.
    TaskCreated,
    /// A task was updated.
    TaskUpdated,
}

/// A short, human-readable, non-blocking suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    /// The rule that produced this advisory.
    pub kind: AdvisoryKind,
    /// First line of the message.
    pub headline: String,
    /// Optional indented follow-up line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Advisory {
    /// Create an advisory with a headline only.
    pub fn new(kind: AdvisoryKind, headline: impl Into<String>) -> Self {
        Self {
            kind,
            headline: headline.into(),
            hint: None,
        }
    }

    /// Attach a follow-up hint line.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Render as display text (headline, then the hint indented).
    pub fn text(&self) -> String {
        match &self.hint {
            Some(hint) => format!("{}\n   {}", self.headline, hint),
            None => self.headline.clone(),
        }
    }
}
