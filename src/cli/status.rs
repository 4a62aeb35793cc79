//! Status command for SMITE.
//!
//! Shows the persisted task-progress counter.

use serde::{Deserialize, Serialize};

use crate::storage::{LoadedState, StateStore};

/// Options for the status command.
#[derive(Debug, Clone, Default)]
pub struct StatusOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the status command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusOutput {
    /// Whether the command was successful.
    pub success: bool,
    /// Where the state lives.
    pub location: String,
    /// "found", "missing", or "malformed".
    pub source: String,
    /// Tasks created so far.
    pub task_count: u64,
    /// When the last task was created (RFC 3339).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_task: Option<String>,
    /// Error message if the command failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusOutput {
    /// Create a failed output.
    pub fn failure(location: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            location: location.into(),
            source: "unknown".to_string(),
            task_count: 0,
            last_task: None,
            error: Some(error.into()),
        }
    }

    /// Format as human-readable text.
    pub fn format_text(&self) -> String {
        if !self.success {
            return format!(
                "Status failed: {}",
                self.error.as_deref().unwrap_or("unknown error")
            );
        }

        let mut lines = vec![format!("Task progress ({})", self.location)];
        lines.push(format!("  Tasks created: {}", self.task_count));
        lines.push(format!(
            "  Last task:     {}",
            self.last_task.as_deref().unwrap_or("-")
        ));
        match self.source.as_str() {
            "missing" => lines.push("  (no state recorded yet)".to_string()),
            "malformed" => {
                lines.push("  (state file is malformed; next task event resets it)".to_string())
            }
            _ => {}
        }
        lines.join("\n")
    }
}

/// The status command implementation.
pub struct StatusCommand<S: StateStore> {
    store: S,
}

impl<S: StateStore> StatusCommand<S> {
    /// Create a new status command.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run the status command.
    pub fn run(&self) -> StatusOutput {
        let loaded = match self.store.load() {
            Ok(loaded) => loaded,
            Err(e) => return StatusOutput::failure(self.store.location(), e.to_string()),
        };

        let source = match &loaded {
            LoadedState::Found(_) => "found",
            LoadedState::Missing => "missing",
            LoadedState::Malformed => "malformed",
        };
        let state = loaded.into_state();

        StatusOutput {
            success: true,
            location: self.store.location(),
            source: source.to_string(),
            task_count: state.task_count,
            last_task: state.last_task_at().map(|t| t.to_rfc3339()),
            error: None,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &StatusOutput, options: &StatusOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            output.format_text()
        }
    }
}
