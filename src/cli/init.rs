//! Init command for SMITE.
//!
//! Scaffolds the user-level SMITE directory and a documented config file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Options for the init command.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Force overwrite existing files.
    pub force: bool,
}

/// Output format for the init command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitOutput {
    /// Whether initialization was successful.
    pub success: bool,
    /// Files and directories created.
    pub created: Vec<String>,
    /// Files that already existed (skipped).
    pub skipped: Vec<String>,
    /// Error message if initialization failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InitOutput {
    /// Create a successful output.
    pub fn success(created: Vec<String>, skipped: Vec<String>) -> Self {
        Self {
            success: true,
            created,
            skipped,
            error: None,
        }
    }

    /// Create a failed output, reporting whatever was created before the failure.
    pub fn failure(error: impl Into<String>, created: Vec<String>, skipped: Vec<String>) -> Self {
        Self {
            success: false,
            created,
            skipped,
            error: Some(error.into()),
        }
    }

    /// Format as human-readable text.
    pub fn format_text(&self) -> String {
        let mut lines = Vec::new();
        for path in &self.created {
            lines.push(format!("created  {}", path));
        }
        for path in &self.skipped {
            lines.push(format!("exists   {}", path));
        }
        if let Some(error) = &self.error {
            lines.push(format!("Init failed: {}", error));
        }
        lines.join("\n")
    }
}

/// Default config.toml content.
pub const DEFAULT_CONFIG: &str = r#"# SMITE Configuration
#
# Project-level overrides go in .smite/config.toml.
# Environment variables (SMITE_STATE_FILE, SMITE_DISABLED_HOOKS) win over both.

# Task-progress state
[state]
# path = "/absolute/path/to/state.json"
# Rewrite the state file after non-task tool events too
rewrite_on_unrecognized = true

[hooks]
# Match prompt-check against the prompt field only, not the whole input
# prompt_field_only = false

# Enable or disable individual hooks
# Names: bash-validate, grep-validate, prompt-check, session-start, task-progress
[hooks.overrides]
# grep-validate = false
"#;

/// The init command implementation.
pub struct InitCommand {
    home: PathBuf,
}

impl InitCommand {
    /// Create a new init command targeting the given SMITE home directory.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Run the init command.
    pub fn run(&self, options: &InitOptions) -> InitOutput {
        let mut created = Vec::new();
        let mut skipped = Vec::new();

        match self.ensure_dir(&self.home) {
            Ok(true) => created.push(self.home.display().to_string()),
            Ok(false) => skipped.push(self.home.display().to_string()),
            Err(e) => return InitOutput::failure(e, created, skipped),
        }

        let config_path = self.home.join("config.toml");
        match self.ensure_file(&config_path, DEFAULT_CONFIG, options.force) {
            Ok(true) => created.push(config_path.display().to_string()),
            Ok(false) => skipped.push(config_path.display().to_string()),
            Err(e) => return InitOutput::failure(e, created, skipped),
        }

        InitOutput::success(created, skipped)
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &InitOutput, options: &InitOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            output.format_text()
        }
    }

    /// Ensure a directory exists.
    /// Returns Ok(true) if created, Ok(false) if already exists.
    fn ensure_dir(&self, path: &Path) -> Result<bool, String> {
        if path.exists() {
            if path.is_dir() {
                return Ok(false);
            }
            return Err(format!("{} exists but is not a directory", path.display()));
        }

        fs::create_dir_all(path)
            .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))?;

        Ok(true)
    }

    /// Ensure a file exists with the given content.
    /// Returns Ok(true) if written, Ok(false) if already exists.
    fn ensure_file(&self, path: &Path, content: &str, force: bool) -> Result<bool, String> {
        if path.exists() && !force {
            return Ok(false);
        }

        fs::write(path, content)
            .map_err(|e| format!("Failed to write file {}: {}", path.display(), e))?;

        Ok(true)
    }
}
