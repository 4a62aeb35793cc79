//! Configuration loading for SMITE.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. Project config (`.smite/config.toml`)
//! 3. User config (`~/.smite/config.toml`)
//! 4. Defaults (lowest priority)
//!
//! All configuration is optional. Hooks run with defaults when no config
//! exists, and an unreadable config file is skipped rather than reported.

use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Result, SmiteError};
use crate::util::read_to_string_limited;

/// Main configuration struct for SMITE.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Task-progress state configuration.
    pub state: StateConfig,
    /// Per-hook configuration.
    pub hooks: HooksConfig,
}

/// Task-progress state configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StateConfig {
    /// Explicit state file location. Defaults to `<smite_home>/state.json`.
    pub path: Option<PathBuf>,
    /// Rewrite the state file even when the tool event is not a task event.
    pub rewrite_on_unrecognized: bool,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: None,
            rewrite_on_unrecognized: true,
        }
    }
}

/// Per-hook configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HooksConfig {
    /// Match prompt-check against the `prompt` field only, instead of the
    /// whole input body.
    pub prompt_field_only: bool,
    /// Per-hook enable/disable overrides, keyed by hook name.
    pub overrides: HashMap<String, bool>,
}

/// One config file as written. Every field is optional so that a layer
/// only overrides what it actually sets.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigLayer {
    pub state: StateLayer,
    pub hooks: HooksLayer,
}

/// The `[state]` table of a config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct StateLayer {
    pub path: Option<PathBuf>,
    pub rewrite_on_unrecognized: Option<bool>,
}

/// The `[hooks]` table of a config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct HooksLayer {
    pub prompt_field_only: Option<bool>,
    pub overrides: HashMap<String, bool>,
}

impl ConfigLayer {
    /// Parse a layer from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SmiteError::config(e.to_string()))
    }
}

impl Config {
    /// Load configuration with full precedence chain.
    pub fn load() -> Self {
        match env::current_dir() {
            Ok(cwd) => Self::load_from_cwd(&cwd),
            Err(_) => {
                let mut config = Config::default();
                if let Some(user_layer) = Self::load_user_config() {
                    config = config.merge(user_layer);
                }
                config.apply_env_overrides();
                config
            }
        }
    }

    /// Load configuration with a specific working directory.
    pub fn load_from_cwd(cwd: &Path) -> Self {
        let mut config = Config::default();

        if let Some(user_layer) = Self::load_user_config() {
            config = config.merge(user_layer);
        }

        if let Some(project_layer) = Self::load_project_config(cwd) {
            config = config.merge(project_layer);
        }

        config.apply_env_overrides();

        config
    }

    /// Load user config from `<smite_home>/config.toml`.
    fn load_user_config() -> Option<ConfigLayer> {
        Self::load_optional(&user_config_path())
    }

    /// Load project config from `.smite/config.toml` in the given directory.
    fn load_project_config(cwd: &Path) -> Option<ConfigLayer> {
        let path = cwd.join(".smite").join("config.toml");
        Self::load_optional(&path)
    }

    /// Load a config file that may legitimately be absent.
    fn load_optional(path: &Path) -> Option<ConfigLayer> {
        if !path.exists() {
            return None;
        }
        match Self::load_from_file(path) {
            Ok(layer) => Some(layer),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                None
            }
        }
    }

    /// Load one config layer from a specific file path.
    fn load_from_file(path: &Path) -> Result<ConfigLayer> {
        let content = read_to_string_limited(path)?;
        ConfigLayer::parse(&content)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // SMITE_STATE_FILE
        if let Ok(val) = env::var("SMITE_STATE_FILE") {
            if val.trim().is_empty() {
                tracing::warn!("SMITE_STATE_FILE is empty, ignoring");
            } else {
                self.state.path = Some(PathBuf::from(val.trim()));
            }
        }

        // SMITE_DISABLED_HOOKS (comma-separated)
        if let Ok(val) = env::var("SMITE_DISABLED_HOOKS") {
            for name in val.split(',').map(str::trim).filter(|n| !n.is_empty()) {
                self.hooks.overrides.insert(name.to_string(), false);
            }
        }
    }

    /// Merge a higher-priority layer into this config.
    ///
    /// Every value the layer sets wins. Hook overrides merge additively.
    pub fn merge(mut self, layer: ConfigLayer) -> Self {
        if let Some(path) = layer.state.path {
            self.state.path = Some(path);
        }
        if let Some(rewrite) = layer.state.rewrite_on_unrecognized {
            self.state.rewrite_on_unrecognized = rewrite;
        }
        if let Some(field_only) = layer.hooks.prompt_field_only {
            self.hooks.prompt_field_only = field_only;
        }

        self.hooks.overrides.extend(layer.hooks.overrides);

        self
    }

    /// Whether the named hook is enabled. Hooks are enabled unless overridden.
    pub fn is_hook_enabled(&self, name: &str) -> bool {
        self.hooks.overrides.get(name).copied().unwrap_or(true)
    }

    /// Resolve the task-progress state file path.
    pub fn state_path(&self) -> PathBuf {
        self.state.path.clone().unwrap_or_else(default_state_path)
    }
}

/// Get the SMITE home directory.
///
/// Checks `SMITE_HOME` first, then `~/.smite`, then a per-user directory
/// under `/tmp`. An empty `SMITE_HOME` is ignored.
pub fn smite_home() -> PathBuf {
    if let Ok(home) = env::var("SMITE_HOME") {
        if home.is_empty() {
            tracing::warn!("SMITE_HOME is empty, using default");
        } else {
            let path = PathBuf::from(&home);
            if path.is_absolute() {
                return path;
            }
            if let Ok(canonical) = path.canonicalize() {
                return canonical;
            }
            tracing::warn!("SMITE_HOME is relative and doesn't exist, using as-is");
            return path;
        }
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".smite");
    }

    let fallback_path = fallback_smite_home();
    tracing::warn!(
        "HOME not set, using fallback location: {}",
        fallback_path.display()
    );
    fallback_path
}

/// Get fallback home path when HOME is unavailable.
#[cfg(unix)]
fn fallback_smite_home() -> PathBuf {
    use std::os::unix::fs::MetadataExt;
    let uid = std::fs::metadata("/").map(|m| m.uid()).unwrap_or(0);
    PathBuf::from(format!("/tmp/smite-{}", uid))
}

/// Get fallback home path when HOME is unavailable.
#[cfg(not(unix))]
fn fallback_smite_home() -> PathBuf {
    std::env::temp_dir().join("smite")
}

/// Returns `<smite_home>/config.toml`.
pub fn user_config_path() -> PathBuf {
    smite_home().join("config.toml")
}

/// Returns `<smite_home>/state.json`.
pub fn default_state_path() -> PathBuf {
    smite_home().join("state.json")
}

/// Returns `<smite_home>/crash.log`.
pub fn crash_log_path() -> PathBuf {
    smite_home().join("crash.log")
}
