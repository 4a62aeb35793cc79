//! SMITE - advisory hooks for Claude Code
//!
//! SMITE plugs into the Claude Code hook lifecycle and prints short
//! advisories: safer command habits, semantic-search tips, a welcome banner
//! and a running count of created tasks. Hooks are fail-open; they never
//! block the session.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod hooks;
pub mod storage;
pub mod util;

pub use config::Config;
pub use core::{record_event, Advisory, AdvisoryKind, RuleSet, TaskEvent, TaskState, Transition};
pub use error::{Result, SmiteError};
pub use hooks::{HookReport, HookRunner, HookType};
pub use storage::{FileStateStore, LoadedState, MemoryStateStore, StateStore};

// CLI commands
pub use cli::{InitCommand, StatusCommand};
