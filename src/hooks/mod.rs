//! Hook integration for Claude Code.
//!
//! Each hook is invoked as its own process at one point in the session
//! lifecycle:
//!
//! - **bash-validate**: before a Bash command runs
//! - **grep-validate**: before the Grep tool runs
//! - **prompt-check**: when the user submits a prompt
//! - **session-start**: when a session starts
//! - **task-progress**: after a tool completes

pub mod input;
pub mod output;
pub mod runner;

pub use input::{parse_payload, read_all, read_stdin, HookPayload, ParsedPayload, PayloadStatus};
pub use output::{emit, emit_stderr, render};
pub use runner::{HookReport, HookRunner, HookType, StateOutcome};
