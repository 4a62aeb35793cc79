//! User-facing CLI commands for SMITE.
//!
//! Hooks are run through `smite hook <name>`; the commands here are for
//! people, not for Claude Code.

pub mod init;
pub mod status;

pub use init::InitCommand;
pub use status::StatusCommand;
