//! Core types and logic for SMITE.
//!
//! Everything in here is pure: advisories, the substring rule tables, and
//! the task-progress state transitions. I/O lives in `hooks` and `storage`.

pub mod advisory;
pub mod progress;
pub mod rules;

pub use advisory::{Advisory, AdvisoryKind};
pub use progress::{
    record_event, TaskEvent, TaskState, Transition, TASK_CREATE_TOOL, TASK_UPDATE_TOOL,
};
pub use rules::{Matching, Rule, RuleSet, Triggers};
