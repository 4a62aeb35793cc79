//! Task progress counter for the task-progress hook.
//!
//! The persisted record is tiny: how many tasks have been created and when
//! the last one was. All transitions are pure; reading and writing the
//! record is left to a [`StateStore`](crate::storage::StateStore).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::advisory::{Advisory, AdvisoryKind};

/// Host tool name that signals task creation.
pub const TASK_CREATE_TOOL: &str = "TaskCreate";

/// Host tool name that signals a task update.
pub const TASK_UPDATE_TOOL: &str = "TaskUpdate";

/// Persisted task-progress record.
///
/// Serialized as `{"taskCount": n, "lastTask": <unix millis>}`. Any other
/// fields found in the file are kept and written back untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskState {
    /// Number of tasks created over the life of the state file.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub task_count: u64,
    /// When the last task was created, in milliseconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_task: Option<i64>,
    /// Unrecognized fields, preserved across rewrites.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}

impl TaskState {
    /// Create a state with the given count and no timestamp.
    pub fn with_count(task_count: u64) -> Self {
        Self {
            task_count,
            ..Self::default()
        }
    }

    /// The last task time as a UTC timestamp, if recorded and in range.
    pub fn last_task_at(&self) -> Option<DateTime<Utc>> {
        self.last_task.and_then(DateTime::from_timestamp_millis)
    }
}

/// Task event kinds distinguished by the hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskEvent {
    /// A task was created.
    Created,
    /// A task was updated.
    Updated,
    /// Any other tool, or no tool name at all.
    Other,
}

impl TaskEvent {
    /// Classify a host tool name.
    pub fn from_tool_name(tool_name: Option<&str>) -> Self {
        match tool_name {
            Some(TASK_CREATE_TOOL) => Self::Created,
            Some(TASK_UPDATE_TOOL) => Self::Updated,
            _ => Self::Other,
        }
    }
}

/// The outcome of applying one event to the state.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// State after the event.
    pub state: TaskState,
    /// Advisory to show the user, if any.
    pub advisory: Option<Advisory>,
    /// Whether the event kind was recognized.
    pub recognized: bool,
}

/// Apply a task event to the state.
///
/// - `Created` bumps the counter, stamps `lastTask` with `now`, and reports
///   the new total.
/// - `Updated` reports the update and leaves the state alone.
/// - `Other` does nothing.
pub fn record_event(state: TaskState, event: TaskEvent, now: DateTime<Utc>) -> Transition {
    match event {
        TaskEvent::Created => {
            let mut state = state;
            state.task_count = state.task_count.saturating_add(1);
            state.last_task = Some(now.timestamp_millis());
            let advisory = Advisory::new(
                AdvisoryKind::TaskCreated,
                format!("📋 Task created (total: {})", state.task_count),
            )
            .with_hint("Use /tasks to see progress");
            Transition {
                state,
                advisory: Some(advisory),
                recognized: true,
            }
        }
        TaskEvent::Updated => Transition {
            state,
            advisory: Some(
                Advisory::new(AdvisoryKind::TaskUpdated, "📋 Task updated")
                    .with_hint("Use /tasks to see progress"),
            ),
            recognized: true,
        },
        TaskEvent::Other => Transition {
            state,
            advisory: None,
            recognized: false,
        },
    }
}
