//! State storage traits for SMITE.
//!
//! This module defines the `StateStore` trait, the thin read/write
//! boundary around the task-progress record.

use crate::core::TaskState;
use crate::error::Result;

/// What a store found when asked for the current record.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedState {
    /// A well-formed record.
    Found(TaskState),
    /// No record exists yet.
    Missing,
    /// A record exists but could not be decoded.
    Malformed,
}

impl LoadedState {
    /// Resolve to a usable state, substituting the empty record on fallback.
    pub fn into_state(self) -> TaskState {
        match self {
            Self::Found(state) => state,
            Self::Missing | Self::Malformed => TaskState::default(),
        }
    }
}

/// Trait for task-progress state backends.
///
/// Every mutating invocation fully reads and fully rewrites the record.
/// There is no locking; concurrent writers race and the last one wins.
pub trait StateStore: Send + Sync {
    /// Read the current record.
    ///
    /// Absent and undecodable records are reported through `LoadedState`;
    /// `Err` is reserved for I/O failures.
    fn load(&self) -> Result<LoadedState>;

    /// Replace the stored record with `state`.
    fn save(&self, state: &TaskState) -> Result<()>;

    /// Human-readable location of the record, for status output.
    fn location(&self) -> String;
}
