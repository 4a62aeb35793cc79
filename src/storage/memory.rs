//! In-memory state storage for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::core::TaskState;
use crate::error::{Result, SmiteError};
use crate::storage::{LoadedState, StateStore};

/// In-memory state store for testing.
///
/// Can be primed with a record, marked malformed, or made to fail writes,
/// and counts how many times `save` was called.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    loaded: RwLock<Option<LoadedState>>,
    fail_saves: bool,
    saves: AtomicUsize,
}

impl MemoryStateStore {
    /// Create an empty store (no record yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `state`.
    pub fn with_state(state: TaskState) -> Self {
        Self {
            loaded: RwLock::new(Some(LoadedState::Found(state))),
            ..Self::default()
        }
    }

    /// Create a store whose record cannot be decoded.
    pub fn malformed() -> Self {
        Self {
            loaded: RwLock::new(Some(LoadedState::Malformed)),
            ..Self::default()
        }
    }

    /// Create a store whose writes always fail.
    pub fn failing_saves() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    /// The currently stored record, if a well-formed one exists.
    pub fn state(&self) -> Option<TaskState> {
        match self.loaded.read().unwrap().as_ref() {
            Some(LoadedState::Found(state)) => Some(state.clone()),
            _ => None,
        }
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> Result<LoadedState> {
        Ok(self
            .loaded
            .read()
            .unwrap()
            .clone()
            .unwrap_or(LoadedState::Missing))
    }

    fn save(&self, state: &TaskState) -> Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves {
            return Err(SmiteError::storage(
                "memory",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only store"),
            ));
        }
        *self.loaded.write().unwrap() = Some(LoadedState::Found(state.clone()));
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
