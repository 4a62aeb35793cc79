//! File-based state storage for SMITE.
//!
//! The task-progress record is a single pretty-printed JSON file, by
//! default `~/.smite/state.json`. Writes replace the whole file via temp
//! file + rename.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::core::TaskState;
use crate::error::Result;
use crate::storage::{LoadedState, StateStore};
use crate::util::{read_to_string_limited, write_atomic};

/// File-based state storage.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    /// Location of the state file.
    path: PathBuf,
}

impl FileStateStore {
    /// Create a store at the path the configuration resolves to.
    pub fn new(config: &Config) -> Self {
        Self::with_path(config.state_path())
    }

    /// Create a store at an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> Result<LoadedState> {
        if !self.path.exists() {
            return Ok(LoadedState::Missing);
        }

        let content = read_to_string_limited(&self.path)?;

        match serde_json::from_str::<TaskState>(&content) {
            Ok(state) => Ok(LoadedState::Found(state)),
            Err(e) => {
                tracing::debug!(
                    path = %self.path.display(),
                    error = %e,
                    "state file is malformed, starting from empty state"
                );
                Ok(LoadedState::Malformed)
            }
        }
    }

    fn save(&self, state: &TaskState) -> Result<()> {
        let json = serde_json::to_string_pretty(state)?;
        write_atomic(&self.path, &json)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::traits::tests::test_state_store_roundtrip;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_store() -> (FileStateStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::with_path(dir.path().join("state.json"));
        (store, dir)
    }

    #[test]
    fn test_file_state_store_roundtrip() {
        let (store, _dir) = create_test_store();
        test_state_store_roundtrip(&store);
    }

    #[test]
    fn test_load_malformed_json() {
        let (store, _dir) = create_test_store();
        fs::write(store.path(), "{ not json").unwrap();

        assert_eq!(store.load().unwrap(), LoadedState::Malformed);
    }

    #[test]
    fn test_load_non_object_json() {
        let (store, _dir) = create_test_store();
        fs::write(store.path(), "[1, 2, 3]").unwrap();

        assert_eq!(store.load().unwrap(), LoadedState::Malformed);
    }

    #[test]
    fn test_load_wrong_field_type() {
        let (store, _dir) = create_test_store();
        fs::write(store.path(), r#"{"taskCount": "many"}"#).unwrap();

        assert_eq!(store.load().unwrap(), LoadedState::Malformed);
    }

    #[test]
    fn test_save_is_pretty_printed() {
        let (store, _dir) = create_test_store();
        store.save(&TaskState::with_count(3)).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "{\n  \"taskCount\": 3\n}");
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let store = FileStateStore::with_path(&path);

        store.save(&TaskState::with_count(1)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_preserves_extra_fields() {
        let (store, _dir) = create_test_store();
        fs::write(store.path(), r#"{"taskCount": 1, "theme": "dark"}"#).unwrap();

        let state = store.load().unwrap().into_state();
        store.save(&state).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw["taskCount"], 1);
    }

    #[test]
    fn test_new_uses_configured_path() {
        let mut config = Config::default();
        config.state.path = Some(PathBuf::from("/var/tmp/smite/state.json"));

        let store = FileStateStore::new(&config);
        assert_eq!(store.path(), Path::new("/var/tmp/smite/state.json"));
    }

    #[test]
    fn test_location() {
        let store = FileStateStore::with_path("/tmp/smite/state.json");
        assert_eq!(store.location(), "/tmp/smite/state.json");
    }
}
