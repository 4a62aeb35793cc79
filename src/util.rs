//! Utility functions for SMITE.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, SmiteError};

/// Maximum size of a state or config file that will be read (1 MB).
///
/// The task-progress state is a handful of fields; anything larger is
/// treated as corrupt rather than loaded into memory.
pub const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Read a file into a string, refusing files larger than `MAX_FILE_SIZE`.
pub fn read_to_string_limited(path: &Path) -> Result<String> {
    read_to_string_with_limit(path, MAX_FILE_SIZE)
}

/// Read a file into a string with a custom size limit.
///
/// # Errors
///
/// Returns a storage error if the file cannot be read or exceeds `max_size`.
pub fn read_to_string_with_limit(path: &Path, max_size: u64) -> Result<String> {
    let metadata = fs::metadata(path).map_err(|e| SmiteError::storage(path, e))?;

    let size = metadata.len();
    if size > max_size {
        return Err(SmiteError::storage(
            path,
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("file too large ({} bytes, max {} bytes)", size, max_size),
            ),
        ));
    }

    fs::read_to_string(path).map_err(|e| SmiteError::storage(path, e))
}

/// Write `content` to `path` by way of a sibling temp file and a rename.
///
/// The whole file is replaced; readers never observe a partial write.
/// The parent directory is created if missing.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| SmiteError::storage(parent, e))?;
        }
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "state".to_string());
    let temp_path = path.with_file_name(format!(".{}.tmp", file_name));

    {
        let mut file =
            fs::File::create(&temp_path).map_err(|e| SmiteError::storage(&temp_path, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| SmiteError::storage(&temp_path, e))?;
        file.sync_all()
            .map_err(|e| SmiteError::storage(&temp_path, e))?;
    }

    fs::rename(&temp_path, path).map_err(|e| SmiteError::storage(path, e))?;

    Ok(())
}
