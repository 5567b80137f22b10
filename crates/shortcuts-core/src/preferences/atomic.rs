//! Atomic file operations for JSON persistence.
//!
//! Writes go to a temp file with a PID suffix, are fsynced, and are then
//! renamed over the target so a power cut never leaves half a settings file.

use crate::error::{Result, ShortcutError};
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::process;
use tracing::{debug, warn};

/// Read and parse a JSON file.
///
/// Returns `None` if the file doesn't exist, or an error if reading or parsing fails.
pub fn atomic_read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| ShortcutError::io(format!("Failed to read {}", path.display()), path, e))?;

    let data: T = serde_json::from_str(&contents).map_err(|e| ShortcutError::Json {
        message: format!("Failed to parse {}: {}", path.display(), e),
        source: Some(e),
    })?;

    Ok(Some(data))
}

/// Write data to a JSON file atomically.
///
/// 1. Serializes data to `<name>.json.<pid>.tmp`
/// 2. Syncs the temp file to disk
/// 3. Optionally copies the previous file to `.json.bak`
/// 4. Renames the temp file over the target
pub fn atomic_write_json<T: Serialize>(path: &Path, data: &T, keep_backup: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                ShortcutError::io(
                    format!("Failed to create directory {}", parent.display()),
                    parent,
                    e,
                )
            })?;
        }
    }

    let temp_path = path.with_extension(format!("json.{}.tmp", process::id()));

    let serialized = serde_json::to_string_pretty(data).map_err(|e| ShortcutError::Json {
        message: format!("Failed to serialize data: {}", e),
        source: Some(e),
    })?;

    {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| {
                ShortcutError::io(
                    format!("Failed to create temp file {}", temp_path.display()),
                    &temp_path,
                    e,
                )
            })?;

        file.write_all(serialized.as_bytes()).map_err(|e| {
            ShortcutError::io(
                format!("Failed to write temp file {}", temp_path.display()),
                &temp_path,
                e,
            )
        })?;

        file.sync_all().map_err(|e| {
            ShortcutError::io(
                format!("Failed to sync temp file {}", temp_path.display()),
                &temp_path,
                e,
            )
        })?;
    }

    if keep_backup && path.exists() {
        let backup_path = path.with_extension("json.bak");
        if let Err(e) = fs::copy(path, &backup_path) {
            warn!("Failed to create backup {}: {}", backup_path.display(), e);
        } else {
            debug!("Created backup: {}", backup_path.display());
        }
    }

    fs::rename(&temp_path, path).map_err(|e| {
        if let Err(cleanup) = fs::remove_file(&temp_path) {
            warn!("Failed to remove temp file {}: {}", temp_path.display(), cleanup);
        }
        ShortcutError::io(
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                path.display()
            ),
            path,
            e,
        )
    })?;

    debug!("Atomically wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_atomic_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        atomic_write_json(&path, &data, false).unwrap();
        let read_data: Option<TestData> = atomic_read_json(&path).unwrap();
        assert_eq!(read_data, Some(data));

        // No temp file left behind
        let leftovers: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_atomic_write_creates_backup() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let first = TestData {
            name: "first".to_string(),
            value: 1,
        };
        let second = TestData {
            name: "second".to_string(),
            value: 2,
        };

        atomic_write_json(&path, &first, true).unwrap();
        atomic_write_json(&path, &second, true).unwrap();

        let backup: Option<TestData> =
            atomic_read_json(&path.with_extension("json.bak")).unwrap();
        assert_eq!(backup, Some(first));
        let current: Option<TestData> = atomic_read_json(&path).unwrap();
        assert_eq!(current, Some(second));
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        // A non-empty directory at the target makes the rename fail
        let path = temp_dir.path().join("settings.json");
        fs::create_dir_all(path.join("occupied")).unwrap();

        let data = TestData {
            name: "blocked".to_string(),
            value: 3,
        };
        assert!(atomic_write_json(&path, &data, false).is_err());

        let leftovers: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_atomic_read_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let result: Option<TestData> =
            atomic_read_json(&temp_dir.path().join("missing.json")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_atomic_read_malformed_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let result: Result<Option<TestData>> = atomic_read_json(&path);
        assert!(matches!(result, Err(ShortcutError::Json { .. })));
    }

    #[test]
    fn test_atomic_write_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".userdata").join("tg5040").join("s.json");
        atomic_write_json(&path, &TestData { name: "n".into(), value: 9 }, false).unwrap();
        assert!(path.exists());
    }
}
