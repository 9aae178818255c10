//! Atomic file helpers shared by the stores, settings and budget sidecar
//!
//! Writes go through a temp file and a rename so a crash never leaves a
//! half-written document behind.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{TrackerError, TrackerResult};

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> TrackerError {
    TrackerError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Read a JSON document; a missing file yields `T::default()`
pub fn read_json<T, P>(path: P) -> TrackerResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        tracing::trace!(path = %path.display(), "no file yet, using empty state");
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| storage_error("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_error("parse", path, e))
}

/// Replace `path` with the pretty-printed JSON of `data`
pub fn write_json_atomic<T, P>(path: P, data: &T) -> TrackerResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = serde_json::to_vec_pretty(data).map_err(|e| storage_error("serialize", path, e))?;
    write_bytes_atomic(path, &bytes)
}

/// Replace `path` with `bytes`; the file is either fully written or untouched
pub fn write_bytes_atomic(path: &Path, bytes: &[u8]) -> TrackerResult<()> {
    ensure_parent_dir(path)?;

    // Same directory as the target, otherwise rename is not atomic
    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let result = File::create(&temp_path)
        .map_err(|e| storage_error("create", &temp_path, e))
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            writer.write_all(bytes).map_err(|e| storage_error("write", &temp_path, e))?;
            writer.flush().map_err(|e| storage_error("flush", &temp_path, e))?;
            writer
                .get_ref()
                .sync_all()
                .map_err(|e| storage_error("sync", &temp_path, e))
        })
        .and_then(|()| {
            fs::rename(&temp_path, path).map_err(|e| storage_error("replace", path, e))
        });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Create the parent directory of `path` if it is missing
pub fn ensure_parent_dir(path: &Path) -> TrackerResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| storage_error("create directory", parent, e))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let data: TestData = read_json(&path).unwrap();
        assert_eq!(data, TestData::default());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        write_json_atomic(&path, &data).unwrap();
        let loaded: TestData = read_json(&path).unwrap();
        assert_eq!(data, loaded);
        assert!(!temp_dir.path().join("test.json.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.json");

        write_json_atomic(&path, &TestData::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_overwrite_replaces_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        write_json_atomic(&path, &TestData { name: "old".into(), value: 1 }).unwrap();
        write_json_atomic(&path, &TestData { name: "new".into(), value: 2 }).unwrap();

        let loaded: TestData = read_json(&path).unwrap();
        assert_eq!(loaded.name, "new");
    }

    #[test]
    fn test_write_bytes_atomic() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("book.xlsx");

        write_bytes_atomic(&path, b"first").unwrap();
        write_bytes_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
        assert!(!temp_dir.path().join("book.xlsx.tmp").exists());
    }

    #[test]
    fn test_read_invalid_json_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json::<TestData, _>(&path).unwrap_err();
        assert!(err.is_storage());
        assert!(err.to_string().contains("Failed to parse"));
        assert!(err.to_string().contains("broken.json"));
    }
}
