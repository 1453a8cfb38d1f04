use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::PreferenceStorage;
use crate::error::StorageError;

/// Directory name used under the platform data directory.
const APP_DIR: &str = "colorpref";

/// Storage persisted as a JSON object in `<dir>/<origin>.json`.
///
/// Each origin gets its own file, so different applications (or sites)
/// sharing a directory do not see each other's values. A missing file reads
/// as empty storage.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Creates storage for `origin` inside `dir`.
    ///
    /// The origin is reduced to `[A-Za-z0-9._-]` to form the file name.
    pub fn new(dir: impl Into<PathBuf>, origin: &str) -> Self {
        let file_name = format!("{}.json", sanitize_origin(origin));
        Self {
            path: dir.into().join(file_name),
        }
    }

    /// Creates storage for `origin` in the platform data directory.
    ///
    /// Returns `None` if the platform has no data directory.
    pub fn for_origin(origin: &str) -> Option<Self> {
        default_dir().map(|dir| Self::new(dir, origin))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| StorageError::Corrupt(e.to_string()))
    }
}

impl PreferenceStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(StorageError::Corrupt(detail)) => {
                log::warn!(
                    "discarding unreadable storage file {}: {}",
                    self.path.display(),
                    detail
                );
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json =
            serde_json::to_string_pretty(&entries).map_err(|e| StorageError::Corrupt(e.to_string()))?;

        // Write beside the target and rename so readers never see a partial file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Default storage directory: the platform data dir joined with the app name.
pub(crate) fn default_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|dir| dir.join(APP_DIR))
}

fn sanitize_origin(origin: &str) -> String {
    let cleaned: String = origin
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "default".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_none() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path(), "site");
        assert_eq!(storage.read("theme").unwrap(), None);
    }

    #[test]
    fn test_write_then_read_new_instance() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path(), "site");
        storage.write("theme", "dark").unwrap();

        let reopened = FileStorage::new(dir.path(), "site");
        assert_eq!(reopened.read("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_write_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path(), "site");
        storage.write("theme", "light").unwrap();
        storage.write("other", "value").unwrap();
        assert_eq!(storage.read("theme").unwrap().as_deref(), Some("light"));
        assert_eq!(storage.read("other").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_origins_are_isolated() {
        let dir = TempDir::new().unwrap();
        let mut a = FileStorage::new(dir.path(), "https://a.example");
        let b = FileStorage::new(dir.path(), "https://b.example");
        a.write("theme", "light").unwrap();
        assert_eq!(b.read("theme").unwrap(), None);
    }

    #[test]
    fn test_write_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested").join("deeper");
        let mut storage = FileStorage::new(&nested, "site");
        storage.write("theme", "system").unwrap();
        assert!(storage.path().exists());
    }

    #[test]
    fn test_corrupt_file_reports_error_and_write_recovers() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path(), "site");
        fs::write(storage.path(), "{not json").unwrap();

        assert!(matches!(storage.read("theme"), Err(StorageError::Corrupt(_))));
        storage.write("theme", "light").unwrap();
        assert_eq!(storage.read("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_sanitize_origin() {
        assert_eq!(sanitize_origin("https://me.dev:8080"), "https___me.dev_8080");
        assert_eq!(sanitize_origin(""), "default");
        assert_eq!(sanitize_origin(".."), "default");
        assert_eq!(sanitize_origin("portfolio"), "portfolio");
    }
}
