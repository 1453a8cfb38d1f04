use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::PreferenceStorage;
use crate::error::StorageError;

/// In-process storage backed by a shared map.
///
/// Clones share the same map, so a second store built over a clone sees
/// what the first one wrote, the way a reloaded page sees its origin's
/// storage.
///
/// # Example
///
/// ```rust
/// use colorpref::{MemoryStorage, PreferenceStorage};
///
/// let mut first = MemoryStorage::new();
/// let second = first.clone();
/// first.write("theme", "dark").unwrap();
/// assert_eq!(second.read("theme").unwrap().as_deref(), Some("dark"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Creates empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage pre-populated with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Returns the raw value under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_is_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read("theme").unwrap(), None);
    }

    #[test]
    fn test_write_replaces_value() {
        let mut storage = MemoryStorage::with_entry("theme", "light");
        storage.write("theme", "system").unwrap();
        assert_eq!(storage.get("theme").as_deref(), Some("system"));
    }

    #[test]
    fn test_clones_share_entries() {
        let storage = MemoryStorage::new();
        let mut writer = storage.clone();
        writer.write("theme", "dark").unwrap();
        assert_eq!(storage.get("theme").as_deref(), Some("dark"));
    }
}
