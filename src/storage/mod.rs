//! Durable key/value storage for the persisted preference.
//!
//! This module provides:
//!
//! - [`PreferenceStorage`]: the trait the store reads and writes through
//! - [`MemoryStorage`]: a shared in-process map
//! - [`FileStorage`]: a JSON file per origin on disk
//! - [`DisabledStorage`]: storage that always fails
//!
//! Backends report failures as [`StorageError`]; the store decides what to do
//! with them (it logs and carries on).

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// A string key/value store scoped to one origin.
pub trait PreferenceStorage {
    /// Returns the value under `key`, or `None` if nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: PreferenceStorage + ?Sized> PreferenceStorage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

/// Storage that is switched off, as in a private browsing session.
///
/// Every read and write fails with [`StorageError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledStorage;

impl PreferenceStorage for DisabledStorage {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}
