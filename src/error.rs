//! Error types.
//!
//! None of these reach the consumers of [`ThemeStore`](crate::ThemeStore)
//! through its core operations; the store logs them and degrades to the
//! default or the last good value.

use std::fmt;
use std::io;

/// Error returned when a string is not one of the known theme preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceError {
    value: String,
}

impl PreferenceError {
    pub(crate) fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    /// The rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for PreferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown theme preference '{}' (expected light, dark or system)",
            self.value
        )
    }
}

impl std::error::Error for PreferenceError {}

/// Error returned by a [`PreferenceStorage`](crate::PreferenceStorage) backend.
#[derive(Debug)]
pub enum StorageError {
    /// Storage is disabled or not reachable at all.
    Unavailable,
    /// Reading or writing the backing file failed.
    Io(io::Error),
    /// The backing data exists but could not be decoded.
    Corrupt(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "preference storage is unavailable"),
            StorageError::Io(err) => write!(f, "preference storage i/o error: {}", err),
            StorageError::Corrupt(detail) => {
                write!(f, "preference storage is corrupt: {}", detail)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        StorageError::Io(err)
    }
}

/// Error returned when loading a [`StoreConfig`](crate::StoreConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io(io::Error),
    /// The configuration is not valid YAML or has unknown fields.
    Parse(String),
    /// The configuration parsed but its values cannot be used.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read config: {}", err),
            ConfigError::Parse(detail) => write!(f, "invalid config: {}", detail),
            ConfigError::Invalid(detail) => write!(f, "unusable config: {}", detail),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(_) | ConfigError::Invalid(_) => None,
        }
    }
}
