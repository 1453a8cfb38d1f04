//! Store configuration.
//!
//! Every field has a default matching the web build the store was written
//! for, so an empty file (or [`StoreConfig::default`]) is a complete config:
//!
//! ```yaml
//! storage_key: theme
//! legacy_keys: [portfolio-theme]
//! default: dark
//! light_marker: light
//! dark_marker: dark
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::mode::{ColorMode, ThemePreference};

/// Key the preference is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "theme";

/// Older key still read when the primary key holds nothing.
pub const LEGACY_STORAGE_KEY: &str = "portfolio-theme";

/// Settings for a [`ThemeStore`](crate::ThemeStore).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Key the preference is written under.
    pub storage_key: String,
    /// Keys read, in order, when `storage_key` holds nothing. Never written.
    pub legacy_keys: Vec<String>,
    /// Preference used when nothing valid is persisted.
    pub default: ThemePreference,
    /// Root marker for light mode.
    pub light_marker: String,
    /// Root marker for dark mode.
    pub dark_marker: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            legacy_keys: vec![LEGACY_STORAGE_KEY.to_string()],
            default: ThemePreference::default(),
            light_marker: "light".to_string(),
            dark_marker: "dark".to_string(),
        }
    }
}

impl StoreConfig {
    /// Parses a config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the root markers are usable.
    ///
    /// Both markers must be non-blank and distinct, otherwise the root could
    /// not carry exactly one of them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, marker) in [
            ("light_marker", &self.light_marker),
            ("dark_marker", &self.dark_marker),
        ] {
            if marker.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{} must not be empty", name)));
            }
        }
        if self.light_marker == self.dark_marker {
            return Err(ConfigError::Invalid(format!(
                "light_marker and dark_marker are both '{}'",
                self.light_marker
            )));
        }
        Ok(())
    }

    /// Reads and parses a YAML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_yaml(&contents)
    }

    /// Sets the default preference, returning the updated config for chaining.
    pub fn with_default(mut self, default: ThemePreference) -> Self {
        self.default = default;
        self
    }

    /// Sets the storage key, returning the updated config for chaining.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Returns the root marker for `mode`.
    pub fn marker(&self, mode: ColorMode) -> &str {
        match mode {
            ColorMode::Light => &self.light_marker,
            ColorMode::Dark => &self.dark_marker,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_key, "theme");
        assert_eq!(config.legacy_keys, vec!["portfolio-theme".to_string()]);
        assert_eq!(config.default, ThemePreference::Dark);
        assert_eq!(config.marker(ColorMode::Light), "light");
        assert_eq!(config.marker(ColorMode::Dark), "dark");
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = StoreConfig::from_yaml("default: system\ndark_marker: theme-dark\n").unwrap();
        assert_eq!(config.default, ThemePreference::System);
        assert_eq!(config.dark_marker, "theme-dark");
        assert_eq!(config.storage_key, "theme");
    }

    #[test]
    fn test_from_yaml_empty_is_default() {
        assert_eq!(StoreConfig::from_yaml("  \n").unwrap(), StoreConfig::default());
    }

    #[test]
    fn test_from_yaml_rejects_unknown_fields() {
        let err = StoreConfig::from_yaml("colour: blue\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_yaml_rejects_invalid_default() {
        assert!(StoreConfig::from_yaml("default: purple\n").is_err());
    }

    #[test]
    fn test_from_yaml_rejects_empty_marker() {
        let err = StoreConfig::from_yaml("light_marker: \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("light_marker"));
    }

    #[test]
    fn test_from_yaml_rejects_identical_markers() {
        let err = StoreConfig::from_yaml("light_marker: t\ndark_marker: t\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "storage_key: site-theme").unwrap();
        writeln!(file, "legacy_keys: []").unwrap();

        let config = StoreConfig::from_file(file.path()).unwrap();
        assert_eq!(config.storage_key, "site-theme");
        assert!(config.legacy_keys.is_empty());
    }

    #[test]
    fn test_from_file_missing() {
        let err = StoreConfig::from_file("/nonexistent/colorpref.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_builders() {
        let config = StoreConfig::default()
            .with_default(ThemePreference::Light)
            .with_storage_key("k");
        assert_eq!(config.default, ThemePreference::Light);
        assert_eq!(config.storage_key, "k");
    }
}
