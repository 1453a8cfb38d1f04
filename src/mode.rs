//! Theme preference and color mode values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PreferenceError;

/// A light or dark display mode.
///
/// Used both for the scheme reported by the OS and for the effective theme
/// the store applies to its root. There is no third value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Light mode (light background, dark text).
    Light,
    /// Dark mode (dark background, light text).
    Dark,
}

impl ColorMode {
    /// Returns the lowercase name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's stated intent about the display mode.
///
/// `System` defers to whatever the OS reports. The string forms
/// (`"light"`, `"dark"`, `"system"`) are what gets persisted.
///
/// # Example
///
/// ```rust
/// use colorpref::{ColorMode, ThemePreference};
///
/// let pref: ThemePreference = "system".parse().unwrap();
/// assert_eq!(pref.resolve(ColorMode::Light), ColorMode::Light);
/// assert_eq!(ThemePreference::Dark.resolve(ColorMode::Light), ColorMode::Dark);
/// assert!("purple".parse::<ThemePreference>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    #[default]
    Dark,
    System,
}

impl ThemePreference {
    /// Every preference, in toggle order.
    pub const ALL: [ThemePreference; 3] = [
        ThemePreference::Light,
        ThemePreference::Dark,
        ThemePreference::System,
    ];

    /// Returns the persisted string form.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        }
    }

    /// Derives the effective mode given the scheme currently reported by the OS.
    pub fn resolve(self, system: ColorMode) -> ColorMode {
        match self {
            ThemePreference::Light => ColorMode::Light,
            ThemePreference::Dark => ColorMode::Dark,
            ThemePreference::System => system,
        }
    }

    /// Returns the preference the theme toggle moves to next.
    ///
    /// Light goes to Dark, Dark to System, System back to Light.
    pub fn next(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::System,
            ThemePreference::System => ThemePreference::Light,
        }
    }

    /// Returns true if this preference follows the OS scheme.
    pub fn follows_system(self) -> bool {
        self == ThemePreference::System
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = PreferenceError;

    // Stored values are matched exactly; anything else is treated as corrupt.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" => Ok(ThemePreference::System),
            other => Err(PreferenceError::new(other)),
        }
    }
}
