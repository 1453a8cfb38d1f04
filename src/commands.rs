//! Theme commands for a command palette.
//!
//! The palette lists the three theme commands, narrows them as the user
//! types, and moves a selection with the arrow keys. Executing the selection
//! sets the preference on a [`ThemeStore`].
//!
//! ```rust
//! use colorpref::{ClassList, ColorMode, ManualSignal, MemoryStorage, Palette, StoreConfig, ThemePreference, ThemeStore};
//!
//! let os = ManualSignal::new(ColorMode::Light);
//! let store = ThemeStore::new(StoreConfig::default(), MemoryStorage::new(), ClassList::new(), &os);
//!
//! let mut palette = Palette::new();
//! palette.set_query("bright");
//! let command = palette.execute(&store).unwrap();
//! assert_eq!(command.id, "theme-light");
//! assert_eq!(store.preference(), ThemePreference::Light);
//! ```

use crate::mode::ThemePreference;
use crate::root::StyleRoot;
use crate::storage::PreferenceStorage;
use crate::store::ThemeStore;

/// A palette entry that sets a theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeCommand {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
    pub preference: ThemePreference,
}

impl ThemeCommand {
    /// Case-insensitive substring match on title, description and keywords.
    ///
    /// An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self
                .keywords
                .iter()
                .any(|k| k.to_lowercase().contains(&needle))
    }
}

/// The built-in theme commands, in display order.
pub const THEME_COMMANDS: [ThemeCommand; 3] = [
    ThemeCommand {
        id: "theme-light",
        title: "Light Mode",
        description: "Switch to light theme",
        keywords: &["theme", "light", "bright", "day"],
        preference: ThemePreference::Light,
    },
    ThemeCommand {
        id: "theme-dark",
        title: "Dark Mode",
        description: "Switch to dark theme",
        keywords: &["theme", "dark", "night"],
        preference: ThemePreference::Dark,
    },
    ThemeCommand {
        id: "theme-system",
        title: "System Theme",
        description: "Follow the system color scheme",
        keywords: &["theme", "system", "auto", "os"],
        preference: ThemePreference::System,
    },
];

/// Returns the commands matching `query`, preserving order.
pub fn filter_commands(query: &str) -> Vec<&'static ThemeCommand> {
    THEME_COMMANDS.iter().filter(|c| c.matches(query)).collect()
}

/// Query and selection state of an open palette.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    query: String,
    selected: usize,
}

impl Palette {
    /// Creates a palette with an empty query and the first entry selected.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replaces the query and moves the selection back to the first match.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.selected = 0;
    }

    /// Commands matching the current query.
    pub fn matches(&self) -> Vec<&'static ThemeCommand> {
        filter_commands(&self.query)
    }

    /// Index of the selected entry within [`matches`](Palette::matches).
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected command, or `None` if nothing matches.
    pub fn selected(&self) -> Option<&'static ThemeCommand> {
        self.matches().get(self.selected).copied()
    }

    /// Moves the selection down, wrapping to the top.
    pub fn next(&mut self) {
        let len = self.matches().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Moves the selection up, wrapping to the bottom.
    pub fn previous(&mut self) {
        let len = self.matches().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Applies the selected command to `store` and returns it.
    pub fn execute<S, R>(&self, store: &ThemeStore<S, R>) -> Option<&'static ThemeCommand>
    where
        S: PreferenceStorage + 'static,
        R: StyleRoot + 'static,
    {
        let command = self.selected()?;
        log::debug!("palette command {}", command.id);
        store.set_preference(command.preference);
        Some(command)
    }
}
