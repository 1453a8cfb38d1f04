//! # colorpref - light/dark theme preference that stays in sync with the OS
//!
//! `colorpref` keeps track of whether an application should render light or
//! dark. The user picks `light`, `dark` or `system`; the choice is persisted,
//! and while it is `system` the rendered mode follows the OS color scheme as
//! it changes.
//!
//! ## Quick Start
//!
//! ```rust
//! use colorpref::{
//!     ClassList, ColorMode, ManualSignal, MemoryStorage, StoreConfig, ThemePreference,
//!     ThemeStore,
//! };
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let os = ManualSignal::new(ColorMode::Light);
//! let storage = MemoryStorage::new();
//! let store = ThemeStore::new(StoreConfig::default(), storage.clone(), ClassList::new(), &os);
//!
//! let changes = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&changes);
//! let subscription = store.subscribe(move |_| counter.set(counter.get() + 1));
//!
//! store.set_preference(ThemePreference::System);
//! assert_eq!(store.effective_theme(), ColorMode::Light);
//! assert_eq!(storage.get("theme").as_deref(), Some("system"));
//!
//! os.set(ColorMode::Dark);
//! assert!(store.root().contains("dark"));
//! assert_eq!(changes.get(), 2);
//!
//! subscription.unsubscribe();
//! ```
//!
//! ## Concepts
//!
//! - [`ThemePreference`]: what the user asked for (`Light`, `Dark`, `System`)
//! - [`ColorMode`]: what the OS reports, and what gets rendered
//! - [`ThemeStore`]: resolves, persists and applies the mode, and notifies subscribers
//!
//! The store talks to three collaborators, each a trait:
//!
//! - [`PreferenceStorage`]: [`MemoryStorage`], [`FileStorage`], [`DisabledStorage`]
//! - [`StyleRoot`]: [`ClassList`]
//! - [`SystemSignal`]: [`OsSignal`] (via `dark-light`), [`ManualSignal`]
//!
//! ## Consumers
//!
//! - [`Renderer`] renders MiniJinja templates with an [`AdaptiveTheme`]
//! - [`Palette`] implements the theme entries of a command palette
//!
//! ## Failure handling
//!
//! Storage problems never reach callers of the store. An unreadable or
//! invalid persisted value falls back to [`StoreConfig::default`]'s preference;
//! a failed write is logged through the `log` crate and the new preference
//! still applies for the rest of the session.

mod commands;
mod config;
mod error;
mod listeners;
mod mode;
mod render;
mod root;
mod storage;
mod store;
mod system;
mod theme;
mod util;

pub use commands::{filter_commands, Palette, ThemeCommand, THEME_COMMANDS};
pub use config::{StoreConfig, DEFAULT_STORAGE_KEY, LEGACY_STORAGE_KEY};
pub use error::{ConfigError, PreferenceError, StorageError};
pub use listeners::{Listeners, Subscription};
pub use mode::{ColorMode, ThemePreference};
pub use render::Renderer;
pub use root::{ClassList, StyleRoot};
pub use storage::{DisabledStorage, FileStorage, MemoryStorage, PreferenceStorage};
pub use store::ThemeStore;
pub use system::{
    detect_color_mode, reset_theme_detector, set_theme_detector, ManualSignal, OsSignal,
    SystemSignal,
};
pub use theme::{AdaptiveTheme, Theme, DEFAULT_MISSING_STYLE_INDICATOR};
pub use util::{parse_hex_color, rgb_to_ansi256};
