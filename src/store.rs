//! The theme preference store.
//!
//! [`ThemeStore`] owns the user's [`ThemePreference`], derives the effective
//! [`ColorMode`] from it and the OS scheme, writes that mode onto a
//! [`StyleRoot`] and tells subscribers when it changes.
//!
//! # Resolution
//!
//! | preference | OS scheme | effective |
//! |------------|-----------|-----------|
//! | `Light`    | any       | `Light`   |
//! | `Dark`     | any       | `Dark`    |
//! | `System`   | `Light`   | `Light`   |
//! | `System`   | `Dark`    | `Dark`    |
//!
//! # Lifecycle
//!
//! Construction reads the persisted preference (falling back to the configured
//! default when it is missing, invalid or unreadable), applies the effective
//! mode to the root, and starts listening to the OS signal. The root is
//! therefore correct before the store is handed to any consumer.
//!
//! Storage failures never reach callers: reads degrade to the default, writes
//! are logged and the new preference still applies for the session.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::config::StoreConfig;
use crate::error::PreferenceError;
use crate::listeners::{Listeners, Subscription};
use crate::mode::{ColorMode, ThemePreference};
use crate::root::StyleRoot;
use crate::storage::PreferenceStorage;
use crate::system::SystemSignal;

#[derive(Debug, Clone, Copy)]
struct State {
    preference: ThemePreference,
    system: ColorMode,
    effective: ColorMode,
}

struct Shared<S, R> {
    config: StoreConfig,
    state: RefCell<State>,
    storage: RefCell<S>,
    root: RefCell<R>,
    listeners: Listeners<ColorMode>,
}

/// Resolves, persists and applies the light/dark theme.
///
/// # Example
///
/// ```rust
/// use colorpref::{
///     ClassList, ColorMode, ManualSignal, MemoryStorage, StoreConfig, ThemePreference,
///     ThemeStore,
/// };
///
/// let os = ManualSignal::new(ColorMode::Light);
/// let store = ThemeStore::new(StoreConfig::default(), MemoryStorage::new(), ClassList::new(), &os);
///
/// // Nothing persisted: the default (dark) applies.
/// assert_eq!(store.effective_theme(), ColorMode::Dark);
/// assert!(store.root().contains("dark"));
///
/// store.set_preference(ThemePreference::System);
/// assert_eq!(store.effective_theme(), ColorMode::Light);
///
/// os.set(ColorMode::Dark);
/// assert_eq!(store.effective_theme(), ColorMode::Dark);
/// ```
pub struct ThemeStore<S, R>
where
    S: PreferenceStorage + 'static,
    R: StyleRoot + 'static,
{
    shared: Rc<Shared<S, R>>,
    os_subscription: Subscription,
}

impl<S, R> ThemeStore<S, R>
where
    S: PreferenceStorage + 'static,
    R: StyleRoot + 'static,
{
    /// Creates the store, applies the initial theme to `root` and starts
    /// following `signal`.
    ///
    /// A config whose markers are empty or identical cannot keep exactly one
    /// marker on the root; it is logged and the default markers are used.
    pub fn new(mut config: StoreConfig, storage: S, root: R, signal: &dyn SystemSignal) -> Self {
        if let Err(err) = config.validate() {
            log::warn!("{}; using the default root markers", err);
            let defaults = StoreConfig::default();
            config.light_marker = defaults.light_marker;
            config.dark_marker = defaults.dark_marker;
        }
        let preference = read_persisted(&config, &storage).unwrap_or(config.default);
        let system = signal.current();
        let effective = preference.resolve(system);

        let shared = Rc::new(Shared {
            config,
            state: RefCell::new(State {
                preference,
                system,
                effective,
            }),
            storage: RefCell::new(storage),
            root: RefCell::new(root),
            listeners: Listeners::new(),
        });
        shared.apply(effective);

        let weak: Weak<Shared<S, R>> = Rc::downgrade(&shared);
        let os_subscription = signal.on_change(Box::new(move |mode| {
            if let Some(shared) = weak.upgrade() {
                shared.system_changed(mode);
            }
        }));

        log::debug!(
            "theme store ready: preference={}, system={}, effective={}",
            preference,
            system,
            effective
        );

        Self {
            shared,
            os_subscription,
        }
    }

    /// Returns the current preference.
    pub fn preference(&self) -> ThemePreference {
        self.shared.state.borrow().preference
    }

    /// Returns the mode currently applied to the root.
    pub fn effective_theme(&self) -> ColorMode {
        self.shared.state.borrow().effective
    }

    /// Returns the last OS scheme the store observed.
    pub fn system_scheme(&self) -> ColorMode {
        self.shared.state.borrow().system
    }

    /// Persists and applies a new preference.
    ///
    /// Subscribers are notified if the effective theme changed. A failed
    /// write is logged; the preference still applies for this session.
    pub fn set_preference(&self, preference: ThemePreference) {
        self.shared.transition(preference, true);
    }

    /// Parses and applies a preference given as a string.
    ///
    /// Unknown values are logged and rejected; the current state is kept.
    pub fn set_preference_str(&self, value: &str) -> Result<(), PreferenceError> {
        match value.parse::<ThemePreference>() {
            Ok(preference) => {
                self.set_preference(preference);
                Ok(())
            }
            Err(err) => {
                log::warn!("ignoring theme change: {}", err);
                Err(err)
            }
        }
    }

    /// Moves to the next preference in toggle order and returns it.
    pub fn cycle_preference(&self) -> ThemePreference {
        let next = self.preference().next();
        self.set_preference(next);
        next
    }

    /// Re-reads the persisted preference and applies it if it differs.
    ///
    /// Use this when another process or window may have written the same
    /// storage. Missing, invalid or unreadable values are ignored. Returns
    /// true if the preference changed.
    pub fn sync_from_storage(&self) -> bool {
        let persisted = read_persisted(&self.shared.config, &*self.shared.storage.borrow());
        match persisted {
            Some(preference) if preference != self.preference() => {
                log::debug!("picked up persisted theme preference {}", preference);
                self.shared.transition(preference, false);
                true
            }
            _ => false,
        }
    }

    /// Registers a callback invoked with the new effective theme whenever it
    /// changes.
    pub fn subscribe(&self, callback: impl Fn(ColorMode) + 'static) -> Subscription {
        self.shared.listeners.add(callback)
    }

    /// Borrows the rendering root.
    ///
    /// # Panics
    ///
    /// The store writes to the root on every transition. Holding the returned
    /// `Ref` across [`set_preference`](Self::set_preference), or while the OS
    /// signal delivers a change, panics with `BorrowMutError`. Drop it first.
    pub fn root(&self) -> Ref<'_, R> {
        self.shared.root.borrow()
    }

    /// Borrows the storage backend.
    ///
    /// The same rule as [`root`](Self::root) applies: release the `Ref`
    /// before changing the preference.
    pub fn storage(&self) -> Ref<'_, S> {
        self.shared.storage.borrow()
    }

    /// Returns the configuration the store was built with.
    pub fn config(&self) -> &StoreConfig {
        &self.shared.config
    }
}

impl<S, R> Drop for ThemeStore<S, R>
where
    S: PreferenceStorage + 'static,
    R: StyleRoot + 'static,
{
    fn drop(&mut self) {
        self.os_subscription.unsubscribe();
    }
}

impl<S, R> fmt::Debug for ThemeStore<S, R>
where
    S: PreferenceStorage + 'static,
    R: StyleRoot + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = *self.shared.state.borrow();
        f.debug_struct("ThemeStore")
            .field("preference", &state.preference)
            .field("system", &state.system)
            .field("effective", &state.effective)
            .field("subscribers", &self.shared.listeners.len())
            .finish()
    }
}

impl<S, R> Shared<S, R>
where
    S: PreferenceStorage,
    R: StyleRoot,
{
    fn apply(&self, mode: ColorMode) {
        let remove = [
            self.config.light_marker.as_str(),
            self.config.dark_marker.as_str(),
        ];
        self.root
            .borrow_mut()
            .swap_markers(&remove, self.config.marker(mode));
    }

    fn persist(&self, preference: ThemePreference) {
        let result = self
            .storage
            .borrow_mut()
            .write(&self.config.storage_key, preference.as_str());
        if let Err(err) = result {
            log::warn!(
                "could not persist theme preference {}: {}",
                preference,
                err
            );
        }
    }

    fn transition(&self, preference: ThemePreference, persist: bool) {
        if persist {
            self.persist(preference);
        }

        // The borrow ends before any callback runs, so subscribers may call
        // back into the store.
        let (effective, changed) = {
            let mut state = self.state.borrow_mut();
            let effective = preference.resolve(state.system);
            let changed = effective != state.effective;
            state.preference = preference;
            state.effective = effective;
            (effective, changed)
        };

        self.apply(effective);
        if changed {
            self.listeners.notify(effective);
        }
    }

    fn system_changed(&self, system: ColorMode) {
        let update = {
            let mut state = self.state.borrow_mut();
            state.system = system;
            if state.preference.follows_system() && state.effective != system {
                state.effective = system;
                Some(system)
            } else {
                None
            }
        };

        if let Some(effective) = update {
            self.apply(effective);
            self.listeners.notify(effective);
        }
    }
}

/// Reads the persisted preference from the primary key, then the legacy keys.
///
/// Returns `None` when nothing valid could be read.
fn read_persisted<S: PreferenceStorage + ?Sized>(
    config: &StoreConfig,
    storage: &S,
) -> Option<ThemePreference> {
    let keys = std::iter::once(&config.storage_key).chain(config.legacy_keys.iter());
    for key in keys {
        match storage.read(key) {
            Ok(Some(raw)) => match raw.parse::<ThemePreference>() {
                Ok(preference) => return Some(preference),
                Err(err) => {
                    log::debug!("ignoring stored value under '{}': {}", key, err);
                }
            },
            Ok(None) => {}
            Err(err) => {
                log::debug!("could not read theme preference '{}': {}", key, err);
                return None;
            }
        }
    }
    None
}
