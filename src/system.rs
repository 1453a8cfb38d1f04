//! OS color scheme signal.
//!
//! The OS scheme is an external, read-only input that can change while the
//! program runs (night mode on a schedule, for example). A [`SystemSignal`]
//! reports the current value and delivers change notifications.
//!
//! Two implementations are provided:
//!
//! - [`OsSignal`] queries the OS through the `dark-light` crate. The host
//!   loop calls [`OsSignal::poll`] to pick up changes.
//! - [`ManualSignal`] is driven by the host with [`ManualSignal::set`], which
//!   suits tests and embedders that get the scheme from elsewhere.
//!
//! Detection goes through a process-wide detector that can be replaced with
//! [`set_theme_detector`]:
//!
//! ```rust
//! use colorpref::{detect_color_mode, reset_theme_detector, set_theme_detector, ColorMode};
//!
//! set_theme_detector(|| ColorMode::Dark);
//! assert_eq!(detect_color_mode(), ColorMode::Dark);
//! reset_theme_detector();
//! ```

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Mutex;

use crate::listeners::{Listeners, Subscription};
use crate::mode::ColorMode;

/// Source of the OS-level color scheme.
pub trait SystemSignal {
    /// Returns the scheme the OS reports right now.
    fn current(&self) -> ColorMode;

    /// Registers a callback invoked with the new scheme on every change.
    fn on_change(&self, callback: Box<dyn Fn(ColorMode)>) -> Subscription;
}

type ThemeDetector = fn() -> ColorMode;

static THEME_DETECTOR: Lazy<Mutex<ThemeDetector>> = Lazy::new(|| Mutex::new(os_theme_detector));

/// Overrides the detector used to determine whether the OS prefers a light or dark theme.
///
/// This is useful for testing or when you want to force a specific color mode.
pub fn set_theme_detector(detector: ThemeDetector) {
    let mut guard = THEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = detector;
}

/// Restores OS detection after [`set_theme_detector`].
pub fn reset_theme_detector() {
    set_theme_detector(os_theme_detector);
}

/// Detects the OS color mode through the current detector.
pub fn detect_color_mode() -> ColorMode {
    let detector = *THEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    detector()
}

fn os_theme_detector() -> ColorMode {
    match detect_os_theme() {
        OsThemeMode::Dark => ColorMode::Dark,
        // Desktops that never report a preference are treated as light.
        _ => ColorMode::Light,
    }
}

struct SignalState {
    mode: Cell<ColorMode>,
    listeners: Listeners<ColorMode>,
}

impl SignalState {
    fn new(mode: ColorMode) -> Rc<Self> {
        Rc::new(Self {
            mode: Cell::new(mode),
            listeners: Listeners::new(),
        })
    }

    fn update(&self, mode: ColorMode) -> bool {
        if self.mode.replace(mode) == mode {
            return false;
        }
        self.listeners.notify(mode);
        true
    }
}

/// A signal the host sets explicitly.
///
/// Clones share state, so one handle can be given to a
/// [`ThemeStore`](crate::ThemeStore) while another drives it.
///
/// # Example
///
/// ```rust
/// use colorpref::{ColorMode, ManualSignal, SystemSignal};
///
/// let signal = ManualSignal::new(ColorMode::Light);
/// signal.set(ColorMode::Dark);
/// assert_eq!(signal.current(), ColorMode::Dark);
/// ```
#[derive(Clone)]
pub struct ManualSignal {
    state: Rc<SignalState>,
}

impl ManualSignal {
    /// Creates a signal reporting `mode`.
    pub fn new(mode: ColorMode) -> Self {
        Self {
            state: SignalState::new(mode),
        }
    }

    /// Changes the reported scheme.
    ///
    /// Listeners are notified only if the value actually changed; the return
    /// value says whether it did.
    pub fn set(&self, mode: ColorMode) -> bool {
        self.state.update(mode)
    }
}

impl SystemSignal for ManualSignal {
    fn current(&self) -> ColorMode {
        self.state.mode.get()
    }

    fn on_change(&self, callback: Box<dyn Fn(ColorMode)>) -> Subscription {
        self.state.listeners.add(callback)
    }
}

impl std::fmt::Debug for ManualSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualSignal")
            .field("mode", &self.state.mode.get())
            .finish()
    }
}

/// A signal backed by OS detection.
///
/// The scheme is detected once on creation and again on each
/// [`poll`](OsSignal::poll).
#[derive(Clone)]
pub struct OsSignal {
    state: Rc<SignalState>,
}

impl OsSignal {
    /// Creates a signal and detects the current scheme.
    pub fn new() -> Self {
        Self {
            state: SignalState::new(detect_color_mode()),
        }
    }

    /// Detects the scheme again and notifies listeners if it changed.
    ///
    /// Returns true if a change was observed.
    pub fn poll(&self) -> bool {
        let detected = detect_color_mode();
        let changed = self.state.update(detected);
        if changed {
            log::debug!("os color scheme changed to {}", detected);
        }
        changed
    }
}

impl Default for OsSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemSignal for OsSignal {
    fn current(&self) -> ColorMode {
        self.state.mode.get()
    }

    fn on_change(&self, callback: Box<dyn Fn(ColorMode)>) -> Subscription {
        self.state.listeners.add(callback)
    }
}

impl std::fmt::Debug for OsSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OsSignal")
            .field("mode", &self.state.mode.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::cell::RefCell;

    fn recorder() -> (Rc<RefCell<Vec<ColorMode>>>, Box<dyn Fn(ColorMode)>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let inner = Rc::clone(&seen);
        (seen, Box::new(move |mode| inner.borrow_mut().push(mode)))
    }

    #[test]
    fn test_manual_signal_notifies_on_change_only() {
        let signal = ManualSignal::new(ColorMode::Light);
        let (seen, cb) = recorder();
        let _sub = signal.on_change(cb);

        assert!(!signal.set(ColorMode::Light));
        assert!(signal.set(ColorMode::Dark));
        assert!(!signal.set(ColorMode::Dark));

        assert_eq!(*seen.borrow(), vec![ColorMode::Dark]);
    }

    #[test]
    fn test_manual_signal_clones_share_state() {
        let signal = ManualSignal::new(ColorMode::Light);
        let other = signal.clone();
        other.set(ColorMode::Dark);
        assert_eq!(signal.current(), ColorMode::Dark);
    }

    #[test]
    #[serial]
    fn test_detect_color_mode_uses_override() {
        set_theme_detector(|| ColorMode::Dark);
        assert_eq!(detect_color_mode(), ColorMode::Dark);

        set_theme_detector(|| ColorMode::Light);
        assert_eq!(detect_color_mode(), ColorMode::Light);

        reset_theme_detector();
    }

    #[test]
    #[serial]
    fn test_os_signal_poll_reports_changes() {
        set_theme_detector(|| ColorMode::Light);
        let signal = OsSignal::new();
        let (seen, cb) = recorder();
        let _sub = signal.on_change(cb);

        assert!(!signal.poll());
        set_theme_detector(|| ColorMode::Dark);
        assert!(signal.poll());
        assert!(!signal.poll());

        assert_eq!(signal.current(), ColorMode::Dark);
        assert_eq!(*seen.borrow(), vec![ColorMode::Dark]);

        reset_theme_detector();
    }
}
