//! Terminal style collections keyed by color mode.
//!
//! A [`Theme`] maps style names to `console` styles. An [`AdaptiveTheme`]
//! pairs a light and a dark theme and picks one for the effective
//! [`ColorMode`] of a [`ThemeStore`](crate::ThemeStore).

use console::{Color, Style};
use std::collections::HashMap;

use crate::mode::ColorMode;
use crate::util::{parse_hex_color, rgb_to_ansi256};

/// Default prefix shown when a style name is not found.
pub const DEFAULT_MISSING_STYLE_INDICATOR: &str = "(!?)";

/// A named collection of styles.
///
/// # Example
///
/// ```rust
/// use colorpref::Theme;
/// use console::Style;
///
/// let theme = Theme::new()
///     .add("muted", Style::new().dim())
///     .add("accent", Style::new().cyan().bold());
///
/// assert!(theme.has("accent"));
/// assert_eq!(theme.apply("accent", "hi", false), "hi");
/// assert_eq!(theme.apply("typo", "hi", false), "(!?) hi");
/// ```
#[derive(Debug, Clone)]
pub struct Theme {
    styles: HashMap<String, Style>,
    missing_indicator: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            styles: HashMap::new(),
            missing_indicator: DEFAULT_MISSING_STYLE_INDICATOR.to_string(),
        }
    }
}

impl Theme {
    /// Creates an empty theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named style, returning an updated theme for chaining.
    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    /// Sets the indicator prepended when a style name is not found.
    ///
    /// Set to an empty string to disable.
    pub fn missing_indicator(mut self, indicator: &str) -> Self {
        self.missing_indicator = indicator.to_string();
        self
    }

    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Applies a named style to `text`.
    ///
    /// With `use_color` false the text is returned unstyled. Unknown names
    /// get the missing indicator prepended either way.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).force_styling(true).to_string(),
            Some(_) => text.to_string(),
            None if self.missing_indicator.is_empty() => text.to_string(),
            None => format!("{} {}", self.missing_indicator, text),
        }
    }
}

/// A theme with separate variants for light and dark mode.
///
/// # Example
///
/// ```rust
/// use colorpref::{AdaptiveTheme, ColorMode, Theme};
/// use console::Style;
///
/// let light = Theme::new().add("tone", Style::new().green());
/// let dark = Theme::new().add("tone", Style::new().yellow().italic());
/// let adaptive = AdaptiveTheme::new(light, dark);
///
/// assert!(adaptive.resolve(ColorMode::Dark).has("tone"));
/// ```
#[derive(Debug, Clone)]
pub struct AdaptiveTheme {
    light: Theme,
    dark: Theme,
}

impl AdaptiveTheme {
    /// Creates an adaptive theme with separate light and dark variants.
    pub fn new(light: Theme, dark: Theme) -> Self {
        Self { light, dark }
    }

    /// Returns the variant for `mode`.
    pub fn resolve(&self, mode: ColorMode) -> &Theme {
        match mode {
            ColorMode::Light => &self.light,
            ColorMode::Dark => &self.dark,
        }
    }

    /// The portfolio palette: near-black ink on light, off-white on dark.
    ///
    /// Styles: `text`, `stroke`, `muted`, `accent`, `selected`.
    pub fn portfolio() -> Self {
        let light = palette("#090908", "#6b6b66");
        let dark = palette("#fefef5", "#a3a39a");
        Self::new(light, dark)
    }
}

impl Default for AdaptiveTheme {
    fn default() -> Self {
        Self::portfolio()
    }
}

fn hex(color: &str) -> Color {
    parse_hex_color(color)
        .map(|rgb| Color::Color256(rgb_to_ansi256(rgb)))
        .unwrap_or(Color::White)
}

fn palette(ink: &str, muted: &str) -> Theme {
    Theme::new()
        .add("text", Style::new().fg(hex(ink)))
        .add("stroke", Style::new().fg(hex(ink)).bold())
        .add("muted", Style::new().fg(hex(muted)).dim())
        .add("accent", Style::new().cyan().bold())
        .add("selected", Style::new().fg(hex(ink)).reverse())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_add_and_get() {
        let theme = Theme::new().add("bold", Style::new().bold());
        assert!(theme.has("bold"));
        assert!(theme.get("bold").is_some());
        assert_eq!(theme.len(), 1);
    }

    #[test]
    fn test_theme_default_is_empty() {
        assert!(Theme::default().is_empty());
    }

    #[test]
    fn test_apply_with_color() {
        let theme = Theme::new().add("red", Style::new().red());
        let output = theme.apply("red", "hi", true);
        assert!(output.contains("\x1b[31"));
        assert!(output.contains("hi"));
    }

    #[test]
    fn test_apply_missing_indicator_custom_and_disabled() {
        let theme = Theme::new().missing_indicator("[?]");
        assert_eq!(theme.apply("nope", "x", true), "[?] x");
        let quiet = Theme::new().missing_indicator("");
        assert_eq!(quiet.apply("nope", "x", true), "x");
    }

    #[test]
    fn test_adaptive_resolve_picks_variant() {
        let light = Theme::new().add("only-light", Style::new());
        let dark = Theme::new().add("only-dark", Style::new());
        let adaptive = AdaptiveTheme::new(light, dark);

        assert!(adaptive.resolve(ColorMode::Light).has("only-light"));
        assert!(adaptive.resolve(ColorMode::Dark).has("only-dark"));
    }

    #[test]
    fn test_portfolio_variants_differ() {
        let adaptive = AdaptiveTheme::portfolio();
        let light = adaptive.resolve(ColorMode::Light).apply("text", "x", true);
        let dark = adaptive.resolve(ColorMode::Dark).apply("text", "x", true);
        assert_ne!(light, dark);
        for name in ["text", "stroke", "muted", "accent", "selected"] {
            assert!(adaptive.resolve(ColorMode::Light).has(name));
            assert!(adaptive.resolve(ColorMode::Dark).has(name));
        }
    }
}
