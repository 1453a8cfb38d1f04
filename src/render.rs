//! Template rendering that follows the effective theme.
//!
//! Templates are MiniJinja templates. Two things are added to each render:
//!
//! - the `style` filter, which applies a named style from the variant of the
//!   [`AdaptiveTheme`] matching the mode being rendered
//! - the `theme_mode` variable (`"light"` or `"dark"`)
//!
//! ```rust
//! use colorpref::{AdaptiveTheme, ColorMode, Renderer};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { name: String }
//!
//! let mut renderer = Renderer::new(AdaptiveTheme::portfolio()).with_color(false);
//! renderer.add_template("hello", r#"{{ name | style("accent") }} ({{ theme_mode }})"#).unwrap();
//!
//! let out = renderer.render("hello", &Data { name: "Ada".into() }, ColorMode::Dark).unwrap();
//! assert_eq!(out, "Ada (dark)");
//! ```

use minijinja::{context, Environment, Error, State, Value};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::mode::ColorMode;
use crate::theme::AdaptiveTheme;

/// Name of the template variable holding the rendered mode.
const MODE_VAR: &str = "theme_mode";

/// A renderer with pre-registered templates.
pub struct Renderer {
    env: Environment<'static>,
    use_color: Arc<AtomicBool>,
}

impl Renderer {
    /// Creates a renderer that emits color when the terminal supports it.
    pub fn new(theme: AdaptiveTheme) -> Self {
        let use_color = Arc::new(AtomicBool::new(console::colors_enabled()));
        let mut env = Environment::new();
        register_filters(&mut env, theme, Arc::clone(&use_color));
        Self { env, use_color }
    }

    /// Forces color output on or off, returning the renderer for chaining.
    pub fn with_color(self, use_color: bool) -> Self {
        self.use_color.store(use_color, Ordering::Relaxed);
        self
    }

    /// Registers a named template.
    ///
    /// The template is compiled immediately; errors are returned if syntax is invalid.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), Error> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())
    }

    /// Renders a registered template with the given data in `mode`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template name is not found or rendering fails.
    pub fn render<T: Serialize>(
        &self,
        name: &str,
        data: &T,
        mode: ColorMode,
    ) -> Result<String, Error> {
        let tmpl = self.env.get_template(name)?;
        tmpl.render(context! { theme_mode => mode.as_str(), ..Value::from_serialize(data) })
    }

    /// Renders a one-off template string.
    pub fn render_str<T: Serialize>(
        &self,
        source: &str,
        data: &T,
        mode: ColorMode,
    ) -> Result<String, Error> {
        self.env.render_str(
            source,
            context! { theme_mode => mode.as_str(), ..Value::from_serialize(data) },
        )
    }
}

fn mode_of(state: &State) -> ColorMode {
    match state.lookup(MODE_VAR).as_ref().and_then(Value::as_str) {
        Some("light") => ColorMode::Light,
        _ => ColorMode::Dark,
    }
}

fn register_filters(env: &mut Environment<'static>, theme: AdaptiveTheme, use_color: Arc<AtomicBool>) {
    env.add_filter(
        "style",
        move |state: &State, value: Value, name: String| -> String {
            let color = use_color.load(Ordering::Relaxed);
            theme
                .resolve(mode_of(state))
                .apply(&name, &value.to_string(), color)
        },
    );
}
