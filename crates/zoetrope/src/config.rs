//! Configuration types for the Zoetrope pipeline.
//!
//! This module provides configuration structures that control how the live
//! pipeline reacts to edits and how scenes are styled. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining render and style settings.
//! - [`RenderConfig`] - Controls the debounce quiet interval.
//! - [`StyleConfig`] - Controls the default theme and the dark export background.
//!
//! # Example
//!
//! ```
//! # use zoetrope::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! ```

use std::time::Duration;

use serde::Deserialize;

use zoetrope_core::{color::Color, theme::Theme};

/// The dark base every raster/vector export composites against when no
/// background is configured.
const DEFAULT_EXPORT_BACKGROUND: &str = "#1a1a1a";

/// How long input must stay quiet before a compile fires.
const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Top-level application configuration combining render and style settings.
///
/// Groups [`RenderConfig`] and [`StyleConfig`] into a single configuration
/// root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified render and style configurations.
    ///
    /// # Arguments
    ///
    /// * `render` - Debounce and compile cycle settings.
    /// * `style` - Theme and export styling options.
    pub fn new(render: RenderConfig, style: StyleConfig) -> Self {
        Self { render, style }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Render cycle configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Debounce quiet interval in milliseconds.
    #[serde(default = "default_debounce_ms")]
    debounce_ms: u64,
}

impl RenderConfig {
    /// Creates a new [`RenderConfig`] with the specified quiet interval.
    pub fn new(debounce_ms: u64) -> Self {
        Self { debounce_ms }
    }

    /// Returns the debounce quiet interval.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

/// Visual styling configuration for display and export.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Default display [`Theme`].
    #[serde(default)]
    theme: Theme,

    /// Background [`Color`] for dark-theme exports, as a color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Creates a new [`StyleConfig`] with the specified theme and export
    /// background.
    pub fn new(theme: Theme, background_color: Option<String>) -> Self {
        Self {
            theme,
            background_color,
        }
    }

    /// Returns the default display theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Returns the parsed export background [`Color`], or `None` if no color
    /// is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the export background, falling back to the built-in dark base.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured color string cannot be parsed.
    pub fn export_background(&self) -> Result<Color, String> {
        match self.background_color()? {
            Some(color) => Ok(color),
            None => Color::new(DEFAULT_EXPORT_BACKGROUND),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.render().debounce(), Duration::from_millis(500));
        assert_eq!(config.style().theme(), Theme::Dark);
        assert!(config.style().background_color().unwrap().is_none());
    }

    #[test]
    fn test_export_background_falls_back_to_dark_base() {
        let config = AppConfig::default();
        let background = config.style().export_background().unwrap();
        assert_eq!(background.to_rgba8(), [26, 26, 26, 255]);
    }

    #[test]
    fn test_toml_sections_deserialize() {
        let config: AppConfig = toml_like(
            r##"
            {
                "render": { "debounce_ms": 250 },
                "style": { "theme": "light", "background_color": "#101010" }
            }
            "##,
        );

        assert_eq!(config.render().debounce(), Duration::from_millis(250));
        assert_eq!(config.style().theme(), Theme::Light);
        assert!(config.style().background_color().unwrap().is_some());
    }

    #[test]
    fn test_invalid_background_color_is_reported() {
        let config: AppConfig = toml_like(r#"{ "style": { "background_color": "not-a-color" } }"#);
        assert!(config.style().background_color().is_err());
        assert!(config.style().export_background().is_err());
    }

    /// Deserialize a config from JSON-shaped test input. The CLI loads TOML;
    /// the serde structure is identical.
    fn toml_like(input: &str) -> AppConfig {
        serde_json::from_str(input).expect("valid test config")
    }
}
