//! Configuration types for report styling.
//!
//! This module provides the configuration structures that control how the
//! generated worksheet looks. All types implement [`serde::Deserialize`]
//! for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`StyleConfig`] - Controls the band fill color and column width.
//!
//! # Example
//!
//! ```
//! # use ontosheet::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.style().band_color().is_ok());
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified style configuration.
    pub fn new(style: StyleConfig) -> Self {
        Self { style }
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Visual styling configuration for the generated worksheet.
///
/// Fields that are not set fall back to the writer defaults: a light
/// grey band fill and a column width of 25 characters.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Fill color for banded rows, as an RGB hex string such as
    /// `"#DCDCDC"`.
    #[serde(default)]
    band_color: Option<String>,

    /// Width of every report column, in character units.
    #[serde(default)]
    column_width: Option<f64>,
}

impl StyleConfig {
    /// Creates a new [`StyleConfig`] with the specified options.
    pub fn new(band_color: Option<String>, column_width: Option<f64>) -> Self {
        Self {
            band_color,
            column_width,
        }
    }

    /// Returns the parsed band fill color, or `None` if no color is
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is not a six-digit
    /// RGB hex value.
    pub fn band_color(&self) -> Result<Option<u32>, String> {
        self.band_color
            .as_ref()
            .map(|color| parse_rgb(color))
            .transpose()
            .map_err(|err| format!("Invalid band color in config: {err}"))
    }

    /// Returns the configured column width, or `None` to use the default.
    pub fn column_width(&self) -> Option<f64> {
        self.column_width
    }
}

/// Parses `RRGGBB` or `#RRGGBB` into a packed RGB value.
fn parse_rgb(color: &str) -> Result<u32, String> {
    let hex = color.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("`{color}` is not a six-digit RGB hex value"));
    }
    u32::from_str_radix(hex, 16).map_err(|err| err.to_string())
}
