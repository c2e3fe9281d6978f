//! Indicator configuration.
//!
//! Hosts either build an [`IndicatorConfig`] in code or load one from TOML:
//!
//! ```toml
//! radius = 6.0
//! margin = 12.0
//! unselected_color = "#FFFFFF80"
//! selected_color = "#1E88E5"
//! alignment = "center"   # start | center | end (left/right also accepted)
//! mode = "inside"        # inside | outside | solo
//! ```
//!
//! Omitted keys fall back to [`defaults`].

use std::path::Path;

use pager_dots_core::logging::targets;
use pager_dots_render::Color;
use serde::{Deserialize, Serialize};

use crate::error::{IndicatorError, Result};
use crate::geometry::{Alignment, LayoutParams};
use crate::mode::IndicatorMode;

/// Default values used when a setting is not supplied.
pub mod defaults {
    use super::{Alignment, Color, IndicatorMode};

    /// Dot radius in pixels.
    pub const RADIUS: f32 = 10.0;
    /// Gap between dots in pixels.
    pub const MARGIN: f32 = 40.0;
    /// Color of the static dots.
    pub const UNSELECTED_COLOR: Color = Color::WHITE;
    /// Color of the moving dot.
    pub const SELECTED_COLOR: Color = Color::BLACK;
    /// Compositing mode.
    pub const MODE: IndicatorMode = IndicatorMode::Solo;
    /// Row alignment.
    pub const ALIGNMENT: Alignment = Alignment::Center;
}

/// Complete visual configuration of an indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorConfig {
    /// Dot radius in pixels.
    pub radius: f32,
    /// Gap between neighbouring dots in pixels.
    pub margin: f32,
    /// Color of the static dots.
    pub unselected_color: Color,
    /// Color of the moving dot.
    pub selected_color: Color,
    /// Row alignment.
    pub alignment: Alignment,
    /// Compositing mode of the moving dot.
    pub mode: IndicatorMode,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            radius: defaults::RADIUS,
            margin: defaults::MARGIN,
            unselected_color: defaults::UNSELECTED_COLOR,
            selected_color: defaults::SELECTED_COLOR,
            alignment: defaults::ALIGNMENT,
            mode: defaults::MODE,
        }
    }
}

impl IndicatorConfig {
    /// Set the dot radius.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Set the gap between dots.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the static dot color.
    pub fn with_unselected_color(mut self, color: Color) -> Self {
        self.unselected_color = color;
        self
    }

    /// Set the moving dot color.
    pub fn with_selected_color(mut self, color: Color) -> Self {
        self.selected_color = color;
        self
    }

    /// Set the row alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the compositing mode.
    pub fn with_mode(mut self, mode: IndicatorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Check that every numeric setting is usable for layout.
    pub fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(IndicatorError::invalid_value(
                "radius",
                format!("must be a positive number, got {}", self.radius),
            ));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(IndicatorError::invalid_value(
                "margin",
                format!("must be a non-negative number, got {}", self.margin),
            ));
        }
        Ok(())
    }

    /// The geometric subset of this configuration.
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            radius: self.radius,
            margin: self.margin,
            alignment: self.alignment,
            mode: self.mode,
        }
    }

    /// Parse and validate a TOML configuration.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text)?;
        let config = file.into_config()?;
        config.validate()?;
        tracing::debug!(target: targets::CONFIG, ?config, "indicator config parsed");
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| IndicatorError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML, with colors written as `#RRGGBBAA`.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(&ConfigFile::from(*self))?)
    }
}

/// On-disk shape of a configuration; every key is optional.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    margin: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unselected_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alignment: Option<Alignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<IndicatorMode>,
}

impl ConfigFile {
    fn into_config(self) -> Result<IndicatorConfig> {
        let base = IndicatorConfig::default();
        Ok(IndicatorConfig {
            radius: self.radius.unwrap_or(base.radius),
            margin: self.margin.unwrap_or(base.margin),
            unselected_color: parse_color("unselected_color", self.unselected_color)?
                .unwrap_or(base.unselected_color),
            selected_color: parse_color("selected_color", self.selected_color)?
                .unwrap_or(base.selected_color),
            alignment: self.alignment.unwrap_or(base.alignment),
            mode: self.mode.unwrap_or(base.mode),
        })
    }
}

impl From<IndicatorConfig> for ConfigFile {
    fn from(config: IndicatorConfig) -> Self {
        Self {
            radius: Some(config.radius),
            margin: Some(config.margin),
            unselected_color: Some(config.unselected_color.to_hex()),
            selected_color: Some(config.selected_color.to_hex()),
            alignment: Some(config.alignment),
            mode: Some(config.mode),
        }
    }
}

fn parse_color(field: &str, value: Option<String>) -> Result<Option<Color>> {
    match value {
        None => Ok(None),
        Some(value) => match Color::from_hex(&value) {
            Some(color) => Ok(Some(color)),
            None => Err(IndicatorError::InvalidColor {
                field: field.to_string(),
                value,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IndicatorConfig::default();
        assert_eq!(config.radius, 10.0);
        assert_eq!(config.margin, 40.0);
        assert_eq!(config.unselected_color, Color::WHITE);
        assert_eq!(config.selected_color, Color::BLACK);
        assert_eq!(config.mode, IndicatorMode::Solo);
        assert_eq!(config.alignment, Alignment::Center);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_geometry() {
        let err = IndicatorConfig::default().with_radius(0.0).validate().unwrap_err();
        assert!(matches!(err, IndicatorError::InvalidValue { field: "radius", .. }));

        let err = IndicatorConfig::default().with_margin(-1.0).validate().unwrap_err();
        assert!(matches!(err, IndicatorError::InvalidValue { field: "margin", .. }));

        let err = IndicatorConfig::default()
            .with_radius(f32::INFINITY)
            .validate()
            .unwrap_err();
        assert!(matches!(err, IndicatorError::InvalidValue { field: "radius", .. }));

        assert!(IndicatorConfig::default().with_margin(0.0).validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = IndicatorConfig::from_toml_str(
            r##"
            radius = 6.0
            selected_color = "#FF0000"
            mode = "inside"
            alignment = "left"
            "##,
        )
        .unwrap();
        assert_eq!(config.radius, 6.0);
        assert_eq!(config.margin, defaults::MARGIN);
        assert_eq!(config.selected_color, Color::RED);
        assert_eq!(config.unselected_color, Color::WHITE);
        assert_eq!(config.mode, IndicatorMode::Inside);
        assert_eq!(config.alignment, Alignment::Start);
    }

    #[test]
    fn test_from_toml_errors() {
        let err = IndicatorConfig::from_toml_str(r#"selected_color = "blue""#).unwrap_err();
        assert!(matches!(err, IndicatorError::InvalidColor { .. }));

        let err = IndicatorConfig::from_toml_str("radius = -2.0").unwrap_err();
        assert!(matches!(err, IndicatorError::InvalidValue { .. }));

        let err = IndicatorConfig::from_toml_str("gravity = \"center\"").unwrap_err();
        assert!(matches!(err, IndicatorError::Parse(_)));

        let err = IndicatorConfig::from_toml_str("mode = \"sideways\"").unwrap_err();
        assert!(matches!(err, IndicatorError::Parse(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = IndicatorConfig::default()
            .with_radius(4.0)
            .with_margin(8.0)
            .with_mode(IndicatorMode::Outside)
            .with_alignment(Alignment::End);
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("mode = \"outside\""));
        assert_eq!(IndicatorConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = IndicatorConfig::from_toml_file("/nonexistent/indicator.toml").unwrap_err();
        assert!(matches!(err, IndicatorError::Io { .. }));
    }
}
