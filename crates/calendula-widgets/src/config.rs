//! YAML configuration for a calendar grid.

use crate::tile::TileProps;
use calendula_core::{CalendarType, Date, FlexDirection, Style, View};
use calendula_layout::ProportionalLayout;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Reading the configuration file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A field holds a value outside its domain
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },
}

impl ConfigError {
    fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

const fn default_count() -> u32 {
    7
}

/// Layout section of a [`CalendarConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Slots per line
    #[serde(default = "default_count")]
    pub count: u32,
    /// Slots skipped before the first child
    #[serde(default)]
    pub offset: Option<u32>,
    /// Main axis
    #[serde(default)]
    pub direction: FlexDirection,
    /// Whether children wrap onto further lines
    #[serde(default)]
    pub wrap: bool,
    /// Class attribute of the container
    #[serde(default)]
    pub class_name: Option<String>,
    /// Caller style of the container
    #[serde(default)]
    pub style: Style,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            offset: None,
            direction: FlexDirection::Row,
            wrap: false,
            class_name: None,
            style: Style::new(),
        }
    }
}

impl LayoutConfig {
    /// Layout parameters described by this section.
    #[must_use]
    pub fn grid(&self) -> ProportionalLayout {
        ProportionalLayout {
            count: self.count,
            offset: self.offset,
            direction: self.direction,
            wrap: self.wrap,
        }
    }
}

/// Calendar grid configuration.
///
/// ```yaml
/// view: month
/// calendar_type: iso8601
/// min_date: 2024-01-01T00:00:00
/// layout:
///   count: 7
///   offset: 3
///   wrap: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Grid view
    #[serde(default)]
    pub view: View,
    /// Calendar deciding weekends
    #[serde(default)]
    pub calendar_type: CalendarType,
    /// Locale handed to formatters
    #[serde(default)]
    pub locale: Option<String>,
    /// Earliest selectable date
    #[serde(default)]
    pub min_date: Option<Date>,
    /// Latest selectable date
    #[serde(default)]
    pub max_date: Option<Date>,
    /// Grid container
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl CalendarConfig {
    /// Parse and validate a configuration from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or a value is out of range.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        tracing::debug!(
            view = config.view.as_str(),
            count = config.layout.count,
            offset = ?config.layout.offset,
            "loaded calendar config"
        );
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails [`Self::from_yaml`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&text)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero slot count, an offset
    /// past the slot count, or a minimum date after the maximum date.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let count = self.layout.count;
        if count == 0 {
            return Err(ConfigError::invalid("layout.count", "must be at least 1"));
        }
        if let Some(offset) = self.layout.offset.filter(|&o| o > count) {
            return Err(ConfigError::invalid(
                "layout.offset",
                format!("{offset} exceeds slot count {count}"),
            ));
        }
        if let (Some(min), Some(max)) = (self.min_date, self.max_date) {
            if min > max {
                return Err(ConfigError::invalid("min_date", "must not be after max_date"));
            }
        }
        Ok(())
    }
}

impl TileProps {
    /// Apply the bounds and locale of a configuration.
    #[must_use]
    pub fn with_bounds_from(self, config: &CalendarConfig) -> Self {
        let props = self.bounds(config.min_date, config.max_date);
        match &config.locale {
            Some(locale) => props.locale(locale.clone()),
            None => props,
        }
    }
}
