//! Card configuration
//!
//! `CardOptions` is the raw, user-supplied setup structure (every field
//! optional, deserialized from TOML or any other serde source). `CardConfig`
//! is the validated, immutable configuration the card actually runs with.

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Event name used when the setup data does not provide one
pub const DEFAULT_EVENT_NAME: &str = "custom_input_event";

/// Input length cap used when the setup data does not provide one
pub const DEFAULT_MAX_LENGTH: usize = 500;

/// Raw card setup data as supplied by the host (all fields optional)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardOptions {
    /// Card title shown in the header
    pub title: Option<String>,

    /// Free-text mode when true (the default), single-select mode when false
    pub use_text_input: Option<bool>,

    /// Options for select mode, in display order
    pub select_options: Option<Vec<String>>,

    /// Name of the event fired on send
    pub event_name: Option<String>,

    /// Maximum input length in characters
    pub max_length: Option<usize>,

    /// Regular expression the text input must match
    pub pattern: Option<String>,
}

impl CardOptions {
    /// Load card options from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read card options from {}", path.display()))?;

        let options: CardOptions = toml::from_str(&content)
            .with_context(|| format!("Failed to parse card options from {}", path.display()))?;

        Ok(options)
    }

    /// Default card options location (~/.config/input-card/card.toml on Linux)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("input-card").join("card.toml"))
    }
}

/// Errors raised while turning raw setup data into a usable configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Setup data was absent entirely
    #[error("Invalid configuration")]
    Invalid,

    /// Select mode was requested without any options to select from
    #[error("select_options required")]
    MissingSelectOptions,

    /// The validation pattern does not compile
    #[error("invalid pattern: {0}")]
    BadPattern(#[from] regex::Error),

    /// max_length must be a positive number of characters
    #[error("max_length must be positive")]
    ZeroMaxLength,
}

/// Validated card configuration (immutable after construction)
#[derive(Debug, Clone)]
pub struct CardConfig {
    pub title: String,
    pub use_text_input: bool,
    pub select_options: Vec<String>,
    pub event_name: String,
    pub max_length: usize,
    /// Compiled once here so a bad pattern fails the card up front
    /// instead of erroring on every send
    pub pattern: Option<Regex>,
}

impl CardConfig {
    /// Build a validated configuration from raw setup data, applying defaults
    pub fn from_options(options: Option<CardOptions>) -> Result<Self, ConfigError> {
        let options = options.ok_or(ConfigError::Invalid)?;

        let use_text_input = options.use_text_input.unwrap_or(true);
        let select_options = options.select_options.unwrap_or_default();

        if !use_text_input && select_options.is_empty() {
            return Err(ConfigError::MissingSelectOptions);
        }

        let max_length = options.max_length.unwrap_or(DEFAULT_MAX_LENGTH);
        if max_length == 0 {
            return Err(ConfigError::ZeroMaxLength);
        }

        let pattern = match options.pattern {
            Some(source) => Some(Regex::new(&source)?),
            None => None,
        };

        Ok(Self {
            title: options.title.unwrap_or_default(),
            use_text_input,
            select_options,
            event_name: options
                .event_name
                .unwrap_or_else(|| DEFAULT_EVENT_NAME.to_string()),
            max_length,
            pattern,
        })
    }

    /// Starting value for the current input: empty in text mode, the first
    /// option in select mode
    pub fn initial_value(&self) -> String {
        if self.use_text_input {
            String::new()
        } else {
            self.select_options.first().cloned().unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_options_is_invalid() {
        let err = CardConfig::from_options(None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid));
        assert_eq!(err.to_string(), "Invalid configuration");
    }

    #[test]
    fn test_defaults() {
        let config = CardConfig::from_options(Some(CardOptions::default())).unwrap();
        assert_eq!(config.title, "");
        assert!(config.use_text_input);
        assert!(config.select_options.is_empty());
        assert_eq!(config.event_name, "custom_input_event");
        assert_eq!(config.max_length, 500);
        assert!(config.pattern.is_none());
        assert_eq!(config.initial_value(), "");
    }

    #[test]
    fn test_select_mode_requires_options() {
        let options = CardOptions {
            use_text_input: Some(false),
            ..Default::default()
        };
        let err = CardConfig::from_options(Some(options)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSelectOptions));
        assert_eq!(err.to_string(), "select_options required");
    }

    #[test]
    fn test_select_mode_starts_on_first_option() {
        let options = CardOptions {
            use_text_input: Some(false),
            select_options: Some(vec!["a".to_string(), "b".to_string()]),
            ..Default::default()
        };
        let config = CardConfig::from_options(Some(options)).unwrap();
        assert_eq!(config.initial_value(), "a");
    }

    #[test]
    fn test_bad_pattern_fails_up_front() {
        let options = CardOptions {
            pattern: Some("[unclosed".to_string()),
            ..Default::default()
        };
        let err = CardConfig::from_options(Some(options)).unwrap_err();
        assert!(matches!(err, ConfigError::BadPattern(_)));
    }

    #[test]
    fn test_zero_max_length_rejected() {
        let options = CardOptions {
            max_length: Some(0),
            ..Default::default()
        };
        let err = CardConfig::from_options(Some(options)).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroMaxLength));
    }

    #[test]
    fn test_options_from_toml() {
        let options: CardOptions = toml::from_str(
            r#"
            title = "Scene picker"
            use_text_input = false
            select_options = ["morning", "evening"]
            event_name = "scene_selected"
            "#,
        )
        .unwrap();

        let config = CardConfig::from_options(Some(options)).unwrap();
        assert_eq!(config.title, "Scene picker");
        assert!(!config.use_text_input);
        assert_eq!(config.select_options, vec!["morning", "evening"]);
        assert_eq!(config.event_name, "scene_selected");
        assert_eq!(config.max_length, 500);
    }
}
