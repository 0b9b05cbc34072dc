//! Global settings loaded from TOML, following the same OnceLock pattern as the kana tables.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

use crate::ops::ConvertOps;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub convert: ConvertSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConvertSettings {
    pub mode: String,
    #[serde(default)]
    pub ignore: String,
    #[serde(default)]
    pub keep_diacritic_marks_apart: bool,
}

impl Settings {
    /// Operations described by `convert.mode` plus the modifier flag.
    pub fn default_ops(&self) -> ConvertOps {
        let mut ops = ConvertOps::from_mnemonic(&self.convert.mode);
        if self.convert.keep_diacritic_marks_apart {
            ops.insert(ConvertOps::KEEP_DIACRITIC_MARKS_APART);
        }
        ops
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    // Unknown letters are tolerated, but only ASCII letters can be flags.
    if !s.convert.mode.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(SettingsError::InvalidValue {
            field: "convert.mode".to_string(),
            reason: "must contain ASCII letters only".to_string(),
        });
    }
    Ok(())
}
