//! Viewer configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; a user `config.toml` in the config directory overrides any
//! subset of keys.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! anchor_date = "2026-01-28"   # Calendar date that is day 0 (local midnight)
//!
//! [gallery]
//! root = "Moss Images"         # Directory (or URL prefix) holding the images
//! size = 201                   # Number of images, named 0.jpg .. 200.jpg
//! extension = "jpg"            # Image file extension, without the dot
//!
//! [input]
//! swipe_threshold = 50.0       # Minimum horizontal swipe distance in pixels
//!
//! [preload]
//! offsets = [-1, 0, 1, 2, -2]  # Days around today to warm at startup
//!
//! [storage]
//! path = ".daily-moss/store.json"  # Persistent key-value store file
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [gallery]
//! size = 120
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Viewer configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MossConfig {
    /// The calendar date whose local midnight is day 0.
    pub anchor_date: NaiveDate,
    /// Where the images live and how many there are.
    pub gallery: GalleryConfig,
    /// Input gesture settings.
    pub input: InputConfig,
    /// Startup image warm-up settings.
    pub preload: PreloadConfig,
    /// Persistent store settings.
    pub storage: StorageConfig,
}

pub fn default_anchor_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 28).expect("stock anchor date is a valid calendar date")
}

impl Default for MossConfig {
    fn default() -> Self {
        Self {
            anchor_date: default_anchor_date(),
            gallery: GalleryConfig::default(),
            input: InputConfig::default(),
            preload: PreloadConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl MossConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gallery.size == 0 {
            return Err(ConfigError::Validation(
                "gallery.size must be at least 1".into(),
            ));
        }
        if self.gallery.extension.is_empty() || self.gallery.extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "gallery.extension must be non-empty and must not start with a dot".into(),
            ));
        }
        if !self.input.swipe_threshold.is_finite() || self.input.swipe_threshold < 0.0 {
            return Err(ConfigError::Validation(
                "input.swipe_threshold must be a finite, non-negative number".into(),
            ));
        }
        if self.storage.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "storage.path must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Gallery layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Directory or URL prefix; image URIs are `<root>/<index>.<extension>`.
    pub root: String,
    /// Number of images in the gallery (N).
    pub size: u32,
    /// File extension shared by every image.
    pub extension: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            root: "Moss Images".to_string(),
            size: 201,
            extension: "jpg".to_string(),
        }
    }
}

/// Gesture recognition settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Horizontal swipes must travel strictly further than this (pixels).
    pub swipe_threshold: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 50.0,
        }
    }
}

/// Startup warm-up settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreloadConfig {
    /// Day offsets relative to today whose images are requested at startup.
    pub offsets: Vec<i64>,
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            offsets: vec![-1, 0, 1, 2, -2],
        }
    }
}

/// Persistent store location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// JSON file backing the key-value store. Relative paths resolve
    /// against the config directory.
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: ".daily-moss/store.json".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(MossConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<MossConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: MossConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, layered over the
/// stock defaults.
pub fn load_config(dir: &Path) -> Result<MossConfig, ConfigError> {
    let overlay = load_raw_config(dir)?;
    if overlay.is_some() {
        log::debug!("loaded {}", dir.join("config.toml").display());
    }
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Daily Moss Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Day zero
# ---------------------------------------------------------------------------
# Local midnight of this date is day 0. Today's image is
# (days since anchor) mod gallery.size. Must be a quoted YYYY-MM-DD string.
anchor_date = "2026-01-28"

# ---------------------------------------------------------------------------
# Gallery
# ---------------------------------------------------------------------------
[gallery]
# Directory or URL prefix. Image URIs are "<root>/<index>.<extension>".
root = "Moss Images"
# Number of images, named 0.<extension> through (size - 1).<extension>.
size = 201
# Extension shared by every image, without the leading dot.
extension = "jpg"

# ---------------------------------------------------------------------------
# Input
# ---------------------------------------------------------------------------
[input]
# A horizontal swipe must travel further than this many pixels to navigate.
# Swipe left = next day, swipe right = previous day.
swipe_threshold = 50.0

# ---------------------------------------------------------------------------
# Preloading
# ---------------------------------------------------------------------------
[preload]
# Day offsets around today whose images are warmed at startup.
offsets = [-1, 0, 1, 2, -2]

# ---------------------------------------------------------------------------
# Storage
# ---------------------------------------------------------------------------
[storage]
# JSON file holding the theme preference and the visit streak.
# Relative paths resolve against the directory holding this file.
path = ".daily-moss/store.json"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_stock_gallery() {
        let config = MossConfig::default();
        assert_eq!(
            config.anchor_date,
            NaiveDate::from_ymd_opt(2026, 1, 28).unwrap()
        );
        assert_eq!(config.gallery.root, "Moss Images");
        assert_eq!(config.gallery.size, 201);
        assert_eq!(config.gallery.extension, "jpg");
        assert_eq!(config.input.swipe_threshold, 50.0);
        assert_eq!(config.preload.offsets, vec![-1, 0, 1, 2, -2]);
    }

    #[test]
    fn default_config_passes_validation() {
        assert!(MossConfig::default().validate().is_ok());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
anchor_date = "2025-03-01"

[gallery]
size = 12
"#;
        let config: MossConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.anchor_date,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert_eq!(config.gallery.size, 12);
        // Unspecified keys keep their defaults
        assert_eq!(config.gallery.root, "Moss Images");
        assert_eq!(config.input.swipe_threshold, 50.0);
    }

    #[test]
    fn malformed_anchor_date_is_rejected() {
        let result: Result<MossConfig, _> = toml::from_str("anchor_date = \"2026-13-01\"");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<MossConfig, _> = toml::from_str("gallery_size = 10");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let toml = r#"
[gallery]
count = 10
"#;
        let result: Result<MossConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn validate_zero_gallery_size() {
        let mut config = MossConfig::default();
        config.gallery.size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_extension_with_dot() {
        let mut config = MossConfig::default();
        config.gallery.extension = ".jpg".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_negative_swipe_threshold() {
        let mut config = MossConfig::default();
        config.input.swipe_threshold = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.input.swipe_threshold = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_empty_storage_path() {
        let mut config = MossConfig::default();
        config.storage.path = "  ".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // Merge and load
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_keeps_sibling_keys_in_tables() {
        let overlay: toml::Value = toml::from_str("[gallery]\nsize = 7").unwrap();
        let merged = merge_toml(stock_defaults_value(), overlay);
        let config: MossConfig = merged.try_into().unwrap();
        assert_eq!(config.gallery.size, 7);
        assert_eq!(config.gallery.root, "Moss Images");
        assert_eq!(config.gallery.extension, "jpg");
    }

    #[test]
    fn merge_toml_replaces_arrays_wholesale() {
        let overlay: toml::Value = toml::from_str("[preload]\noffsets = [0]").unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.preload.offsets, vec![0]);
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, MossConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
anchor_date = "2024-12-31"

[gallery]
root = "/srv/moss"
extension = "webp"

[storage]
path = "state.json"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(
            config.anchor_date,
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
        assert_eq!(config.gallery.root, "/srv/moss");
        assert_eq!(config.gallery.extension, "webp");
        assert_eq!(config.gallery.size, 201);
        assert_eq!(config.storage.path, "state.json");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_runs_validation() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[gallery]\nsize = 0").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: MossConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, MossConfig::default());
    }
}
