//! Settings file handling.
//!
//! Settings are read from `.json` or `.toml` files. Without an explicit path
//! the cropper looks for `<config dir>/pickut/config.toml` and falls back to
//! defaults when it does not exist.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crop::AspectPreset;
use crate::error::{ConfigError, ConfigResult};

/// Crop tool behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropSettings {
    /// Preset selected when the crop tool opens
    pub default_preset: AspectPreset,
    /// Grab distance around a corner handle, in screen pixels
    pub handle_tolerance: f32,
}

impl Default for CropSettings {
    fn default() -> Self {
        Self {
            default_preset: AspectPreset::Free,
            handle_tolerance: 10.0,
        }
    }
}

/// Window and canvas appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub window_width: f32,
    pub window_height: f32,
    /// Space kept free around the displayed image
    pub padding: f32,
    /// Alpha of the dimmed area outside the crop
    pub overlay_alpha: u8,
    /// Draw rule-of-thirds lines inside the crop
    pub show_grid: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            window_width: 1000.0,
            window_height: 720.0,
            padding: 20.0,
            overlay_alpha: 150,
            show_grid: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// File name suggested by the save dialog
    pub file_name: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_name: "pickut_export.png".to_string(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crop: CropSettings,
    pub ui: UiSettings,
    pub export: ExportSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> ConfigResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// `<config dir>/pickut/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pickut").join("config.toml"))
    }

    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> ConfigResult<()> {
        self.validate()?;
        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Loads `explicit` if given, otherwise the default file when present.
    ///
    /// Errors for an explicit path are returned; a broken default file is
    /// logged and replaced by defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            let config = Self::load_from_file(path)?;
            tracing::info!(path = %path.display(), "loaded config");
            return Ok(config);
        }

        let Some(path) = Self::default_path().filter(|p| p.exists()) else {
            tracing::debug!("no config file found, using defaults");
            return Ok(Self::default());
        };
        match Self::load_from_file(&path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config");
                Ok(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        fn out_of_range(key: &str, value: impl ToString) -> ConfigError {
            ConfigError::ValueOutOfRange {
                key: key.to_string(),
                value: value.to_string(),
            }
        }

        let tolerance = self.crop.handle_tolerance;
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(out_of_range("crop.handle_tolerance", tolerance));
        }
        if !self.ui.window_width.is_finite() || self.ui.window_width <= 0.0 {
            return Err(out_of_range("ui.window_width", self.ui.window_width));
        }
        if !self.ui.window_height.is_finite() || self.ui.window_height <= 0.0 {
            return Err(out_of_range("ui.window_height", self.ui.window_height));
        }
        if !self.ui.padding.is_finite() || self.ui.padding < 0.0 {
            return Err(out_of_range("ui.padding", self.ui.padding));
        }
        if self.export.file_name.trim().is_empty() {
            return Err(out_of_range("export.file_name", "\"\""));
        }
        Ok(())
    }
}
