//! Error types for image I/O and configuration.
//!
//! Crop geometry itself never fails: out-of-range rectangles are clamped.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or saving images.
#[derive(Error, Debug)]
pub enum CropperError {
    /// The source image could not be read or decoded.
    #[error("Failed to load image {}: {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The image could not be encoded or written.
    #[error("Failed to save image {}: {source}", .path.display())]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Errors related to the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// The config file extension is neither `.json` nor `.toml`.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A configuration value is out of its valid range.
    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, CropperError>;

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
