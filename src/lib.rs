//! # PicKut
//!
//! Interactive image cropper with a versioned edit history.
//!
//! - [`crop`] - normalized crop rectangle, drag state machine, aspect presets
//!   and pixel extraction
//! - [`history`] - newest-first version timeline
//! - [`config`] - JSON/TOML settings
//! - [`app`] - the eframe front-end

pub mod app;
pub mod cli;
pub mod config;
pub mod crop;
pub mod error;
pub mod history;
pub mod io;

pub use config::Config;
pub use crop::{AspectPreset, CropController, CropRect, Handle};
pub use error::{ConfigError, CropperError, Result};
pub use history::{ImageVersion, VersionHistory, VersionOrigin};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Installs the global tracing subscriber.
///
/// Output goes to stdout; `RUST_LOG` adjusts the filter, INFO by default.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
