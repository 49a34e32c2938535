use std::path::PathBuf;

use clap::Parser;

use crate::crop::AspectPreset;

/// PicKut interactive image cropper.
#[derive(Parser, Debug)]
#[command(name = "pickut", version, about = "Interactive image cropper")]
pub struct CliArgs {
    /// Image to open on startup.
    #[arg(value_name = "IMAGE")]
    pub image: Option<PathBuf>,

    /// Settings file (.json or .toml). Defaults to <config dir>/pickut/config.toml.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Aspect preset selected when the crop tool opens: free, 1:1, 4:3, 16:9.
    /// Overrides the settings file.
    #[arg(short, long, value_name = "PRESET")]
    pub preset: Option<AspectPreset>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_args() {
        let args = CliArgs::try_parse_from([
            "pickut",
            "photo.png",
            "--config",
            "settings.toml",
            "--preset",
            "4:3",
        ])
        .unwrap();
        assert_eq!(args.image, Some(PathBuf::from("photo.png")));
        assert_eq!(args.config, Some(PathBuf::from("settings.toml")));
        assert_eq!(args.preset, Some(AspectPreset::Landscape4x3));
    }

    #[test]
    fn test_parse_no_args() {
        let args = CliArgs::try_parse_from(["pickut"]).unwrap();
        assert!(args.image.is_none());
        assert!(args.preset.is_none());
    }

    #[test]
    fn test_rejects_unknown_preset() {
        assert!(CliArgs::try_parse_from(["pickut", "-p", "21:9"]).is_err());
    }
}
