use std::path::Path;

use image::DynamicImage;

use crate::error::{CropperError, Result};

/// Extensions offered by the open and save dialogs.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

pub fn open_image(path: &Path) -> Result<DynamicImage> {
    let image = image::open(path).map_err(|source| CropperError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "image loaded"
    );
    Ok(image)
}

/// Writes `image` to `path`, picking the encoder from the extension.
///
/// JPEG has no alpha channel, so RGBA images are flattened to RGB first.
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    let is_jpeg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"));
    let result = if is_jpeg && image.color().has_alpha() {
        DynamicImage::ImageRgb8(image.to_rgb8()).save(path)
    } else {
        image.save(path)
    };
    result.map_err(|source| CropperError::ImageSave {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "image saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_save_and_open_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 2, Rgba([9, 8, 7, 255])));
        save_image(&image, &path).unwrap();

        let loaded = open_image(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(2, 1), &Rgba([9, 8, 7, 255]));
    }

    #[test]
    fn test_save_rgba_as_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let image = DynamicImage::new_rgba8(8, 8);
        save_image(&image, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");
        let err = open_image(&path).unwrap_err();
        assert!(matches!(err, CropperError::ImageLoad { .. }));
        assert!(err.to_string().contains("missing.png"));
    }
}
