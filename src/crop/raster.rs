use image::{DynamicImage, GenericImageView};

use super::rect::CropRect;

/// Crop region in source image pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Maps a normalized rectangle onto an `image_width` x `image_height` raster.
///
/// Sizes are rounded to whole pixels and kept exact (at least one pixel, at
/// most the image). Rounded offsets move back where needed so the region
/// stays inside the image.
pub fn pixel_rect(rect: &CropRect, image_width: u32, image_height: u32) -> PixelRect {
    let (x, width) = pixel_span(rect.x(), rect.width(), image_width);
    let (y, height) = pixel_span(rect.y(), rect.height(), image_height);
    PixelRect {
        x,
        y,
        width,
        height,
    }
}

fn pixel_span(start: f32, len: f32, extent: u32) -> (u32, u32) {
    let extent_f = extent as f64;
    let size = ((len as f64 * extent_f).round() as u32).max(1).min(extent);
    let offset =
        ((start as f64 * extent_f).round().max(0.0) as u32).min(extent.saturating_sub(size));
    (offset, size)
}

/// Copies the region under `rect` out of `image` without resampling.
pub fn extract(rect: &CropRect, image: &DynamicImage) -> DynamicImage {
    let (w, h) = image.dimensions();
    let region = pixel_rect(rect, w, h);
    image.crop_imm(region.x, region.y, region.width, region.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_pixel_rect_quarter_offset() {
        let rect = CropRect::new(0.25, 0.25, 0.5, 0.5);
        assert_eq!(
            pixel_rect(&rect, 400, 400),
            PixelRect {
                x: 100,
                y: 100,
                width: 200,
                height: 200
            }
        );
    }

    #[test]
    fn test_pixel_rect_rounds() {
        let rect = CropRect::new(0.1, 0.1, 0.8, 0.8);
        let px = pixel_rect(&rect, 333, 101);
        assert_eq!(px.x, 33);
        assert_eq!(px.width, 266);
        assert_eq!(px.y, 10);
        assert_eq!(px.height, 81);
    }

    #[test]
    fn test_pixel_rect_stays_inside_tiny_image() {
        let rect = CropRect::new(0.95, 0.95, 0.05, 0.05);
        let px = pixel_rect(&rect, 3, 3);
        assert!(px.x + px.width <= 3);
        assert!(px.y + px.height <= 3);
        assert!(px.width >= 1 && px.height >= 1);
    }

    #[test]
    fn test_pixel_rect_keeps_size_at_far_edge() {
        // 1.5 and 2.5 both round up; the offset gives way, the size does not.
        let rect = CropRect::new(0.375, 0.0, 0.625, 1.0);
        assert_eq!(
            pixel_rect(&rect, 4, 4),
            PixelRect {
                x: 1,
                y: 0,
                width: 3,
                height: 4
            }
        );
        let rect = CropRect::new(0.0, 0.375, 1.0, 0.625);
        let px = pixel_rect(&rect, 4, 4);
        assert_eq!((px.y, px.height), (1, 3));
    }

    #[test]
    fn test_extract_preserves_pixels() {
        let source = RgbaImage::from_fn(4, 4, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        let image = DynamicImage::ImageRgba8(source);
        let out = extract(&CropRect::new(0.5, 0.25, 0.5, 0.5), &image).to_rgba8();
        assert_eq!(out.dimensions(), (2, 2));
        assert_eq!(out.get_pixel(0, 0), &Rgba([2, 1, 0, 255]));
        assert_eq!(out.get_pixel(1, 1), &Rgba([3, 2, 0, 255]));
    }
}
