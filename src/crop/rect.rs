use eframe::egui;

/// Smallest normalized width or height a crop rectangle may shrink to.
pub const MIN_DIM: f32 = 0.05;

/// Crop rectangle in normalized coordinates (0.0-1.0) of the displayed image.
///
/// The fields are private so every value of this type satisfies
/// `0 <= x`, `0 <= y`, `x + width <= 1`, `y + height <= 1` and
/// `width, height >= MIN_DIM`. Out-of-range input is clamped to the
/// nearest valid rectangle rather than rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropRect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl CropRect {
    /// Centered rectangle used whenever the tool opens or the preset changes.
    pub const DEFAULT: CropRect = CropRect {
        x: 0.1,
        y: 0.1,
        width: 0.8,
        height: 0.8,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        let width = finite_or(width, Self::DEFAULT.width).clamp(MIN_DIM, 1.0);
        let height = finite_or(height, Self::DEFAULT.height).clamp(MIN_DIM, 1.0);
        Self {
            x: finite_or(x, Self::DEFAULT.x).clamp(0.0, 1.0 - width),
            y: finite_or(y, Self::DEFAULT.y).clamp(0.0, 1.0 - height),
            width,
            height,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Same size, shifted by `(dx, dy)` but never past the unit square.
    pub fn translated_within(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: (self.x + dx).clamp(0.0, 1.0 - self.width),
            y: (self.y + dy).clamp(0.0, 1.0 - self.height),
            ..*self
        }
    }

    /// Width/height ratio of this rectangle as drawn inside `container`.
    pub fn aspect_in(&self, container: egui::Vec2) -> f32 {
        (self.width * container.x) / (self.height * container.y)
    }

    /// Maps the rectangle into the on-screen image rect for painting and hit testing.
    pub fn to_screen(&self, image_rect: egui::Rect) -> egui::Rect {
        egui::Rect::from_min_max(
            image_rect.lerp_inside(egui::vec2(self.x, self.y)),
            image_rect.lerp_inside(egui::vec2(self.right(), self.bottom())),
        )
    }
}

impl Default for CropRect {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}
