use eframe::egui;

/// Converts an absolute pointer position into normalized coordinates of `container`.
///
/// The result is not clamped: a pointer dragged outside the image yields values
/// below 0 or above 1, and the drag rules clamp the rectangle instead. A container
/// that has not been laid out yet (zero width or height) maps everything to the origin.
pub fn normalize(pointer: egui::Pos2, container: egui::Rect) -> egui::Pos2 {
    let size = container.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        return egui::Pos2::ZERO;
    }
    egui::pos2(
        (pointer.x - container.left()) / size.x,
        (pointer.y - container.top()) / size.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_inside() {
        let container = egui::Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(400.0, 200.0));
        let p = normalize(egui::pos2(300.0, 100.0), container);
        assert_eq!(p, egui::pos2(0.5, 0.25));
    }

    #[test]
    fn test_normalize_outside_is_unclamped() {
        let container = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(100.0, 100.0));
        let p = normalize(egui::pos2(-50.0, 150.0), container);
        assert_eq!(p, egui::pos2(-0.5, 1.5));
    }

    #[test]
    fn test_normalize_zero_sized_container() {
        let container = egui::Rect::from_min_size(egui::pos2(10.0, 10.0), egui::vec2(0.0, 80.0));
        assert_eq!(normalize(egui::pos2(40.0, 40.0), container), egui::Pos2::ZERO);

        let container = egui::Rect::from_min_size(egui::pos2(10.0, 10.0), egui::vec2(80.0, 0.0));
        assert_eq!(normalize(egui::pos2(40.0, 40.0), container), egui::Pos2::ZERO);
    }
}
