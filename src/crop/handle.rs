use eframe::egui;

/// Interactive control point of the crop rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handle {
    /// The rectangle body; drags translate without resizing.
    Move,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizontalEdge {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalEdge {
    Top,
    Bottom,
}

/// Edges a corner handle drags. The opposite edges stay anchored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edges {
    pub horizontal: HorizontalEdge,
    pub vertical: VerticalEdge,
}

impl Handle {
    pub const CORNERS: [Handle; 4] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
    ];

    /// Edges moved by this handle, `None` for [`Handle::Move`].
    pub fn edges(self) -> Option<Edges> {
        let (horizontal, vertical) = match self {
            Handle::Move => return None,
            Handle::TopLeft => (HorizontalEdge::Left, VerticalEdge::Top),
            Handle::TopRight => (HorizontalEdge::Right, VerticalEdge::Top),
            Handle::BottomLeft => (HorizontalEdge::Left, VerticalEdge::Bottom),
            Handle::BottomRight => (HorizontalEdge::Right, VerticalEdge::Bottom),
        };
        Some(Edges {
            horizontal,
            vertical,
        })
    }

    /// Screen position of a corner handle on `rect`; the center for [`Handle::Move`].
    pub fn anchor_on(self, rect: egui::Rect) -> egui::Pos2 {
        match self {
            Handle::Move => rect.center(),
            Handle::TopLeft => rect.left_top(),
            Handle::TopRight => rect.right_top(),
            Handle::BottomLeft => rect.left_bottom(),
            Handle::BottomRight => rect.right_bottom(),
        }
    }

    pub fn cursor(self) -> egui::CursorIcon {
        match self {
            Handle::Move => egui::CursorIcon::Move,
            Handle::TopLeft => egui::CursorIcon::ResizeNorthWest,
            Handle::TopRight => egui::CursorIcon::ResizeNorthEast,
            Handle::BottomLeft => egui::CursorIcon::ResizeSouthWest,
            Handle::BottomRight => egui::CursorIcon::ResizeSouthEast,
        }
    }
}

/// Finds the handle under `pos` for a crop rectangle drawn at `rect` (screen space).
///
/// Corners win over the body so a grab near a corner always resizes.
pub fn hit_test(pos: egui::Pos2, rect: egui::Rect, tolerance: f32) -> Option<Handle> {
    Handle::CORNERS
        .into_iter()
        .find(|handle| pos.distance(handle.anchor_on(rect)) < tolerance)
        .or_else(|| rect.contains(pos).then_some(Handle::Move))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen_rect() -> egui::Rect {
        egui::Rect::from_min_max(egui::pos2(100.0, 100.0), egui::pos2(300.0, 200.0))
    }

    #[test]
    fn test_edges_mapping() {
        assert_eq!(Handle::Move.edges(), None);
        let tl = Handle::TopLeft.edges().unwrap();
        assert_eq!(tl.horizontal, HorizontalEdge::Left);
        assert_eq!(tl.vertical, VerticalEdge::Top);
        let br = Handle::BottomRight.edges().unwrap();
        assert_eq!(br.horizontal, HorizontalEdge::Right);
        assert_eq!(br.vertical, VerticalEdge::Bottom);
        let tr = Handle::TopRight.edges().unwrap();
        assert_eq!((tr.horizontal, tr.vertical), (HorizontalEdge::Right, VerticalEdge::Top));
        let bl = Handle::BottomLeft.edges().unwrap();
        assert_eq!((bl.horizontal, bl.vertical), (HorizontalEdge::Left, VerticalEdge::Bottom));
    }

    #[test]
    fn test_hit_test_corners() {
        let rect = screen_rect();
        assert_eq!(hit_test(egui::pos2(102.0, 98.0), rect, 10.0), Some(Handle::TopLeft));
        assert_eq!(hit_test(egui::pos2(298.0, 103.0), rect, 10.0), Some(Handle::TopRight));
        assert_eq!(hit_test(egui::pos2(95.0, 205.0), rect, 10.0), Some(Handle::BottomLeft));
        assert_eq!(hit_test(egui::pos2(300.0, 200.0), rect, 10.0), Some(Handle::BottomRight));
    }

    #[test]
    fn test_hit_test_body_and_miss() {
        let rect = screen_rect();
        assert_eq!(hit_test(egui::pos2(200.0, 150.0), rect, 10.0), Some(Handle::Move));
        assert_eq!(hit_test(egui::pos2(50.0, 150.0), rect, 10.0), None);
        assert_eq!(hit_test(egui::pos2(200.0, 250.0), rect, 10.0), None);
    }
}
