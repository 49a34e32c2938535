use std::str::FromStr;

use eframe::egui;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::handle::{Edges, HorizontalEdge, VerticalEdge};
use super::rect::{CropRect, MIN_DIM};

/// Aspect ratio presets offered by the crop tool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectPreset {
    #[default]
    #[serde(rename = "free")]
    Free,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:3")]
    Landscape4x3,
    #[serde(rename = "16:9")]
    Widescreen16x9,
}

impl AspectPreset {
    pub const ALL: [AspectPreset; 4] = [
        AspectPreset::Free,
        AspectPreset::Square,
        AspectPreset::Landscape4x3,
        AspectPreset::Widescreen16x9,
    ];

    /// Target width/height ratio in screen pixels, `None` for free cropping.
    pub fn ratio(self) -> Option<f32> {
        match self {
            AspectPreset::Free => None,
            AspectPreset::Square => Some(1.0),
            AspectPreset::Landscape4x3 => Some(4.0 / 3.0),
            AspectPreset::Widescreen16x9 => Some(16.0 / 9.0),
        }
    }

    /// Key used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            AspectPreset::Free => "free",
            AspectPreset::Square => "1:1",
            AspectPreset::Landscape4x3 => "4:3",
            AspectPreset::Widescreen16x9 => "16:9",
        }
    }
}

impl std::fmt::Display for AspectPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AspectPreset::Free => "FREE",
            other => other.as_str(),
        };
        write!(f, "{}", s)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown aspect preset '{0}' (expected free, 1:1, 4:3 or 16:9)")]
pub struct ParsePresetError(pub String);

impl FromStr for AspectPreset {
    type Err = ParsePresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        AspectPreset::ALL
            .into_iter()
            .find(|preset| preset.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParsePresetError(s.to_string()))
    }
}

/// Converts a screen-space ratio into the ratio of normalized width to height.
///
/// Normalized space is only square when the container is, so a 1:1 crop on a
/// 400x200 image has a normalized width half its normalized height.
pub fn normalized_ratio(ratio: f32, container: egui::Vec2) -> f32 {
    if container.x > 0.0 && container.y > 0.0 {
        ratio * container.y / container.x
    } else {
        ratio
    }
}

/// Re-solves a corner resize so the result keeps `ratio` on screen.
///
/// `width` is the unconstrained width produced by the edge rules. Height is
/// derived from it; when that height does not fit on the side the handle moves
/// toward, height is clamped first and width derived back from it. The corner
/// opposite the handle stays where it was in `snapshot`.
pub fn solve(
    snapshot: &CropRect,
    edges: Edges,
    width: f32,
    ratio: f32,
    container: egui::Vec2,
) -> CropRect {
    let k = normalized_ratio(ratio, container);
    let max_height = match edges.vertical {
        VerticalEdge::Top => snapshot.bottom(),
        VerticalEdge::Bottom => 1.0 - snapshot.y(),
    };

    let mut w = width;
    let mut h = w / k;
    if h > max_height {
        h = max_height;
        w = h * k;
    }
    if w < MIN_DIM || h < MIN_DIM {
        let scale = (MIN_DIM / w).max(MIN_DIM / h);
        w *= scale;
        h *= scale;
    }

    let x = match edges.horizontal {
        HorizontalEdge::Left => snapshot.right() - w,
        HorizontalEdge::Right => snapshot.x(),
    };
    let y = match edges.vertical {
        VerticalEdge::Top => snapshot.bottom() - h,
        VerticalEdge::Bottom => snapshot.y(),
    };
    CropRect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crop::handle::Handle;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_preset_ratios() {
        assert_eq!(AspectPreset::Free.ratio(), None);
        assert_eq!(AspectPreset::Square.ratio(), Some(1.0));
        assert!((AspectPreset::Landscape4x3.ratio().unwrap() - 4.0 / 3.0).abs() < 1e-6);
        assert!((AspectPreset::Widescreen16x9.ratio().unwrap() - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_preset_parse_and_display() {
        assert_eq!("free".parse::<AspectPreset>(), Ok(AspectPreset::Free));
        assert_eq!("FREE".parse::<AspectPreset>(), Ok(AspectPreset::Free));
        assert_eq!(" 16:9 ".parse::<AspectPreset>(), Ok(AspectPreset::Widescreen16x9));
        assert!("3:2".parse::<AspectPreset>().is_err());
        assert_eq!(AspectPreset::Free.to_string(), "FREE");
        assert_eq!(AspectPreset::Landscape4x3.to_string(), "4:3");
    }

    #[test]
    fn test_preset_serde_keys() {
        let json = serde_json::to_string(&AspectPreset::Widescreen16x9).unwrap();
        assert_eq!(json, "\"16:9\"");
        let parsed: AspectPreset = serde_json::from_str("\"1:1\"").unwrap();
        assert_eq!(parsed, AspectPreset::Square);
    }

    #[test]
    fn test_normalized_ratio_uses_container() {
        assert!((normalized_ratio(1.0, egui::vec2(400.0, 200.0)) - 0.5).abs() < 1e-6);
        assert_eq!(normalized_ratio(2.0, egui::vec2(0.0, 200.0)), 2.0);
    }

    #[test]
    fn test_solve_derives_height_from_width() {
        let snapshot = CropRect::new(0.1, 0.1, 0.4, 0.4);
        let edges = Handle::BottomRight.edges().unwrap();
        let rect = solve(&snapshot, edges, 0.6, 1.0, egui::vec2(300.0, 300.0));
        assert!((rect.width() - 0.6).abs() < EPS);
        assert!((rect.height() - 0.6).abs() < EPS);
        assert_eq!(rect.x(), 0.1);
        assert_eq!(rect.y(), 0.1);
    }

    #[test]
    fn test_solve_resolves_height_first_at_bottom() {
        let snapshot = CropRect::new(0.1, 0.5, 0.2, 0.2);
        let edges = Handle::BottomRight.edges().unwrap();
        let container = egui::vec2(200.0, 200.0);
        let rect = solve(&snapshot, edges, 0.8, 1.0, container);
        assert!((rect.bottom() - 1.0).abs() < EPS);
        assert!((rect.height() - 0.5).abs() < EPS);
        assert!((rect.aspect_in(container) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_solve_top_handle_anchors_bottom() {
        let snapshot = CropRect::new(0.4, 0.3, 0.4, 0.4);
        let edges = Handle::TopLeft.edges().unwrap();
        let container = egui::vec2(160.0, 90.0);
        let rect = solve(&snapshot, edges, 0.6, 16.0 / 9.0, container);
        assert!((rect.right() - snapshot.right()).abs() < EPS);
        assert!((rect.bottom() - snapshot.bottom()).abs() < EPS);
        assert!((rect.aspect_in(container) - 16.0 / 9.0).abs() < EPS);
    }

    #[test]
    fn test_solve_respects_min_dim() {
        let snapshot = CropRect::new(0.2, 0.2, 0.5, 0.5);
        let edges = Handle::BottomRight.edges().unwrap();
        let container = egui::vec2(100.0, 100.0);
        let rect = solve(&snapshot, edges, MIN_DIM, 16.0 / 9.0, container);
        assert!(rect.height() >= MIN_DIM - 1e-6);
        assert!(rect.width() >= MIN_DIM - 1e-6);
        assert!((rect.aspect_in(container) - 16.0 / 9.0).abs() < EPS);
    }
}
