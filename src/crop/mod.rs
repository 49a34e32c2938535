//! Interactive crop tool.
//!
//! The crop rectangle lives in normalized coordinates of the displayed image,
//! so it survives window resizes and maps back onto the source pixels exactly.
//! Pointer positions are normalized per event, the drag state machine turns
//! them into rectangle updates, the aspect solver keeps a preset ratio during
//! corner resizes, and the rasterizer cuts the final region out of the source.

pub mod aspect;
pub mod handle;
pub mod pointer;
pub mod raster;
pub mod rect;
pub mod session;

pub use aspect::{AspectPreset, ParsePresetError};
pub use handle::{Edges, Handle, HorizontalEdge, VerticalEdge, hit_test};
pub use raster::{PixelRect, extract, pixel_rect};
pub use rect::{CropRect, MIN_DIM};
pub use session::{CropController, DragGuard, DragSession, DragState};
