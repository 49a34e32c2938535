use eframe::egui;
use image::DynamicImage;

use super::aspect::{self, AspectPreset};
use super::handle::{Edges, Handle, HorizontalEdge, VerticalEdge};
use super::pointer;
use super::raster;
use super::rect::{CropRect, MIN_DIM};

/// State captured on pointer-down. Every pointer move is applied to `snapshot`,
/// never to the previous frame's rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    handle: Handle,
    origin: egui::Pos2,
    snapshot: CropRect,
}

impl DragSession {
    /// Rectangle for a pointer at normalized position `current`.
    fn apply(&self, current: egui::Pos2, preset: AspectPreset, container: egui::Vec2) -> CropRect {
        let delta = current - self.origin;
        match self.handle.edges() {
            None => self.snapshot.translated_within(delta.x, delta.y),
            Some(edges) => {
                let free = resize_edges(&self.snapshot, edges, delta);
                match preset.ratio() {
                    Some(ratio) => {
                        aspect::solve(&self.snapshot, edges, free.width(), ratio, container)
                    }
                    None => free,
                }
            }
        }
    }
}

/// Moves the two edges named by `edges`, each stopping `MIN_DIM` short of its
/// opposite edge and at the unit-square boundary.
fn resize_edges(snapshot: &CropRect, edges: Edges, delta: egui::Vec2) -> CropRect {
    let (x, width) = match edges.horizontal {
        HorizontalEdge::Left => {
            let right = snapshot.right();
            let x = (snapshot.x() + delta.x).min(right - MIN_DIM).max(0.0);
            (x, right - x)
        }
        HorizontalEdge::Right => {
            let width = (snapshot.width() + delta.x)
                .min(1.0 - snapshot.x())
                .max(MIN_DIM);
            (snapshot.x(), width)
        }
    };
    let (y, height) = match edges.vertical {
        VerticalEdge::Top => {
            let bottom = snapshot.bottom();
            let y = (snapshot.y() + delta.y).min(bottom - MIN_DIM).max(0.0);
            (y, bottom - y)
        }
        VerticalEdge::Bottom => {
            let height = (snapshot.height() + delta.y)
                .min(1.0 - snapshot.y())
                .max(MIN_DIM);
            (snapshot.y(), height)
        }
    };
    CropRect::new(x, y, width, height)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Owns the crop rectangle, the aspect preset and the drag session of one crop tool.
#[derive(Debug, Default)]
pub struct CropController {
    rect: CropRect,
    preset: AspectPreset,
    state: DragState,
}

impl CropController {
    pub fn new(preset: AspectPreset) -> Self {
        Self {
            preset,
            ..Default::default()
        }
    }

    pub fn rect(&self) -> CropRect {
        self.rect
    }

    pub fn preset(&self) -> AspectPreset {
        self.preset
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn active_handle(&self) -> Option<Handle> {
        match self.state {
            DragState::Dragging(session) => Some(session.handle),
            DragState::Idle => None,
        }
    }

    /// Switches the aspect preset and restarts from the default rectangle.
    pub fn set_preset(&mut self, preset: AspectPreset) {
        self.cancel();
        self.preset = preset;
        self.rect = CropRect::DEFAULT;
        tracing::debug!(%preset, "crop preset changed");
    }

    /// Starts a drag session. Ignored while another session is active.
    pub fn pointer_down(&mut self, handle: Handle, pointer: egui::Pos2, container: egui::Rect) -> bool {
        if self.is_dragging() {
            return false;
        }
        let session = DragSession {
            handle,
            origin: pointer::normalize(pointer, container),
            snapshot: self.rect,
        };
        tracing::debug!(?handle, origin = ?session.origin, "crop drag started");
        self.state = DragState::Dragging(session);
        true
    }

    /// Recomputes the rectangle from the drag-start snapshot.
    ///
    /// Returns `true` when the rectangle changed. Moves while idle are ignored.
    pub fn pointer_move(&mut self, pointer: egui::Pos2, container: egui::Rect) -> bool {
        let DragState::Dragging(session) = self.state else {
            return false;
        };
        let current = pointer::normalize(pointer, container);
        let next = session.apply(current, self.preset, container.size());
        let changed = next != self.rect;
        self.rect = next;
        changed
    }

    /// Ends the drag session, keeping the rectangle it produced.
    pub fn pointer_up(&mut self) {
        if let DragState::Dragging(session) = self.state {
            tracing::debug!(handle = ?session.handle, rect = ?self.rect, "crop drag finished");
        }
        self.state = DragState::Idle;
    }

    /// Forces the idle state, e.g. when the tool closes mid-drag.
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            tracing::debug!("crop drag cancelled");
        }
        self.state = DragState::Idle;
    }

    /// Scoped drag session: the session ends when the guard is dropped.
    pub fn begin_drag(
        &mut self,
        handle: Handle,
        pointer: egui::Pos2,
        container: egui::Rect,
    ) -> Option<DragGuard<'_>> {
        if self.pointer_down(handle, pointer, container) {
            Some(DragGuard { controller: self })
        } else {
            None
        }
    }

    /// Finalizes the crop against the loaded source image.
    ///
    /// Returns `None` without touching the rectangle when no image is available.
    pub fn commit(&mut self, image: Option<&DynamicImage>) -> Option<DynamicImage> {
        let image = image?;
        self.pointer_up();
        let cropped = raster::extract(&self.rect, image);
        tracing::info!(
            rect = ?self.rect,
            width = cropped.width(),
            height = cropped.height(),
            "crop committed"
        );
        Some(cropped)
    }
}

/// Exclusive handle on an active drag session.
pub struct DragGuard<'a> {
    controller: &'a mut CropController,
}

impl DragGuard<'_> {
    pub fn update(&mut self, pointer: egui::Pos2, container: egui::Rect) -> bool {
        self.controller.pointer_move(pointer, container)
    }

    pub fn rect(&self) -> CropRect {
        self.controller.rect()
    }

    /// Ends the session explicitly; dropping the guard has the same effect.
    pub fn release(self) -> CropRect {
        self.controller.rect()
    }
}

impl Drop for DragGuard<'_> {
    fn drop(&mut self) {
        self.controller.pointer_up();
    }
}
