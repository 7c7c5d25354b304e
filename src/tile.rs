use crate::layout::TilePosition;
use crate::source::ImageRef;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        anchor: TilePosition,
    },
}

/// One image pinned to the board.
#[derive(Debug, Clone)]
pub struct Tile {
    pub image: ImageRef,
    pub position: TilePosition,
    pub width: f32,
    pub height: f32,
    pub drag: DragState,
}

impl Tile {
    pub fn new(image: ImageRef, position: TilePosition, width: f32, height: f32) -> Self {
        Self {
            image,
            position,
            width,
            height,
            drag: DragState::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Re-anchors on every press, so a drag that never saw its end event
    /// is simply replaced.
    pub fn start_drag(&mut self) {
        self.drag = DragState::Dragging {
            anchor: self.position,
        };
    }

    /// Move by one frame's pointer delta. The tile is kept inside the
    /// top-left edge of the board but may leave it on the right and bottom.
    pub fn drag_by(&mut self, dx: f32, dy: f32) {
        if !self.is_dragging() {
            self.start_drag();
        }
        self.position.left = (self.position.left + dx).max(0.0);
        self.position.top = (self.position.top + dy).max(0.0);
    }

    pub fn end_drag(&mut self) {
        if let DragState::Dragging { anchor } = self.drag {
            log::trace!(
                "{} moved from ({}, {}) to ({}, {})",
                self.image,
                anchor.left,
                anchor.top,
                self.position.left,
                self.position.top
            );
        }
        self.drag = DragState::Idle;
    }
}
