//! Responsive grid math for the tile board.
//!
//! Everything here is a pure function of the viewport width and the desktop
//! grid settings, so the board can be laid out without a window.

use serde::Deserialize;

/// Viewports narrower than this use the two-column mobile layout.
pub const MOBILE_BREAKPOINT: f32 = 800.0;

const MOBILE_COLUMNS: usize = 2;
/// Vertical spacing and tile height are this many times their horizontal counterpart.
const MOBILE_ASPECT: f32 = 1.4;
/// Share of a mobile cell the tile occupies; the rest is gutter.
const MOBILE_TILE_FILL: f32 = 0.9;

const DESKTOP_TILE_WIDTH: f32 = 350.0;
const DESKTOP_TILE_HEIGHT: f32 = 500.0;

/// Extra room around the canvas so the last row and column are not flush
/// with the scroll edge.
const CANVAS_MARGIN: f32 = 50.0;

/// Grid settings used at or above the breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DesktopGrid {
    pub columns: usize,
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
}

impl Default for DesktopGrid {
    fn default() -> Self {
        Self {
            columns: 4,
            horizontal_spacing: 400.0,
            vertical_spacing: 600.0,
        }
    }
}

/// Current window size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub columns: usize,
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
    pub tile_width: f32,
    pub tile_height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TilePosition {
    pub left: f32,
    pub top: f32,
}

pub fn is_mobile(viewport_width: f32) -> bool {
    viewport_width < MOBILE_BREAKPOINT
}

pub fn compute_layout(viewport_width: f32, desktop: &DesktopGrid) -> LayoutParams {
    if is_mobile(viewport_width) {
        let horizontal_spacing = viewport_width / 2.0;
        let tile_width = horizontal_spacing * MOBILE_TILE_FILL;
        LayoutParams {
            columns: MOBILE_COLUMNS,
            horizontal_spacing,
            vertical_spacing: horizontal_spacing * MOBILE_ASPECT,
            tile_width,
            tile_height: tile_width * MOBILE_ASPECT,
        }
    } else {
        LayoutParams {
            columns: desktop.columns,
            horizontal_spacing: desktop.horizontal_spacing,
            vertical_spacing: desktop.vertical_spacing,
            tile_width: DESKTOP_TILE_WIDTH,
            tile_height: DESKTOP_TILE_HEIGHT,
        }
    }
}

/// Grid slot of the `index`-th image, row-major.
pub fn compute_position(index: usize, layout: &LayoutParams) -> TilePosition {
    let columns = layout.columns.max(1);
    let row = index / columns;
    let col = index % columns;
    TilePosition {
        left: col as f32 * layout.horizontal_spacing,
        top: row as f32 * layout.vertical_spacing,
    }
}

/// Size of the scrollable canvas needed to hold `count` tiles in their
/// initial grid slots.
pub fn canvas_size(count: usize, layout: &LayoutParams) -> (f32, f32) {
    let columns = layout.columns.max(1);
    let rows = count.div_ceil(columns);
    (
        columns as f32 * layout.horizontal_spacing + CANVAS_MARGIN,
        rows as f32 * layout.vertical_spacing + CANVAS_MARGIN,
    )
}
