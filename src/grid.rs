//! The tile board: lists the images, lays them out and tracks where the user
//! has dragged them since the last rebuild.

use std::path::PathBuf;

use crate::layout::{self, DesktopGrid, LayoutParams};
use crate::source::{ImageRef, ImageSource};
use crate::tile::Tile;

pub struct GridView {
    images_dir: PathBuf,
    desktop: DesktopGrid,
    current_width: f32,
    layout: LayoutParams,
    tiles: Vec<Tile>,
}

impl GridView {
    pub fn new(
        source: &dyn ImageSource,
        images_dir: PathBuf,
        desktop: DesktopGrid,
        viewport_width: f32,
    ) -> Self {
        let mut grid = Self {
            images_dir,
            desktop,
            current_width: viewport_width,
            layout: layout::compute_layout(viewport_width, &desktop),
            tiles: Vec::new(),
        };
        grid.rebuild(source);
        grid
    }

    /// Rebuild for a new viewport width. Returns false, leaving every tile
    /// where it is, when the width has not changed.
    pub fn resize(&mut self, source: &dyn ImageSource, viewport_width: f32) -> bool {
        if self.current_width == viewport_width {
            return false;
        }
        self.current_width = viewport_width;
        self.rebuild(source);
        true
    }

    /// Re-list the images and put every tile back in its grid slot.
    /// Drag offsets are dropped.
    pub fn rebuild(&mut self, source: &dyn ImageSource) {
        let images = source.list_images(&self.images_dir);
        self.layout = layout::compute_layout(self.current_width, &self.desktop);
        let layout = self.layout;
        self.tiles = images
            .into_iter()
            .enumerate()
            .map(|(index, image)| {
                let position = layout::compute_position(index, &layout);
                Tile::new(image, position, layout.tile_width, layout.tile_height)
            })
            .collect();
        log::debug!(
            "Laid out {} tiles in {} columns at width {}",
            self.tiles.len(),
            layout.columns,
            self.current_width
        );
    }

    pub fn layout(&self) -> &LayoutParams {
        &self.layout
    }

    pub fn images_dir(&self) -> &std::path::Path {
        &self.images_dir
    }

    pub fn current_width(&self) -> f32 {
        self.current_width
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn image(&self, index: usize) -> Option<&ImageRef> {
        self.tiles.get(index).map(|t| &t.image)
    }

    pub fn canvas_size(&self) -> (f32, f32) {
        layout::canvas_size(self.tiles.len(), &self.layout)
    }

    pub fn start_drag(&mut self, index: usize) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.start_drag();
        }
    }

    pub fn drag(&mut self, index: usize, dx: f32, dy: f32) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.drag_by(dx, dy);
        }
    }

    pub fn end_drag(&mut self, index: usize) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.end_drag();
        }
    }
}
