use crate::layout::{self, Viewport};
use crate::metadata::FileInfo;
use crate::source::{ImageRef, ImageSource};

/// Share of the viewport height given to the image when stacked.
const STACKED_IMAGE_SHARE: f32 = 0.5;
const INFO_CARD_WIDTH: f32 = 450.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arrangement {
    /// Image above the info card.
    Stacked { image_height: f32 },
    /// Image filling the width left of a fixed-width info card.
    SideBySide { card_width: f32 },
}

impl Arrangement {
    pub fn for_viewport(viewport: Viewport) -> Self {
        if layout::is_mobile(viewport.width) {
            Arrangement::Stacked {
                image_height: viewport.height * STACKED_IMAGE_SHARE,
            }
        } else {
            Arrangement::SideBySide {
                card_width: INFO_CARD_WIDTH,
            }
        }
    }
}

pub struct DetailView {
    image: ImageRef,
    info: Result<FileInfo, String>,
    arrangement: Arrangement,
}

impl DetailView {
    /// Reads the file info up front. A failure is kept as the message to
    /// show in place of the image and card.
    pub fn new(source: &dyn ImageSource, image: ImageRef, viewport: Viewport) -> Self {
        let info = source.stat_file(image.path()).map_err(|e| {
            log::warn!("Failed to read {}: {}", image, e);
            e.to_string()
        });
        Self {
            image,
            info,
            arrangement: Arrangement::for_viewport(viewport),
        }
    }

    /// Only the arrangement depends on the viewport; file info is not re-read.
    pub fn resize(&mut self, viewport: Viewport) {
        self.arrangement = Arrangement::for_viewport(viewport);
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    pub fn info(&self) -> Result<&FileInfo, &str> {
        self.info.as_ref().map_err(String::as_str)
    }

    pub fn arrangement(&self) -> Arrangement {
        self.arrangement
    }
}
