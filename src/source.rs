//! Where the board gets its images from.
//!
//! The board and the detail view only talk to an [`ImageSource`]; the
//! application picks the real filesystem or the fixed sample set at startup.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::metadata::{self, FileInfo};

/// Path of one listed image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(PathBuf);

impl ImageRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn file_name(&self) -> String {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

pub trait ImageSource: Send {
    /// Enumerate the images under `dir`. Never fails: an unreadable
    /// directory is an empty board.
    fn list_images(&self, dir: &Path) -> Vec<ImageRef>;

    fn stat_file(&self, path: &Path) -> Result<FileInfo>;
}

/// Reads the local filesystem.
#[derive(Debug, Default)]
pub struct FsSource;

impl ImageSource for FsSource {
    fn list_images(&self, dir: &Path) -> Vec<ImageRef> {
        let pattern = format!("{}/*.*", glob::Pattern::escape(&dir.to_string_lossy()));

        // Like a shell wildcard, `*` does not match a leading dot.
        let options = glob::MatchOptions {
            require_literal_leading_dot: true,
            ..glob::MatchOptions::new()
        };
        let entries = match glob::glob_with(&pattern, options) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Bad image pattern {}: {}", pattern, e);
                return Vec::new();
            }
        };

        let mut images = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => images.push(ImageRef::new(path)),
                Ok(_) => {}
                Err(e) => log::warn!("Skipping unreadable entry: {}", e),
            }
        }
        log::debug!("Found {} images in {}", images.len(), dir.display());
        images
    }

    fn stat_file(&self, path: &Path) -> Result<FileInfo> {
        metadata::read_file_info(path)
    }
}

const FIXTURE_COUNT: usize = 10;
const FIXTURE_TIMESTAMP: &str = "2024-02-18 12:00:00";
const FIXTURE_SIZE: &str = "2.5 MB";

/// Canned images for hosted builds where there is no local filesystem.
#[derive(Debug, Default)]
pub struct FixtureSource;

impl ImageSource for FixtureSource {
    fn list_images(&self, _dir: &Path) -> Vec<ImageRef> {
        (1..=FIXTURE_COUNT)
            .map(|i| ImageRef::new(format!("images/sample_sdxl_{i:03}.png")))
            .collect()
    }

    fn stat_file(&self, path: &Path) -> Result<FileInfo> {
        Ok(FileInfo {
            filename: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            created_at: FIXTURE_TIMESTAMP.into(),
            modified_at: FIXTURE_TIMESTAMP.into(),
            size_label: FIXTURE_SIZE.into(),
            dimensions: None,
        })
    }
}
