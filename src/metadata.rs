use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::error::{Error, Result};

/// What the detail card shows about one file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileInfo {
    pub filename: String,
    pub created_at: String,
    pub modified_at: String,
    pub size_label: String,
    pub dimensions: Option<(u32, u32)>,
}

pub fn read_file_info(path: &Path) -> Result<FileInfo> {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let fs_meta = std::fs::metadata(path).map_err(|e| Error::from_io(path, e))?;
    let modified = fs_meta.modified().map_err(|e| Error::from_io(path, e))?;
    // Not every platform records a birth time.
    let created = fs_meta.created().unwrap_or(modified);

    // Header-only decode; catches truncated or non-image files before the
    // detail view tries to show them.
    let dimensions = image::image_dimensions(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(FileInfo {
        filename,
        created_at: format_system_time(created),
        modified_at: format_system_time(modified),
        size_label: format_file_size(fs_meta.len()),
        dimensions: Some(dimensions),
    })
}

fn format_system_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn size_labels() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024), "5120.0 MB");
    }

    #[test]
    fn timestamps_use_seconds_resolution() {
        let formatted = format_system_time(SystemTime::now());
        assert_eq!(formatted.len(), "2024-02-18 12:00:00".len());
        assert_eq!(&formatted[4..5], "-");
        assert_eq!(&formatted[10..11], " ");
    }

    #[test]
    fn reads_a_real_png() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("tile.png");
        image::RgbaImage::new(3, 2).save(&path).expect("save png");

        let info = read_file_info(&path).expect("readable png");
        assert_eq!(info.filename, "tile.png");
        assert_eq!(info.dimensions, Some((3, 2)));
        assert!(info.size_label.ends_with(" B"));
        assert!(!info.modified_at.is_empty());
    }

    #[test]
    fn undecodable_file_is_an_io_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("broken.png");
        fs::write(&path, b"not a png").expect("write");

        let err = read_file_info(&path).expect_err("garbage is not an image");
        assert!(matches!(err, Error::Io { .. }));
    }
}
