//! PNG output for normalized images.

use image::{ImageFormat, RgbaImage};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// Prefix and suffix of in-progress files written beside their targets.
pub(crate) const TEMP_PREFIX: &str = ".pagethumb-";
pub(crate) const TEMP_SUFFIX: &str = ".tmp";

pub(crate) fn is_temp_file(name: &str) -> bool {
    name.starts_with(TEMP_PREFIX) && name.ends_with(TEMP_SUFFIX)
}

/// A PNG that has been written to disk.
#[derive(Debug, Clone)]
pub struct SavedImage {
    pub path: PathBuf,
    /// BLAKE3 hex digest of the PNG bytes
    pub content_hash: String,
}

/// Writes `<directory>/<slug>.png`.
///
/// The PNG is encoded in memory, written to a temporary file beside the
/// target and renamed into place, so the target is either the previous file
/// or the complete new one. An existing file at the target is replaced.
pub struct ImageWriter;

impl ImageWriter {
    pub fn png_path(directory: &Path, slug: &str) -> PathBuf {
        directory.join(format!("{slug}.png"))
    }

    pub fn write(
        &self,
        image: &RgbaImage,
        slug: &str,
        directory: &Path,
    ) -> Result<SavedImage, PipelineError> {
        let path = Self::png_path(directory, slug);
        let write_err = |source: std::io::Error| PipelineError::Write {
            path: path.clone(),
            source,
        };

        let mut buffer = Cursor::new(Vec::new());
        image
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| write_err(std::io::Error::other(e)))?;
        let bytes = buffer.into_inner();

        let mut tmp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(TEMP_SUFFIX)
            .tempfile_in(directory)
            .map_err(write_err)?;
        tmp.write_all(&bytes).map_err(write_err)?;
        tmp.flush().map_err(write_err)?;
        tmp.persist(&path).map_err(|e| write_err(e.error))?;

        Ok(SavedImage {
            content_hash: blake3::hash(&bytes).to_hex().to_string(),
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 128]))
    }

    #[test]
    fn test_writes_rgba_png() {
        let dir = tempfile::tempdir().unwrap();
        let saved = ImageWriter.write(&sample(5, 3), "yoda", dir.path()).unwrap();

        assert_eq!(saved.path, dir.path().join("yoda.png"));
        let bytes = std::fs::read(&saved.path).unwrap();
        assert_eq!(&bytes[0..4], b"\x89PNG");
        assert_eq!(saved.content_hash, blake3::hash(&bytes).to_hex().to_string());

        let reread = image::open(&saved.path).unwrap();
        assert_eq!(reread.color(), image::ColorType::Rgba8);
        assert_eq!(reread.to_rgba8().get_pixel(4, 2).0, [10, 20, 30, 128]);
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("han-solo.png"), b"stale").unwrap();

        ImageWriter.write(&sample(2, 2), "han-solo", dir.path()).unwrap();

        let reread = image::open(dir.path().join("han-solo.png")).unwrap();
        assert_eq!((reread.width(), reread.height()), (2, 2));
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        ImageWriter.write(&sample(2, 2), "a", dir.path()).unwrap();
        ImageWriter.write(&sample(2, 2), "b", dir.path()).unwrap();

        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_temp_file_names() {
        assert!(is_temp_file(".pagethumb-x1Yz.tmp"));
        assert!(is_temp_file(".pagethumb-x1Yz.zip.tmp"));
        assert!(!is_temp_file("pagethumb-x1Yz.tmp"));
        assert!(!is_temp_file(".pagethumb-notes.txt"));
    }

    #[test]
    fn test_missing_directory_is_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let err = ImageWriter.write(&sample(1, 1), "x", &missing).unwrap_err();
        assert!(matches!(err, PipelineError::Write { .. }));
        assert!(!missing.join("x.png").exists());
    }
}
