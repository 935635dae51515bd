//! Zip packaging of the output directory.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::writer::{is_temp_file, TEMP_PREFIX};
use crate::error::PipelineError;
use crate::types::ArchiveSummary;

/// Builds a deflate zip from every file directly inside a directory.
pub struct Archiver {
    archive_path: PathBuf,
}

impl Archiver {
    pub fn new(archive_path: impl Into<PathBuf>) -> Self {
        Self {
            archive_path: archive_path.into(),
        }
    }

    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// Regular files directly inside `directory`, sorted by name.
    ///
    /// Includes files left over from earlier runs. The archive itself is
    /// skipped when it lives in the same directory, and so are temporary
    /// files from an interrupted save.
    pub fn collect_files(&self, directory: &Path) -> io::Result<Vec<PathBuf>> {
        if !directory.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a directory", directory.display()),
            ));
        }
        let own = std::fs::canonicalize(&self.archive_path).ok();
        let mut files = Vec::new();

        for entry in WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(io::Error::other)?;
            if !entry.file_type().is_file() || is_temp_file(&entry.file_name().to_string_lossy()) {
                continue;
            }
            if own.is_some() && std::fs::canonicalize(entry.path()).ok() == own {
                continue;
            }
            files.push(entry.into_path());
        }
        Ok(files)
    }

    /// Write the archive, replacing any previous one at the same path.
    pub fn archive(&self, directory: &Path) -> Result<ArchiveSummary, PipelineError> {
        let archive_err = |message: String| PipelineError::Archive {
            path: self.archive_path.clone(),
            message,
        };

        let files = self
            .collect_files(directory)
            .map_err(|e| archive_err(format!("Cannot list {}: {e}", directory.display())))?;

        let parent = match self.archive_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let tmp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(".zip.tmp")
            .tempfile_in(parent)
            .map_err(|e| archive_err(e.to_string()))?;

        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(tmp);
        let mut entries = Vec::with_capacity(files.len());

        for path in &files {
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            zip.start_file(name.as_str(), options)
                .map_err(|e| archive_err(format!("{name}: {e}")))?;
            let mut source =
                File::open(path).map_err(|e| archive_err(format!("{}: {e}", path.display())))?;
            io::copy(&mut source, &mut zip).map_err(|e| archive_err(format!("{name}: {e}")))?;
            entries.push(name);
        }

        let tmp = zip.finish().map_err(|e| archive_err(e.to_string()))?;
        tmp.persist(&self.archive_path)
            .map_err(|e| archive_err(e.error.to_string()))?;

        tracing::debug!(
            "Archived {} file(s) into {:?}",
            entries.len(),
            self.archive_path
        );
        Ok(ArchiveSummary {
            path: self.archive_path.clone(),
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_entry(archive: &mut zip::ZipArchive<File>, name: &str) -> Vec<u8> {
        let mut file = archive.by_name(name).unwrap();
        assert_eq!(file.compression(), CompressionMethod::Deflated);
        let mut buf = Vec::new();
        file.read_to_end(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_archive_contains_directory_files_by_bare_name() {
        let work = tempfile::tempdir().unwrap();
        let out = work.path().join("thumbnails");
        std::fs::create_dir(&out).unwrap();
        std::fs::write(out.join("yoda.png"), b"yoda-bytes").unwrap();
        std::fs::write(out.join("boba-fett.png"), vec![7u8; 4096]).unwrap();
        std::fs::write(out.join("notes.txt"), b"left over from before").unwrap();
        std::fs::create_dir(out.join("nested")).unwrap();
        std::fs::write(out.join("nested").join("skip.png"), b"no").unwrap();

        let zip_path = work.path().join("thumbs.zip");
        let summary = Archiver::new(&zip_path).archive(&out).unwrap();

        assert_eq!(
            summary.entries,
            vec!["boba-fett.png", "notes.txt", "yoda.png"]
        );

        let mut archive = zip::ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        assert_eq!(archive.len(), 3);
        assert_eq!(read_entry(&mut archive, "yoda.png"), b"yoda-bytes");
        assert_eq!(read_entry(&mut archive, "boba-fett.png"), vec![7u8; 4096]);
        assert_eq!(
            read_entry(&mut archive, "notes.txt"),
            b"left over from before"
        );
    }

    #[test]
    fn test_archive_replaces_previous_archive() {
        let work = tempfile::tempdir().unwrap();
        let out = work.path().join("out");
        std::fs::create_dir(&out).unwrap();
        let zip_path = work.path().join("out.zip");
        std::fs::write(&zip_path, b"not a zip").unwrap();

        std::fs::write(out.join("a.png"), b"a").unwrap();
        Archiver::new(&zip_path).archive(&out).unwrap();

        let archive = zip::ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn test_empty_directory_gives_empty_archive() {
        let work = tempfile::tempdir().unwrap();
        let zip_path = work.path().join("empty.zip");
        let summary = Archiver::new(&zip_path).archive(work.path()).unwrap();

        assert!(summary.entries.is_empty());
        let archive = zip::ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn test_archive_inside_directory_skips_itself() {
        let work = tempfile::tempdir().unwrap();
        std::fs::write(work.path().join("a.png"), b"a").unwrap();
        let zip_path = work.path().join("bundle.zip");
        std::fs::write(&zip_path, b"previous").unwrap();

        let summary = Archiver::new(&zip_path).archive(work.path()).unwrap();
        assert_eq!(summary.entries, vec!["a.png"]);
    }

    #[test]
    fn test_interrupted_save_left_out() {
        let work = tempfile::tempdir().unwrap();
        std::fs::write(work.path().join("yoda.png"), b"yoda").unwrap();
        std::fs::write(work.path().join(".pagethumb-abc123.tmp"), b"half a png").unwrap();
        std::fs::write(work.path().join(".hidden"), b"kept").unwrap();

        let zip_path = work.path().join("bundle.zip");
        let summary = Archiver::new(&zip_path).archive(work.path()).unwrap();
        assert_eq!(summary.entries, vec![".hidden", "yoda.png"]);
    }

    #[test]
    fn test_missing_directory_is_archive_error() {
        let work = tempfile::tempdir().unwrap();
        let err = Archiver::new(work.path().join("x.zip"))
            .archive(&work.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Archive { .. }));
    }
}
