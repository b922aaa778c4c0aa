//! Scoped temporary files.

use std::path::{Path, PathBuf};

use crate::clock::unique_temp_name;

/// A file that is removed when the guard is dropped.
///
/// The file does not need to exist yet: external tools are handed the
/// path and create it themselves. Removal is best-effort and never
/// reports an error.
#[derive(Debug)]
pub struct TempFile {
    path: PathBuf,
}

impl TempFile {
    /// Reserve a unique path inside `dir` without creating the file.
    pub fn reserve(dir: &Path, prefix: &str, extension: &str) -> Self {
        Self {
            path: dir.join(unique_temp_name(prefix, extension)),
        }
    }

    /// Write `contents` to a fresh unique file inside `dir`.
    pub fn create_with(
        dir: &Path,
        prefix: &str,
        extension: &str,
        contents: &[u8],
    ) -> std::io::Result<Self> {
        let file = Self::reserve(dir, prefix, extension);
        std::fs::write(&file.path, contents)?;
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file is present on disk.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::trace!(path = %self.path.display(), "Removed temporary file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "Could not remove temporary file")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_file_is_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = {
            let file = TempFile::create_with(dir.path(), "script", "ps1", b"Write-Output 1").unwrap();
            assert!(file.exists());
            file.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn reserved_path_that_never_materialized_drops_quietly() {
        let dir = tempfile::tempdir().unwrap();
        let file = TempFile::reserve(dir.path(), "capture", "png");
        assert!(!file.exists());
        drop(file);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn cleanup_runs_on_early_return() {
        fn fails(dir: &Path) -> Result<(), String> {
            let _file = TempFile::create_with(dir, "capture", "png", b"x").map_err(|e| e.to_string())?;
            Err("tool failed".to_string())
        }

        let dir = tempfile::tempdir().unwrap();
        assert!(fails(dir.path()).is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
