use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, instrument};

use crate::{PantryError, PantryResult};

use super::FilePath;
use super::traits::{Pal, ReadSeek};

/// Concrete PAL implementation using the real filesystem via std::fs.
///
/// All file paths are resolved relative to a configured base directory.
#[derive(Debug)]
pub struct RealPal {
    base_dir: PathBuf,
}

impl RealPal {
    /// Create a new RealPal with the given base directory.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Resolve a FilePath to a filesystem path.
    fn resolve_path(&self, path: &FilePath) -> PathBuf {
        path.to_path(&self.base_dir)
    }
}

impl Pal for RealPal {
    #[instrument(skip(self), fields(path = %path))]
    fn file_exists(&self, path: &FilePath) -> PantryResult<bool> {
        let resolved = self.resolve_path(path);
        let exists = resolved.is_file();
        debug!(exists, resolved = %resolved.display(), "checked file existence");
        Ok(exists)
    }

    #[instrument(skip(self), fields(path = %path))]
    fn read_file(&self, path: &FilePath) -> PantryResult<Box<dyn ReadSeek + 'static>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "opening file for reading");
        let file = fs::File::open(&resolved).map_err(|e| {
            debug!(error = %e, "failed to open file");
            Box::new(PantryError::file_error(resolved, e))
        })?;
        Ok(Box::new(file))
    }

    #[instrument(skip(self), fields(path = %path))]
    fn create_file(&self, path: &FilePath) -> PantryResult<Box<dyn Write>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "creating file");
        let file = fs::File::create(&resolved).map_err(|e| {
            debug!(error = %e, "failed to create file");
            Box::new(PantryError::file_error(resolved, e))
        })?;
        Ok(Box::new(file))
    }

    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::fs;
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, RealPal) {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let pal = RealPal::new(temp_dir.path().to_path_buf());
        (temp_dir, pal)
    }

    #[test]
    fn test_file_exists() {
        let (temp_dir, pal) = setup_test_dir();
        fs::write(temp_dir.path().join("pantry_data.txt"), "Milk,keines,1\n").unwrap();

        assert!(pal.file_exists(&FilePath::from("pantry_data.txt")).unwrap());
        assert!(!pal.file_exists(&FilePath::from("missing.txt")).unwrap());
    }

    #[test]
    fn test_read_file() {
        let (temp_dir, pal) = setup_test_dir();
        fs::write(temp_dir.path().join("pantry_data.txt"), "Rice,keines,50\n").unwrap();

        let content = pal
            .read_file_to_string(&FilePath::from("pantry_data.txt"))
            .unwrap();
        assert_eq!(content, "Rice,keines,50\n");
    }

    #[test]
    fn test_read_file_not_found() {
        let (_temp_dir, pal) = setup_test_dir();

        let err = pal.read_file(&FilePath::from("nonexistent.txt")).err().unwrap();
        assert!(matches!(err.kind(), ErrorKind::FileError { .. }));
    }

    #[test]
    fn test_create_file_overwrites() {
        let (temp_dir, pal) = setup_test_dir();
        fs::write(temp_dir.path().join("out.txt"), "old content that is longer").unwrap();

        let mut writer = pal.create_file(&FilePath::from("out.txt")).unwrap();
        writer.write_all(b"new").unwrap();
        drop(writer);

        let content = fs::read_to_string(temp_dir.path().join("out.txt")).unwrap();
        assert_eq!(content, "new");
    }

    #[test]
    fn test_create_file_in_missing_directory_fails() {
        let (_temp_dir, pal) = setup_test_dir();

        let result = pal.create_file(&FilePath::from("no/such/dir/out.txt"));
        assert!(result.is_err());
    }
}
