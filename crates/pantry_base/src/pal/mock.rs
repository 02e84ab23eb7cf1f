use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime};

use crate::{PantryError, PantryResult};

use super::FilePath;
use super::traits::{Pal, ReadSeek};

/* 📖 # Why use HashMap for MockPal storage?

MockPal keeps file contents in memory behind Arc<Mutex<..>> so that:
1. **Speed**: No filesystem I/O, deterministic and fast for unit tests
2. **Isolation**: No side effects on the real filesystem
3. **Control**: Tests can pin the clock and make chosen paths fail to open
*/

type FileMap = Arc<Mutex<HashMap<FilePath, Vec<u8>>>>;

/// In-memory PAL implementation for testing.
///
/// # Examples
///
/// ```
/// use pantry_base::{FilePath, MockPal, Pal};
///
/// let mock = MockPal::new();
/// mock.add_file(FilePath::from("pantry_data.txt"), b"Milk,keines,2\n".to_vec());
/// let content = mock.read_file_to_string(&FilePath::from("pantry_data.txt")).unwrap();
/// assert_eq!(content, "Milk,keines,2\n");
/// ```
#[derive(Debug, Clone)]
pub struct MockPal {
    files: FileMap,
    failing: Arc<Mutex<HashSet<FilePath>>>,
    now: Arc<Mutex<NaiveDateTime>>,
}

impl MockPal {
    /// Create a new empty MockPal whose clock reads 2025-01-01 00:00.
    pub fn new() -> Self {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default();
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
            failing: Arc::new(Mutex::new(HashSet::new())),
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Add a file to the mock storage.
    pub fn add_file(&self, path: FilePath, content: Vec<u8>) {
        self.files.lock().unwrap().insert(path, content);
    }

    /// Contents of a stored file as a string, if present.
    pub fn file_contents(&self, path: &FilePath) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|content| String::from_utf8_lossy(content).into_owned())
    }

    /// Make every open of `path` (read or create) fail with permission denied.
    pub fn fail_on(&self, path: FilePath) {
        self.failing.lock().unwrap().insert(path);
    }

    /// Pin the clock to `now`.
    pub fn set_now(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap() = now;
    }

    fn check_failing(&self, path: &FilePath) -> PantryResult<()> {
        if self.failing.lock().unwrap().contains(path) {
            return Err(Box::new(PantryError::file_error(
                path.as_path(),
                std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    format!("Access denied: {}", path),
                ),
            )));
        }
        Ok(())
    }
}

impl Default for MockPal {
    fn default() -> Self {
        Self::new()
    }
}

impl Pal for MockPal {
    fn file_exists(&self, path: &FilePath) -> PantryResult<bool> {
        Ok(self.files.lock().unwrap().contains_key(path))
    }

    fn read_file(&self, path: &FilePath) -> PantryResult<Box<dyn ReadSeek + 'static>> {
        self.check_failing(path)?;
        let files = self.files.lock().unwrap();
        let content = files
            .get(path)
            .ok_or_else(|| {
                Box::new(PantryError::file_error(
                    path.as_path(),
                    std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("File not found: {}", path),
                    ),
                ))
            })?
            .clone();
        Ok(Box::new(Cursor::new(content)))
    }

    fn create_file(&self, path: &FilePath) -> PantryResult<Box<dyn Write>> {
        self.check_failing(path)?;
        // Truncate right away, as File::create does
        self.files.lock().unwrap().insert(path.clone(), Vec::new());
        Ok(Box::new(MockFileWriter {
            path: path.clone(),
            files: Arc::clone(&self.files),
            buffer: Vec::new(),
        }))
    }

    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap()
    }
}

/// Writer that stores its buffer in the MockPal on flush and when dropped.
struct MockFileWriter {
    path: FilePath,
    files: FileMap,
    buffer: Vec<u8>,
}

impl MockFileWriter {
    fn store(&self) {
        if let Ok(mut files) = self.files.lock() {
            files.insert(self.path.clone(), self.buffer.clone());
        }
    }
}

impl Write for MockFileWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.store();
        Ok(())
    }
}

impl Drop for MockFileWriter {
    fn drop(&mut self) {
        self.store();
    }
}
