use std::io::{Read, Seek, Write};
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::{PantryError, PantryResult};

use super::file_path::FilePath;

/// Trait combining Read + Seek for file operations.
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/* 📖 # Why is the clock part of the PAL?

The expiry export compares dates against "now". Reading the clock through the
same abstraction as the filesystem lets a test pin "now" to a known day and
check the 7-day boundary exactly.
*/

/// Platform Abstraction Layer (PAL) trait providing filesystem and clock access.
///
/// Two implementations are provided:
/// - `RealPal`: Uses the real filesystem via `std::fs` and the local clock
/// - `MockPal`: In-memory implementation for testing
pub trait Pal: std::fmt::Debug + Send + Sync + 'static {
    /// Check if a file exists at the given path.
    fn file_exists(&self, path: &FilePath) -> PantryResult<bool>;

    /// Open a file for reading.
    fn read_file(&self, path: &FilePath) -> PantryResult<Box<dyn ReadSeek + 'static>>;

    /// Read entire file contents as a UTF-8 string.
    fn read_file_to_string(&self, path: &FilePath) -> PantryResult<String> {
        let mut reader = self.read_file(path)?;
        let mut contents = Vec::new();
        reader
            .read_to_end(&mut contents)
            .map_err(|e| Box::new(PantryError::file_error(path.as_path(), e)))?;
        String::from_utf8(contents).map_err(|_e| crate::err!("File is not valid UTF-8: {}", path))
    }

    /// Create a new file, overwriting if it exists.
    fn create_file(&self, path: &FilePath) -> PantryResult<Box<dyn Write>>;

    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

/// Handle to a PAL implementation, enabling shared ownership.
///
/// # Examples
///
/// ```no_run
/// use pantry_base::{PalHandle, RealPal};
///
/// let pal = PalHandle::new(RealPal::new(".".into()));
/// let pal_clone = pal.clone();
/// ```
#[derive(Debug, Clone)]
pub struct PalHandle(Arc<dyn Pal>);

impl PalHandle {
    /// Create a new PalHandle from a Pal implementation.
    pub fn new(pal: impl Pal + 'static) -> Self {
        Self(Arc::new(pal))
    }
}

impl std::ops::Deref for PalHandle {
    type Target = dyn Pal;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
