/* 📖 # Why have pantry_base as a core library?
pantry_base provides the error type, tracing setup and platform abstraction shared
by the engine and the command line binary.
*/

pub mod error;
pub mod pal;
pub mod tracing;

pub use error::{ErrorKind, PantryError, PantryResult, ResultExt};
pub use pal::{FilePath, MockPal, Pal, PalHandle, ReadSeek, RealPal};
