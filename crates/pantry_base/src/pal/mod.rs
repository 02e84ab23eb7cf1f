/* 📖 # What is the Platform Abstraction Layer?

The PAL is the pantry's only door to the outside world besides the console:
the data files and the wall clock. Everything that saves, loads or asks
"what time is it" goes through the Pal trait, so the whole menu flow can
run against MockPal with a fixed date and in-memory files.
*/

mod file_path;
pub mod mock;
pub mod real_pal;
mod traits;

pub use file_path::FilePath;
pub use mock::MockPal;
pub use real_pal::RealPal;
pub use traits::{Pal, PalHandle, ReadSeek};
