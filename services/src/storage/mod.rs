//! Upload storage backends.
//!
//! Uploads live as flat files in a single directory; the directory listing is
//! the only persisted state. [`DiskStorage`] writes through OpenDAL's `fs`
//! service, [`MockUploadStorage`] keeps everything in memory for tests.

mod disk;
mod mock;
mod traits;
mod types;

pub use disk::DiskStorage;
pub use mock::MockUploadStorage;
pub use traits::UploadStorage;
pub use types::StorageError;
