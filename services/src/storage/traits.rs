//! Storage trait definitions.

use bytes::Bytes;
use std::future::Future;

/// Flat directory of stored uploads, addressed by file name.
///
/// See [module documentation](super) for the available backends.
pub trait UploadStorage: Clone + Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Creates the storage root (with parents) if it does not exist yet.
    fn ensure_root(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;

    fn exists(&self, name: &str) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Writes `content` under `name`. An existing file is overwritten, so
    /// callers resolve collisions first.
    fn persist(
        &self,
        name: &str,
        content: Bytes,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Whether the backend can currently be reached.
    fn is_available(&self) -> impl Future<Output = bool> + Send;
}
