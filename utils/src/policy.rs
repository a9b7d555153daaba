//! Upload policy shared by the client selector and the server ingestor.
//!
//! The client applies the policy as an early courtesy check; the server
//! re-applies it and is the authority.

/// MIME types accepted for upload.
pub const DEFAULT_ALLOWED_TYPES: &[&str] =
    &["image/jpeg", "image/jpg", "image/png", "application/pdf"];

/// Maximum accepted size of a single file in bytes (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Type allow-list and size cap applied to every uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    allowed_types: Vec<String>,
    max_file_size: u64,
}

impl UploadPolicy {
    pub fn new<I, S>(allowed_types: I, max_file_size: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_types: allowed_types.into_iter().map(Into::into).collect(),
            max_file_size,
        }
    }

    pub fn allowed_types(&self) -> &[String] {
        &self.allowed_types
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Declared types are compared verbatim; no sniffing of the content.
    pub fn is_type_allowed(&self, content_type: &str) -> bool {
        self.allowed_types.iter().any(|t| t == content_type)
    }

    pub fn is_size_allowed(&self, size: u64) -> bool {
        size <= self.max_file_size
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_TYPES.iter().copied(), DEFAULT_MAX_FILE_SIZE)
    }
}
