//! Shared utilities for the Dropzone project.
//!
//! Everything both sides of an upload must agree on lives here: the upload
//! policy (allowed MIME types and size cap), the JSON response envelope, and
//! the display helpers used when rendering file names and sizes.

pub mod envelope;
pub mod format;
pub mod policy;
pub mod version_info;

pub use envelope::{UploadResponse, UploadedFile};
pub use format::{escape_html, format_file_size};
pub use policy::{DEFAULT_ALLOWED_TYPES, DEFAULT_MAX_FILE_SIZE, UploadPolicy};
