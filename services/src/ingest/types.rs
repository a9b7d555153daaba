//! Ingest input and error types.

use axum::http::StatusCode;
use bytes::Bytes;

/// Transfer failure reported for a single file part, before any validation.
///
/// Codes follow the classic upload error table (`0` meaning OK is
/// represented by the absence of an error).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    #[error("The file exceeds the server upload size limit")]
    IniSize,

    #[error("The file exceeds the size limit set by the form")]
    FormSize,

    #[error("The file was only partially uploaded")]
    Partial,

    #[error("No file was uploaded")]
    NoFile,

    #[error("Missing a temporary directory")]
    NoTmpDir,

    #[error("Failed to write file to disk")]
    CantWrite,

    #[error("A server extension stopped the file upload")]
    Extension,

    #[error("Unknown upload error")]
    Unknown(u8),
}

impl TransferError {
    /// Maps a numeric transfer status; `0` is success and yields `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => None,
            1 => Some(Self::IniSize),
            2 => Some(Self::FormSize),
            3 => Some(Self::Partial),
            4 => Some(Self::NoFile),
            6 => Some(Self::NoTmpDir),
            7 => Some(Self::CantWrite),
            8 => Some(Self::Extension),
            other => Some(Self::Unknown(other)),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::IniSize => 1,
            Self::FormSize => 2,
            Self::Partial => 3,
            Self::NoFile => 4,
            Self::NoTmpDir => 6,
            Self::CantWrite => 7,
            Self::Extension => 8,
            Self::Unknown(code) => code,
        }
    }
}

/// One file part as received by the transport layer.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    /// Client-supplied file name.
    pub name: String,
    /// Declared MIME type, taken at face value.
    pub content_type: String,
    pub content: Bytes,
    pub transfer_error: Option<TransferError>,
}

impl IncomingFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, content: Bytes) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            content,
            transfer_error: None,
        }
    }

    /// A part whose transfer failed; it carries no content.
    pub fn failed(
        name: impl Into<String>,
        content_type: impl Into<String>,
        error: TransferError,
    ) -> Self {
        Self {
            transfer_error: Some(error),
            ..Self::new(name, content_type, Bytes::new())
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Request-level failure. The first one encountered ends the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngestError {
    #[error("Method not supported")]
    MethodNotAllowed,

    #[error("No files were uploaded")]
    NoFiles,

    #[error("Error uploading file '{name}': {error}")]
    Transfer { name: String, error: TransferError },

    #[error("File '{name}' has an invalid type")]
    InvalidType { name: String },

    #[error("File '{name}' exceeds the maximum size of {limit}")]
    TooLarge { name: String, limit: String },

    #[error("Failed to save file '{name}'")]
    Save { name: String },
}

impl IngestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::NoFiles
            | Self::Transfer { .. }
            | Self::InvalidType { .. }
            | Self::TooLarge { .. } => StatusCode::BAD_REQUEST,
            Self::Save { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
