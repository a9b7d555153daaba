//! JSON envelope returned by the upload endpoint.

use serde::{Deserialize, Serialize};

/// One accepted file, in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub original_name: String,
    pub saved_name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
}

/// Whole-request outcome: either every file was stored, or a single message
/// describes the first failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub files: Vec<UploadedFile>,
}

impl UploadResponse {
    pub fn succeeded(message: impl Into<String>, files: Vec<UploadedFile>) -> Self {
        Self {
            success: true,
            message: message.into(),
            files,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            files: Vec::new(),
        }
    }
}
