//! Server-side upload pipeline.
//!
//! A request moves through: method check, presence check, then for every file
//! in order: transfer status, declared type, size, safe name, collision
//! resolution, persist. The first failure ends the request. Files persisted
//! by earlier iterations stay on disk.

mod clock;
mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use types::{IncomingFile, IngestError, TransferError};

use crate::naming;
use crate::storage::UploadStorage;
use axum::http::Method;
use dropzone_utils::{UploadPolicy, UploadResponse, UploadedFile, format_file_size};
use tracing::{debug, info, warn};

/// Message sent with every successful response.
pub const SUCCESS_MESSAGE: &str = "Files uploaded successfully";

/// Validates and stores uploaded files according to an [`UploadPolicy`].
#[derive(Clone)]
pub struct Ingestor<S, C> {
    storage: S,
    clock: C,
    policy: UploadPolicy,
}

impl<S, C> Ingestor<S, C>
where
    S: UploadStorage,
    C: Clock,
{
    pub fn new(storage: S, clock: C, policy: UploadPolicy) -> Self {
        Self {
            storage,
            clock,
            policy,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Runs one request through the pipeline and builds the response envelope.
    pub async fn handle(&self, method: &Method, files: Vec<IncomingFile>) -> UploadResponse {
        match self.process(method, files).await {
            Ok(stored) => UploadResponse::succeeded(SUCCESS_MESSAGE, stored),
            Err(error) => UploadResponse::failed(error.to_string()),
        }
    }

    /// Like [`Ingestor::handle`], keeping the typed error.
    pub async fn process(
        &self,
        method: &Method,
        files: Vec<IncomingFile>,
    ) -> Result<Vec<UploadedFile>, IngestError> {
        if *method != Method::POST {
            warn!(%method, "Rejected upload with unsupported method");
            return Err(IngestError::MethodNotAllowed);
        }

        if files.first().is_none_or(|file| file.name.is_empty()) {
            warn!("Rejected upload without files");
            return Err(IngestError::NoFiles);
        }

        let mut stored = Vec::with_capacity(files.len());
        let mut root_ready = false;

        for file in files {
            self.validate(&file)?;

            if !root_ready {
                self.storage.ensure_root().await.map_err(|e| {
                    warn!(error = %e, "Failed to prepare upload directory");
                    IngestError::Save {
                        name: file.name.clone(),
                    }
                })?;
                root_ready = true;
            }

            let saved_name = self.resolve_name(&file).await?;
            let size = file.size();

            self.storage
                .persist(&saved_name, file.content)
                .await
                .map_err(|e| {
                    warn!(file = %file.name, saved_name = %saved_name, error = %e, "Failed to persist upload");
                    IngestError::Save {
                        name: file.name.clone(),
                    }
                })?;

            info!(file = %file.name, saved_name = %saved_name, size, "Stored upload");

            stored.push(UploadedFile {
                original_name: file.name,
                saved_name,
                size,
                content_type: file.content_type,
            });
        }

        Ok(stored)
    }

    fn validate(&self, file: &IncomingFile) -> Result<(), IngestError> {
        if let Some(error) = file.transfer_error {
            warn!(file = %file.name, code = error.code(), "Upload transfer failed");
            return Err(IngestError::Transfer {
                name: file.name.clone(),
                error,
            });
        }

        if !self.policy.is_type_allowed(&file.content_type) {
            warn!(file = %file.name, content_type = %file.content_type, "Rejected upload type");
            return Err(IngestError::InvalidType {
                name: file.name.clone(),
            });
        }

        if !self.policy.is_size_allowed(file.size()) {
            warn!(file = %file.name, size = file.size(), "Rejected oversized upload");
            return Err(IngestError::TooLarge {
                name: file.name.clone(),
                limit: format_file_size(self.policy.max_file_size()),
            });
        }

        Ok(())
    }

    /// Picks the stored name: the safe name, or the first free `_N` variant.
    ///
    /// Existence is checked before writing, so two concurrent requests can
    /// still settle on the same name.
    async fn resolve_name(&self, file: &IncomingFile) -> Result<String, IngestError> {
        let safe_name = naming::safe_file_name(&file.name, self.clock.unix_timestamp());

        if !self.is_taken(&safe_name, file).await? {
            return Ok(safe_name);
        }

        let mut counter = 1;
        loop {
            let candidate = naming::numbered_name(&safe_name, counter);
            if !self.is_taken(&candidate, file).await? {
                debug!(safe_name = %safe_name, resolved = %candidate, "Resolved name collision");
                return Ok(candidate);
            }
            counter += 1;
        }
    }

    async fn is_taken(&self, name: &str, file: &IncomingFile) -> Result<bool, IngestError> {
        self.storage.exists(name).await.map_err(|e| {
            warn!(file = %file.name, candidate = %name, error = %e, "Failed to check stored name");
            IngestError::Save {
                name: file.name.clone(),
            }
        })
    }
}
