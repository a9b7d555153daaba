//! Drives one upload form: selection, drag-and-drop and submission.

use crate::config::BusinessConfig;
use crate::drop_zone::{DragEvent, DragOutcome, DropZone};
use crate::http::{Client, MultipartForm};
use crate::selection::{CandidateFile, SelectionOutcome, SelectionSet};
use crate::view::UploadView;
use dropzone_utils::{UploadPolicy, UploadResponse, UploadedFile};

/// Form field every file is sent under.
pub const FILE_FIELD: &str = "files[]";

pub const EMPTY_SELECTION_MESSAGE: &str = "Please select files to upload.";
pub const CONNECTION_ERROR_MESSAGE: &str =
    "An error occurred while uploading files. Check your connection.";
pub const GENERIC_UPLOAD_ERROR_MESSAGE: &str = "An error occurred while uploading files.";

/// How a call to [`FileUploader::submit`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was sent because the selection was empty.
    NothingSelected,
    /// A previous submit has not finished yet.
    AlreadyUploading,
    Uploaded(Vec<UploadedFile>),
    /// The server answered with `success: false`.
    Rejected(String),
    /// No usable answer: transport failure or a body that is not an envelope.
    ConnectionFailed,
}

pub struct FileUploader<V> {
    config: BusinessConfig,
    policy: UploadPolicy,
    selection: SelectionSet,
    drop_zone: DropZone,
    view: V,
    uploading: bool,
}

impl<V: UploadView> FileUploader<V> {
    pub fn new(config: BusinessConfig, view: V) -> Self {
        Self::with_policy(config, UploadPolicy::default(), view)
    }

    pub fn with_policy(config: BusinessConfig, policy: UploadPolicy, view: V) -> Self {
        Self {
            config,
            policy,
            selection: SelectionSet::new(),
            drop_zone: DropZone::new(),
            view,
            uploading: false,
        }
    }

    pub fn config(&self) -> &BusinessConfig {
        &self.config
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Adds files from the picker or a drop.
    ///
    /// Each rejected file is reported to the view on its own; the picker is
    /// reset afterwards in every case.
    pub fn select_files<I>(&mut self, files: I) -> SelectionOutcome
    where
        I: IntoIterator<Item = CandidateFile>,
    {
        let outcome = self.selection.select(files, &self.policy);

        for error in &outcome.rejected {
            log::warn!("Rejected {}: {}", error.file_name(), error);
            self.view.show_error(&error.to_string());
        }
        for name in &outcome.added {
            if let Some(file) = self.selection.get(name) {
                self.view.add_file_row(file);
            }
        }

        self.view.reset_picker();
        outcome
    }

    pub fn remove_file(&mut self, name: &str) -> bool {
        match self.selection.remove(name) {
            Some(_) => {
                self.view.remove_file_row(name);
                true
            }
            None => false,
        }
    }

    /// Empties the selection and the file list.
    pub fn clear(&mut self) {
        self.selection.clear();
        self.view.clear_file_rows();
    }

    /// Updates the drop target and moves dropped files into the selection.
    ///
    /// The returned outcome carries no files; they have been consumed.
    pub fn handle_drag_event(&mut self, event: DragEvent) -> DragOutcome {
        let mut outcome = self.drop_zone.handle(event);
        self.view.set_drop_highlight(outcome.highlight);

        let dropped = std::mem::take(&mut outcome.dropped);
        if !dropped.is_empty() {
            self.select_files(dropped);
        }

        outcome
    }

    /// Sends every selected file in one request.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.uploading {
            log::warn!("Submit ignored, an upload is already running");
            return SubmitOutcome::AlreadyUploading;
        }
        if self.selection.is_empty() {
            self.view.show_error(EMPTY_SELECTION_MESSAGE);
            return SubmitOutcome::NothingSelected;
        }

        self.uploading = true;
        self.view.set_uploading(true);

        let outcome = self.send_selection().await;

        self.uploading = false;
        self.view.set_uploading(false);
        outcome
    }

    async fn send_selection(&mut self) -> SubmitOutcome {
        let form = self.selection.iter().fold(MultipartForm::new(), |form, file| {
            form.file(
                FILE_FIELD,
                &file.name,
                &file.content_type,
                file.bytes.clone(),
            )
        });
        let url = self.config.upload_url();
        log::info!("Uploading {} file(s) to {}", self.selection.len(), url);

        let response = match Client::post(url).multipart(form).send().await {
            Ok(response) => response,
            Err(error) => {
                log::error!("Upload request failed: {error}");
                self.view.show_error(CONNECTION_ERROR_MESSAGE);
                return SubmitOutcome::ConnectionFailed;
            }
        };

        // The envelope is read whatever the status code.
        if !response.is_success() {
            log::debug!("Upload answered with status {}", response.status);
        }
        let envelope: UploadResponse = match response.json() {
            Ok(envelope) => envelope,
            Err(error) => {
                log::error!(
                    "Upload response (status {}, content-type {:?}) is not an envelope: {error}",
                    response.status,
                    response.header("content-type")
                );
                self.view.show_error(CONNECTION_ERROR_MESSAGE);
                return SubmitOutcome::ConnectionFailed;
            }
        };

        if envelope.success {
            self.view.show_success(&envelope.files);
            self.clear();
            SubmitOutcome::Uploaded(envelope.files)
        } else {
            let message = if envelope.message.is_empty() {
                GENERIC_UPLOAD_ERROR_MESSAGE.to_owned()
            } else {
                envelope.message
            };
            self.view.show_error(&message);
            SubmitOutcome::Rejected(message)
        }
    }
}
