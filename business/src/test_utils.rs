//! Test utilities for exercising the uploader against a mock server.

use crate::drop_zone::Highlight;
use crate::selection::CandidateFile;
use crate::view::UploadView;
use dropzone_utils::{UploadResponse, UploadedFile};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// Everything a [`RecordingView`] was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Error(String),
    Success(Vec<UploadedFile>),
    AddRow(String),
    RemoveRow(String),
    ClearRows,
    Uploading(bool),
    ResetPicker,
    Highlight(Highlight),
}

#[derive(Debug, Default)]
pub struct RecordingView {
    pub events: Vec<ViewEvent>,
}

impl UploadView for RecordingView {
    fn show_error(&mut self, message: &str) {
        self.events.push(ViewEvent::Error(message.to_owned()));
    }

    fn show_success(&mut self, files: &[UploadedFile]) {
        self.events.push(ViewEvent::Success(files.to_vec()));
    }

    fn add_file_row(&mut self, file: &CandidateFile) {
        self.events.push(ViewEvent::AddRow(file.name.clone()));
    }

    fn remove_file_row(&mut self, name: &str) {
        self.events.push(ViewEvent::RemoveRow(name.to_owned()));
    }

    fn clear_file_rows(&mut self) {
        self.events.push(ViewEvent::ClearRows);
    }

    fn set_uploading(&mut self, uploading: bool) {
        self.events.push(ViewEvent::Uploading(uploading));
    }

    fn reset_picker(&mut self) {
        self.events.push(ViewEvent::ResetPicker);
    }

    fn set_drop_highlight(&mut self, highlight: Highlight) {
        self.events.push(ViewEvent::Highlight(highlight));
    }
}

pub fn uploaded(original: &str, saved: &str, size: u64) -> UploadedFile {
    UploadedFile {
        original_name: original.to_owned(),
        saved_name: saved.to_owned(),
        size,
        content_type: "image/png".to_owned(),
    }
}

/// Answers every upload with `envelope` and the given status.
pub async fn mount_envelope(server: &MockServer, status: u16, envelope: UploadResponse) {
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(status).set_body_json(envelope))
        .mount(server)
        .await;
}
