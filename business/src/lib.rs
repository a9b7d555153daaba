//! Client side of dropzone: gathers files, gates them against the upload
//! policy and submits them to the ingest endpoint.

mod config;
mod drop_zone;
pub mod http;
mod selection;
mod uploader;
pub mod view;

pub use config::BusinessConfig;
pub use drop_zone::{DragEvent, DragOutcome, DropZone, Highlight};
pub use selection::{CandidateFile, SelectionError, SelectionOutcome, SelectionSet};
pub use uploader::{
    CONNECTION_ERROR_MESSAGE, EMPTY_SELECTION_MESSAGE, FileUploader, GENERIC_UPLOAD_ERROR_MESSAGE,
    SubmitOutcome,
};
pub use view::UploadView;

#[cfg(test)]
mod test_utils;
