//! Upload endpoint handler.
//!
//! Turns a `multipart/form-data` body into [`IncomingFile`]s and hands them to
//! the [`Ingestor`](crate::ingest::Ingestor). Every outcome, including a
//! wrong method, is answered with the JSON envelope.

use crate::AppState;
use crate::ingest::{Clock, IncomingFile, SUCCESS_MESSAGE, TransferError};
use crate::storage::UploadStorage;
use axum::{
    Json,
    extract::{FromRequest, Multipart, Request, State, multipart::MultipartError},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use dropzone_utils::UploadResponse;
use tracing::warn;

/// Form field names that carry files. `files[]` is what browsers send for a
/// repeated field; the bare name is accepted too.
pub const FILE_FIELDS: &[&str] = &["files[]", "files"];

pub async fn upload<S, C>(State(state): State<AppState<S, C>>, request: Request) -> Response
where
    S: UploadStorage,
    C: Clock,
{
    let method = request.method().clone();

    let files = if method == Method::POST {
        match Multipart::from_request(request, &state).await {
            Ok(multipart) => read_files(multipart).await,
            Err(rejection) => {
                warn!(%rejection, "Upload body is not multipart");
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    match state.ingestor.process(&method, files).await {
        Ok(stored) => (
            StatusCode::OK,
            Json(UploadResponse::succeeded(SUCCESS_MESSAGE, stored)),
        )
            .into_response(),
        Err(error) => (
            error.status_code(),
            Json(UploadResponse::failed(error.to_string())),
        )
            .into_response(),
    }
}

/// Collects the file parts in request order.
///
/// A part that fails mid-transfer is kept with its transfer error and ends
/// the read, since the rest of the stream is unusable.
pub async fn read_files(mut multipart: Multipart) -> Vec<IncomingFile> {
    let mut files = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(error) => {
                warn!(%error, "Multipart stream ended unexpectedly");
                if !files.is_empty() {
                    files.push(IncomingFile::failed("", "", transfer_error(&error)));
                }
                break;
            }
        };

        if !field.name().is_some_and(|name| FILE_FIELDS.contains(&name)) {
            continue;
        }
        // Parts without a filename are plain form values, not files.
        let Some(name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let content_type = field.content_type().unwrap_or_default().to_owned();

        if name.is_empty() {
            files.push(IncomingFile::failed(name, content_type, TransferError::NoFile));
            continue;
        }

        match field.bytes().await {
            Ok(content) => files.push(IncomingFile::new(name, content_type, content)),
            Err(error) => {
                warn!(file = %name, %error, "File part transfer failed");
                files.push(IncomingFile::failed(
                    name,
                    content_type,
                    transfer_error(&error),
                ));
                break;
            }
        }
    }

    files
}

fn transfer_error(error: &MultipartError) -> TransferError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        TransferError::IniSize
    } else {
        TransferError::Partial
    }
}
