//! `dropzone upload`: select files from disk and send them in one request.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use dropzone_business::{BusinessConfig, CandidateFile, FileUploader, SubmitOutcome, UploadView};
use tracing::{info, instrument};

/// Reads each path into a candidate, guessing its type from the extension.
pub fn read_candidates(paths: &[PathBuf]) -> Result<Vec<CandidateFile>> {
    paths
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .context("Invalid filename")?
                .to_string_lossy()
                .into_owned();

            let content_type = mime_guess::from_path(path)
                .first_or_octet_stream()
                .to_string();

            let bytes =
                std::fs::read(path).with_context(|| format!("Failed to read file: {path:?}"))?;

            Ok(CandidateFile::new(name, content_type, bytes))
        })
        .collect()
}

/// Runs the selection and submit flow, reporting through `view`.
#[instrument(skip_all, name = "upload", fields(server = %config.upload_url()))]
pub async fn run_upload<V: UploadView>(
    config: BusinessConfig,
    paths: &[PathBuf],
    view: V,
) -> Result<SubmitOutcome> {
    let candidates = read_candidates(paths)?;
    let mut uploader = FileUploader::new(config, view);

    let selection = uploader.select_files(candidates);
    info!(
        added = selection.added.len(),
        rejected = selection.rejected.len(),
        duplicates = selection.duplicates.len(),
        "Files selected"
    );

    Ok(uploader.submit().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropzone_business::view::MarkupView;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_string_contains, method, path},
    };

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_candidates_guesses_types() {
        let dir = tempfile::tempdir().unwrap();
        let paths = [
            write_file(&dir, "photo.JPG", b"jpg"),
            write_file(&dir, "doc.pdf", b"%PDF"),
            write_file(&dir, "blob", b"?"),
        ];

        let candidates = read_candidates(&paths).unwrap();

        let types: Vec<&str> = candidates.iter().map(|c| c.content_type.as_str()).collect();
        assert_eq!(types, ["image/jpeg", "application/pdf", "application/octet-stream"]);
        assert_eq!(candidates[1].name, "doc.pdf");
        assert_eq!(candidates[1].size, 4);
    }

    #[test]
    fn test_read_candidates_missing_file() {
        let err = read_candidates(&[PathBuf::from("/definitely/not/here.png")]).unwrap_err();

        assert!(err.to_string().contains("Failed to read file"));
    }

    #[tokio::test]
    async fn test_run_upload_sends_only_accepted_files() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .and(body_string_contains("filename=\"scan.png\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "message": "Files uploaded successfully",
                "files": [{
                    "originalName": "scan.png",
                    "savedName": "scan_1700000000.png",
                    "size": 3,
                    "type": "image/png"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let paths = [
            write_file(&dir, "scan.png", b"png"),
            write_file(&dir, "notes.txt", b"text"),
        ];

        let outcome = run_upload(BusinessConfig::new(server.uri()), &paths, MarkupView::new())
            .await
            .unwrap();

        let SubmitOutcome::Uploaded(files) = outcome else {
            panic!("expected upload to succeed, got {outcome:?}");
        };
        assert_eq!(files[0].saved_name, "scan_1700000000.png");
    }

    #[tokio::test]
    async fn test_run_upload_with_nothing_acceptable_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let paths = [write_file(&dir, "notes.txt", b"text")];

        let outcome = run_upload(BusinessConfig::new(server.uri()), &paths, MarkupView::new())
            .await
            .unwrap();

        assert_eq!(outcome, SubmitOutcome::NothingSelected);
    }
}
