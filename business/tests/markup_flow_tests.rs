//! Full selection-to-result flow rendered through `MarkupView`.

use dropzone_business::view::{MarkupView, ResultKind};
use dropzone_business::{BusinessConfig, CandidateFile, DragEvent, FileUploader, SubmitOutcome};
use dropzone_utils::{UploadResponse, UploadedFile};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[tokio::test]
async fn test_dropped_files_upload_and_render() {
    let server = MockServer::start().await;
    let stored = vec![UploadedFile {
        original_name: "<scan>.pdf".to_owned(),
        saved_name: "_scan__1700000000.pdf".to_owned(),
        size: 1536,
        content_type: "application/pdf".to_owned(),
    }];
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(UploadResponse::succeeded("Files uploaded successfully", stored)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = BusinessConfig::new(server.uri()).with_upload_path("/api/upload");
    let mut uploader = FileUploader::new(config, MarkupView::new());

    uploader.handle_drag_event(DragEvent::Over);
    assert_eq!(uploader.view().highlight().colour(), "#e3f2fd");

    uploader.handle_drag_event(DragEvent::Drop(vec![CandidateFile::new(
        "<scan>.pdf",
        "application/pdf",
        vec![0; 1536],
    )]));
    assert_eq!(uploader.view().highlight().colour(), "#f8f9fa");
    assert!(
        uploader
            .view()
            .file_list()
            .contains("<div class=\"file-name\">&lt;scan&gt;.pdf</div>")
    );

    let outcome = uploader.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Uploaded(ref files) if files.len() == 1));

    let view = uploader.into_view();
    assert!(view.file_list().is_empty());
    assert!(!view.is_uploading());
    assert_eq!(
        view.result(),
        Some((
            ResultKind::Success,
            "<strong>Files uploaded successfully!</strong><ul><li>&lt;scan&gt;.pdf (1.5 KB)</li></ul>"
        ))
    );
}

#[tokio::test]
async fn test_unreachable_server_shows_connection_error() {
    let config = BusinessConfig::new("http://127.0.0.1:9");
    let mut uploader = FileUploader::new(config, MarkupView::new());
    uploader.select_files([CandidateFile::new("a.png", "image/png", vec![1, 2, 3])]);

    let outcome = uploader.submit().await;

    assert_eq!(outcome, SubmitOutcome::ConnectionFailed);
    assert_eq!(
        uploader.view().result(),
        Some((
            ResultKind::Error,
            "<strong>Error:</strong> An error occurred while uploading files. Check your connection."
        ))
    );
    assert_eq!(uploader.selection().names(), ["a.png"]);
}
