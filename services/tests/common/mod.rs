//! Shared test utilities for integration tests.

use axum::Router;
use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use dropzone_services::{
    config::Config,
    ingest::FixedClock,
    routes_with_clock,
    storage::{DiskStorage, MockUploadStorage},
};
use dropzone_utils::UploadPolicy;
use tempfile::TempDir;

/// Timestamp every test server stamps into stored names.
pub const TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Builds a server backed by in-memory storage.
#[allow(dead_code)]
pub async fn mock_server(storage: MockUploadStorage) -> TestServer {
    server(routes_with_clock(storage, FixedClock::new(TEST_TIMESTAMP), Config::new_for_test()).await)
}

/// Builds a server writing into a fresh temporary directory.
///
/// The returned [`TempDir`] must outlive the server.
#[allow(dead_code)]
pub async fn disk_server(config: Config) -> (TestServer, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = DiskStorage::new(dir.path().join("uploads")).expect("disk storage");
    let app = routes_with_clock(storage, FixedClock::new(TEST_TIMESTAMP), config).await;
    (server(app), dir)
}

/// Config with the default types and a small per-file limit.
#[allow(dead_code)]
pub fn small_limit_config(max_file_size: u64) -> Config {
    Config::new_for_test_with_limits(
        UploadPolicy::new(dropzone_utils::DEFAULT_ALLOWED_TYPES.iter().copied(), max_file_size),
        1024 * 1024,
    )
}

/// Adds one `files[]` part per `(name, type, content)` triple.
#[allow(dead_code)]
pub fn upload_form(files: &[(&str, &str, &str)]) -> MultipartForm {
    files
        .iter()
        .fold(MultipartForm::new(), |form, (name, content_type, content)| {
            let part = Part::bytes(content.as_bytes().to_vec())
                .file_name(*name)
                .mime_type(*content_type);
            form.add_part("files[]", part)
        })
}

fn server(app: Router) -> TestServer {
    TestServer::new(app).expect("test server")
}
