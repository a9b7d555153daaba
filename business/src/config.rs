/// Where the client sends uploads.
#[derive(Debug, Clone)]
pub struct BusinessConfig {
    pub api_base_url: String,
    /// Path of the ingest endpoint, starting with `/`.
    pub upload_path: String,
}

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_UPLOAD_PATH: &str = "/upload";

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            upload_path: DEFAULT_UPLOAD_PATH.to_owned(),
        }
    }

    pub fn with_upload_path(mut self, upload_path: impl Into<String>) -> Self {
        self.upload_path = upload_path.into();
        self
    }

    /// Full URL of the ingest endpoint.
    ///
    /// An empty base yields the bare path, for same-origin deployments.
    pub fn upload_url(&self) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        let path = self.upload_path.trim_start_matches('/');
        if base.is_empty() {
            format!("/{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}
