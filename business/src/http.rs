//! Minimal HTTP client for talking to the ingest endpoint.
//!
//! Requests are described by a plain [`RequestBuilder`] and only turned into
//! `reqwest` types on [`RequestBuilder::send`], so a request can be inspected
//! and cloned before it goes out. Responses are read fully into memory.

use std::collections::HashMap;

/// A simplified HTTP response that owns its body.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers (lowercased keys)
    pub headers: HashMap<String, String>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

impl Response {
    /// Returns true if the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(|s| s.as_str())
    }

    /// Attempt to parse the body as UTF-8 text.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.clone())
    }

    /// Attempt to deserialize the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP client error.
#[derive(Debug, Clone, thiserror::Error)]
#[error("HTTP error: {message}")]
pub struct HttpError {
    pub message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type for HTTP operations.
pub type HttpResult<T> = Result<T, HttpError>;

/// One file part of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A `multipart/form-data` body made of file parts, in order.
///
/// The same field name may repeat, which is how a list of files is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<FilePart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(
        mut self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(FilePart {
            field: field.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        });
        self
    }

    pub fn parts(&self) -> &[FilePart] {
        &self.parts
    }

    fn into_reqwest(self) -> HttpResult<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for part in self.parts {
            let file = reqwest::multipart::Part::bytes(part.bytes)
                .file_name(part.file_name)
                .mime_str(&part.content_type)
                .map_err(|e| HttpError::new(e.to_string()))?;
            form = form.part(part.field, file);
        }
        Ok(form)
    }
}

#[derive(Debug, Clone)]
enum Body {
    Bytes(Vec<u8>),
    Multipart(MultipartForm),
}

/// A builder for constructing HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    url: String,
    headers: HashMap<String, String>,
    body: Option<Body>,
}

impl RequestBuilder {
    fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Add a header to the request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(Body::Bytes(body.into()));
        self
    }

    /// Set the request body as a multipart form.
    ///
    /// The boundary and `content-type` header are chosen when the request is sent.
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Some(Body::Multipart(form));
        self
    }

    /// Send the request and read the whole response.
    pub async fn send(self) -> HttpResult<Response> {
        let client = reqwest::Client::new();
        let mut request = client.post(&self.url);

        // Add headers
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        // Add body if present
        request = match self.body {
            Some(Body::Bytes(body)) => request.body(body),
            Some(Body::Multipart(form)) => request.multipart(form.into_reqwest()?),
            None => request,
        };

        // Send request
        let response = request
            .send()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?;

        // Extract status and headers before consuming the response
        let status = response.status().as_u16();
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(name.as_str().to_lowercase(), v.to_owned());
            }
        }

        // Get body
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(e.to_string()))?
            .to_vec();

        log::debug!("POST {} -> {}", self.url, status);

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

/// Entry point for building requests.
///
/// # Example
///
/// ```ignore
/// use dropzone_business::http::{Client, MultipartForm};
///
/// async fn upload(bytes: Vec<u8>) {
///     let form = MultipartForm::new().file("files[]", "report.pdf", "application/pdf", bytes);
///     let response = Client::post("http://127.0.0.1:8080/upload")
///         .multipart(form)
///         .send()
///         .await
///         .unwrap();
///
///     if response.is_success() {
///         let body: serde_json::Value = response.json().unwrap();
///     }
/// }
/// ```
pub struct Client;

impl Client {
    /// Create a POST request.
    pub fn post(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(url)
    }
}
