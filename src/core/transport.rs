//! HTTP transport for the Dradis Pro REST API
//!
//! The [`Transport`] trait is the seam between the entity graph and the
//! network: endpoint code builds an [`ApiRequest`], the transport turns it
//! into one blocking HTTP exchange, and the raw status and body come back
//! as an [`ApiResponse`]. Status interpretation stays with the caller, so
//! 4xx/5xx answers are ordinary responses here and only connection-level
//! problems become a [`TransportError`].

use std::io::Read;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::core::config::{Config, ConfigError};

/// HTTP methods used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// The one status code the API answers with on success
    pub fn expected_status(&self) -> u16 {
        match self {
            Method::Post => 201,
            Method::Get | Method::Put | Method::Delete => 200,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One file in a multipart upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPart {
    pub filename: String,
    pub content: Vec<u8>,
}

/// Request payload
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// Files sent as `files[]` form parts
    Multipart(Vec<UploadPart>),
}

/// A logical API request, relative to `<base url>/pro/api/`
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    /// Sent as the `Dradis-Project-Id` header for project-scoped endpoints
    pub project_id: Option<u64>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            project_id: None,
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(Method::Post, path).with_body(RequestBody::Json(body))
    }

    pub fn put(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(Method::Put, path).with_body(RequestBody::Json(body))
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Scope the request to a project
    pub fn in_project(mut self, project_id: u64) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

/// Raw response: status code and body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Errors that can occur while performing a request
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("TLS setup failed: {0}")]
    Tls(String),

    #[error("invalid transport configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Performs one blocking request/response exchange
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        (**self).send(request)
    }
}

/// [`Transport`] backed by a `ureq` agent
pub struct HttpTransport {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Create a transport from validated configuration. With `verify` off,
    /// certificate and hostname checks are disabled.
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        config.validate()?;

        let verify = config.verify();
        let connector = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(!verify)
            .danger_accept_invalid_hostnames(!verify)
            .build()
            .map_err(|e| TransportError::Tls(e.to_string()))?;

        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs()))
            .tls_connector(Arc::new(connector))
            .build();

        Ok(Self {
            agent,
            base_url: config.url()?.to_string(),
            api_key: config.api_key()?.to_string(),
        })
    }

    /// Full URL for an API path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/pro/api/{}", self.base_url, path)
    }

    // `into_string` caps bodies at 10 MiB; node lists embed every evidence
    // and note, so large projects exceed that
    fn read_response(response: ureq::Response) -> Result<ApiResponse, TransportError> {
        let status = response.status();
        let mut body = String::new();
        response.into_reader().read_to_string(&mut body)?;
        Ok(ApiResponse { status, body })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            project_id = ?request.project_id,
            "sending request"
        );

        let mut call = self
            .agent
            .request(request.method.as_str(), &self.url_for(&request.path))
            .set("Authorization", &format!("Token token=\"{}\"", self.api_key))
            .set("Accept", "application/json");
        if let Some(project_id) = request.project_id {
            call = call.set("Dradis-Project-Id", &project_id.to_string());
        }

        let result = match &request.body {
            RequestBody::Empty if request.method == Method::Delete => {
                call.set("Content-Type", "application/json").call()
            }
            RequestBody::Empty => call.call(),
            RequestBody::Json(value) => call.send_json(value),
            RequestBody::Multipart(parts) => {
                let boundary = multipart_boundary();
                let body = encode_multipart(&boundary, parts);
                call.set(
                    "Content-Type",
                    &format!("multipart/form-data; boundary={}", boundary),
                )
                .send_bytes(&body)
            }
        };

        match result {
            Ok(response) => Self::read_response(response),
            Err(ureq::Error::Status(status, response)) => {
                tracing::debug!(status, path = %request.path, "non-success status");
                Self::read_response(response)
            }
            Err(ureq::Error::Transport(e)) => Err(TransportError::Request(e.to_string())),
        }
    }
}

fn multipart_boundary() -> String {
    format!("----dradis-{}", ulid::Ulid::new())
}

/// Encode files as a `multipart/form-data` body under the `files[]` field
pub fn encode_multipart(boundary: &str, parts: &[UploadPart]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        let filename = escape_filename(&part.filename);
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"files[]\"; filename=\"{}\"\r\n",
                filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(&part.content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    body
}

/// Quote-safe filename for a part header: backslashes and quotes are
/// backslash-escaped, line breaks percent-encoded so they cannot end the header
fn escape_filename(filename: &str) -> String {
    let mut escaped = String::with_capacity(filename.len());
    for c in filename.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\r' => escaped.push_str("%0D"),
            '\n' => escaped.push_str("%0A"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Percent-escape a single path segment (unreserved characters pass through)
pub fn escape_segment(segment: &str) -> String {
    let mut escaped = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                escaped.push(byte as char)
            }
            _ => escaped.push_str(&format!("%{:02X}", byte)),
        }
    }
    escaped
}
