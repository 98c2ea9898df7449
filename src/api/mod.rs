//! Thin client for the SmartRecruit REST API.
//!
//! One method per endpoint, grouped by resource in the submodules. There is
//! no retry, backoff or caching: every call is one request, and a non-2xx
//! answer becomes an [`AppError`] carrying the status and the server's
//! `detail` text.
//!
//! Requests go through the [`Transport`] seam as neutral [`ApiRequest`]
//! values. [`HttpTransport`] speaks HTTP with blocking `reqwest`; tests swap
//! in a scripted transport.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::domain::{Download, FileType};
use crate::error::{error_detail, AppError, EXIT_LOCAL, EXIT_REMOTE};

mod analytics;
mod auth;
mod candidates;
pub mod http;
mod jobs;
mod public;
mod ranking;
pub mod token;
mod upload;

pub use http::HttpTransport;
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};

/// Largest résumé the upload endpoints accept.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Upload progress callback; receives whole percentages `0..=100`.
pub type ProgressFn = Arc<dyn Fn(u8) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A file part of a multipart body.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Read a résumé from disk, enforcing the PDF/DOCX and size rules.
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::new(EXIT_LOCAL, format!("Invalid file name: {}", path.display())))?
            .to_string();
        let file_type = FileType::from_file_name(&file_name).ok_or_else(|| {
            AppError::new(
                EXIT_LOCAL,
                format!("Only PDF and DOCX files are supported (got: {file_name})."),
            )
        })?;
        let bytes = std::fs::read(path)
            .map_err(|e| AppError::new(EXIT_LOCAL, format!("Failed to read {}: {e}", path.display())))?;
        if bytes.len() as u64 > MAX_UPLOAD_BYTES {
            return Err(AppError::new(
                EXIT_LOCAL,
                format!("{file_name} is larger than 10MB."),
            ));
        }
        Ok(Self {
            file_name,
            mime: file_type.mime(),
            bytes,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Text { name: String, value: String },
    File { name: String, upload: UploadFile },
}

impl FormField {
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        FormField::Text {
            name: name.to_string(),
            value: value.into(),
        }
    }

    pub fn file(name: &str, upload: UploadFile) -> Self {
        FormField::File {
            name: name.to_string(),
            upload,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    Form(Vec<FormField>),
}

/// A transport-neutral request. `path` is absolute from the server root
/// (`/api/...`).
#[derive(Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Body,
    pub bearer: Option<String>,
    pub progress: Option<ProgressFn>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
            bearer: None,
            progress: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, AppError> {
        let value = serde_json::to_value(body)
            .map_err(|e| AppError::new(EXIT_LOCAL, format!("Failed to encode request body: {e}")))?;
        self.body = Body::Json(value);
        Ok(self)
    }

    pub fn form(mut self, fields: Vec<FormField>) -> Self {
        self.body = Body::Form(fields);
        self
    }

    pub fn progress(mut self, progress: Option<ProgressFn>) -> Self {
        self.progress = progress;
        self
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("body", &self.body)
            .field("bearer", &self.bearer.as_ref().map(|_| "<redacted>"))
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Carries a request to the server and returns whatever it answered.
///
/// Implementations report transport failures (connection refused, timeout)
/// as errors; HTTP error statuses are returned as ordinary responses.
pub trait Transport: Send + Sync {
    fn execute(&self, request: ApiRequest) -> Result<ApiResponse, AppError>;
}

pub struct ApiClient<T: Transport = HttpTransport> {
    transport: T,
    tokens: Box<dyn TokenStore>,
}

impl ApiClient<HttpTransport> {
    /// Client for the configured server, persisting the token on disk.
    pub fn from_config(config: &ClientConfig) -> Result<Self, AppError> {
        let transport = HttpTransport::new(&config.api_url, config.timeout)?;
        let tokens = FileTokenStore::new(config.token_file.clone());
        Ok(Self::new(transport, Box::new(tokens)))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, tokens: Box<dyn TokenStore>) -> Self {
        Self { transport, tokens }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The stored bearer token, if any.
    pub fn token(&self) -> Option<String> {
        match self.tokens.load() {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %err, "could not read stored token");
                None
            }
        }
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    pub(crate) fn store_token(&self, token: &str) -> Result<(), AppError> {
        self.tokens.save(token)
    }

    pub(crate) fn clear_token(&self) -> Result<(), AppError> {
        self.tokens.clear()
    }

    /// Send with the stored bearer token attached. A 401 means the token is
    /// no longer valid, so it is forgotten.
    pub(crate) fn send_authed(&self, mut request: ApiRequest) -> Result<ApiResponse, AppError> {
        request.bearer = self.token();
        let sent_token = request.bearer.is_some();
        self.send(request).inspect_err(|err| {
            if sent_token && err.is_unauthorized() {
                tracing::info!("token rejected; clearing it");
                if let Err(clear_err) = self.clear_token() {
                    tracing::warn!(error = %clear_err, "could not clear stored token");
                }
            }
        })
    }

    /// Send without credentials (public portal endpoints).
    pub(crate) fn send_public(&self, mut request: ApiRequest) -> Result<ApiResponse, AppError> {
        request.bearer = None;
        self.send(request)
    }

    fn send(&self, request: ApiRequest) -> Result<ApiResponse, AppError> {
        let method = request.method;
        let path = request.path.clone();
        let span = tracing::debug_span!("api", ?method, %path);
        let _enter = span.enter();

        let response = self.transport.execute(request).inspect_err(|err| {
            tracing::warn!(error = %err, "request failed");
        })?;
        if response.is_success() {
            tracing::debug!(status = response.status, bytes = response.body.len(), "ok");
            return Ok(response);
        }

        let err = AppError::api(response.status, error_detail(&response.body));
        tracing::warn!(status = response.status, error = %err, "api error");
        Err(err)
    }
}

pub(crate) fn decode<R: DeserializeOwned>(response: &ApiResponse) -> Result<R, AppError> {
    serde_json::from_slice(&response.body)
        .map_err(|e| AppError::new(EXIT_REMOTE, format!("Failed to parse API response: {e}")))
}

pub(crate) fn download(response: ApiResponse) -> Download {
    let file_name = response
        .content_disposition
        .as_deref()
        .and_then(file_name_from_disposition);
    Download {
        bytes: response.body,
        content_type: response.content_type,
        file_name,
    }
}

/// Extract `filename` from a `Content-Disposition` header value.
pub fn file_name_from_disposition(header: &str) -> Option<String> {
    header.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        let value = value.trim().trim_matches('"');
        // Keep only the last path component; never trust a server path.
        let name = value.rsplit(['/', '\\']).next().unwrap_or(value);
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    })
}

/// Whole percentage of `loaded` out of `total`, rounded.
pub fn upload_percent(loaded: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = (loaded.min(total) as f64 * 100.0 / total as f64).round();
    pct as u8
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Replays canned responses in order and records every request.
    #[derive(Default)]
    pub struct ScriptedTransport {
        responses: Mutex<VecDeque<Result<ApiResponse, AppError>>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push_json(&self, status: u16, body: &str) {
            self.push(Ok(ApiResponse {
                status,
                body: body.as_bytes().to_vec(),
                content_type: Some("application/json".to_string()),
                content_disposition: None,
            }));
        }

        pub fn push(&self, response: Result<ApiResponse, AppError>) {
            self.responses.lock().unwrap().push_back(response);
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&self, request: ApiRequest) -> Result<ApiResponse, AppError> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AppError::new(EXIT_REMOTE, "no scripted response left")))
        }
    }

    pub fn client() -> ApiClient<ScriptedTransport> {
        ApiClient::new(ScriptedTransport::new(), Box::new(MemoryTokenStore::default()))
    }

    pub fn authed_client(token: &str) -> ApiClient<ScriptedTransport> {
        ApiClient::new(
            ScriptedTransport::new(),
            Box::new(MemoryTokenStore::with_token(token)),
        )
    }

    pub const JOB_JSON: &str = r#"{
        "id": 3, "title": "Data Analyst", "department": "Finance",
        "description": "Dashboards", "requirements": "SQL",
        "skills_required": ["sql", "python"], "min_experience_years": 1,
        "education_level": "S1", "status": "open", "created_by": 1,
        "created_at": "2025-02-01T08:00:00", "updated_at": "2025-02-01T08:00:00"
    }"#;

    pub const CANDIDATE_JSON: &str = r#"{
        "id": 12, "full_name": "Budi Santoso", "email": "budi@example.com",
        "phone": "0812", "skills": ["python", "sql"], "experience": [],
        "education": [], "certifications": [], "summary": null, "source": "upload",
        "created_at": "2025-02-03T10:00:00", "updated_at": "2025-02-03T10:00:00"
    }"#;
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn non_success_maps_detail_and_status() {
        let client = authed_client("tok");
        client
            .transport()
            .push_json(404, r#"{"detail": "Job not found"}"#);
        let err = client.get_job(99).unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.detail(), Some("Job not found"));
        assert_eq!(err.exit_code(), EXIT_REMOTE);
    }

    #[test]
    fn rejected_token_is_forgotten() {
        let client = authed_client("stale");
        client.transport().push_json(403, r#"{"detail": "Forbidden"}"#);
        assert!(client.get_job(3).is_err());
        assert!(client.has_token());

        client.transport().push_json(401, r#"{"detail": "Could not validate credentials"}"#);
        let err = client.get_job(3).unwrap_err();
        assert!(err.is_unauthorized());
        assert!(!client.has_token());
    }

    #[test]
    fn public_401_keeps_the_token() {
        let client = authed_client("tok");
        client.transport().push_json(401, r#"{"detail": "Email atau password salah"}"#);
        assert!(client.login("a@b.c", "wrong").is_err());
        assert_eq!(client.token().as_deref(), Some("tok"));
    }

    #[test]
    fn transport_failure_propagates() {
        let client = authed_client("tok");
        client
            .transport()
            .push(Err(AppError::new(EXIT_REMOTE, "connection refused")));
        let err = client.overview().unwrap_err();
        assert_eq!(err.status(), None);
        assert_eq!(err.message(), "connection refused");
    }

    #[test]
    fn malformed_body_is_a_remote_error() {
        let client = authed_client("tok");
        client.transport().push_json(200, "<html>");
        let err = client.overview().unwrap_err();
        assert_eq!(err.exit_code(), EXIT_REMOTE);
        assert!(err.message().starts_with("Failed to parse API response"));
    }

    #[test]
    fn disposition_file_name() {
        assert_eq!(
            file_name_from_disposition(r#"attachment; filename="ranking_job_3.csv""#).as_deref(),
            Some("ranking_job_3.csv")
        );
        assert_eq!(
            file_name_from_disposition("attachment; filename=../../etc/passwd").as_deref(),
            Some("passwd")
        );
        assert_eq!(file_name_from_disposition("inline"), None);
    }

    #[test]
    fn percent_rounds_and_clamps() {
        assert_eq!(upload_percent(0, 200), 0);
        assert_eq!(upload_percent(1, 3), 33);
        assert_eq!(upload_percent(2, 3), 67);
        assert_eq!(upload_percent(500, 200), 100);
        assert_eq!(upload_percent(0, 0), 100);
    }

    #[test]
    fn upload_file_rejects_wrong_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.txt");
        std::fs::write(&path, b"hello").unwrap();
        let err = UploadFile::from_path(&path).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_LOCAL);

        let path = dir.path().join("cv.PDF");
        std::fs::write(&path, b"%PDF-1.4").unwrap();
        let upload = UploadFile::from_path(&path).unwrap();
        assert_eq!(upload.mime, "application/pdf");
        assert_eq!(upload.file_name, "cv.PDF");
    }
}
