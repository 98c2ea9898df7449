//! Blocking `reqwest` transport.

use std::io::{self, Cursor, Read};
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::header::{HeaderName, CONTENT_DISPOSITION, CONTENT_TYPE};

use super::{upload_percent, ApiRequest, ApiResponse, Body, FormField, Method, ProgressFn, Transport};
use crate::error::{AppError, EXIT_LOCAL, EXIT_REMOTE};

pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::new(EXIT_LOCAL, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: ApiRequest) -> Result<ApiResponse, AppError> {
        let url = format!("{}{}", self.base_url, request.path);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut req = self.client.request(method, &url);
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            req = req.bearer_auth(token);
        }
        req = match request.body {
            Body::Empty => req,
            Body::Json(value) => req.json(&value),
            Body::Form(fields) => req.multipart(build_form(fields, request.progress)?),
        };

        let resp = req
            .send()
            .map_err(|e| AppError::new(EXIT_REMOTE, format!("Request to {url} failed: {e}")))?;

        let status = resp.status().as_u16();
        let header = |name: HeaderName| {
            resp.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE);
        let content_disposition = header(CONTENT_DISPOSITION);

        let body = resp
            .bytes()
            .map_err(|e| AppError::new(EXIT_REMOTE, format!("Failed to read response from {url}: {e}")))?
            .to_vec();

        Ok(ApiResponse {
            status,
            body,
            content_type,
            content_disposition,
        })
    }
}

fn build_form(fields: Vec<FormField>, progress: Option<ProgressFn>) -> Result<Form, AppError> {
    let total: u64 = fields
        .iter()
        .map(|f| match f {
            FormField::File { upload, .. } => upload.bytes.len() as u64,
            FormField::Text { .. } => 0,
        })
        .sum();
    let tracker = progress.map(|callback| {
        Arc::new(ProgressTracker {
            callback,
            total,
            loaded: AtomicU64::new(0),
            last: AtomicU8::new(u8::MAX),
        })
    });

    let mut form = Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name, value),
            FormField::File { name, upload } => {
                let len = upload.bytes.len() as u64;
                let reader = ProgressReader {
                    inner: Cursor::new(upload.bytes),
                    tracker: tracker.clone(),
                };
                let part = Part::reader_with_length(reader, len)
                    .file_name(upload.file_name)
                    .mime_str(upload.mime)
                    .map_err(|e| AppError::new(EXIT_LOCAL, format!("Invalid MIME type: {e}")))?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

/// Shared by every file part of one request so the percentage covers the
/// whole upload.
struct ProgressTracker {
    callback: ProgressFn,
    total: u64,
    loaded: AtomicU64,
    last: AtomicU8,
}

impl ProgressTracker {
    fn advance(&self, n: usize) {
        let loaded = self.loaded.fetch_add(n as u64, Ordering::Relaxed) + n as u64;
        let pct = upload_percent(loaded, self.total);
        if self.last.swap(pct, Ordering::Relaxed) != pct {
            (self.callback)(pct);
        }
    }
}

struct ProgressReader {
    inner: Cursor<Vec<u8>>,
    tracker: Option<Arc<ProgressTracker>>,
}

impl Read for ProgressReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            if let Some(tracker) = &self.tracker {
                tracker.advance(n);
            }
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn progress_reader_reports_each_percentage_once() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let tracker = Arc::new(ProgressTracker {
            callback: Arc::new(move |pct| sink.lock().unwrap().push(pct)),
            total: 4,
            loaded: AtomicU64::new(0),
            last: AtomicU8::new(u8::MAX),
        });
        let mut reader = ProgressReader {
            inner: Cursor::new(vec![1, 2, 3, 4]),
            tracker: Some(tracker),
        };

        let mut buf = [0u8; 1];
        while reader.read(&mut buf).unwrap() > 0 {}

        assert_eq!(*seen.lock().unwrap(), vec![25, 50, 75, 100]);
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let transport = HttpTransport::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8000");
    }
}
