//! Application error type shared by the library and the `sr` binary.
//!
//! Exit codes:
//! - `2`: local problems (configuration, file IO, input validation)
//! - `4`: remote problems (transport failures, non-2xx responses, bad payloads)

/// Exit code for local failures.
pub const EXIT_LOCAL: u8 = 2;
/// Exit code for failures talking to the API.
pub const EXIT_REMOTE: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
    status: Option<u16>,
    detail: Option<String>,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
            status: None,
            detail: None,
        }
    }

    /// A non-2xx API response.
    ///
    /// `detail` is the server-provided explanation, when the body carried one.
    pub fn api(status: u16, detail: Option<String>) -> Self {
        let message = match &detail {
            Some(detail) => detail.clone(),
            None => format!("Request failed with status {status}."),
        };
        Self {
            exit_code: EXIT_REMOTE,
            message,
            status: Some(status),
            detail,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status of the failed response, if the failure came from the API.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Server `detail` text, if the failed response carried one.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .field("status", &self.status)
            .field("detail", &self.detail)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Pull the `detail` explanation out of an error body.
///
/// The API answers failures with `{"detail": "..."}`; request validation
/// failures carry a list instead (`{"detail": [{"msg": "...", ...}]}`), whose
/// messages are joined with `"; "`.
pub fn error_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_from_plain_string() {
        let body = br#"{"detail": "Email atau password salah"}"#;
        assert_eq!(error_detail(body).as_deref(), Some("Email atau password salah"));
    }

    #[test]
    fn detail_from_validation_list() {
        let body = br#"{"detail": [
            {"loc": ["body", "email"], "msg": "field required", "type": "missing"},
            {"loc": ["body", "job_id"], "msg": "value is not a valid integer", "type": "int"}
        ]}"#;
        assert_eq!(
            error_detail(body).as_deref(),
            Some("field required; value is not a valid integer")
        );
    }

    #[test]
    fn detail_missing_or_not_json() {
        assert_eq!(error_detail(b"<html>502 Bad Gateway</html>"), None);
        assert_eq!(error_detail(br#"{"error": "x"}"#), None);
        assert_eq!(error_detail(br#"{"detail": ""}"#), None);
    }

    #[test]
    fn api_error_prefers_detail_as_message() {
        let err = AppError::api(404, Some("Lowongan tidak ditemukan".to_string()));
        assert_eq!(err.to_string(), "Lowongan tidak ditemukan");
        assert_eq!(err.exit_code(), EXIT_REMOTE);
        assert_eq!(err.status(), Some(404));

        let err = AppError::api(500, None);
        assert_eq!(err.to_string(), "Request failed with status 500.");
        assert_eq!(err.detail(), None);
    }
}
