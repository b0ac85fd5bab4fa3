use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rejected by gateway: {0}")]
    Validation(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No refresh token stored")]
    MissingRefreshToken,

    #[error("Session expired - token renewal failed: {0}")]
    RenewalFailed(Box<ApiError>),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// FastAPI-style error envelope returned by the gateway.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    detail: serde_json::Value,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let cut: String = body.chars().take(MAX_ERROR_BODY_LENGTH).collect();
            format!("{}... (truncated, {} total bytes)", cut, body.len())
        }
    }

    /// Pull the human-readable `detail` out of an error body, falling back
    /// to the (truncated) raw body.
    fn detail_from_body(body: &str) -> String {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(ErrorEnvelope {
                detail: serde_json::Value::String(s),
            }) => s,
            // Validation errors carry a list of objects; keep them as JSON
            Ok(ErrorEnvelope { detail }) => Self::truncate_body(&detail.to_string()),
            Err(_) => Self::truncate_body(body),
        }
    }

    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let detail = Self::detail_from_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized(detail),
            403 => ApiError::AccessDenied(detail),
            404 => ApiError::NotFound(detail),
            409 => ApiError::Conflict(detail),
            400 | 422 => ApiError::Validation(detail),
            500..=599 => ApiError::ServerError(detail),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, detail)),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// True when the session could not be kept alive and was torn down.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::RenewalFailed(_) | ApiError::MissingRefreshToken)
    }

    /// The message a front end should show the user, as the gateway sent it.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Unauthorized(d)
            | ApiError::AccessDenied(d)
            | ApiError::NotFound(d)
            | ApiError::Conflict(d)
            | ApiError::Validation(d)
            | ApiError::ServerError(d) => d.clone(),
            ApiError::RenewalFailed(inner) => inner.detail(),
            other => other.to_string(),
        }
    }
}
