//! HTTP transport seam between the request pipeline and the gateway.
//!
//! The pipeline builds [`HttpRequest`] values and hands them to a
//! [`Transport`]; the production implementation is [`ReqwestTransport`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::ApiError;

/// Default HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Form(Vec<(String, String)>),
}

/// A gateway request, relative to the transport's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
    pub bearer: Option<String>,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: RequestBody::Empty,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn form(mut self, fields: &[(&str, &str)]) -> Self {
        self.body = RequestBody::Form(
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        self
    }

    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    /// Header value the request will carry, if any.
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_ref().map(|t| format!("Bearer {}", t))
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Convert a non-2xx response into the matching [`ApiError`].
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::from_status(self.status, &self.body))
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        // DELETE and some PUT endpoints answer with an empty body
        let body = if self.body.trim().is_empty() {
            "null"
        } else {
            self.body.as_str()
        };
        serde_json::from_str(body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse JSON response: {}", e)))
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Dispatch a request and return the raw response, whatever its status.
    /// Only transport-level failures are errors here.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Transport backed by a pooled `reqwest::Client`.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = self.url(&request.path);
        debug!(method = %request.method, url = %url, "Dispatching gateway request");

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(header::ACCEPT, "application/json");

        if let Some(ref token) = request.bearer {
            builder = builder.bearer_auth(token);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(ref value) => builder.json(value),
            RequestBody::Form(ref fields) => builder.form(fields),
        };

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(status = %status, url = %url, "Gateway responded");
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let transport =
            ReqwestTransport::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(transport.url("/auth/me"), "http://localhost:8000/auth/me");
        assert_eq!(
            transport.url("candidatos/3"),
            "http://localhost:8000/candidatos/3"
        );
    }

    #[test]
    fn test_authorization_header_value() {
        let request = HttpRequest::get("/auth/me").with_bearer(Some("AT1".into()));
        assert_eq!(request.authorization().as_deref(), Some("Bearer AT1"));
        assert_eq!(HttpRequest::get("/auth/me").authorization(), None);
    }

    #[test]
    fn test_form_body() {
        let request = HttpRequest::post("/auth/login").form(&[("username", "a@b.com")]);
        assert_eq!(
            request.body,
            RequestBody::Form(vec![("username".into(), "a@b.com".into())])
        );
    }

    #[test]
    fn test_empty_body_decodes_as_unit() {
        let response = HttpResponse::new(StatusCode::NO_CONTENT, "");
        let value: Option<serde_json::Value> = response.json().unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_error_for_status() {
        let response = HttpResponse::new(StatusCode::NOT_FOUND, r#"{"detail":"Vaga não encontrada"}"#);
        let err = response.error_for_status().unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref d) if d == "Vaga não encontrada"));
    }
}
