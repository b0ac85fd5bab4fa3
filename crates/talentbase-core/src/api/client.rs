//! Authenticated request pipeline for the TalentBase gateway.
//!
//! Every call goes through [`ApiClient::send`], which attaches the stored
//! access token and, when the gateway answers 401, exchanges the refresh
//! token for a new access token and re-dispatches the request once.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::auth::Session;
use crate::config::Config;
use crate::models::RefreshResponse;

use super::navigator::{Navigator, NoopNavigator, LOGIN_PAGE};
use super::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

pub const LOGIN_PATH: &str = "/auth/login";
pub const REFRESH_PATH: &str = "/auth/refresh";
pub const ME_PATH: &str = "/auth/me";

/// Which dispatch of a request this is. A request gets at most one
/// [`Attempt::Retry`], and only after a successful token renewal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    First,
    Retry,
}

/// What the pipeline does with a failed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    Propagate,
    Renew,
}

fn is_login_request(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path);
    path.trim_end_matches('/').ends_with("/login")
}

/// Decide how to handle `error` from the request to `path`.
pub fn recovery_for(path: &str, error: &ApiError, attempt: Attempt) -> Recovery {
    // A rejected password is not a stale token
    if is_login_request(path) {
        return Recovery::Propagate;
    }
    match (error, attempt) {
        (ApiError::Unauthorized(_), Attempt::First) => Recovery::Renew,
        _ => Recovery::Propagate,
    }
}

/// Gateway client. Clone is cheap; clones share the transport and session.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Session,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: Session) -> Self {
        Self {
            transport,
            session,
            navigator: Arc::new(NoopNavigator),
        }
    }

    /// Build a reqwest-backed client from configuration, with the configured
    /// token storage.
    pub fn connect(config: &Config) -> anyhow::Result<Self> {
        let transport = ReqwestTransport::new(
            &config.api_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        let session = Session::from_boxed(config.token_backend()?);
        Ok(Self::new(Arc::new(transport), session))
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Dispatch a request through the pipeline.
    ///
    /// Concurrent requests that hit an expired token each renew on their
    /// own; there is no shared in-flight refresh.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut attempt = Attempt::First;
        let mut token = self.session.access_token();

        loop {
            let error = match self.send_once(&request, token.clone()).await {
                Ok(response) => return Ok(response),
                Err(e) => e,
            };

            match recovery_for(&request.path, &error, attempt) {
                Recovery::Propagate => return Err(error),
                Recovery::Renew => {
                    debug!(path = %request.path, "Access token rejected, renewing");
                    match self.renew_access_token().await {
                        Ok(renewed) => {
                            token = Some(renewed);
                            attempt = Attempt::Retry;
                        }
                        Err(e) => {
                            warn!(error = %e, "Token renewal failed, ending session");
                            self.end_session();
                            return Err(ApiError::RenewalFailed(Box::new(e)));
                        }
                    }
                }
            }
        }
    }

    /// Dispatch once with the given bearer token, no renewal.
    pub(crate) async fn send_once(
        &self,
        request: &HttpRequest,
        token: Option<String>,
    ) -> Result<HttpResponse, ApiError> {
        let outgoing = request.clone().with_bearer(token);
        self.transport.send(outgoing).await?.error_for_status()
    }

    /// Exchange the stored refresh token for a new access token and persist
    /// it. The refresh call itself carries no bearer and is never renewed.
    pub async fn renew_access_token(&self) -> Result<String, ApiError> {
        let refresh_token = self
            .session
            .refresh_token()
            .ok_or(ApiError::MissingRefreshToken)?;

        let request = HttpRequest::post(REFRESH_PATH)
            .json(serde_json::json!({ "refresh_token": refresh_token }));
        let response = self.transport.send(request).await?.error_for_status()?;
        let renewed: RefreshResponse = response.json()?;

        self.session.replace_access_token(&renewed.access_token);
        info!("Access token renewed");
        Ok(renewed.access_token)
    }

    fn end_session(&self) {
        self.session.clear();
        if self.navigator.current_path() != LOGIN_PAGE {
            self.navigator.navigate(LOGIN_PAGE);
        }
    }

    // ===== Typed helpers =====

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(HttpRequest::get(path)).await?.json()
    }

    pub(crate) async fn send_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to encode request: {}", e)))?;
        self.send(HttpRequest::new(method, path).json(body))
            .await?
            .json()
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(HttpRequest::new(Method::DELETE, path)).await?;
        Ok(())
    }
}
