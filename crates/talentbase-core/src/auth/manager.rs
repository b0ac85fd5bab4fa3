//! Login, registration, logout and the startup session check.

use reqwest::Method;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::api::{ApiClient, ApiError, HttpRequest, LOGIN_PATH, ME_PATH};
use crate::models::{AuthResponse, NewCompany, Role, User};

use super::{Session, SessionState};

const REGISTER_CANDIDATE_PATH: &str = "/usuarios/candidato";
const REGISTER_MANAGER_PATH: &str = "/usuarios/gestor";

#[derive(Serialize)]
struct Registration<'a> {
    email: &'a str,
    senha: &'a str,
    nome: &'a str,
    papel: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    empresa: Option<&'a NewCompany>,
}

/// The only component that establishes or tears down a session on
/// purpose. The pipeline may also tear it down when renewal fails.
pub struct SessionManager {
    client: ApiClient,
}

impl SessionManager {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    pub fn state(&self) -> SessionState {
        self.session().state()
    }

    pub fn current_user(&self) -> Option<User> {
        self.session().current_user()
    }

    /// Decide the session state at startup from whatever tokens were
    /// persisted by a previous run.
    pub async fn init(&self) -> SessionState {
        let session = self.session();

        let Some(token) = session.access_token() else {
            debug!("No stored access token");
            session.set_state(SessionState::Unauthenticated);
            return session.state();
        };

        session.set_state(SessionState::Authenticating);

        match self.verify_identity(token).await {
            Ok(user) => {
                info!(user_id = user.id, "Restored session");
                session.set_state(SessionState::Authenticated(user));
            }
            Err(e) => {
                debug!(error = %e, "Stored access token rejected, trying renewal");
                match self.renew_and_verify().await {
                    Ok(user) => {
                        info!(user_id = user.id, "Restored session after renewal");
                        session.set_state(SessionState::Authenticated(user));
                    }
                    Err(e) => {
                        warn!(error = %e, "Could not restore session");
                        session.clear();
                    }
                }
            }
        }

        session.state()
    }

    async fn verify_identity(&self, token: String) -> Result<User, ApiError> {
        self.client
            .send_once(&HttpRequest::get(ME_PATH), Some(token))
            .await?
            .json()
    }

    async fn renew_and_verify(&self) -> Result<User, ApiError> {
        let token = self.client.renew_access_token().await?;
        self.verify_identity(token).await
    }

    /// Exchange email and password for a session. The gateway's error is
    /// returned as-is on failure and the prior state is kept.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let request =
            HttpRequest::post(LOGIN_PATH).form(&[("username", email), ("password", password)]);
        let user = self.authenticate(request).await.inspect_err(|e| {
            error!(error = %e, "Login failed");
        })?;
        info!(user_id = user.id, role = %user.role, "Login successful");
        Ok(user)
    }

    pub async fn register_candidate(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: Role,
    ) -> Result<User, ApiError> {
        let body = Registration {
            email,
            senha: password,
            nome: name,
            papel: role.gateway_name(),
            empresa: None,
        };
        self.register(REGISTER_CANDIDATE_PATH, &body).await
    }

    /// Register a hiring manager together with their company.
    pub async fn register_manager(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: Role,
        company: &NewCompany,
    ) -> Result<User, ApiError> {
        let body = Registration {
            email,
            senha: password,
            nome: name,
            papel: role.gateway_name(),
            empresa: Some(company),
        };
        self.register(REGISTER_MANAGER_PATH, &body).await
    }

    async fn register(&self, path: &str, body: &Registration<'_>) -> Result<User, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to encode registration: {}", e)))?;
        let request = HttpRequest::new(Method::POST, path).json(body);
        let user = self.authenticate(request).await.inspect_err(|e| {
            error!(error = %e, path, "Registration failed");
        })?;
        info!(user_id = user.id, role = %user.role, "Registration successful");
        Ok(user)
    }

    /// Send a request answering with tokens plus identity and adopt them.
    async fn authenticate(&self, request: HttpRequest) -> Result<User, ApiError> {
        let session = self.session();
        let previous = session.state();
        session.set_state(SessionState::Authenticating);

        let result = match self.client.send(request).await {
            Ok(response) => response.json::<AuthResponse>(),
            Err(e) => Err(e),
        };

        match result {
            Ok(auth) => {
                session.establish(&auth);
                Ok(auth.user)
            }
            Err(e) => {
                // A failed renewal has already torn the session down
                if !e.is_session_expired() {
                    session.set_state(previous);
                }
                Err(e)
            }
        }
    }

    /// Forget tokens and identity. Safe to call in any state.
    pub fn logout(&self) {
        self.session().clear();
        info!("Logged out");
    }
}
