//! Scripted gateway doubles shared by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::api::{ApiClient, ApiError, HttpRequest, HttpResponse, Navigator, Transport};
use crate::auth::{MemoryBackend, Session};

/// Nothing listens here, so connecting fails at once.
const UNREACHABLE_URL: &str = "http://127.0.0.1:1/";

enum Scripted {
    Response(HttpResponse),
    Unreachable,
}

/// Answers requests from per-path queues and records everything it sees.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<HashMap<String, VecDeque<Scripted>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a response for the next request to `path`.
    pub fn respond(&self, path: &str, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).expect("valid status");
        self.push(path, Scripted::Response(HttpResponse::new(status, body)));
    }

    /// Make the next request to `path` fail before reaching the gateway.
    pub fn unreachable(&self, path: &str) {
        self.push(path, Scripted::Unreachable);
    }

    fn push(&self, path: &str, scripted: Scripted) {
        self.responses
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(scripted);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let path = request.path.clone();
        self.requests.lock().unwrap().push(request);
        let next = self
            .responses
            .lock()
            .unwrap()
            .get_mut(&path)
            .and_then(|q| q.pop_front());
        match next {
            Some(Scripted::Response(response)) => Ok(response),
            Some(Scripted::Unreachable) => {
                let err = reqwest::Client::new()
                    .get(UNREACHABLE_URL)
                    .send()
                    .await
                    .expect_err("nothing listens on the unreachable port");
                Err(ApiError::NetworkError(err))
            }
            None => Ok(HttpResponse::new(
                StatusCode::NOT_FOUND,
                r#"{"detail": "no scripted response"}"#,
            )),
        }
    }
}

/// Navigator that remembers where it was sent.
pub struct RecordingNavigator {
    path: Mutex<String>,
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Arc<Self> {
        Arc::new(Self {
            path: Mutex::new(path.to_string()),
            visits: Mutex::new(Vec::new()),
        })
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.path.lock().unwrap().clone()
    }

    fn navigate(&self, path: &str) {
        *self.path.lock().unwrap() = path.to_string();
        self.visits.lock().unwrap().push(path.to_string());
    }
}

pub const LOGIN_OK: &str =
    r#"{"access_token":"AT1","refresh_token":"RT1","user":{"id":1,"nome":"Ana","email":"a@b.com","papel":"candidato"}}"#;

pub const ME_OK: &str = r#"{"id":1,"nome":"Ana","email":"a@b.com","papel":"candidato"}"#;

/// A client over a scripted transport and an empty in-memory session,
/// navigating from `/dashboard`.
pub fn client() -> (ApiClient, Arc<ScriptedTransport>, Arc<RecordingNavigator>) {
    let transport = ScriptedTransport::new();
    let navigator = RecordingNavigator::at("/dashboard");
    let client = ApiClient::new(transport.clone(), Session::new(MemoryBackend::new()))
        .with_navigator(navigator.clone());
    (client, transport, navigator)
}
