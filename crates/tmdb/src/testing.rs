//! Test doubles
//!
//! [`ScriptedTransport`] answers requests from a table keyed by URL path and
//! records every URL it sees, so tests can assert how many upstream calls an
//! operation made and what they carried.

use crate::transport::{Transport, TransportResponse};
use crate::{Result, TmdbError};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use url::Url;

#[derive(Debug, Clone)]
enum Scripted {
    Respond(TransportResponse),
    Fail(String),
}

#[derive(Debug, Default)]
struct State {
    routes: HashMap<String, Scripted>,
    requests: Vec<Url>,
}

/// In-memory [`Transport`] with canned answers per path
///
/// Paths without an answer get a TMDb-style 404. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    state: Arc<Mutex<State>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Answer `path` with `status` and a JSON body
    pub fn respond_json(self, path: &str, status: u16, body: serde_json::Value) -> Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = serde_json::to_vec(&body).unwrap_or_default();
        self.respond(path, TransportResponse::new(status, body))
    }

    /// Answer `path` with a prepared response
    pub fn respond(self, path: &str, response: TransportResponse) -> Self {
        self.state()
            .routes
            .insert(path.to_string(), Scripted::Respond(response));
        self
    }

    /// Fail requests to `path` before any response is produced
    pub fn fail(self, path: &str, message: &str) -> Self {
        self.state()
            .routes
            .insert(path.to_string(), Scripted::Fail(message.to_string()));
        self
    }

    /// Every URL requested so far, in order
    pub fn requests(&self) -> Vec<Url> {
        self.state().requests.clone()
    }

    pub fn request_count(&self, path: &str) -> usize {
        self.state()
            .requests
            .iter()
            .filter(|url| url.path() == path)
            .count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse> {
        let mut state = self.state();
        state.requests.push(url.clone());

        match state.routes.get(url.path()) {
            Some(Scripted::Respond(response)) => Ok(response.clone()),
            Some(Scripted::Fail(message)) => Err(TmdbError::transport(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                message.clone(),
            ))),
            None => Ok(TransportResponse::new(
                StatusCode::NOT_FOUND,
                br#"{"status_code":34,"status_message":"The resource you requested could not be found."}"#
                    .to_vec(),
            )),
        }
    }
}
