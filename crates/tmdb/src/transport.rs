//! HTTP transport seam
//!
//! The catalog only needs "GET this URL, give me status and body". Keeping
//! that behind a trait lets tests script upstream answers without a socket.

use crate::Result;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// A completed upstream response
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    /// Reason phrase sent by the upstream, when the transport exposes one
    pub reason: Option<String>,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason: None,
            body: body.into(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Human-readable status phrase, e.g. `Not Found`
    pub fn status_text(&self) -> String {
        self.reason
            .clone()
            .or_else(|| self.status.canonical_reason().map(str::to_string))
            .unwrap_or_default()
    }
}

/// Performs one GET request per call
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<TransportResponse>;
}

/// `reqwest`-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cinefeed/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Wrap an already configured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse> {
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        Ok(TransportResponse::new(status, body.to_vec()))
    }
}
