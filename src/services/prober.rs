use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::errors::ProbeError;

const BODY_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMode {
    /// Read the whole body as text.
    Buffered,
    /// Return as soon as the status line and headers arrive.
    HeadersOnly,
}

/// One HTTP call. A timeout is required to build one, so no probe can wait
/// forever.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub method: Method,
    pub url: String,
    pub timeout: Duration,
    pub body: Option<serde_json::Value>,
    pub bearer_token: Option<String>,
    pub body_mode: BodyMode,
}

impl ProbeRequest {
    pub fn new(method: Method, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method,
            url: url.into(),
            timeout,
            body: None,
            bearer_token: None,
            body_mode: BodyMode::Buffered,
        }
    }

    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self::new(Method::GET, url, timeout)
    }

    pub fn post(url: impl Into<String>, timeout: Duration) -> Self {
        Self::new(Method::POST, url, timeout)
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ProbeError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn headers_only(mut self) -> Self {
        self.body_mode = BodyMode::HeadersOnly;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ProbeResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl ProbeResponse {
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ProbeError> {
        let body = self
            .body
            .as_deref()
            .ok_or_else(|| ProbeError::unexpected("response body was not read"))?;
        Ok(serde_json::from_str(body)?)
    }

    /// First few hundred characters of the body, for failure details.
    pub fn body_excerpt(&self) -> String {
        self.body
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(BODY_EXCERPT_CHARS)
            .collect()
    }
}

pub struct Prober {
    client: reqwest::Client,
}

impl Prober {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ai-system-check/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    pub async fn probe(&self, request: &ProbeRequest) -> Result<ProbeResponse, ProbeError> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .timeout(request.timeout);

        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();

        let body = match request.body_mode {
            BodyMode::Buffered => Some(response.text().await?),
            BodyMode::HeadersOnly => None,
        };

        debug!("{} {} -> {}", request.method, request.url, status);

        Ok(ProbeResponse {
            status,
            headers,
            body,
        })
    }
}
