use async_trait::async_trait;
use std::time::Duration;

use crate::config::{AppConfig, ProbeConfig, RateLimitConfig};
use crate::errors::ProbeError;
use crate::models::payloads::ChatRequest;
use crate::models::ProbeOutcome;
use crate::registry::{ServiceName, ServiceRegistry};
use crate::services::prober::{ProbeRequest, Prober};

pub mod chat;
pub mod database;
pub mod health;
pub mod rag;
pub mod rate_limit;
pub mod streaming;

pub use chat::ChatProbe;
pub use database::DatabaseHealthProbe;
pub use health::HealthProbe;
pub use rag::RagProbe;
pub use rate_limit::RateLimitProbe;
pub use streaming::StreamingProbe;

pub const EDGE_HEALTH_PATH: &str = "/health";
pub const CORE_HEALTH_PATH: &str = "/api/health";
pub const ROUTER_HEALTH_PATH: &str = "/health";
pub const CHAT_PATH: &str = "/chat";
pub const RAG_PATH: &str = "/rag/query";

pub type ProbeResult = Result<ProbeOutcome, ProbeError>;

/// What a probe gets to work with: the read-only registry and the shared
/// HTTP prober.
pub struct ProbeContext<'a> {
    pub registry: &'a ServiceRegistry,
    pub prober: &'a Prober,
}

#[async_trait]
pub trait Probe: Send + Sync {
    /// Display name, also used as the key in the run summary
    fn name(&self) -> &'static str;

    /// Run the check once. Errors are turned into a failed outcome by the
    /// orchestrator.
    async fn execute(&self, ctx: &ProbeContext<'_>) -> ProbeResult;
}

#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub auth_token: String,
    pub request_timeout: Duration,
    pub stream_timeout: Duration,
    pub rate_limit: RateLimitConfig,
}

impl ProbeSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            auth_token: config.auth.token.clone(),
            request_timeout: config.probes.request_timeout(),
            stream_timeout: config.probes.stream_timeout(),
            rate_limit: config.rate_limit.clone(),
        }
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        let probes = ProbeConfig::default();
        Self {
            auth_token: "test-token".to_string(),
            request_timeout: probes.request_timeout(),
            stream_timeout: probes.stream_timeout(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

/// The six probes in the order they run. Rate limiting comes before
/// streaming and the database check, so those two may see a partly spent
/// rate budget.
pub fn standard_suite(settings: &ProbeSettings) -> Vec<Box<dyn Probe>> {
    vec![
        Box::new(HealthProbe::new(settings.request_timeout)),
        Box::new(ChatProbe::new(settings)),
        Box::new(RagProbe::new(settings)),
        Box::new(RateLimitProbe::new(settings)),
        Box::new(StreamingProbe::new(settings)),
        Box::new(DatabaseHealthProbe::new(settings.request_timeout)),
    ]
}

pub(crate) fn chat_request(
    registry: &ServiceRegistry,
    payload: &ChatRequest,
    token: &str,
    timeout: Duration,
) -> Result<ProbeRequest, ProbeError> {
    Ok(
        ProbeRequest::post(registry.url(ServiceName::EdgeGateway, CHAT_PATH), timeout)
            .json(payload)?
            .bearer(token),
    )
}
