use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{info, warn};

use super::{
    Probe, ProbeContext, ProbeResult, CORE_HEALTH_PATH, EDGE_HEALTH_PATH, ROUTER_HEALTH_PATH,
};
use crate::models::ProbeOutcome;
use crate::registry::ServiceName;
use crate::services::prober::ProbeRequest;

const HEALTH_TARGETS: [(ServiceName, &str); 3] = [
    (ServiceName::EdgeGateway, EDGE_HEALTH_PATH),
    (ServiceName::CoreApi, CORE_HEALTH_PATH),
    (ServiceName::ModelRouter, ROUTER_HEALTH_PATH),
];

/// Checks the health endpoint of every service. Every service is tried even
/// after one fails, so the detail lists all of them.
pub struct HealthProbe {
    timeout: Duration,
}

impl HealthProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl Probe for HealthProbe {
    fn name(&self) -> &'static str {
        "Health Endpoints"
    }

    async fn execute(&self, ctx: &ProbeContext<'_>) -> ProbeResult {
        let mut failures = Vec::new();

        for (service, path) in HEALTH_TARGETS {
            let request = ProbeRequest::get(ctx.registry.url(service, path), self.timeout);
            match ctx.prober.probe(&request).await {
                Ok(response) if response.status == StatusCode::OK => {
                    info!("{service} {path}: OK");
                }
                Ok(response) => {
                    warn!("{service} {path}: {}", response.status);
                    failures.push(format!(
                        "{service} {path}: status {} - {}",
                        response.status_code(),
                        response.body_excerpt()
                    ));
                }
                Err(e) => {
                    warn!("{service} {path}: {e}");
                    failures.push(format!("{service} {path}: {e}"));
                }
            }
        }

        if failures.is_empty() {
            Ok(ProbeOutcome::pass(
                self.name(),
                format!("{} services healthy", HEALTH_TARGETS.len()),
            ))
        } else {
            Ok(ProbeOutcome::fail(self.name(), failures.join("; ")))
        }
    }
}
