use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

use super::{Probe, ProbeContext, ProbeResult, CORE_HEALTH_PATH};
use crate::models::payloads::CoreHealth;
use crate::models::ProbeOutcome;
use crate::registry::ServiceName;
use crate::services::prober::ProbeRequest;

const HEALTHY: &str = "healthy";

/// Storage health as reported by the core API. No direct database connection
/// is opened.
pub struct DatabaseHealthProbe {
    timeout: Duration,
}

impl DatabaseHealthProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl Probe for DatabaseHealthProbe {
    fn name(&self) -> &'static str {
        "Database Connection"
    }

    async fn execute(&self, ctx: &ProbeContext<'_>) -> ProbeResult {
        let request = ProbeRequest::get(
            ctx.registry.url(ServiceName::CoreApi, CORE_HEALTH_PATH),
            self.timeout,
        );
        let response = ctx.prober.probe(&request).await?;

        if response.status != StatusCode::OK {
            return Ok(ProbeOutcome::fail(
                self.name(),
                format!(
                    "cannot check database health: status {}",
                    response.status_code()
                ),
            ));
        }

        let health: CoreHealth = response.json()?;
        match health.database_status() {
            Some(HEALTHY) => Ok(ProbeOutcome::pass(self.name(), "database connection healthy")),
            Some(other) => Ok(ProbeOutcome::fail(
                self.name(),
                format!("database status is '{other}'"),
            )),
            None => Ok(ProbeOutcome::fail(
                self.name(),
                "checks.database.status missing from health response",
            )),
        }
    }
}
