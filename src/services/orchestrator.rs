use chrono::Utc;
use futures::FutureExt;
use reqwest::StatusCode;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::models::{ProbeOutcome, TestRun};
use crate::probes::{standard_suite, Probe, ProbeContext, ProbeSettings};
use crate::registry::{Environment, ServiceName, ServiceRegistry};
use crate::services::prober::{ProbeRequest, Prober};

const AVAILABILITY_PATH: &str = "/health";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Up,
    Degraded(u16),
    Unreachable(String),
}

#[derive(Debug, Clone)]
pub struct ServiceAvailability {
    pub service: ServiceName,
    pub base_url: String,
    pub availability: Availability,
}

pub struct Orchestrator {
    probes: Vec<Box<dyn Probe>>,
}

impl Orchestrator {
    pub fn new(probes: Vec<Box<dyn Probe>>) -> Self {
        Self { probes }
    }

    pub fn standard(settings: &ProbeSettings) -> Self {
        Self::new(standard_suite(settings))
    }

    pub fn probe_names(&self) -> Vec<&'static str> {
        self.probes.iter().map(|p| p.name()).collect()
    }

    /// Runs every probe exactly once, in order. The returned run always has
    /// one outcome per probe.
    pub async fn run(
        &self,
        registry: &ServiceRegistry,
        prober: &Prober,
        environment: Environment,
    ) -> TestRun {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let ctx = ProbeContext { registry, prober };

        let span = info_span!("test_run", %run_id, %environment);
        let outcomes = async {
            info!("Starting {} probes", self.probes.len());
            let mut outcomes = Vec::with_capacity(self.probes.len());
            for probe in &self.probes {
                outcomes.push(run_probe(probe.as_ref(), &ctx).await);
            }
            outcomes
        }
        .instrument(span)
        .await;

        TestRun::new(run_id, environment, started_at, outcomes)
    }
}

async fn run_probe(probe: &dyn Probe, ctx: &ProbeContext<'_>) -> ProbeOutcome {
    let name = probe.name();
    info!("Running: {name}");
    let started = Instant::now();

    let outcome = match AssertUnwindSafe(probe.execute(ctx)).catch_unwind().await {
        Ok(Ok(outcome)) => ProbeOutcome {
            probe_name: name.to_string(),
            ..outcome
        },
        Ok(Err(e)) => ProbeOutcome::fail(name, e.to_string()),
        Err(panic) => {
            error!("Probe {name} panicked");
            let message = panic_message(panic.as_ref());
            ProbeOutcome::fail(name, format!("probe panicked: {message}"))
        }
    };
    let outcome = outcome.with_duration(started.elapsed());

    let duration_ms = outcome.duration.as_millis() as u64;
    if outcome.passed {
        info!(duration_ms, "{name}: PASS - {}", outcome.detail);
    } else {
        warn!(duration_ms, "{name}: FAIL - {}", outcome.detail);
    }

    outcome
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Hits `/health` on every service once. Informational only.
pub async fn precheck(
    registry: &ServiceRegistry,
    prober: &Prober,
    timeout: Duration,
) -> Vec<ServiceAvailability> {
    let mut results = Vec::new();

    for endpoint in registry.endpoints() {
        let request =
            ProbeRequest::get(registry.url(endpoint.name, AVAILABILITY_PATH), timeout);
        let availability = match prober.probe(&request).await {
            Ok(response) if response.status == StatusCode::OK => Availability::Up,
            Ok(response) => Availability::Degraded(response.status_code()),
            Err(e) => Availability::Unreachable(e.to_string()),
        };
        results.push(ServiceAvailability {
            service: endpoint.name,
            base_url: endpoint.base_url.clone(),
            availability,
        });
    }

    results
}
