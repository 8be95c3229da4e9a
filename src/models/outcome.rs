use chrono::{DateTime, Utc};
use std::time::Duration;
use uuid::Uuid;

use crate::registry::Environment;

#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub probe_name: String,
    pub passed: bool,
    pub detail: String,
    pub duration: Duration,
}

impl ProbeOutcome {
    pub fn pass(probe_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            probe_name: probe_name.into(),
            passed: true,
            detail: detail.into(),
            duration: Duration::ZERO,
        }
    }

    pub fn fail(probe_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            probe_name: probe_name.into(),
            passed: false,
            detail: detail.into(),
            duration: Duration::ZERO,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Outcomes of one verification pass, in execution order.
#[derive(Debug, Clone)]
pub struct TestRun {
    pub run_id: Uuid,
    pub environment: Environment,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    outcomes: Vec<ProbeOutcome>,
}

impl TestRun {
    pub fn new(
        run_id: Uuid,
        environment: Environment,
        started_at: DateTime<Utc>,
        outcomes: Vec<ProbeOutcome>,
    ) -> Self {
        Self {
            run_id,
            environment,
            started_at,
            finished_at: Utc::now(),
            outcomes,
        }
    }

    pub fn outcomes(&self) -> &[ProbeOutcome] {
        &self.outcomes
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn verdict(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }
}
