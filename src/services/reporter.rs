use crate::models::{ProbeOutcome, TestRun};
use crate::services::orchestrator::{Availability, ServiceAvailability};

const RULE_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    AllPassed,
    MajorityPassed,
    MajorityFailed,
}

impl Banner {
    pub fn from_counts(passed: usize, total: usize) -> Self {
        if passed == total {
            Banner::AllPassed
        } else if passed * 2 > total {
            Banner::MajorityPassed
        } else {
            Banner::MajorityFailed
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Banner::AllPassed => "All tests passed! System is working correctly.",
            Banner::MajorityPassed => "Most tests passed, but there are some issues to fix.",
            Banner::MajorityFailed => "Many tests failed. System needs attention.",
        }
    }
}

pub fn render_outcome(outcome: &ProbeOutcome) -> String {
    let status = if outcome.passed { "PASS" } else { "FAIL" };
    if outcome.detail.is_empty() {
        format!("{}: {status}", outcome.probe_name)
    } else {
        format!("{}: {status} ({})", outcome.probe_name, outcome.detail)
    }
}

pub fn render_summary(run: &TestRun) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        format!("TEST SUMMARY ({} environment)", run.environment),
        rule,
    ];

    lines.extend(run.outcomes().iter().map(render_outcome));

    let (passed, total) = (run.passed(), run.total());
    lines.push(String::new());
    lines.push(format!("Overall: {passed}/{total} tests passed"));
    lines.push(Banner::from_counts(passed, total).message().to_string());

    lines.join("\n")
}

pub fn render_precheck(results: &[ServiceAvailability]) -> String {
    let mut lines = vec!["Checking service availability...".to_string()];
    lines.extend(results.iter().map(|r| match &r.availability {
        Availability::Up => format!("  {}: {} (up)", r.service, r.base_url),
        Availability::Degraded(status) => {
            format!("  {}: {} (status: {status})", r.service, r.base_url)
        }
        Availability::Unreachable(reason) => {
            format!("  {}: {} (unreachable: {reason})", r.service, r.base_url)
        }
    }));
    lines.join("\n")
}

pub fn exit_code(verdict: bool) -> u8 {
    if verdict {
        0
    } else {
        1
    }
}
