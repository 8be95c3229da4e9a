// Full suite runs: verdict and exit code mapping

use super::test_utils::{fast_settings, unreachable_registry, PlatformBuilder, CHAT_BUDGET};
use ai_system_check::registry::Environment;
use ai_system_check::services::orchestrator::Orchestrator;
use ai_system_check::services::prober::Prober;
use ai_system_check::services::reporter::{self, Banner};

const SUITE: [&str; 6] = [
    "Health Endpoints",
    "Chat Endpoint",
    "RAG Endpoint",
    "Rate Limiting",
    "Streaming",
    "Database Connection",
];

#[tokio::test]
async fn healthy_platform_passes_every_probe() {
    // Given a platform where every contract holds
    let platform = PlatformBuilder::healthy().start().await;
    let orchestrator = Orchestrator::standard(&fast_settings());
    let prober = Prober::new().unwrap();

    // When the full suite runs
    let run = orchestrator
        .run(&platform.registry(), &prober, Environment::Local)
        .await;

    // Then all six probes pass, in declared order
    let names: Vec<_> = run.outcomes().iter().map(|o| o.probe_name.as_str()).collect();
    assert_eq!(names, SUITE);
    for outcome in run.outcomes() {
        assert!(outcome.passed, "{}: {}", outcome.probe_name, outcome.detail);
    }
    assert!(run.verdict());
    assert_eq!(reporter::exit_code(run.verdict()), 0);

    // The chat probe spent one request of the budget before rate limiting ran
    let rate_limit = &run.outcomes()[3];
    assert_eq!(
        rate_limit.detail,
        format!("rate limit hit at request {CHAT_BUDGET}")
    );

    let summary = reporter::render_summary(&run);
    assert!(summary.contains("Overall: 6/6 tests passed"));
    assert!(summary.contains(Banner::AllPassed.message()));
}

#[tokio::test]
async fn degraded_database_fails_the_run() {
    let platform = PlatformBuilder::healthy()
        .database_status("degraded")
        .start()
        .await;
    let prober = Prober::new().unwrap();

    let run = Orchestrator::standard(&fast_settings())
        .run(&platform.registry(), &prober, Environment::Local)
        .await;

    assert_eq!(run.total(), 6);
    assert_eq!(run.passed(), 5);
    assert!(!run.verdict());
    assert_eq!(reporter::exit_code(run.verdict()), 1);
    assert!(!run.outcomes()[5].passed);

    let summary = reporter::render_summary(&run);
    assert!(summary.contains("Database Connection: FAIL"));
    assert!(summary.contains(Banner::MajorityPassed.message()));
}

#[tokio::test]
async fn non_streaming_gateway_fails_only_the_streaming_probe() {
    let platform = PlatformBuilder::healthy()
        .stream_content_type("application/json")
        .start()
        .await;
    let prober = Prober::new().unwrap();

    let run = Orchestrator::standard(&fast_settings())
        .run(&platform.registry(), &prober, Environment::Local)
        .await;

    let failed: Vec<_> = run
        .outcomes()
        .iter()
        .filter(|o| !o.passed)
        .map(|o| o.probe_name.as_str())
        .collect();
    assert_eq!(failed, ["Streaming"]);
    assert_eq!(reporter::exit_code(run.verdict()), 1);
}

#[tokio::test]
async fn broken_chat_endpoint_fails_chat_and_rate_limit() {
    let platform = PlatformBuilder::healthy().chat_status(500).start().await;
    let prober = Prober::new().unwrap();

    let run = Orchestrator::standard(&fast_settings())
        .run(&platform.registry(), &prober, Environment::Local)
        .await;

    let outcomes = run.outcomes();
    assert!(!outcomes[1].passed);
    assert!(!outcomes[3].passed);
    assert_eq!(outcomes[3].detail, "unexpected status 500 at request 1");
    assert_eq!(run.passed(), 4);
}

#[tokio::test]
async fn unreachable_platform_still_yields_six_failed_outcomes() {
    // Given no service listening at all
    let registry = unreachable_registry();
    let prober = Prober::new().unwrap();

    // When the suite runs
    let run = Orchestrator::standard(&fast_settings())
        .run(&registry, &prober, Environment::Production)
        .await;

    // Then every probe is reported as failed and none is missing
    assert_eq!(run.total(), SUITE.len());
    assert_eq!(run.passed(), 0);
    assert!(run.outcomes()[1].detail.starts_with("connection error"));
    assert_eq!(Banner::from_counts(run.passed(), run.total()), Banner::MajorityFailed);
    assert_eq!(reporter::exit_code(run.verdict()), 1);
}
