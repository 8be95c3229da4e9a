// Config-driven runs, the same path the binary takes after parsing flags

use super::test_utils::{load_config, PlatformBuilder};
use ai_system_check::errors::ConfigurationError;
use ai_system_check::services::{reporter, run_check};

#[tokio::test]
async fn configured_run_reaches_the_platform_and_passes() {
    // Given configuration pointing every service at a healthy platform
    let platform = PlatformBuilder::healthy().start().await;
    let config = platform.config("local");

    // When the check runs without the availability pass
    let run = run_check(&config, true).await.unwrap();

    // Then the verdict comes from the platform and maps to exit 0
    assert_eq!(run.total(), 6);
    assert!(run.verdict());
    assert_eq!(reporter::exit_code(run.verdict()), 0);
    // Only the health endpoint check touched /health
    assert_eq!(platform.health_hits().await, 2);
}

#[tokio::test]
async fn availability_pass_runs_unless_skipped() {
    let platform = PlatformBuilder::healthy().start().await;
    let config = platform.config("production");

    let run = run_check(&config, false).await.unwrap();

    assert!(run.verdict());
    // Three availability requests plus two from the health endpoint check
    assert_eq!(platform.health_hits().await, 5);
}

#[tokio::test]
async fn failing_platform_maps_to_exit_one() {
    let platform = PlatformBuilder::healthy()
        .database_status("degraded")
        .start()
        .await;
    let config = platform.config("local");

    let run = run_check(&config, true).await.unwrap();

    assert!(!run.verdict());
    assert_eq!(reporter::exit_code(run.verdict()), 1);
}

#[tokio::test]
async fn unknown_environment_stops_before_any_request() {
    let platform = PlatformBuilder::healthy().start().await;
    let mut config = load_config("staging");
    config.services = platform.config("local").services;

    let err = run_check(&config, false).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigurationError>(),
        Some(ConfigurationError::UnknownEnvironment(s)) if s == "staging"
    ));
    assert_eq!(platform.health_hits().await, 0);
}
