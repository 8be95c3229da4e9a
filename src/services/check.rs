use anyhow::Result;
use tracing::info;

use crate::config::AppConfig;
use crate::models::TestRun;
use crate::probes::ProbeSettings;
use crate::registry::ServiceRegistry;
use crate::services::orchestrator::{precheck, Orchestrator};
use crate::services::prober::Prober;
use crate::services::reporter;

/// One full check against the configured environment. Prints the report to
/// stdout and hands the finished run back to the caller.
pub async fn run_check(config: &AppConfig, skip_precheck: bool) -> Result<TestRun> {
    let environment = config.environment()?;
    let registry = ServiceRegistry::new(environment, &config.services)?;
    let prober = Prober::new()?;

    println!("Testing {environment} environment");

    if skip_precheck {
        info!("Availability check skipped");
    } else {
        let availability = precheck(&registry, &prober, config.probes.precheck_timeout()).await;
        println!("{}", reporter::render_precheck(&availability));
    }

    let orchestrator = Orchestrator::standard(&ProbeSettings::from_config(config));
    let run = orchestrator.run(&registry, &prober, environment).await;

    println!("{}", reporter::render_summary(&run));
    info!(
        "Run {} finished in {}ms",
        run.run_id,
        (run.finished_at - run.started_at).num_milliseconds()
    );

    Ok(run)
}
