use ai_system_check::config::{AppConfig, ConfigOverrides, LogFormat};
use ai_system_check::services::{reporter, run_check};
use clap::error::ErrorKind;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// AI system check - verifies the conversation platform over HTTP
#[derive(Parser, Debug)]
#[command(name = "ai-system-check")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    APP_ENVIRONMENT                  Environment preset: local | production (default: local)
    APP_AUTH__TOKEN                  Bearer token sent to the edge gateway (default: test-token)
    APP_SERVICES__EDGE_GATEWAY       Override edge gateway base URL
    APP_SERVICES__CORE_API           Override core API base URL
    APP_SERVICES__MODEL_ROUTER       Override model router base URL
    APP_RATE_LIMIT__MAX_REQUESTS     Rate-limit probe request bound (default: 105)
    APP_RATE_LIMIT__DELAY_MS         Pause between rate-limit requests (default: 100)
    APP_LOG__LEVEL                   Log level (default: info)
    APP_LOG__FORMAT                  pretty | json (default: pretty)
"#)]
struct Cli {
    /// Environment to test (local or production)
    #[arg(short, long)]
    environment: Option<String>,

    /// Skip the informational availability check
    #[arg(long)]
    skip_precheck: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (pretty or json)
    #[arg(long)]
    log_format: Option<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            environment: self.environment.clone(),
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
        }
    }
}

fn setup_logging(config: &AppConfig) {
    let filter = EnvFilter::try_new(format!(
        "{level},hyper=warn,reqwest=warn",
        level = config.log.level
    ))
    .unwrap_or_else(|_| EnvFilter::new("info"));

    // The report goes to stdout, so logs go to stderr.
    match config.log.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_current_span(true)
                        .with_span_list(true),
                )
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true),
                )
                .init();
        }
    }
}

/// Help and version requests succeed; every other usage error counts as a
/// failed check.
fn usage_exit_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => reporter::exit_code(false),
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = AppConfig::with_overrides(cli.overrides()).map_err(|e| {
        anyhow::anyhow!(
            "{e}. Please check your environment variables and command-line flags."
        )
    })?;

    setup_logging(&config);
    info!("Starting AI system check v{}", env!("CARGO_PKG_VERSION"));

    let run = run_check(&config, cli.skip_precheck).await?;
    Ok(run.verdict())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(usage_exit_code(&e));
        }
    };

    match run(cli).await {
        Ok(verdict) => ExitCode::from(reporter::exit_code(verdict)),
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::from(reporter::exit_code(false))
        }
    }
}
