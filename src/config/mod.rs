use config::Config;
use serde::Deserialize;
use std::time::Duration;
use validator::Validate;

use crate::errors::ConfigurationError;
use crate::registry::Environment;

const DEFAULT_AUTH_TOKEN: &str = "test-token";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_STREAM_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PRECHECK_TIMEOUT_SECS: u64 = 5;
const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 105;
const DEFAULT_RATE_LIMIT_DELAY_MS: u64 = 100;
const DEFAULT_RATE_LIMIT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct AuthConfig {
    #[validate(length(min = 1))]
    pub token: String,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct LogConfig {
    #[validate(length(min = 1))]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct ProbeConfig {
    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,
    #[validate(range(min = 1))]
    pub stream_timeout_secs: u64,
    #[validate(range(min = 1))]
    pub precheck_timeout_secs: u64,
}

impl ProbeConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn stream_timeout(&self) -> Duration {
        Duration::from_secs(self.stream_timeout_secs)
    }

    pub fn precheck_timeout(&self) -> Duration {
        Duration::from_secs(self.precheck_timeout_secs)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            stream_timeout_secs: DEFAULT_STREAM_TIMEOUT_SECS,
            precheck_timeout_secs: DEFAULT_PRECHECK_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct RateLimitConfig {
    #[validate(range(min = 1))]
    pub max_requests: u32,
    pub delay_ms: u64,
    #[validate(range(min = 1))]
    pub timeout_secs: u64,
}

impl RateLimitConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            delay_ms: DEFAULT_RATE_LIMIT_DELAY_MS,
            timeout_secs: DEFAULT_RATE_LIMIT_TIMEOUT_SECS,
        }
    }
}

/// Per-service base URL overrides. Unset entries fall back to the
/// environment preset.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServiceOverrides {
    pub edge_gateway: Option<String>,
    pub core_api: Option<String>,
    pub model_router: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct AppConfig {
    #[validate(length(min = 1))]
    pub environment: String,
    #[validate(nested)]
    pub auth: AuthConfig,
    #[validate(nested)]
    pub log: LogConfig,
    #[validate(nested)]
    pub probes: ProbeConfig,
    #[validate(nested)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub services: ServiceOverrides,
}

/// Values supplied on the command line. They win over every other source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub environment: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigurationError> {
        Self::with_overrides(ConfigOverrides::default())
    }

    pub fn with_overrides(overrides: ConfigOverrides) -> Result<Self, ConfigurationError> {
        dotenvy::dotenv().ok();

        let s = Config::builder()
            .set_default("environment", "local")?
            .set_default("auth.token", DEFAULT_AUTH_TOKEN)?
            .set_default("log.level", "info")?
            .set_default("log.format", "pretty")?
            .set_default("probes.request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)?
            .set_default("probes.stream_timeout_secs", DEFAULT_STREAM_TIMEOUT_SECS)?
            .set_default(
                "probes.precheck_timeout_secs",
                DEFAULT_PRECHECK_TIMEOUT_SECS,
            )?
            .set_default(
                "rate_limit.max_requests",
                u64::from(DEFAULT_RATE_LIMIT_MAX_REQUESTS),
            )?
            .set_default("rate_limit.delay_ms", DEFAULT_RATE_LIMIT_DELAY_MS)?
            .set_default("rate_limit.timeout_secs", DEFAULT_RATE_LIMIT_TIMEOUT_SECS)?
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("environment", overrides.environment)?
            .set_override_option("log.level", overrides.log_level)?
            .set_override_option("log.format", overrides.log_format)?
            .build()?;

        let config: AppConfig = s.try_deserialize()?;

        if let Err(e) = config.validate() {
            return Err(ConfigurationError::Invalid(e.to_string()));
        }

        Ok(config)
    }

    pub fn environment(&self) -> Result<Environment, ConfigurationError> {
        self.environment.parse()
    }
}
