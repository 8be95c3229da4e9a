use reqwest::Url;
use std::fmt;
use std::str::FromStr;

use crate::config::ServiceOverrides;
use crate::errors::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    fn preset(self, service: ServiceName) -> &'static str {
        match (self, service) {
            (Environment::Local, ServiceName::EdgeGateway) => "http://localhost:8787",
            (Environment::Local, ServiceName::CoreApi) => "http://localhost:3000",
            (Environment::Local, ServiceName::ModelRouter) => "http://localhost:3001",
            (Environment::Production, ServiceName::EdgeGateway) => {
                "https://your-edge-gateway.workers.dev"
            }
            (Environment::Production, ServiceName::CoreApi) => "https://your-core-api.vercel.app",
            (Environment::Production, ServiceName::ModelRouter) => {
                "https://your-model-router.railway.app"
            }
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let selector = s.trim();
        match selector.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            _ => Err(ConfigurationError::UnknownEnvironment(selector.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Local => f.write_str("local"),
            Environment::Production => f.write_str("production"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceName {
    EdgeGateway,
    CoreApi,
    ModelRouter,
}

impl ServiceName {
    pub const ALL: [ServiceName; 3] = [
        ServiceName::EdgeGateway,
        ServiceName::CoreApi,
        ServiceName::ModelRouter,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceName::EdgeGateway => "edge_gateway",
            ServiceName::CoreApi => "core_api",
            ServiceName::ModelRouter => "model_router",
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    pub name: ServiceName,
    pub base_url: String,
}

impl ServiceEndpoint {
    fn parse(name: ServiceName, raw: &str) -> Result<Self, ConfigurationError> {
        let invalid = |reason: String| ConfigurationError::InvalidUrl {
            service: name.to_string(),
            url: raw.to_string(),
            reason,
        };

        let parsed = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }

        Ok(Self {
            name,
            base_url: raw.trim().trim_end_matches('/').to_string(),
        })
    }
}

/// Base URLs of the three services under test, fixed for the whole run.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    endpoints: [ServiceEndpoint; 3],
}

impl ServiceRegistry {
    pub fn new(
        environment: Environment,
        overrides: &ServiceOverrides,
    ) -> Result<Self, ConfigurationError> {
        let pick = |service: ServiceName, custom: &Option<String>| {
            custom
                .clone()
                .unwrap_or_else(|| environment.preset(service).to_string())
        };

        Self::from_urls(
            &pick(ServiceName::EdgeGateway, &overrides.edge_gateway),
            &pick(ServiceName::CoreApi, &overrides.core_api),
            &pick(ServiceName::ModelRouter, &overrides.model_router),
        )
    }

    pub fn from_urls(
        edge_gateway: &str,
        core_api: &str,
        model_router: &str,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            endpoints: [
                ServiceEndpoint::parse(ServiceName::EdgeGateway, edge_gateway)?,
                ServiceEndpoint::parse(ServiceName::CoreApi, core_api)?,
                ServiceEndpoint::parse(ServiceName::ModelRouter, model_router)?,
            ],
        })
    }

    pub fn endpoint(&self, name: ServiceName) -> &ServiceEndpoint {
        match name {
            ServiceName::EdgeGateway => &self.endpoints[0],
            ServiceName::CoreApi => &self.endpoints[1],
            ServiceName::ModelRouter => &self.endpoints[2],
        }
    }

    pub fn url(&self, name: ServiceName, path: &str) -> String {
        format!("{}{}", self.endpoint(name).base_url, path)
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &ServiceEndpoint> {
        self.endpoints.iter()
    }
}
