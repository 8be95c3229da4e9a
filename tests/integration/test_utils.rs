// Simulated conversation platform for end-to-end runs
use ai_system_check::config::{AppConfig, ConfigOverrides, RateLimitConfig, ServiceOverrides};
use ai_system_check::probes::ProbeSettings;
use ai_system_check::registry::ServiceRegistry;
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Chat requests accepted before the simulated limiter answers 429
pub const CHAT_BUDGET: u64 = 50;

pub struct Platform {
    pub server: MockServer,
}

pub struct PlatformBuilder {
    database_status: &'static str,
    chat_status: u16,
    stream_content_type: &'static str,
}

impl PlatformBuilder {
    pub fn healthy() -> Self {
        Self {
            database_status: "healthy",
            chat_status: 200,
            stream_content_type: "text/event-stream; charset=utf-8",
        }
    }

    pub fn database_status(mut self, status: &'static str) -> Self {
        self.database_status = status;
        self
    }

    pub fn chat_status(mut self, status: u16) -> Self {
        self.chat_status = status;
        self
    }

    pub fn stream_content_type(mut self, content_type: &'static str) -> Self {
        self.stream_content_type = content_type;
        self
    }

    pub async fn start(self) -> Platform {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "checks": {"database": {"status": self.database_status}}
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/rag/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_partial_json(json!({"stream": true})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("data: [DONE]\n\n", self.stream_content_type),
            )
            .with_priority(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(self.chat_status))
            .up_to_n_times(CHAT_BUDGET)
            .with_priority(2)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(429))
            .with_priority(3)
            .mount(&server)
            .await;

        Platform { server }
    }
}

impl Platform {
    pub async fn health_hits(&self) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == "/health")
            .count()
    }

    /// Configuration as the binary would load it, pointed at this platform.
    pub fn config(&self, environment: &str) -> AppConfig {
        let uri = self.server.uri();
        let mut config = load_config(environment);
        config.services = ServiceOverrides {
            edge_gateway: Some(uri.clone()),
            core_api: Some(uri.clone()),
            model_router: Some(uri),
        };
        config
    }

    pub fn registry(&self) -> ServiceRegistry {
        let uri = self.server.uri();
        ServiceRegistry::from_urls(&uri, &uri, &uri).expect("mock URLs are valid")
    }
}

pub fn load_config(environment: &str) -> AppConfig {
    let cleared: Vec<(&str, Option<&str>)> = [
        "APP_ENVIRONMENT",
        "APP_AUTH__TOKEN",
        "APP_LOG__FORMAT",
        "APP_RATE_LIMIT__MAX_REQUESTS",
        "APP_RATE_LIMIT__DELAY_MS",
        "APP_SERVICES__EDGE_GATEWAY",
        "APP_SERVICES__CORE_API",
        "APP_SERVICES__MODEL_ROUTER",
    ]
    .into_iter()
    .map(|k| (k, None))
    .collect();

    let mut config = temp_env::with_vars(cleared, || {
        AppConfig::with_overrides(ConfigOverrides {
            environment: Some(environment.to_string()),
            ..Default::default()
        })
    })
    .expect("configuration loads");
    config.rate_limit.delay_ms = 0;
    config
}

pub fn unreachable_registry() -> ServiceRegistry {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let url = format!("http://{}", listener.local_addr().expect("local addr"));
    drop(listener);
    ServiceRegistry::from_urls(&url, &url, &url).expect("local URL is valid")
}

pub fn fast_settings() -> ProbeSettings {
    ProbeSettings {
        auth_token: "test-token".to_string(),
        request_timeout: Duration::from_secs(5),
        stream_timeout: Duration::from_secs(5),
        rate_limit: RateLimitConfig {
            max_requests: 105,
            delay_ms: 0,
            timeout_secs: 5,
        },
    }
}
