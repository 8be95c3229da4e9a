use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{chat_request, Probe, ProbeContext, ProbeResult, ProbeSettings};
use crate::errors::ProbeError;
use crate::models::payloads::ChatRequest;
use crate::models::ProbeOutcome;

/// Hammers the chat endpoint until the gateway answers 429.
///
/// The default bound of 105 requests sits just above the gateway's
/// 100-requests-per-minute budget. Whatever budget this probe spends is not
/// given back before the next probes run.
pub struct RateLimitProbe {
    token: String,
    max_requests: u32,
    delay: Duration,
    timeout: Duration,
}

impl RateLimitProbe {
    pub fn new(settings: &ProbeSettings) -> Self {
        Self {
            token: settings.auth_token.clone(),
            max_requests: settings.rate_limit.max_requests,
            delay: settings.rate_limit.delay(),
            timeout: settings.rate_limit.timeout(),
        }
    }
}

#[async_trait]
impl Probe for RateLimitProbe {
    fn name(&self) -> &'static str {
        "Rate Limiting"
    }

    async fn execute(&self, ctx: &ProbeContext<'_>) -> ProbeResult {
        for attempt in 1..=self.max_requests {
            let payload = ChatRequest {
                quality: None,
                ..ChatRequest::user(format!("Test message {}", attempt - 1))
            };
            let request = chat_request(ctx.registry, &payload, &self.token, self.timeout)?;

            let response = ctx
                .prober
                .probe(&request)
                .await
                .map_err(|e| ProbeError::new(e.kind, format!("request {attempt}: {}", e.message)))?;

            match response.status {
                StatusCode::TOO_MANY_REQUESTS => {
                    info!("Rate limit hit at request {attempt}");
                    return Ok(ProbeOutcome::pass(
                        self.name(),
                        format!("rate limit hit at request {attempt}"),
                    ));
                }
                StatusCode::OK => debug!("Request {attempt} accepted"),
                other => {
                    warn!("Unexpected status {other} at request {attempt}");
                    return Ok(ProbeOutcome::fail(
                        self.name(),
                        format!(
                            "unexpected status {} at request {attempt}",
                            other.as_u16()
                        ),
                    ));
                }
            }

            if attempt < self.max_requests && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        Ok(ProbeOutcome::fail(
            self.name(),
            format!(
                "rate limiting not enforced after {} requests",
                self.max_requests
            ),
        ))
    }
}
