use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

use super::{chat_request, Probe, ProbeContext, ProbeResult, ProbeSettings};
use crate::models::payloads::ChatRequest;
use crate::models::ProbeOutcome;

const TEST_MESSAGE: &str = "Hello! This is a test message.";

/// Sends one non-streaming chat request. Only the status is checked, not the
/// content of the reply.
pub struct ChatProbe {
    token: String,
    timeout: Duration,
}

impl ChatProbe {
    pub fn new(settings: &ProbeSettings) -> Self {
        Self {
            token: settings.auth_token.clone(),
            timeout: settings.request_timeout,
        }
    }
}

#[async_trait]
impl Probe for ChatProbe {
    fn name(&self) -> &'static str {
        "Chat Endpoint"
    }

    async fn execute(&self, ctx: &ProbeContext<'_>) -> ProbeResult {
        let payload = ChatRequest::user(TEST_MESSAGE);
        let request = chat_request(ctx.registry, &payload, &self.token, self.timeout)?;
        let response = ctx.prober.probe(&request).await?;

        if response.status == StatusCode::OK {
            Ok(ProbeOutcome::pass(self.name(), "POST /chat: 200"))
        } else {
            Ok(ProbeOutcome::fail(
                self.name(),
                format!(
                    "POST /chat: status {} - {}",
                    response.status_code(),
                    response.body_excerpt()
                ),
            ))
        }
    }
}
