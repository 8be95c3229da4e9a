use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

use super::{chat_request, Probe, ProbeContext, ProbeResult, ProbeSettings};
use crate::models::payloads::ChatRequest;
use crate::models::ProbeOutcome;

const EVENT_STREAM: &str = "text/event-stream";

pub struct StreamingProbe {
    token: String,
    timeout: Duration,
}

impl StreamingProbe {
    pub fn new(settings: &ProbeSettings) -> Self {
        Self {
            token: settings.auth_token.clone(),
            timeout: settings.stream_timeout,
        }
    }
}

pub(crate) fn is_event_stream(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains(EVENT_STREAM)
}

#[async_trait]
impl Probe for StreamingProbe {
    fn name(&self) -> &'static str {
        "Streaming"
    }

    /// Only the status and content type are checked; the event stream itself
    /// is never read.
    async fn execute(&self, ctx: &ProbeContext<'_>) -> ProbeResult {
        let payload = ChatRequest {
            quality: None,
            ..ChatRequest::user("Tell me a short story").streaming()
        };
        let request =
            chat_request(ctx.registry, &payload, &self.token, self.timeout)?.headers_only();
        let response = ctx.prober.probe(&request).await?;

        if response.status != StatusCode::OK {
            return Ok(ProbeOutcome::fail(
                self.name(),
                format!("streaming failed with status {}", response.status_code()),
            ));
        }

        match response.content_type() {
            Some(ct) if is_event_stream(ct) => Ok(ProbeOutcome::pass(
                self.name(),
                format!("streaming endpoint responded with {ct}"),
            )),
            Some(ct) => Ok(ProbeOutcome::fail(
                self.name(),
                format!("unexpected content type: {ct}"),
            )),
            None => Ok(ProbeOutcome::fail(self.name(), "missing content type")),
        }
    }
}
