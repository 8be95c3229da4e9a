use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

use super::{Probe, ProbeContext, ProbeResult, ProbeSettings, RAG_PATH};
use crate::models::payloads::{RagQuery, SearchType};
use crate::models::ProbeOutcome;
use crate::registry::ServiceName;
use crate::services::prober::ProbeRequest;

const RAG_QUERY: &str = "Apple Watch features";
const RAG_LIMIT: u32 = 3;

pub struct RagProbe {
    token: String,
    timeout: Duration,
}

impl RagProbe {
    pub fn new(settings: &ProbeSettings) -> Self {
        Self {
            token: settings.auth_token.clone(),
            timeout: settings.request_timeout,
        }
    }

    fn query() -> RagQuery {
        RagQuery {
            query: RAG_QUERY.to_string(),
            limit: RAG_LIMIT,
            search_type: SearchType::Hybrid,
        }
    }
}

#[async_trait]
impl Probe for RagProbe {
    fn name(&self) -> &'static str {
        "RAG Endpoint"
    }

    async fn execute(&self, ctx: &ProbeContext<'_>) -> ProbeResult {
        let request = ProbeRequest::post(
            ctx.registry.url(ServiceName::EdgeGateway, RAG_PATH),
            self.timeout,
        )
        .json(&Self::query())?
        .bearer(&self.token);

        let response = ctx.prober.probe(&request).await?;

        if response.status == StatusCode::OK {
            Ok(ProbeOutcome::pass(self.name(), "POST /rag/query: 200"))
        } else {
            Ok(ProbeOutcome::fail(
                self.name(),
                format!(
                    "POST /rag/query: status {} - {}",
                    response.status_code(),
                    response.body_excerpt()
                ),
            ))
        }
    }
}
