use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    pub stream: bool,
}

impl ChatRequest {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage {
                role: Role::User,
                content: content.into(),
            }],
            quality: Some("auto".to_string()),
            stream: false,
        }
    }

    pub fn streaming(mut self) -> Self {
        self.stream = true;
        self
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    Hybrid,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RagQuery {
    pub query: String,
    pub limit: u32,
    pub search_type: SearchType,
}

/// Shape of the core API health document, as far as the database probe
/// cares about it.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CoreHealth {
    #[serde(default)]
    pub checks: Option<HealthChecks>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct HealthChecks {
    #[serde(default)]
    pub database: Option<ComponentStatus>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ComponentStatus {
    #[serde(default)]
    pub status: Option<String>,
}

impl CoreHealth {
    pub fn database_status(&self) -> Option<&str> {
        self.checks
            .as_ref()?
            .database
            .as_ref()?
            .status
            .as_deref()
    }
}
