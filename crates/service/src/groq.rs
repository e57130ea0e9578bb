//! Client for Groq's OpenAI-compatible `responses` endpoint.

use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum GroqError {
    #[error("GROQ_API_KEY is not set")]
    MissingApiKey,
    #[error("Groq request failed ({status}): {body}")]
    Status { status: u16, body: String },
    #[error("Groq request failed: {0}")]
    Network(String),
    #[error("invalid Groq response: {0}")]
    Decode(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompoundModel {
    CompoundMini,
    Compound,
}

impl CompoundModel {
    pub fn as_str(self) -> &'static str {
        match self {
            CompoundModel::CompoundMini => "groq/compound-mini",
            CompoundModel::Compound => "groq/compound",
        }
    }
}

#[derive(Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GroqClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self { http: reqwest::Client::new(), endpoint: endpoint.into(), api_key }
    }

    pub fn from_config(cfg: &configs::GroqConfig) -> Self {
        Self::new(cfg.endpoint.clone(), cfg.api_key.clone())
    }

    /// POST an arbitrary body and return the decoded JSON response.
    pub async fn responses(&self, body: &Value) -> Result<Value, GroqError> {
        let api_key = self.api_key.as_deref().ok_or(GroqError::MissingApiKey)?;

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| GroqError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            // 读取失败时按空串处理，回退到状态短语
            let text = resp.text().await.unwrap_or_default();
            let body = if text.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                text
            };
            warn!(status = status.as_u16(), "groq request failed");
            return Err(GroqError::Status { status: status.as_u16(), body });
        }

        resp.json::<Value>().await.map_err(|e| GroqError::Decode(e.to_string()))
    }

    pub async fn compound_mini(&self, input: Value, tools: &[Value]) -> Result<Value, GroqError> {
        self.responses(&build_request(CompoundModel::CompoundMini, input, tools)).await
    }

    pub async fn compound(&self, input: Value, tools: &[Value]) -> Result<Value, GroqError> {
        self.responses(&build_request(CompoundModel::Compound, input, tools)).await
    }
}

fn build_request(model: CompoundModel, input: Value, tools: &[Value]) -> Value {
    let mut payload = json!({ "model": model.as_str(), "input": input });
    if !tools.is_empty() {
        payload["tools"] = Value::Array(tools.to_vec());
    }
    debug!(model = model.as_str(), tools = tools.len(), "groq request");
    payload
}
