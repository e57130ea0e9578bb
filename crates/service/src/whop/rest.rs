use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Method, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::errors::UpstreamError;

/// Authenticated JSON transport used by the write operations.
#[async_trait]
pub trait WhopTransport: Send + Sync {
    /// Send `body` (if any) to `path` relative to the API base. Returns the
    /// decoded response body, or `None` when the upstream sent nothing.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Option<Value>, UpstreamError>;
}

#[derive(Clone)]
pub struct WhopRestClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl WhopRestClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn from_config(cfg: &configs::WhopConfig) -> Self {
        Self::new(cfg.api_base.clone(), cfg.api_key.clone())
    }
}

#[async_trait]
impl WhopTransport for WhopRestClient {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Option<Value>, UpstreamError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(UpstreamError::MissingCredential("WHOP_API_KEY"))?;

        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "whop rest request");

        let mut req = self
            .http
            .request(method, &url)
            .bearer_auth(api_key)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            req = req.body(body.to_string());
        }

        let resp = req
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = text.len(), "whop rest response");
        read_body(status, &text)
    }
}

/// Decode a response body that was read as text.
///
/// Non-2xx responses become [`UpstreamError::Status`] with the best message
/// available: the JSON body's string `message`, then the raw text, then the
/// status phrase.
pub(crate) fn read_body(status: StatusCode, text: &str) -> Result<Option<Value>, UpstreamError> {
    let parsed = if text.is_empty() {
        None
    } else {
        Some(serde_json::from_str::<Value>(text))
    };

    if !status.is_success() {
        let from_json = match &parsed {
            Some(Ok(v)) => v.get("message").and_then(Value::as_str).map(str::to_string),
            _ => None,
        };
        let message = from_json
            .or_else(|| (!text.is_empty()).then(|| text.to_string()))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| status.as_str().to_string())
            });
        return Err(UpstreamError::Status { status: status.as_u16(), message });
    }

    match parsed {
        None => Ok(None),
        Some(Ok(v)) => Ok(Some(v)),
        Some(Err(e)) => Err(UpstreamError::Decode(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_message_prefers_json_message() {
        let err = read_body(StatusCode::UNPROCESSABLE_ENTITY, r#"{"message":"Name is taken"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Name is taken");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn error_message_falls_back_to_text_then_phrase() {
        let err = read_body(StatusCode::BAD_GATEWAY, "upstream exploded").unwrap_err();
        assert_eq!(err.to_string(), "upstream exploded");

        let err = read_body(StatusCode::UNAUTHORIZED, r#"{"error":"nope"}"#).unwrap_err();
        assert_eq!(err.to_string(), r#"{"error":"nope"}"#);

        let err = read_body(StatusCode::NOT_FOUND, "").unwrap_err();
        assert_eq!(err.to_string(), "Not Found");
    }

    #[test]
    fn success_bodies() {
        assert_eq!(read_body(StatusCode::NO_CONTENT, "").unwrap(), None);
        assert_eq!(read_body(StatusCode::CREATED, r#"{"id":"prod_1"}"#).unwrap(), Some(json!({"id": "prod_1"})));
        assert!(matches!(read_body(StatusCode::OK, "<html>"), Err(UpstreamError::Decode(_))));
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let client = WhopRestClient::new("http://127.0.0.1:9", None);
        let err = client.send(Method::DELETE, "/products/prod_1", None).await.unwrap_err();
        assert_eq!(err.to_string(), "WHOP_API_KEY is not set");
    }

    #[tokio::test]
    async fn sends_bearer_and_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/products")
            .match_header("authorization", "Bearer key_1")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::Json(json!({"company_id": "biz_1", "name": "X"})))
            .with_status(201)
            .with_body(r#"{"id":"prod_1"}"#)
            .create_async()
            .await;

        let client = WhopRestClient::new(format!("{}/", server.url()), Some("key_1".into()));
        let body = client
            .send(Method::POST, "/products", Some(json!({"company_id": "biz_1", "name": "X"})))
            .await
            .unwrap();
        assert_eq!(body, Some(json!({"id": "prod_1"})));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_2xx_surfaces_upstream_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("PATCH", "/plans/plan_1")
            .with_status(400)
            .with_body(r#"{"message":"price_cents must be positive"}"#)
            .create_async()
            .await;

        let client = WhopRestClient::new(server.url(), Some("key_1".into()));
        let err = client
            .send(Method::PATCH, "/plans/plan_1", Some(json!({"price_cents": 0})))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "price_cents must be positive");
    }
}
