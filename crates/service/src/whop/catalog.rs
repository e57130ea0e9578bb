use async_trait::async_trait;
use once_cell::sync::OnceCell;
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::UpstreamError;
use crate::whop::rest::read_body;

/// Read accessors for a company's catalog. Each returns the raw collection
/// as the platform sent it; callers normalize the shape.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    async fn list_access_passes(&self, company_id: &str) -> Result<Value, UpstreamError>;
    async fn list_plans(&self, company_id: &str) -> Result<Value, UpstreamError>;
}

/// App-scoped client for the read endpoints.
#[derive(Clone)]
pub struct WhopSdkClient {
    http: reqwest::Client,
    base_url: String,
    app_id: String,
    api_key: String,
}

impl WhopSdkClient {
    pub fn new(base_url: impl Into<String>, app_id: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            app_id,
            api_key,
        }
    }

    async fn get_collection(&self, path: &str, company_id: &str) -> Result<Value, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, company_id, "whop catalog read");
        let resp = self
            .http
            .get(&url)
            .query(&[("company_id", company_id)])
            .bearer_auth(&self.api_key)
            .header("x-whop-app-id", &self.app_id)
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;
        Ok(read_body(status, &text)?.unwrap_or(Value::Null))
    }
}

#[async_trait]
impl CatalogReader for WhopSdkClient {
    async fn list_access_passes(&self, company_id: &str) -> Result<Value, UpstreamError> {
        self.get_collection("/products", company_id).await
    }

    async fn list_plans(&self, company_id: &str) -> Result<Value, UpstreamError> {
        self.get_collection("/plans", company_id).await
    }
}

/// Builds the [`WhopSdkClient`] on the first read and reuses it afterwards.
/// Missing credentials are reported on every read until they are supplied
/// to a new instance.
pub struct LazyCatalog {
    base_url: String,
    app_id: Option<String>,
    api_key: Option<String>,
    client: OnceCell<WhopSdkClient>,
}

impl LazyCatalog {
    pub fn new(base_url: impl Into<String>, app_id: Option<String>, api_key: Option<String>) -> Self {
        Self { base_url: base_url.into(), app_id, api_key, client: OnceCell::new() }
    }

    pub fn from_config(cfg: &configs::WhopConfig) -> Self {
        Self::new(cfg.api_base.clone(), cfg.app_id.clone(), cfg.api_key.clone())
    }

    pub fn is_initialized(&self) -> bool {
        self.client.get().is_some()
    }

    fn client(&self) -> Result<&WhopSdkClient, UpstreamError> {
        self.client.get_or_try_init(|| {
            let app_id = self.app_id.clone().ok_or(UpstreamError::MissingCredential("WHOP_APP_ID"))?;
            let api_key = self.api_key.clone().ok_or(UpstreamError::MissingCredential("WHOP_API_KEY"))?;
            info!(app_id = %app_id, "whop catalog client initialized");
            Ok(WhopSdkClient::new(self.base_url.clone(), app_id, api_key))
        })
    }
}

#[async_trait]
impl CatalogReader for LazyCatalog {
    async fn list_access_passes(&self, company_id: &str) -> Result<Value, UpstreamError> {
        self.client()?.list_access_passes(company_id).await
    }

    async fn list_plans(&self, company_id: &str) -> Result<Value, UpstreamError> {
        self.client()?.list_plans(company_id).await
    }
}
