//! The eight admin tools over Whop products and plans.
//!
//! Every operation returns a [`ToolResult`] and never an error: upstream
//! failures are folded into `{ok: false, error}` here. Mutations consult the
//! [`WriteGuard`] before any network call.

use std::sync::Arc;

use models::{
    normalize_connection, DeletedRef, PlanCreateInput, PlanUpdateInput, ProductCreateInput,
    ProductUpdateInput, ToolKind, ToolResult,
};
use reqwest::Method;
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::UpstreamError;
use crate::whop::{CatalogReader, LazyCatalog, WhopRestClient, WhopTransport};
use crate::write_guard::WriteGuard;

pub struct WhopAdmin {
    guard: WriteGuard,
    rest: Arc<dyn WhopTransport>,
    catalog: Arc<dyn CatalogReader>,
}

impl WhopAdmin {
    pub fn new(guard: WriteGuard, rest: Arc<dyn WhopTransport>, catalog: Arc<dyn CatalogReader>) -> Self {
        Self { guard, rest, catalog }
    }

    /// Production wiring: REST client for writes, lazily-built catalog client for reads.
    pub fn from_config(cfg: &configs::WhopConfig) -> Self {
        Self::new(
            WriteGuard::from_config(cfg),
            Arc::new(WhopRestClient::from_config(cfg)),
            Arc::new(LazyCatalog::from_config(cfg)),
        )
    }

    pub fn writes_enabled(&self) -> bool {
        self.guard.allows_writes()
    }

    pub async fn list_products(&self, company_id: &str) -> ToolResult<Vec<Value>> {
        match self.catalog.list_access_passes(company_id).await {
            Ok(connection) => {
                let products = normalize_connection(&connection);
                info!(tool = "listProducts", company_id, count = products.len(), "listed products");
                ToolResult::success(products)
            }
            Err(e) => upstream_failure(ToolKind::ListProducts, e),
        }
    }

    /// Plans of a company; a non-empty `product_id` keeps only plans whose
    /// `product.id` matches.
    pub async fn list_plans(&self, company_id: &str, product_id: Option<&str>) -> ToolResult<Vec<Value>> {
        let connection = match self.catalog.list_plans(company_id).await {
            Ok(c) => c,
            Err(e) => return upstream_failure(ToolKind::ListPlans, e),
        };
        let mut plans = normalize_connection(&connection);
        if let Some(pid) = product_id.filter(|p| !p.is_empty()) {
            plans.retain(|plan| plan_product_id(plan) == Some(pid));
        }
        info!(tool = "listPlans", company_id, count = plans.len(), "listed plans");
        ToolResult::success(plans)
    }

    pub async fn create_product(&self, input: &ProductCreateInput) -> ToolResult<Value> {
        if let Some(denied) = self.guard.deny() {
            return denied;
        }
        let payload = match input.to_payload() {
            Ok(p) => p,
            Err(e) => return ToolResult::failure(e.to_string()),
        };
        self.write(ToolKind::CreateProduct, Method::POST, "/products".to_string(), Some(payload)).await
    }

    pub async fn update_product(&self, id: &str, input: &ProductUpdateInput) -> ToolResult<Value> {
        if let Some(denied) = self.guard.deny() {
            return denied;
        }
        let payload = match input.to_payload() {
            Ok(p) => p,
            Err(e) => return ToolResult::failure(e.to_string()),
        };
        self.write(ToolKind::UpdateProduct, Method::PATCH, format!("/products/{id}"), Some(payload)).await
    }

    pub async fn delete_product(&self, id: &str) -> ToolResult<DeletedRef> {
        if let Some(denied) = self.guard.deny() {
            return denied;
        }
        self.write(ToolKind::DeleteProduct, Method::DELETE, format!("/products/{id}"), None)
            .await
            .map(|_| DeletedRef { id: id.to_string() })
    }

    pub async fn create_plan(&self, input: &PlanCreateInput) -> ToolResult<Value> {
        if let Some(denied) = self.guard.deny() {
            return denied;
        }
        let payload = match input.to_payload() {
            Ok(p) => p,
            Err(e) => return ToolResult::failure(e.to_string()),
        };
        self.write(ToolKind::CreatePlan, Method::POST, "/plans".to_string(), Some(payload)).await
    }

    pub async fn update_plan(&self, id: &str, input: &PlanUpdateInput) -> ToolResult<Value> {
        if let Some(denied) = self.guard.deny() {
            return denied;
        }
        let payload = match input.to_payload() {
            Ok(p) => p,
            Err(e) => return ToolResult::failure(e.to_string()),
        };
        self.write(ToolKind::UpdatePlan, Method::PATCH, format!("/plans/{id}"), Some(payload)).await
    }

    pub async fn delete_plan(&self, id: &str) -> ToolResult<DeletedRef> {
        if let Some(denied) = self.guard.deny() {
            return denied;
        }
        self.write(ToolKind::DeletePlan, Method::DELETE, format!("/plans/{id}"), None)
            .await
            .map(|_| DeletedRef { id: id.to_string() })
    }

    async fn write(&self, tool: ToolKind, method: Method, path: String, body: Option<Value>) -> ToolResult<Value> {
        match self.rest.send(method, &path, body).await {
            Ok(body) => {
                info!(tool = tool.as_str(), %path, "upstream write ok");
                ToolResult::success(body.unwrap_or(Value::Null))
            }
            Err(e) => upstream_failure(tool, e),
        }
    }
}

fn plan_product_id(plan: &Value) -> Option<&str> {
    plan.get("product")?.as_object()?.get("id")?.as_str()
}

fn upstream_failure<T>(tool: ToolKind, err: UpstreamError) -> ToolResult<T> {
    warn!(tool = tool.as_str(), status = ?err.status(), error = %err, "upstream call failed");
    ToolResult::failure(err.to_string())
}
