use models::{ToolRequest, ToolResult};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::admin::WhopAdmin;
use crate::errors::ServiceError;

/// Route a validated request to the matching admin operation.
///
/// The outer `Err` is reserved for faults outside the tool's own error
/// handling; upstream failures already arrive as `ToolResult::Err`.
pub async fn dispatch(admin: &WhopAdmin, request: ToolRequest) -> Result<ToolResult<Value>, ServiceError> {
    let kind = request.kind();
    debug!(tool = kind.as_str(), "dispatching tool request");
    match request {
        ToolRequest::ListProducts { company_id } => to_json(admin.list_products(&company_id).await),
        ToolRequest::CreateProduct { input } => to_json(admin.create_product(&input).await),
        ToolRequest::UpdateProduct { id, input } => to_json(admin.update_product(&id, &input).await),
        ToolRequest::DeleteProduct { id } => to_json(admin.delete_product(&id).await),
        ToolRequest::ListPlans { company_id, product_id } => {
            to_json(admin.list_plans(&company_id, product_id.as_deref()).await)
        }
        ToolRequest::CreatePlan { input } => to_json(admin.create_plan(&input).await),
        ToolRequest::UpdatePlan { id, input } => to_json(admin.update_plan(&id, &input).await),
        ToolRequest::DeletePlan { id } => to_json(admin.delete_plan(&id).await),
    }
}

fn to_json<T: Serialize>(result: ToolResult<T>) -> Result<ToolResult<Value>, ServiceError> {
    match result {
        ToolResult::Ok(data) => Ok(ToolResult::Ok(serde_json::to_value(data)?)),
        ToolResult::Err(e) => Ok(ToolResult::Err(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{admin_with, MockCatalog, MockTransport};
    use reqwest::Method;
    use serde_json::json;

    fn request(v: Value) -> ToolRequest {
        ToolRequest::from_value(&v).expect("valid request")
    }

    #[tokio::test]
    async fn routes_each_tool_to_its_upstream_call() {
        let rest = MockTransport::new();
        let catalog = MockCatalog::new(json!([{"id": "prod_1"}]), json!({"data": [{"id": "plan_1"}]}));
        let admin = admin_with(true, rest.clone(), catalog.clone());

        let cases = vec![
            (json!({"type": "createProduct", "input": {"companyId": "biz_1", "name": "X"}}), Method::POST, "/products"),
            (json!({"type": "updateProduct", "id": "prod_1", "input": {"name": "Y"}}), Method::PATCH, "/products/prod_1"),
            (json!({"type": "deleteProduct", "id": "prod_1"}), Method::DELETE, "/products/prod_1"),
            (json!({"type": "createPlan", "input": {"companyId": "biz_1", "productId": "prod_1", "priceCents": 100, "interval": "monthly"}}), Method::POST, "/plans"),
            (json!({"type": "updatePlan", "id": "plan_1", "input": {"interval": "annual"}}), Method::PATCH, "/plans/plan_1"),
            (json!({"type": "deletePlan", "id": "plan_1"}), Method::DELETE, "/plans/plan_1"),
        ];
        for (i, (body, method, path)) in cases.into_iter().enumerate() {
            let result = dispatch(&admin, request(body)).await.unwrap();
            assert!(result.is_ok());
            let call = &rest.calls()[i];
            assert_eq!(call.method, method);
            assert_eq!(call.path, path);
        }

        let products = dispatch(&admin, request(json!({"type": "listProducts", "companyId": "biz_1"}))).await.unwrap();
        assert_eq!(products, ToolResult::success(json!([{"id": "prod_1"}])));
        let plans = dispatch(&admin, request(json!({"type": "listPlans", "companyId": "biz_1"}))).await.unwrap();
        assert_eq!(plans, ToolResult::success(json!([{"id": "plan_1"}])));

        assert_eq!(rest.call_count(), 6);
        assert_eq!(catalog.reads.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn delete_data_is_the_id() {
        let admin = admin_with(true, MockTransport::new(), MockCatalog::new(json!([]), json!([])));
        let result = dispatch(&admin, request(json!({"type": "deletePlan", "id": "plan_7"}))).await.unwrap();
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({"ok": true, "data": {"id": "plan_7"}}));
    }
}
