use axum::{extract::State, http::StatusCode, Json};
use common::types::{ToolCatalog, ToolDescriptor};
use models::ToolKind;

use crate::state::AppState;

/// `GET /dev/tools`: catalog for the local test harness. 404 unless enabled.
pub async fn tool_catalog(State(state): State<AppState>) -> Result<Json<ToolCatalog>, StatusCode> {
    if !state.dev_tools {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(catalog(state.admin.writes_enabled())))
}

pub fn catalog(writes_enabled: bool) -> ToolCatalog {
    let tools = ToolKind::ALL.iter().copied().map(descriptor).collect();
    ToolCatalog { writes_enabled, tools }
}

fn descriptor(kind: ToolKind) -> ToolDescriptor {
    let template = kind.input_template();
    ToolDescriptor {
        kind: kind.as_str(),
        label: kind.label(),
        mutating: kind.is_mutating(),
        require_company_id: matches!(kind, ToolKind::ListProducts | ToolKind::ListPlans),
        require_id: matches!(
            kind,
            ToolKind::UpdateProduct | ToolKind::DeleteProduct | ToolKind::UpdatePlan | ToolKind::DeletePlan
        ),
        require_product_id: matches!(kind, ToolKind::ListPlans),
        require_input: template.is_some(),
        template,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_all_tools_in_order() {
        let c = catalog(false);
        assert!(!c.writes_enabled);
        let tags: Vec<_> = c.tools.iter().map(|t| t.kind).collect();
        assert_eq!(
            tags,
            vec!["listProducts", "createProduct", "updateProduct", "deleteProduct", "listPlans", "createPlan", "updatePlan", "deletePlan"]
        );
        let create_plan = &c.tools[5];
        assert!(create_plan.mutating && create_plan.require_input && !create_plan.require_id);
        assert_eq!(create_plan.template.as_ref().unwrap()["interval"], "monthly");
    }
}
