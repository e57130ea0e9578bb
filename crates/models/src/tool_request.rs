//! The tool envelope: `{"type": <tool>, ...fields}`.

use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::{Issues, ValidationError};
use crate::plan::{PlanCreateInput, PlanUpdateInput};
use crate::product::{ProductCreateInput, ProductUpdateInput};
use crate::schema::{self, type_name};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolKind {
    ListProducts,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
    ListPlans,
    CreatePlan,
    UpdatePlan,
    DeletePlan,
}

impl ToolKind {
    pub const ALL: [ToolKind; 8] = [
        ToolKind::ListProducts,
        ToolKind::CreateProduct,
        ToolKind::UpdateProduct,
        ToolKind::DeleteProduct,
        ToolKind::ListPlans,
        ToolKind::CreatePlan,
        ToolKind::UpdatePlan,
        ToolKind::DeletePlan,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::ListProducts => "listProducts",
            ToolKind::CreateProduct => "createProduct",
            ToolKind::UpdateProduct => "updateProduct",
            ToolKind::DeleteProduct => "deleteProduct",
            ToolKind::ListPlans => "listPlans",
            ToolKind::CreatePlan => "createPlan",
            ToolKind::UpdatePlan => "updatePlan",
            ToolKind::DeletePlan => "deletePlan",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == tag)
    }

    /// Create/update/delete; these are subject to the write guard.
    pub fn is_mutating(self) -> bool {
        !matches!(self, ToolKind::ListProducts | ToolKind::ListPlans)
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::ListProducts => "List Products",
            ToolKind::CreateProduct => "Create Product",
            ToolKind::UpdateProduct => "Update Product",
            ToolKind::DeleteProduct => "Delete Product",
            ToolKind::ListPlans => "List Plans",
            ToolKind::CreatePlan => "Create Plan",
            ToolKind::UpdatePlan => "Update Plan",
            ToolKind::DeletePlan => "Delete Plan",
        }
    }

    /// Example `input` for the dev harness.
    pub fn input_template(self) -> Option<Value> {
        match self {
            ToolKind::CreateProduct => Some(json!({
                "companyId": "biz_***",
                "name": "Signals Pro",
                "description": "High-signal AI copilots for creators.",
                "imageUrls": [],
                "visibility": "visible"
            })),
            ToolKind::UpdateProduct => Some(json!({
                "name": "Signals Pro (Updated)",
                "description": "Iterated copy."
            })),
            ToolKind::CreatePlan => Some(json!({
                "companyId": "biz_***",
                "productId": "prod_***",
                "name": "VIP Monthly",
                "priceCents": 9900,
                "interval": "monthly",
                "trialDays": 7
            })),
            ToolKind::UpdatePlan => Some(json!({
                "name": "VIP Annual",
                "priceCents": 29900,
                "interval": "annual"
            })),
            _ => None,
        }
    }

    fn expected_tags() -> String {
        Self::ALL
            .iter()
            .map(|k| format!("'{}'", k.as_str()))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ToolRequest {
    ListProducts { company_id: String },
    CreateProduct { input: ProductCreateInput },
    UpdateProduct { id: String, input: ProductUpdateInput },
    DeleteProduct { id: String },
    ListPlans { company_id: String, product_id: Option<String> },
    CreatePlan { input: PlanCreateInput },
    UpdatePlan { id: String, input: PlanUpdateInput },
    DeletePlan { id: String },
}

impl ToolRequest {
    pub fn kind(&self) -> ToolKind {
        match self {
            ToolRequest::ListProducts { .. } => ToolKind::ListProducts,
            ToolRequest::CreateProduct { .. } => ToolKind::CreateProduct,
            ToolRequest::UpdateProduct { .. } => ToolKind::UpdateProduct,
            ToolRequest::DeleteProduct { .. } => ToolKind::DeleteProduct,
            ToolRequest::ListPlans { .. } => ToolKind::ListPlans,
            ToolRequest::CreatePlan { .. } => ToolKind::CreatePlan,
            ToolRequest::UpdatePlan { .. } => ToolKind::UpdatePlan,
            ToolRequest::DeletePlan { .. } => ToolKind::DeletePlan,
        }
    }

    /// Parse a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| ValidationError::InvalidJson)?;
        Self::from_value(&value)
    }

    /// Validate an already-decoded body against the eight request shapes.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let mut issues = Issues::new();
        let obj = match value {
            Value::Object(obj) => obj,
            other => {
                issues.add(&[], format!("Expected object, received {}", type_name(other)));
                return Err(ValidationError::Schema(issues));
            }
        };

        let kind = match obj.get("type") {
            Some(Value::String(tag)) => {
                ToolKind::from_tag(tag).ok_or_else(|| ValidationError::UnknownTool(tag.clone()))?
            }
            _ => {
                issues.add(
                    &["type"],
                    format!("Invalid discriminator value. Expected {}", ToolKind::expected_tags()),
                );
                return Err(ValidationError::Schema(issues));
            }
        };

        let req = match kind {
            ToolKind::ListProducts => {
                schema::string(obj.get("companyId"), &["companyId"], 1, &mut issues)
                    .map(|company_id| ToolRequest::ListProducts { company_id })
            }
            ToolKind::CreateProduct => {
                ProductCreateInput::parse(obj.get("input"), &["input"], &mut issues)
                    .map(|input| ToolRequest::CreateProduct { input })
            }
            ToolKind::UpdateProduct => {
                let id = schema::string(obj.get("id"), &["id"], 1, &mut issues);
                let input = ProductUpdateInput::parse(obj.get("input"), &["input"], &mut issues);
                id.zip(input).map(|(id, input)| ToolRequest::UpdateProduct { id, input })
            }
            ToolKind::DeleteProduct => {
                schema::string(obj.get("id"), &["id"], 1, &mut issues)
                    .map(|id| ToolRequest::DeleteProduct { id })
            }
            ToolKind::ListPlans => {
                let company_id = schema::string(obj.get("companyId"), &["companyId"], 1, &mut issues);
                let product_id = schema::optional_string(obj.get("productId"), &["productId"], 0, &mut issues);
                if issues.is_empty() {
                    company_id.map(|company_id| ToolRequest::ListPlans { company_id, product_id })
                } else {
                    None
                }
            }
            ToolKind::CreatePlan => {
                PlanCreateInput::parse(obj.get("input"), &["input"], &mut issues)
                    .map(|input| ToolRequest::CreatePlan { input })
            }
            ToolKind::UpdatePlan => {
                let id = schema::string(obj.get("id"), &["id"], 1, &mut issues);
                let input = PlanUpdateInput::parse(obj.get("input"), &["input"], &mut issues);
                id.zip(input).map(|(id, input)| ToolRequest::UpdatePlan { id, input })
            }
            ToolKind::DeletePlan => {
                schema::string(obj.get("id"), &["id"], 1, &mut issues)
                    .map(|id| ToolRequest::DeletePlan { id })
            }
        };

        match req {
            Some(req) if issues.is_empty() => Ok(req),
            _ => Err(ValidationError::Schema(issues)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanInterval;

    fn parse(v: Value) -> Result<ToolRequest, ValidationError> {
        ToolRequest::from_value(&v)
    }

    #[test]
    fn every_tag_maps_to_its_variant() {
        let cases = vec![
            (json!({"type": "listProducts", "companyId": "biz_1"}), ToolKind::ListProducts),
            (json!({"type": "createProduct", "input": {"companyId": "biz_1", "name": "X"}}), ToolKind::CreateProduct),
            (json!({"type": "updateProduct", "id": "prod_1", "input": {"name": "Y"}}), ToolKind::UpdateProduct),
            (json!({"type": "deleteProduct", "id": "prod_1"}), ToolKind::DeleteProduct),
            (json!({"type": "listPlans", "companyId": "biz_1", "productId": "prod_1"}), ToolKind::ListPlans),
            (json!({"type": "createPlan", "input": {"companyId": "biz_1", "productId": "prod_1", "priceCents": 100, "interval": "annual"}}), ToolKind::CreatePlan),
            (json!({"type": "updatePlan", "id": "plan_1", "input": {"priceCents": 0}}), ToolKind::UpdatePlan),
            (json!({"type": "deletePlan", "id": "plan_1"}), ToolKind::DeletePlan),
        ];
        for (body, kind) in cases {
            let req = parse(body.clone()).unwrap_or_else(|e| panic!("{body}: {e}"));
            assert_eq!(req.kind(), kind);
            assert_eq!(body["type"], kind.as_str());
        }
    }

    #[test]
    fn list_plans_product_filter_is_optional() {
        let req = parse(json!({"type": "listPlans", "companyId": "biz_1"})).unwrap();
        assert_eq!(req, ToolRequest::ListPlans { company_id: "biz_1".into(), product_id: None });
    }

    #[test]
    fn create_plan_fields_are_typed() {
        let req = parse(json!({
            "type": "createPlan",
            "input": {"companyId": "biz_1", "productId": "prod_1", "priceCents": 9900, "interval": "monthly", "trialDays": 7}
        }))
        .unwrap();
        match req {
            ToolRequest::CreatePlan { input } => {
                assert_eq!(input.price_cents, 9900);
                assert_eq!(input.interval, PlanInterval::Monthly);
                assert_eq!(input.trial_days, Some(7));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_tag_is_reported_as_unknown_tool() {
        let err = parse(json!({"type": "sellCourse"})).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownTool(ref t) if t == "sellCourse"));
        assert_eq!(err.to_string(), "Unknown tool request");
    }

    #[test]
    fn missing_tag_is_a_schema_error() {
        let err = parse(json!({"companyId": "biz_1"})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid discriminator value. Expected 'listProducts' | 'createProduct' | 'updateProduct' | 'deleteProduct' | 'listPlans' | 'createPlan' | 'updatePlan' | 'deletePlan'"
        );
    }

    #[test]
    fn non_object_body() {
        let err = parse(json!([1, 2])).unwrap_err();
        assert_eq!(err.to_string(), "Expected object, received array");
    }

    #[test]
    fn update_product_with_empty_input() {
        let err = parse(json!({"type": "updateProduct", "id": "prod_1", "input": {}})).unwrap_err();
        assert!(err.to_string().contains("At least one field must be provided"));
    }

    #[test]
    fn issues_from_id_and_input_are_combined() {
        let err = parse(json!({"type": "updatePlan", "id": "", "input": {}})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "String must contain at least 1 character(s), At least one field must be provided"
        );
    }

    #[test]
    fn out_of_range_integers_are_never_silent() {
        let err = parse(json!({
            "type": "createPlan",
            "input": {"companyId": "biz_1", "productId": "prod_1", "priceCents": 1e20, "interval": "monthly"}
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "Number must be less than or equal to 18446744073709551615");

        let err = parse(json!({"type": "updatePlan", "id": "plan_1", "input": {"trialDays": 1e25}})).unwrap_err();
        assert_eq!(err.to_string(), "Number must be less than or equal to 18446744073709551615");
    }

    #[test]
    fn malformed_json_body() {
        let err = ToolRequest::from_slice(b"{not json").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidJson));
        let err = ToolRequest::from_slice(b"").unwrap_err();
        assert_eq!(err.to_string(), "Invalid JSON body");
    }

    #[test]
    fn mutating_kinds() {
        let mutating: Vec<_> = ToolKind::ALL.iter().filter(|k| k.is_mutating()).collect();
        assert_eq!(mutating.len(), 6);
        assert!(!ToolKind::ListPlans.is_mutating());
    }
}
