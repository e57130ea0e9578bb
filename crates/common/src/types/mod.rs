use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// One entry of the dev harness catalog.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub label: &'static str,
    pub mutating: bool,
    pub require_company_id: bool,
    pub require_id: bool,
    pub require_product_id: bool,
    pub require_input: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<serde_json::Value>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ToolCatalog {
    pub writes_enabled: bool,
    pub tools: Vec<ToolDescriptor>,
}
