//! Product (Whop "access pass") inputs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::Issues;
use crate::schema::{self, at, SchemaEnum};

pub const MAX_IMAGE_URLS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductVisibility {
    Visible,
    Hidden,
    Archived,
    QuickLink,
}

impl SchemaEnum for ProductVisibility {
    const VARIANTS: &'static [Self] = &[
        ProductVisibility::Visible,
        ProductVisibility::Hidden,
        ProductVisibility::Archived,
        ProductVisibility::QuickLink,
    ];

    fn as_str(self) -> &'static str {
        match self {
            ProductVisibility::Visible => "visible",
            ProductVisibility::Hidden => "hidden",
            ProductVisibility::Archived => "archived",
            ProductVisibility::QuickLink => "quick_link",
        }
    }
}

/// Serializes straight into the upstream snake_case payload; unset optionals are omitted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductCreateInput {
    pub company_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<ProductVisibility>,
}

/// Sparse update: a field is sent upstream iff it was present in the request.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProductUpdateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<ProductVisibility>,
}

impl ProductCreateInput {
    pub(crate) fn parse(value: Option<&Value>, path: &[&str], issues: &mut Issues) -> Option<Self> {
        let obj = schema::object(value, path, issues)?;
        let before = issues.len();
        let company_id = schema::string(obj.get("companyId"), &at(path, "companyId"), 1, issues);
        let name = schema::string(obj.get("name"), &at(path, "name"), 1, issues);
        let description = schema::optional_string(obj.get("description"), &at(path, "description"), 0, issues);
        let image_urls = schema::optional_url_list(obj.get("imageUrls"), &at(path, "imageUrls"), MAX_IMAGE_URLS, issues);
        let visibility = schema::optional_literal(obj.get("visibility"), &at(path, "visibility"), issues);
        if issues.len() > before {
            return None;
        }
        Some(Self {
            company_id: company_id?,
            name: name?,
            description,
            image_urls,
            visibility,
        })
    }

    pub fn to_payload(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

impl ProductUpdateInput {
    pub(crate) fn parse(value: Option<&Value>, path: &[&str], issues: &mut Issues) -> Option<Self> {
        let obj: &Map<String, Value> = schema::object(value, path, issues)?;
        let before = issues.len();
        let input = Self {
            company_id: schema::optional_string(obj.get("companyId"), &at(path, "companyId"), 1, issues),
            name: schema::optional_string(obj.get("name"), &at(path, "name"), 1, issues),
            description: schema::optional_string(obj.get("description"), &at(path, "description"), 0, issues),
            image_urls: schema::optional_url_list(obj.get("imageUrls"), &at(path, "imageUrls"), MAX_IMAGE_URLS, issues),
            visibility: schema::optional_literal(obj.get("visibility"), &at(path, "visibility"), issues),
        };
        if issues.len() > before {
            return None;
        }
        if input.is_empty() {
            issues.add(path, "At least one field must be provided");
            return None;
        }
        Some(input)
    }

    pub fn is_empty(&self) -> bool {
        self.company_id.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.image_urls.is_none()
            && self.visibility.is_none()
    }

    pub fn to_payload(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
