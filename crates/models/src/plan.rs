//! Pricing plan inputs.

use serde::Serialize;
use serde_json::Value;

use crate::errors::Issues;
use crate::schema::{self, at, SchemaEnum};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanInterval {
    Monthly,
    Annual,
}

impl SchemaEnum for PlanInterval {
    const VARIANTS: &'static [Self] = &[PlanInterval::Monthly, PlanInterval::Annual];

    fn as_str(self) -> &'static str {
        match self {
            PlanInterval::Monthly => "monthly",
            PlanInterval::Annual => "annual",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlanCreateInput {
    pub company_id: String,
    pub product_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price_cents: u64,
    pub interval: PlanInterval,
    /// `null` on create means "no trial" and is not sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_days: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PlanUpdateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<PlanInterval>,
    /// `Some(None)` clears the trial upstream (sent as `null`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_days: Option<Option<u64>>,
}

impl PlanCreateInput {
    pub(crate) fn parse(value: Option<&Value>, path: &[&str], issues: &mut Issues) -> Option<Self> {
        let obj = schema::object(value, path, issues)?;
        let before = issues.len();
        let company_id = schema::string(obj.get("companyId"), &at(path, "companyId"), 1, issues);
        let product_id = schema::string(obj.get("productId"), &at(path, "productId"), 1, issues);
        let name = schema::optional_string(obj.get("name"), &at(path, "name"), 0, issues);
        let description = schema::optional_string(obj.get("description"), &at(path, "description"), 0, issues);
        let price_cents = schema::non_negative_int(obj.get("priceCents"), &at(path, "priceCents"), issues);
        let interval = schema::literal(obj.get("interval"), &at(path, "interval"), issues);
        let trial_days = schema::nullable_non_negative_int(obj.get("trialDays"), &at(path, "trialDays"), issues);
        if issues.len() > before {
            return None;
        }
        Some(Self {
            company_id: company_id?,
            product_id: product_id?,
            name,
            description,
            price_cents: price_cents?,
            interval: interval?,
            trial_days: trial_days.flatten(),
        })
    }

    pub fn to_payload(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

impl PlanUpdateInput {
    pub(crate) fn parse(value: Option<&Value>, path: &[&str], issues: &mut Issues) -> Option<Self> {
        let obj = schema::object(value, path, issues)?;
        let before = issues.len();
        let input = Self {
            company_id: schema::optional_string(obj.get("companyId"), &at(path, "companyId"), 0, issues),
            product_id: schema::optional_string(obj.get("productId"), &at(path, "productId"), 0, issues),
            name: schema::optional_string(obj.get("name"), &at(path, "name"), 0, issues),
            description: schema::optional_string(obj.get("description"), &at(path, "description"), 0, issues),
            price_cents: schema::optional_non_negative_int(obj.get("priceCents"), &at(path, "priceCents"), issues),
            interval: schema::optional_literal(obj.get("interval"), &at(path, "interval"), issues),
            trial_days: schema::nullable_non_negative_int(obj.get("trialDays"), &at(path, "trialDays"), issues),
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
            && self.product_id.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.price_cents.is_none()
            && self.interval.is_none()
            && self.trial_days.is_none()
    }

    pub fn to_payload(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
