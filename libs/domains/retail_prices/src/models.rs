use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Price type enumeration
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum PriceType {
    #[default]
    Consumption,
    Reservation,
}

/// Billing currency enumeration
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
    EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Aud,
}

impl Currency {
    /// USD is what the API returns when no currency is requested
    pub fn is_api_default(&self) -> bool {
        matches!(self, Currency::Usd)
    }
}

/// A region offered for selection: API value plus display label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Regions offered for selection. The first entry is the initial choice.
pub const REGIONS: &[RegionOption] = &[
    RegionOption { value: "eastus", label: "East US" },
    RegionOption { value: "westus", label: "West US" },
    RegionOption { value: "northeurope", label: "North Europe" },
    RegionOption { value: "westeurope", label: "West Europe" },
    RegionOption { value: "southeastasia", label: "Southeast Asia" },
];

/// Label for a region value, falling back to the value itself for regions
/// outside the offered list.
pub fn region_label(value: &str) -> &str {
    REGIONS
        .iter()
        .find(|r| r.value == value)
        .map(|r| r.label)
        .unwrap_or(value)
}

/// One item of the Azure Retail Prices API.
///
/// Passed through as returned: nothing is validated or converted. The API
/// sometimes sends `null` for string fields; those read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub service_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub product_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub arm_sku_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sku_name: String,
    #[serde(rename = "type", alias = "priceType", default, deserialize_with = "null_as_empty")]
    pub price_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub arm_region_name: String,
    #[serde(default)]
    pub retail_price: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub currency_code: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub unit_of_measure: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier_minimum_units: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meter_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_primary_meter_region: Option<bool>,
}

/// One page of the Azure Retail Prices API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetailPricePage {
    #[serde(rename = "Items", default)]
    pub items: Vec<PriceRecord>,
    #[serde(rename = "NextPageLink", default)]
    pub next_page_link: Option<String>,
    #[serde(rename = "Count", default)]
    pub count: Option<u64>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
