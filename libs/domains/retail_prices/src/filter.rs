//! OData `$filter` expressions for the retail prices endpoint.
//!
//! Only equality clauses joined by `and` are supported, which is all the
//! lookup form ever sends.

use std::fmt;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::models::PriceRecord;

/// Filterable fields of a price record, named as the API expects them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum FilterField {
    #[strum(serialize = "serviceName")]
    ServiceName,
    #[strum(serialize = "productName")]
    ProductName,
    #[strum(serialize = "armSkuName")]
    ArmSkuName,
    #[strum(serialize = "skuName")]
    SkuName,
    #[strum(serialize = "priceType")]
    PriceType,
    #[strum(serialize = "armRegionName")]
    ArmRegionName,
}

impl FilterField {
    /// The field name used in filter expressions
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Read this field from a record
    pub fn value_of<'a>(&self, record: &'a PriceRecord) -> &'a str {
        match self {
            FilterField::ServiceName => &record.service_name,
            FilterField::ProductName => &record.product_name,
            FilterField::ArmSkuName => &record.arm_sku_name,
            FilterField::SkuName => &record.sku_name,
            FilterField::PriceType => &record.price_type,
            FilterField::ArmRegionName => &record.arm_region_name,
        }
    }
}

/// Quote a string as an OData literal: `'` delimiters, embedded `'` doubled.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// A conjunction of `field eq 'value'` clauses.
///
/// Empty values are never added, so an expression built from a partially
/// filled selection only names the fields that were actually chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpression {
    clauses: Vec<(FilterField, String)>,
}

impl FilterExpression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FilterExpression::push_eq`]
    pub fn and_eq(mut self, field: FilterField, value: impl AsRef<str>) -> Self {
        self.push_eq(field, value);
        self
    }

    /// Add `field eq 'value'` unless `value` is empty
    pub fn push_eq(&mut self, field: FilterField, value: impl AsRef<str>) {
        let value = value.as_ref();
        if !value.is_empty() {
            self.clauses.push((field, value.to_string()));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> impl Iterator<Item = (FilterField, &str)> {
        self.clauses.iter().map(|(field, value)| (*field, value.as_str()))
    }

    /// Value for the `$filter` query parameter, `None` when nothing is filtered
    pub fn to_query_value(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.to_string())
    }

    /// Whether a record satisfies every clause
    pub fn matches(&self, record: &PriceRecord) -> bool {
        self.clauses
            .iter()
            .all(|(field, value)| field.value_of(record) == value)
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, value)) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" and ")?;
            }
            write!(f, "{} eq {}", field.name(), quote_literal(value))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_clause() {
        let filter = FilterExpression::new().and_eq(FilterField::ServiceName, "Storage");
        assert_eq!(filter.to_string(), "serviceName eq 'Storage'");
    }

    #[test]
    fn test_clauses_joined_with_and() {
        let filter = FilterExpression::new()
            .and_eq(FilterField::ServiceName, "Virtual Machines")
            .and_eq(FilterField::ProductName, "Virtual Machines Dv3 Series")
            .and_eq(FilterField::ArmSkuName, "Standard_D2_v3");
        assert_eq!(
            filter.to_string(),
            "serviceName eq 'Virtual Machines' and productName eq 'Virtual Machines Dv3 Series' \
             and armSkuName eq 'Standard_D2_v3'"
        );
    }

    #[test]
    fn test_empty_values_are_omitted() {
        let filter = FilterExpression::new()
            .and_eq(FilterField::ServiceName, "Storage")
            .and_eq(FilterField::ProductName, "")
            .and_eq(FilterField::PriceType, "Consumption")
            .and_eq(FilterField::ArmRegionName, "eastus");
        assert_eq!(
            filter.to_string(),
            "serviceName eq 'Storage' and priceType eq 'Consumption' and armRegionName eq 'eastus'"
        );
        assert!(!filter.to_string().contains("productName"));
    }

    #[test]
    fn test_empty_expression_has_no_query_value() {
        let filter = FilterExpression::new().and_eq(FilterField::SkuName, "");
        assert!(filter.is_empty());
        assert_eq!(filter.to_query_value(), None);
    }

    // Raw interpolation would let a value close the literal and append clauses.
    #[test]
    fn test_embedded_quotes_are_escaped() {
        let filter = FilterExpression::new()
            .and_eq(FilterField::ServiceName, "Storage' or serviceName eq 'Compute");
        assert_eq!(
            filter.to_string(),
            "serviceName eq 'Storage'' or serviceName eq ''Compute'"
        );
        assert_eq!(filter.len(), 1);
    }

    #[test]
    fn test_quote_literal() {
        assert_eq!(quote_literal("eastus"), "'eastus'");
        assert_eq!(quote_literal("O'Brien"), "'O''Brien'");
        assert_eq!(quote_literal(""), "''");
    }

    #[test]
    fn test_field_names() {
        assert_eq!(FilterField::ArmRegionName.name(), "armRegionName");
        assert_eq!(FilterField::PriceType.to_string(), "priceType");
    }

    #[test]
    fn test_matches_record() {
        let record = PriceRecord {
            service_name: "Storage".to_string(),
            product_name: "Blob Storage".to_string(),
            ..Default::default()
        };
        assert!(FilterExpression::new().matches(&record));
        assert!(FilterExpression::new()
            .and_eq(FilterField::ServiceName, "Storage")
            .matches(&record));
        assert!(!FilterExpression::new()
            .and_eq(FilterField::ProductName, "Files")
            .matches(&record));
    }
}
