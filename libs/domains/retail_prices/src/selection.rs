//! Cascading filter selection.
//!
//! Service, product, ARM SKU and SKU form a chain: each level's candidates
//! are only meaningful once every level above it has a value. Changing a
//! level wipes everything below it. Region, price type and currency sit
//! outside the chain.

use serde::Serialize;
use std::collections::HashSet;
use strum::{Display, EnumIter, EnumString};

use crate::error::{RetailPricesError, RetailPricesResult};
use crate::filter::{FilterExpression, FilterField};
use crate::models::{Currency, PriceRecord, PriceType, REGIONS};

static CHAIN: [Level; 4] = Level::ALL;

/// A level of the dependent selection chain, ordered from coarsest to finest
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, EnumString,
    EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Level {
    Service,
    Product,
    ArmSku,
    Sku,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Service, Level::Product, Level::ArmSku, Level::Sku];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The level whose candidates depend on this one
    pub fn next(self) -> Option<Level> {
        CHAIN.get(self.index() + 1).copied()
    }

    /// Levels this one depends on, coarsest first
    pub fn ancestors(self) -> &'static [Level] {
        &CHAIN[..self.index()]
    }

    /// Levels that depend on this one
    pub fn descendants(self) -> &'static [Level] {
        &CHAIN[self.index() + 1..]
    }

    pub fn field(self) -> FilterField {
        match self {
            Level::Service => FilterField::ServiceName,
            Level::Product => FilterField::ProductName,
            Level::ArmSku => FilterField::ArmSkuName,
            Level::Sku => FilterField::SkuName,
        }
    }

    /// Plural display label, as used for "All ..." choices
    pub fn label(self) -> &'static str {
        match self {
            Level::Service => "Services",
            Level::Product => "Products",
            Level::ArmSku => "ARM SKUs",
            Level::Sku => "SKUs",
        }
    }
}

/// Current value and available candidates of one level.
///
/// An empty `selected` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LevelState {
    pub selected: String,
    pub candidates: Vec<String>,
}

impl LevelState {
    fn clear(&mut self) {
        self.selected.clear();
        self.candidates.clear();
    }
}

/// Everything the user has chosen so far
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSelection {
    levels: [LevelState; 4],
    pub region: String,
    pub price_type: PriceType,
    pub currency: Currency,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            levels: Default::default(),
            region: REGIONS[0].value.to_string(),
            price_type: PriceType::Consumption,
            currency: Currency::Usd,
        }
    }
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, level: Level) -> &LevelState {
        &self.levels[level.index()]
    }

    pub fn selected(&self, level: Level) -> &str {
        &self.level(level).selected
    }

    pub fn candidates(&self, level: Level) -> &[String] {
        &self.level(level).candidates
    }

    /// Whether every ancestor of `level` has a value
    pub fn is_reachable(&self, level: Level) -> bool {
        level.ancestors().iter().all(|a| !self.selected(*a).is_empty())
    }

    /// Set the value of `level` and clear every deeper level.
    ///
    /// An empty value is always accepted (it is the "all" choice). A
    /// non-empty value below an empty ancestor is rejected and leaves the
    /// selection untouched.
    pub fn select(&mut self, level: Level, value: impl Into<String>) -> RetailPricesResult<()> {
        let value = value.into();
        if !value.is_empty() && !self.is_reachable(level) {
            let missing = level
                .ancestors()
                .iter()
                .find(|a| self.selected(**a).is_empty())
                .copied()
                .unwrap_or(level);
            return Err(RetailPricesError::InvalidSelection(format!(
                "cannot select {} '{}' before a {} is selected",
                level, value, missing
            )));
        }

        self.levels[level.index()].selected = value;
        self.reset_after(level);
        Ok(())
    }

    /// Clear the value of `level` along with every deeper level
    pub fn clear(&mut self, level: Level) {
        self.levels[level.index()].selected.clear();
        self.reset_after(level);
    }

    /// Clear value and candidates of every level strictly deeper than `level`
    pub fn reset_after(&mut self, level: Level) {
        for deeper in level.descendants() {
            self.levels[deeper.index()].clear();
        }
    }

    /// Replace the candidates offered at `level`
    pub fn set_candidates(&mut self, level: Level, candidates: Vec<String>) {
        self.levels[level.index()].candidates = candidates;
    }

    /// Equality filter over the ancestors of `level`, used to fetch its candidates
    pub fn ancestor_filter(&self, level: Level) -> FilterExpression {
        level
            .ancestors()
            .iter()
            .fold(FilterExpression::new(), |filter, a| {
                filter.and_eq(a.field(), self.selected(*a))
            })
    }

    /// Filter for the price query: every non-empty field of the selection
    pub fn pricing_filter(&self) -> FilterExpression {
        FilterExpression::new()
            .and_eq(FilterField::ServiceName, self.selected(Level::Service))
            .and_eq(FilterField::ProductName, self.selected(Level::Product))
            .and_eq(FilterField::PriceType, self.price_type.to_string())
            .and_eq(FilterField::ArmRegionName, &self.region)
            .and_eq(FilterField::ArmSkuName, self.selected(Level::ArmSku))
            .and_eq(FilterField::SkuName, self.selected(Level::Sku))
    }
}

/// Distinct non-empty values of `field`, in the order first seen
pub fn distinct_values(records: &[PriceRecord], field: FilterField) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| field.value_of(r))
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(service: &str, product: &str) -> PriceRecord {
        PriceRecord {
            service_name: service.to_string(),
            product_name: product.to_string(),
            ..Default::default()
        }
    }

    fn filled() -> FilterSelection {
        let mut selection = FilterSelection::new();
        selection.set_candidates(Level::Service, vec!["Virtual Machines".to_string()]);
        selection.select(Level::Service, "Virtual Machines").unwrap();
        selection.set_candidates(Level::Product, vec!["Dv3".to_string()]);
        selection.select(Level::Product, "Dv3").unwrap();
        selection.set_candidates(Level::ArmSku, vec!["Standard_D2_v3".to_string()]);
        selection.select(Level::ArmSku, "Standard_D2_v3").unwrap();
        selection.set_candidates(Level::Sku, vec!["D2 v3".to_string()]);
        selection.select(Level::Sku, "D2 v3").unwrap();
        selection
    }

    #[test]
    fn test_defaults() {
        let selection = FilterSelection::new();
        assert_eq!(selection.region, "eastus");
        assert_eq!(selection.price_type, PriceType::Consumption);
        assert_eq!(selection.currency, Currency::Usd);
        for level in Level::ALL {
            assert_eq!(selection.level(level), &LevelState::default());
        }
    }

    #[test]
    fn test_level_order() {
        assert!(Level::Service < Level::Product);
        assert!(Level::ArmSku < Level::Sku);
        assert_eq!(Level::Service.next(), Some(Level::Product));
        assert_eq!(Level::Sku.next(), None);
        assert_eq!(Level::ArmSku.ancestors(), &[Level::Service, Level::Product]);
        assert_eq!(Level::Product.descendants(), &[Level::ArmSku, Level::Sku]);
        assert_eq!(Level::ArmSku.to_string(), "arm-sku");
    }

    #[test]
    fn test_clearing_any_level_empties_deeper_levels() {
        for level in Level::ALL {
            let mut selection = filled();
            selection.clear(level);

            assert_eq!(selection.selected(level), "");
            for deeper in level.descendants() {
                assert_eq!(selection.selected(*deeper), "", "{deeper} kept its value");
                assert!(selection.candidates(*deeper).is_empty(), "{deeper} kept candidates");
            }
            for ancestor in level.ancestors() {
                assert!(!selection.selected(*ancestor).is_empty());
            }
        }
    }

    #[test]
    fn test_clearing_keeps_own_candidates() {
        let mut selection = filled();
        selection.clear(Level::Product);
        assert_eq!(selection.candidates(Level::Product), &["Dv3".to_string()]);
    }

    #[test]
    fn test_reselecting_resets_deeper_levels() {
        let mut selection = filled();
        selection.select(Level::Service, "Storage").unwrap();
        assert_eq!(selection.selected(Level::Service), "Storage");
        assert!(selection.candidates(Level::Product).is_empty());
        assert_eq!(selection.selected(Level::Sku), "");
    }

    #[test]
    fn test_independent_fields_survive_cascade() {
        let mut selection = filled();
        selection.region = "westeurope".to_string();
        selection.currency = Currency::Eur;
        selection.clear(Level::Service);
        assert_eq!(selection.region, "westeurope");
        assert_eq!(selection.currency, Currency::Eur);
    }

    #[test]
    fn test_select_below_empty_ancestor_is_rejected() {
        let mut selection = FilterSelection::new();
        let err = selection.select(Level::ArmSku, "Standard_D2_v3").unwrap_err();
        assert!(matches!(err, RetailPricesError::InvalidSelection(_)));
        assert!(err.to_string().contains("service"));
        assert_eq!(selection.selected(Level::ArmSku), "");

        // "all" is always allowed
        selection.select(Level::ArmSku, "").unwrap();
    }

    #[test]
    fn test_ancestor_filter() {
        let selection = filled();
        assert!(selection.ancestor_filter(Level::Service).is_empty());
        assert_eq!(
            selection.ancestor_filter(Level::ArmSku).to_string(),
            "serviceName eq 'Virtual Machines' and productName eq 'Dv3'"
        );
    }

    #[test]
    fn test_pricing_filter_omits_empty_fields() {
        let mut selection = FilterSelection::new();
        selection.select(Level::Service, "Storage").unwrap();
        assert_eq!(
            selection.pricing_filter().to_string(),
            "serviceName eq 'Storage' and priceType eq 'Consumption' and armRegionName eq 'eastus'"
        );
    }

    #[test]
    fn test_pricing_filter_full_selection() {
        let mut selection = filled();
        selection.price_type = PriceType::Reservation;
        selection.region = "westus".to_string();
        assert_eq!(
            selection.pricing_filter().to_string(),
            "serviceName eq 'Virtual Machines' and productName eq 'Dv3' \
             and priceType eq 'Reservation' and armRegionName eq 'westus' \
             and armSkuName eq 'Standard_D2_v3' and skuName eq 'D2 v3'"
        );
    }

    #[test]
    fn test_distinct_values_deduplicates() {
        let records = vec![record("A", ""), record("A", "")];
        assert_eq!(distinct_values(&records, FilterField::ServiceName), vec!["A"]);
    }

    #[test]
    fn test_distinct_values_keeps_first_seen_order_and_skips_empty() {
        let records = vec![
            record("Storage", "Files"),
            record("Storage", ""),
            record("Storage", "Blob Storage"),
            record("Storage", "Files"),
        ];
        assert_eq!(
            distinct_values(&records, FilterField::ProductName),
            vec!["Files", "Blob Storage"]
        );
    }
}
