use tracing::{debug, instrument, warn};

use crate::client::RetailPricesApi;
use crate::error::RetailPricesResult;
use crate::filter::FilterExpression;
use crate::models::{Currency, PriceRecord, PriceType};
use crate::selection::{FilterSelection, Level, distinct_values};

/// Message shown for any failed request
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch data. Please try again.";

/// A planned candidate fetch: which level it fills and the filter to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRequest {
    pub level: Level,
    pub filter: FilterExpression,
}

/// Drives the lookup form: cascading selections, candidate fetches, and
/// the final price query.
///
/// Fetch failures never escape. They leave a message in [`error`](Self::error)
/// and an empty result for the call that failed; everything else is kept.
pub struct FilterController<A: RetailPricesApi> {
    api: A,
    selection: FilterSelection,
    prices: Vec<PriceRecord>,
    error: Option<String>,
}

impl<A: RetailPricesApi> FilterController<A> {
    /// Create a controller with default selections and nothing loaded
    pub fn new(api: A) -> Self {
        Self {
            api,
            selection: FilterSelection::new(),
            prices: Vec::new(),
            error: None,
        }
    }

    /// Create a controller and load the service list
    pub async fn mount(api: A) -> Self {
        let mut controller = Self::new(api);
        controller.load_services().await;
        controller
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Records of the last price query
    pub fn prices(&self) -> &[PriceRecord] {
        &self.prices
    }

    /// Message of the last failed request, cleared when the next request starts
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fetch the unfiltered item set and offer its distinct services
    pub async fn load_services(&mut self) {
        if let Some(request) = self.plan_candidates(Level::Service) {
            self.run_candidates(request).await;
        }
    }

    /// Change the value at `level`.
    ///
    /// Deeper levels and the displayed prices are cleared. For service,
    /// product and ARM SKU a non-empty value also loads the next level's
    /// candidates. Only a selection below an empty ancestor is an error.
    #[instrument(skip(self, value))]
    pub async fn select(&mut self, level: Level, value: impl Into<String>) -> RetailPricesResult<()> {
        let value = value.into();
        debug!(value = %value, "Selection changed");

        self.selection.select(level, value.as_str())?;
        self.prices.clear();

        if value.is_empty() {
            return Ok(());
        }
        if let Some(request) = level.next().and_then(|next| self.plan_candidates(next)) {
            self.run_candidates(request).await;
        }
        Ok(())
    }

    pub fn set_region(&mut self, region: impl Into<String>) {
        self.selection.region = region.into();
    }

    pub fn set_price_type(&mut self, price_type: PriceType) {
        self.selection.price_type = price_type;
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.selection.currency = currency;
    }

    /// Query prices for everything selected so far, replacing the displayed list
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> &[PriceRecord] {
        let filter = self.selection.pricing_filter();
        debug!(filter = %filter, "Submitting price query");
        self.prices = self.fetch(&filter).await;
        &self.prices
    }

    /// The fetch that would fill `level`'s candidates, or `None` when an
    /// ancestor of `level` is still empty.
    pub fn plan_candidates(&self, level: Level) -> Option<CandidateRequest> {
        self.selection.is_reachable(level).then(|| CandidateRequest {
            level,
            filter: self.selection.ancestor_filter(level),
        })
    }

    /// Store fetched candidates for `level`.
    ///
    /// Responses are applied in arrival order, not request order: nothing
    /// ties them to the selection that produced the request.
    pub fn apply_candidates(&mut self, level: Level, candidates: Vec<String>) {
        debug!(level = %level, count = candidates.len(), "Applying candidates");
        self.selection.set_candidates(level, candidates);
    }

    async fn run_candidates(&mut self, request: CandidateRequest) {
        let items = self.fetch(&request.filter).await;
        let candidates = distinct_values(&items, request.level.field());
        self.apply_candidates(request.level, candidates);
    }

    async fn fetch(&mut self, filter: &FilterExpression) -> Vec<PriceRecord> {
        self.error = None;
        match self.api.fetch_items(filter, self.selection.currency).await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, filter = %filter, "Retail prices request failed");
                self.error = Some(FETCH_ERROR_MESSAGE.to_string());
                Vec::new()
            }
        }
    }
}
