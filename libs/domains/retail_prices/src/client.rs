//! Azure Retail Prices client
//!
//! https://learn.microsoft.com/en-us/rest/api/cost-management/retail-prices/azure-retail-prices

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::error::{RetailPricesError, RetailPricesResult};
use crate::filter::{FilterExpression, quote_literal};
use crate::models::{Currency, PriceRecord, RetailPricePage};

/// Azure Retail Prices API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://prices.azure.com/api/retail/prices";

/// Source of price records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RetailPricesApi: Send + Sync {
    /// Fetch the records matching `filter`, priced in `currency`.
    ///
    /// An empty filter fetches the unfiltered item set.
    async fn fetch_items(
        &self,
        filter: &FilterExpression,
        currency: Currency,
    ) -> RetailPricesResult<Vec<PriceRecord>>;
}

/// Settings for [`RetailPricesClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetailPricesConfig {
    /// Endpoint URL, may already carry query parameters
    pub endpoint: String,
    /// Sent as `api-version` when set
    pub api_version: Option<String>,
    /// Upper bound on `NextPageLink` pages followed per request, at least 1
    pub max_pages: u32,
}

impl Default for RetailPricesConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_version: None,
            max_pages: 1,
        }
    }
}

/// HTTP client for the retail prices endpoint
#[derive(Debug, Clone)]
pub struct RetailPricesClient {
    client: Client,
    config: RetailPricesConfig,
}

impl RetailPricesClient {
    pub fn new(config: RetailPricesConfig) -> RetailPricesResult<Self> {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: RetailPricesConfig) -> RetailPricesResult<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(RetailPricesError::InvalidConfig(
                "endpoint must not be empty".to_string(),
            ));
        }
        if config.max_pages == 0 {
            return Err(RetailPricesError::InvalidConfig(
                "max_pages must be at least 1".to_string(),
            ));
        }
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RetailPricesConfig {
        &self.config
    }

    /// URL of the first page for a query
    pub fn request_url(&self, filter: &FilterExpression, currency: Currency) -> String {
        let mut params = Vec::new();
        if let Some(version) = &self.config.api_version {
            params.push(format!("api-version={}", urlencoding::encode(version)));
        }
        if !currency.is_api_default() {
            params.push(format!(
                "currencyCode={}",
                urlencoding::encode(&quote_literal(&currency.to_string()))
            ));
        }
        if let Some(expression) = filter.to_query_value() {
            params.push(format!("$filter={}", urlencoding::encode(&expression)));
        }

        if params.is_empty() {
            return self.config.endpoint.clone();
        }
        let separator = if self.config.endpoint.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.config.endpoint, separator, params.join("&"))
    }

    async fn fetch_page(&self, url: &str) -> RetailPricesResult<RetailPricePage> {
        debug!(url = url, "Fetching retail price page");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RetailPricesError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| RetailPricesError::Parse(e.to_string()))
    }
}

#[async_trait]
impl RetailPricesApi for RetailPricesClient {
    #[instrument(skip_all, fields(filter = %filter, currency = %currency))]
    async fn fetch_items(
        &self,
        filter: &FilterExpression,
        currency: Currency,
    ) -> RetailPricesResult<Vec<PriceRecord>> {
        let mut url = self.request_url(filter, currency);
        let mut items = Vec::new();
        let mut pages = 0;

        loop {
            let page = self.fetch_page(&url).await?;
            pages += 1;
            items.extend(page.items);

            match page.next_page_link {
                Some(next) if !next.is_empty() && pages < self.config.max_pages => url = next,
                Some(next) if !next.is_empty() => {
                    debug!(pages = pages, next = %next, "Page limit reached, not following NextPageLink");
                    break;
                }
                _ => break,
            }
        }

        info!(count = items.len(), pages = pages, "Fetched retail prices");
        Ok(items)
    }
}
