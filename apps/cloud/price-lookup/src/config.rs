//! Configuration for the price lookup CLI

use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_parse};
use domain_retail_prices::{DEFAULT_ENDPOINT, RetailPricesConfig};

#[derive(Debug, Clone)]
pub struct Config {
    pub retail_prices: RetailPricesConfig,
}

impl FromEnv for Config {
    /// Reads:
    /// - RETAIL_PRICES_URL: defaults to the public Azure endpoint
    /// - RETAIL_PRICES_API_VERSION: optional `api-version` parameter
    /// - RETAIL_PRICES_MAX_PAGES: pages followed per request, defaults to 1
    fn from_env() -> Result<Self, ConfigError> {
        let max_pages = env_parse::<u32>("RETAIL_PRICES_MAX_PAGES", 1)?;
        if max_pages == 0 {
            return Err(ConfigError::ParseError {
                key: "RETAIL_PRICES_MAX_PAGES".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        Ok(Config {
            retail_prices: RetailPricesConfig {
                endpoint: env_or_default("RETAIL_PRICES_URL", DEFAULT_ENDPOINT),
                api_version: env_optional("RETAIL_PRICES_API_VERSION"),
                max_pages,
            },
        })
    }
}
