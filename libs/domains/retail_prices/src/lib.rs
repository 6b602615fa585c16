//! Retail Prices Domain
//!
//! Cascading price lookups against the Azure Retail Prices API.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  Controller  │  ← Selection changes, candidate fetches, price query
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │  Selection   │  ← Ordered levels, cascade reset, filter building
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │    Client    │  ← RetailPricesApi trait + reqwest implementation
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │    Models    │  ← Price records, option constants
//! └──────────────┘
//! ```

pub mod client;
pub mod controller;
pub mod error;
pub mod filter;
pub mod models;
pub mod selection;

// Re-export commonly used types
pub use client::{DEFAULT_ENDPOINT, RetailPricesApi, RetailPricesClient, RetailPricesConfig};
pub use controller::{CandidateRequest, FETCH_ERROR_MESSAGE, FilterController};
pub use error::{RetailPricesError, RetailPricesResult};
pub use filter::{FilterExpression, FilterField, quote_literal};
pub use models::{
    Currency, PriceRecord, PriceType, REGIONS, RegionOption, RetailPricePage, region_label,
};
pub use selection::{FilterSelection, Level, LevelState, distinct_values};
