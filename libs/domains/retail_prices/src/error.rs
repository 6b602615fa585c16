use thiserror::Error;

/// Result type for retail price operations
pub type RetailPricesResult<T> = Result<T, RetailPricesError>;

/// Errors that can occur while looking up retail prices
#[derive(Debug, Error)]
pub enum RetailPricesError {
    /// Transport-level failure (connect, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The pricing endpoint answered with a non-success status
    #[error("Retail prices API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not a price page
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// A selection was made below a level whose ancestors are empty
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Client configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RetailPricesError {
    /// Whether the error came from talking to the pricing endpoint,
    /// as opposed to a caller mistake.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            RetailPricesError::Http(_) | RetailPricesError::Status { .. } | RetailPricesError::Parse(_)
        )
    }
}
