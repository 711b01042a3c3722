//! Market data abstractions and wire types

use super::error::{ModelError, ModelResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Number of trading days in a year. Used both as the history window and
/// as the volatility annualisation factor.
pub const TRADING_DAYS: usize = 252;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Prices,
    Beta,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Prices => "/prices",
            Endpoint::Beta => "/beta",
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// JSON body sent to the data service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataRequest {
    pub ticker: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl DataRequest {
    pub fn new(ticker: &str) -> Self {
        DataRequest {
            ticker: ticker.to_string(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Deserialize)]
pub struct PricesResponse {
    pub prices: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct BetaResponse {
    pub beta: f64,
}

/// Source of price series and betas. Price series are newest-first.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_prices(&self, ticker: &str, limit: Option<usize>) -> ModelResult<Vec<f64>>;

    async fn fetch_beta(&self, ticker: &str) -> ModelResult<f64>;

    /// Latest price of `ticker`, i.e. the head of an unlimited price fetch.
    async fn fetch_latest_price(&self, ticker: &str) -> ModelResult<f64> {
        let prices = self.fetch_prices(ticker, None).await?;
        prices
            .first()
            .copied()
            .ok_or_else(|| ModelError::unavailable(ticker, "empty price series"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_serialization() {
        let body = serde_json::to_string(&DataRequest::new("AAPL")).unwrap();
        assert_eq!(body, r#"{"ticker":"AAPL"}"#);

        let request = DataRequest::new("AAPL").with_limit(TRADING_DAYS);
        let body = serde_json::to_string(&request).unwrap();
        assert_eq!(body, r#"{"ticker":"AAPL","limit":252}"#);
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Prices.to_string(), "/prices");
        assert_eq!(Endpoint::Beta.path(), "/beta");
    }

    struct EmptyProvider;

    #[async_trait]
    impl MarketDataProvider for EmptyProvider {
        async fn fetch_prices(
            &self,
            _ticker: &str,
            _limit: Option<usize>,
        ) -> ModelResult<Vec<f64>> {
            Ok(vec![])
        }

        async fn fetch_beta(&self, _ticker: &str) -> ModelResult<f64> {
            Ok(1.0)
        }
    }

    #[tokio::test]
    async fn test_latest_price_of_empty_series_is_unavailable() {
        let result = EmptyProvider.fetch_latest_price("AAPL").await;
        assert!(matches!(
            result,
            Err(ModelError::DataUnavailable { ref ticker, .. }) if ticker == "AAPL"
        ));
    }
}
