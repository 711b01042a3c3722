use crate::core::data::{BetaResponse, DataRequest, Endpoint, MarketDataProvider, PricesResponse};
use crate::core::error::{ModelError, ModelResult};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, instrument};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Market data provider speaking JSON over HTTP POST.
pub struct HttpDataProvider {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDataProvider {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("finmodels/1.0")
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(HttpDataProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn post<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        request: &DataRequest,
    ) -> ModelResult<T> {
        let ticker = request.ticker.as_str();
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(body = ?request, "Posting data request to {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let kind = if e.is_timeout() { "Timeout" } else { "Request error" };
                ModelError::unavailable(ticker, format!("{kind}: {e} URL: {url}"))
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            ModelError::unavailable(ticker, format!("Failed to read response body: {e}"))
        })?;

        if status != StatusCode::OK {
            error!(%status, response = %text, "Failed to request data from API");
            return Err(ModelError::unavailable(ticker, format!("HTTP error: {status}")));
        }

        serde_json::from_str(&text).map_err(|e| {
            error!(error = ?e, response = %text, "Failed to parse data response");
            ModelError::unavailable(
                ticker,
                format!("Failed to parse JSON response from {endpoint}: {e}"),
            )
        })
    }
}

#[async_trait]
impl MarketDataProvider for HttpDataProvider {
    #[instrument(name = "PriceFetch", skip(self), fields(ticker = %ticker))]
    async fn fetch_prices(&self, ticker: &str, limit: Option<usize>) -> ModelResult<Vec<f64>> {
        let request = match limit {
            Some(limit) => DataRequest::new(ticker).with_limit(limit),
            None => DataRequest::new(ticker),
        };

        let data: PricesResponse = self.post(Endpoint::Prices, &request).await?;
        debug!(count = data.prices.len(), "Received price series");
        Ok(data.prices)
    }

    #[instrument(name = "BetaFetch", skip(self), fields(ticker = %ticker))]
    async fn fetch_beta(&self, ticker: &str) -> ModelResult<f64> {
        let data: BetaResponse = self.post(Endpoint::Beta, &DataRequest::new(ticker)).await?;
        Ok(data.beta)
    }
}
