//! Pricing model calculator backed by a market data provider.
use super::data::{MarketDataProvider, TRADING_DAYS};
use super::error::ModelResult;
use super::models::{self, OptionType};
use super::stats;
use futures::future::try_join;
use tracing::{debug, instrument};

pub const DEFAULT_RISK_FREE_TICKER: &str = "^IRX";
pub const DEFAULT_MARKET_TICKER: &str = "NQ=F";
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Computes CAPM alpha, Black-Scholes prices and historical VaR.
///
/// The risk-free rate and market return are read once when the calculator
/// is built and stay fixed for its lifetime. Everything else is fetched
/// fresh on each call.
pub struct PricingModelCalculator<P: MarketDataProvider> {
    provider: P,
    risk_free: f64,
    market_return: f64,
}

impl<P: MarketDataProvider> PricingModelCalculator<P> {
    /// Builds a calculator using the default risk-free (`^IRX`) and market
    /// (`NQ=F`) proxy tickers.
    pub async fn new(provider: P) -> ModelResult<Self> {
        Self::with_proxies(provider, DEFAULT_RISK_FREE_TICKER, DEFAULT_MARKET_TICKER).await
    }

    pub async fn with_proxies(
        provider: P,
        risk_free_ticker: &str,
        market_ticker: &str,
    ) -> ModelResult<Self> {
        let (risk_free, market_return) = try_join(
            provider.fetch_latest_price(risk_free_ticker),
            provider.fetch_latest_price(market_ticker),
        )
        .await?;
        debug!(risk_free, market_return, "Loaded model state");

        Ok(PricingModelCalculator {
            provider,
            risk_free,
            market_return,
        })
    }

    pub fn risk_free(&self) -> f64 {
        self.risk_free
    }

    pub fn market_return(&self) -> f64 {
        self.market_return
    }

    #[instrument(name = "Capm", skip(self))]
    pub async fn capm(&self, ticker: &str) -> ModelResult<f64> {
        let beta = self.provider.fetch_beta(ticker).await?;
        let real_return = self.provider.fetch_latest_price(ticker).await?;

        let alpha = models::capm_alpha(beta, real_return, self.market_return, self.risk_free);
        debug!(beta, real_return, alpha, "Computed CAPM alpha");
        Ok(alpha)
    }

    #[instrument(name = "BlackScholes", skip(self))]
    pub async fn black_scholes(
        &self,
        ticker: &str,
        option_type: OptionType,
        strike_price: f64,
        time_to_maturity: f64,
    ) -> ModelResult<f64> {
        let sigma = self.volatility(ticker).await?;
        let spot = self.provider.fetch_latest_price(ticker).await?;

        let price = models::black_scholes_price(
            option_type,
            spot,
            strike_price,
            self.risk_free,
            sigma,
            time_to_maturity,
        )?;
        debug!(spot, sigma, price, "Computed option price");
        Ok(price)
    }

    #[instrument(name = "HistoricalVaR", skip(self))]
    pub async fn historical_simulation_var(
        &self,
        ticker: &str,
        confidence_level: f64,
    ) -> ModelResult<f64> {
        let returns = self.yearly_log_returns(ticker).await?;
        let var = models::historical_var(&returns, confidence_level)?;
        debug!(observations = returns.len(), var, "Computed historical VaR");
        Ok(var)
    }

    /// Annualised volatility of the last trading year of `ticker`.
    pub async fn volatility(&self, ticker: &str) -> ModelResult<f64> {
        let returns = self.yearly_log_returns(ticker).await?;
        Ok(stats::annualized_volatility(&returns))
    }

    async fn yearly_log_returns(&self, ticker: &str) -> ModelResult<Vec<f64>> {
        let prices = self.provider.fetch_prices(ticker, Some(TRADING_DAYS)).await?;
        stats::log_returns(&prices)
    }
}
