//! Statistics helpers shared by the pricing models.

use super::data::TRADING_DAYS;
use super::error::{ModelError, ModelResult};

/// Standard normal cumulative distribution function.
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + libm::erf(x / 2.0_f64.sqrt()))
}

/// Log returns of a newest-first price series: `r[i] = ln(p[i] / p[i + 1])`.
///
/// Needs at least two prices, all strictly positive.
pub fn log_returns(prices: &[f64]) -> ModelResult<Vec<f64>> {
    if prices.len() < 2 {
        return Err(ModelError::InsufficientData {
            required: 2,
            actual: prices.len(),
        });
    }
    if let Some(bad) = prices.iter().find(|p| !(p.is_finite() && **p > 0.0)) {
        return Err(ModelError::NumericDomain(format!(
            "log return of non-positive price {bad}"
        )));
    }

    Ok(prices.windows(2).map(|w| (w[0] / w[1]).ln()).collect())
}

/// Population (ddof = 0) standard deviation.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Volatility of daily log returns scaled to one trading year.
pub fn annualized_volatility(returns: &[f64]) -> f64 {
    population_std_dev(returns) * (TRADING_DAYS as f64).sqrt()
}
