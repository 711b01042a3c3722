//! Closed-form pricing and risk formulas.
//!
//! These functions are pure: every market input is passed in explicitly, so
//! they can be evaluated without a data provider.
use super::error::{ModelError, ModelResult};
use super::stats::norm_cdf;
use std::fmt::Display;
use std::str::FromStr;
use tracing::warn;

/// Slack added before flooring the VaR position so that products such as
/// `(1 - 0.8) * 5` land on the intended integer.
const INDEX_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Call,
    Put,
}

impl Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                OptionType::Call => "call",
                OptionType::Put => "put",
            }
        )
    }
}

/// Only the exact label `call` selects a call; every other label prices a put.
impl From<&str> for OptionType {
    fn from(label: &str) -> Self {
        match label {
            "call" => OptionType::Call,
            "put" => OptionType::Put,
            other => {
                warn!(option_type = %other, "Unrecognised option type, pricing as put");
                OptionType::Put
            }
        }
    }
}

impl FromStr for OptionType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(OptionType::from(s))
    }
}

/// CAPM alpha: the realised return minus `beta * (market_return - risk_free)`.
pub fn capm_alpha(beta: f64, real_return: f64, market_return: f64, risk_free: f64) -> f64 {
    let theoretical = beta * (market_return - risk_free);
    real_return - theoretical
}

/// Black-Scholes price of a European option.
///
/// `risk_free` and `sigma` are annualised, `maturity` is in years.
///
/// # Errors
/// `NumericDomain` when the formula is undefined: zero or negative
/// volatility, maturity, spot or strike, or a non-finite result.
#[allow(non_snake_case)]
pub fn black_scholes_price(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    risk_free: f64,
    sigma: f64,
    maturity: f64,
) -> ModelResult<f64> {
    if !(sigma > 0.0) {
        return Err(ModelError::NumericDomain(format!(
            "volatility must be positive, got {sigma}"
        )));
    }
    if !(maturity > 0.0) {
        return Err(ModelError::NumericDomain(format!(
            "time to maturity must be positive, got {maturity}"
        )));
    }
    if !(strike > 0.0) || !(spot > 0.0) {
        return Err(ModelError::NumericDomain(format!(
            "spot and strike must be positive, got spot {spot} strike {strike}"
        )));
    }

    let (S, K, T, r) = (spot, strike, maturity, risk_free);
    let d1 = ((S / K).ln() + (r + 0.5 * sigma.powi(2)) * T) / (sigma * T.sqrt());
    let d2 = d1 - sigma * T.sqrt();
    let discount = (-r * T).exp();

    let price = match option_type {
        OptionType::Call => S * norm_cdf(d1) - K * discount * norm_cdf(d2),
        OptionType::Put => K * discount * norm_cdf(-d2) - S * norm_cdf(-d1),
    };

    if !price.is_finite() {
        return Err(ModelError::NumericDomain(format!(
            "option price is not finite: {price}"
        )));
    }
    Ok(price)
}

/// Historical-simulation Value-at-Risk.
///
/// Returns the log return at position `floor((1 - confidence_level) * n)` of
/// the ascending-sorted `returns`. The result is a raw return: losses are
/// negative.
///
/// # Errors
/// `InsufficientData` when the position falls past the last return (for
/// instance `confidence_level <= 0`), `NumericDomain` when it is negative or
/// the confidence level is not finite.
pub fn historical_var(returns: &[f64], confidence_level: f64) -> ModelResult<f64> {
    if !confidence_level.is_finite() {
        return Err(ModelError::NumericDomain(format!(
            "confidence level {confidence_level} is not finite"
        )));
    }

    let mut sorted = returns.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let position = ((1.0 - confidence_level) * sorted.len() as f64 + INDEX_EPSILON).floor();
    if position < 0.0 {
        return Err(ModelError::NumericDomain(format!(
            "confidence level {confidence_level} is above 1"
        )));
    }

    let index = position as usize;
    sorted
        .get(index)
        .copied()
        .ok_or(ModelError::InsufficientData {
            required: index.saturating_add(1),
            actual: sorted.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capm_alpha_literal() {
        let alpha = capm_alpha(1.2, 100.0, 0.08, 0.02);
        assert!((alpha - 99.928).abs() < 1e-9);
    }

    #[test]
    fn test_capm_alpha_zero_beta_is_real_return() {
        assert_eq!(capm_alpha(0.0, 42.0, 0.1, 0.05), 42.0);
    }

    #[test]
    fn test_black_scholes_at_the_money_reference() {
        let call = black_scholes_price(OptionType::Call, 100.0, 100.0, 0.02, 0.2, 1.0).unwrap();
        assert!((call - 8.9160).abs() < 1e-3, "call = {call}");

        let put = black_scholes_price(OptionType::Put, 100.0, 100.0, 0.02, 0.2, 1.0).unwrap();
        assert!((put - 6.9359).abs() < 1e-3, "put = {put}");
    }

    #[test]
    fn test_black_scholes_textbook_value() {
        let call = black_scholes_price(OptionType::Call, 100.0, 100.0, 0.05, 0.2, 1.0).unwrap();
        assert!((call - 10.4506).abs() < 1e-3, "call = {call}");
    }

    #[test]
    fn test_put_call_parity() {
        let (s, k, r, sigma, t) = (105.0, 95.0, 0.03, 0.25, 0.75);
        let call = black_scholes_price(OptionType::Call, s, k, r, sigma, t).unwrap();
        let put = black_scholes_price(OptionType::Put, s, k, r, sigma, t).unwrap();
        let parity = s - k * (-r * t).exp();
        assert!((call - put - parity).abs() < 1e-9);
    }

    #[test]
    fn test_black_scholes_call_vanishes_at_expiry_limit() {
        let call = black_scholes_price(OptionType::Call, 100.0, 100.0, 0.02, 0.2, 1e-8).unwrap();
        assert!((0.0..1e-3).contains(&call), "call = {call}");
    }

    #[test]
    fn test_black_scholes_call_increases_with_maturity() {
        let maturities = [0.01, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0];
        let prices: Vec<f64> = maturities
            .iter()
            .map(|t| black_scholes_price(OptionType::Call, 100.0, 100.0, 0.02, 0.2, *t).unwrap())
            .collect();
        for pair in prices.windows(2) {
            assert!(pair[1] > pair[0], "prices not increasing: {prices:?}");
        }
    }

    #[test]
    fn test_black_scholes_guards_degenerate_inputs() {
        let zero_sigma = black_scholes_price(OptionType::Call, 100.0, 100.0, 0.02, 0.0, 1.0);
        assert!(matches!(zero_sigma, Err(ModelError::NumericDomain(_))));

        let zero_maturity = black_scholes_price(OptionType::Put, 100.0, 100.0, 0.02, 0.2, 0.0);
        assert!(matches!(zero_maturity, Err(ModelError::NumericDomain(_))));

        let zero_strike = black_scholes_price(OptionType::Call, 100.0, 0.0, 0.02, 0.2, 1.0);
        assert!(matches!(zero_strike, Err(ModelError::NumericDomain(_))));

        let nan_sigma = black_scholes_price(OptionType::Call, 100.0, 100.0, 0.02, f64::NAN, 1.0);
        assert!(matches!(nan_sigma, Err(ModelError::NumericDomain(_))));
    }

    #[test]
    fn test_option_type_permissive_dispatch() {
        assert_eq!(OptionType::from("call"), OptionType::Call);
        assert_eq!(OptionType::from("put"), OptionType::Put);
        assert_eq!(OptionType::from("foo"), OptionType::Put);
        assert_eq!(OptionType::from("Call"), OptionType::Put);
        assert_eq!("call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!(OptionType::Call.to_string(), "call");
    }

    #[test]
    fn test_historical_var_literal() {
        let returns = [-0.05, -0.02, 0.01, 0.03, 0.04];
        let var = historical_var(&returns, 0.8).unwrap();
        assert_eq!(var, -0.02);
    }

    #[test]
    fn test_historical_var_sorts_returns() {
        let returns = [0.04, -0.02, 0.03, -0.05, 0.01];
        assert_eq!(historical_var(&returns, 0.8).unwrap(), -0.02);
        assert_eq!(historical_var(&returns, 0.95).unwrap(), -0.05);
        assert_eq!(historical_var(&returns, 1.0).unwrap(), -0.05);
    }

    #[test]
    fn test_historical_var_zero_confidence_is_out_of_range() {
        let returns = [-0.05, -0.02, 0.01, 0.03, 0.04];
        let result = historical_var(&returns, 0.0);
        assert!(matches!(
            result,
            Err(ModelError::InsufficientData {
                required: 6,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_historical_var_rejects_invalid_confidence() {
        let returns = [-0.05, -0.02, 0.01];
        assert!(matches!(
            historical_var(&returns, 1.5),
            Err(ModelError::NumericDomain(_))
        ));
        assert!(matches!(
            historical_var(&returns, f64::NAN),
            Err(ModelError::NumericDomain(_))
        ));
        assert!(matches!(
            historical_var(&returns, f64::INFINITY),
            Err(ModelError::NumericDomain(_))
        ));
    }

    #[test]
    fn test_historical_var_negative_confidence_is_out_of_range() {
        let returns = [-0.05, -0.02, 0.01, 0.03, 0.04];
        assert!(matches!(
            historical_var(&returns, f64::NEG_INFINITY),
            Err(ModelError::NumericDomain(_))
        ));
        assert!(matches!(
            historical_var(&returns, -1e300),
            Err(ModelError::InsufficientData {
                required: usize::MAX,
                actual: 5
            })
        ));
        assert!(matches!(
            historical_var(&returns, -1.0),
            Err(ModelError::InsufficientData {
                required: 11,
                actual: 5
            })
        ));
    }
}
