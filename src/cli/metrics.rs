use super::ui;
use crate::core::{MarketDataProvider, ModelResult, OptionType, PricingModelCalculator};
use comfy_table::Cell;
use futures::future::join_all;
use tracing::{debug, info};

/// A single computed metric, or the reason it could not be computed.
#[derive(Debug, Clone)]
pub struct MetricValue {
    pub identifier: String,
    pub value: Option<f64>,
    pub error: Option<String>,
}

impl MetricValue {
    fn from_result(identifier: &str, result: ModelResult<f64>) -> Self {
        match result {
            Ok(value) => MetricValue {
                identifier: identifier.to_string(),
                value: Some(value),
                error: None,
            },
            Err(e) => {
                debug!("Metric failed for {}: {}", identifier, e);
                MetricValue {
                    identifier: identifier.to_string(),
                    value: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct MetricReport {
    pub title: String,
    pub metric_label: String,
    pub rows: Vec<MetricValue>,
}

impl MetricReport {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        let has_errors = self.rows.iter().any(|r| r.error.is_some());

        let mut header = vec![ui::header_cell("Ticker"), ui::header_cell(&self.metric_label)];
        if has_errors {
            header.push(ui::header_cell("Error"));
        }
        table.set_header(header);

        for row in &self.rows {
            let value_cell = match row.value {
                Some(v) => ui::signed_cell(v, |v| format!("{v:.6}")),
                None => ui::na_cell(),
            };
            let mut cells = vec![Cell::new(&row.identifier), value_cell];
            if has_errors {
                cells.push(ui::error_cell(row.error.as_deref().unwrap_or("")));
            }
            table.add_row(cells);
        }

        format!("{}\n\n{}", ui::title_text(&self.title), table)
    }
}

pub fn model_state_report<P: MarketDataProvider>(
    calculator: &PricingModelCalculator<P>,
    risk_free_ticker: &str,
    market_ticker: &str,
) -> MetricReport {
    MetricReport {
        title: "Model state".to_string(),
        metric_label: "Latest price".to_string(),
        rows: vec![
            MetricValue::from_result(
                &format!("{risk_free_ticker} (risk free)"),
                Ok(calculator.risk_free()),
            ),
            MetricValue::from_result(
                &format!("{market_ticker} (market)"),
                Ok(calculator.market_return()),
            ),
        ],
    }
}

pub async fn capm_report<P: MarketDataProvider>(
    calculator: &PricingModelCalculator<P>,
    tickers: &[String],
) -> MetricReport {
    info!("Calculating CAPM alpha for {} tickers", tickers.len());

    let futures = tickers.iter().map(|ticker| async move {
        MetricValue::from_result(ticker, calculator.capm(ticker).await)
    });

    MetricReport {
        title: format!(
            "CAPM alpha (risk free {}, market {})",
            calculator.risk_free(),
            calculator.market_return()
        ),
        metric_label: "Alpha".to_string(),
        rows: join_all(futures).await,
    }
}

pub async fn black_scholes_report<P: MarketDataProvider>(
    calculator: &PricingModelCalculator<P>,
    ticker: &str,
    option_type: OptionType,
    strike_price: f64,
    time_to_maturity: f64,
) -> MetricReport {
    info!("Pricing {option_type} option on {ticker}");

    let result = calculator
        .black_scholes(ticker, option_type, strike_price, time_to_maturity)
        .await;

    MetricReport {
        title: format!(
            "Black-Scholes {option_type} (strike {strike_price}, maturity {time_to_maturity}y)"
        ),
        metric_label: "Price".to_string(),
        rows: vec![MetricValue::from_result(ticker, result)],
    }
}

pub async fn var_report<P: MarketDataProvider>(
    calculator: &PricingModelCalculator<P>,
    tickers: &[String],
    confidence_level: f64,
) -> MetricReport {
    info!(
        "Calculating historical VaR at {} for {} tickers",
        confidence_level,
        tickers.len()
    );

    let futures = tickers.iter().map(|ticker| async move {
        MetricValue::from_result(
            ticker,
            calculator
                .historical_simulation_var(ticker, confidence_level)
                .await,
        )
    });

    MetricReport {
        title: format!(
            "Historical simulation VaR ({:.2}% confidence)",
            confidence_level * 100.0
        ),
        metric_label: "VaR (log return)".to_string(),
        rows: join_all(futures).await,
    }
}
