pub mod cli;
pub mod core;
pub mod providers;

use crate::core::{OptionType, PricingModelCalculator, config::AppConfig};
use anyhow::{Context, Result};
use providers::HttpDataProvider;
use std::time::Duration;
use tracing::{debug, info};

/// Commands that need the data service.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Capm {
        tickers: Vec<String>,
    },
    BlackScholes {
        ticker: String,
        option_type: OptionType,
        strike_price: f64,
        time_to_maturity: f64,
    },
    Var {
        tickers: Vec<String>,
        confidence_level: f64,
    },
    ModelState,
}

/// Resolves the configuration: an explicit file wins, then the API URL
/// alone, then the default config location. `api_url` always overrides the
/// configured base URL.
pub fn resolve_config(config_path: Option<&str>, api_url: Option<&str>) -> Result<AppConfig> {
    let mut config = match (config_path, api_url) {
        (Some(path), _) => AppConfig::load_from_path(path)?,
        (None, Some(url)) => AppConfig::with_base_url(url),
        (None, None) => AppConfig::load()?,
    };
    if let Some(url) = api_url {
        config.api.base_url = url.to_string();
    }
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

/// Runs `command` and returns the rendered report.
pub async fn execute(command: AppCommand, config: &AppConfig) -> Result<String> {
    let provider = HttpDataProvider::with_timeout(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
    )?;

    let spinner = cli::ui::new_spinner("Loading risk-free rate and market return...");
    let calculator = PricingModelCalculator::with_proxies(
        provider,
        &config.proxies.risk_free,
        &config.proxies.market,
    )
    .await;
    spinner.finish_and_clear();
    let calculator = calculator.context("Failed to initialise pricing models")?;

    let report = match command {
        AppCommand::Capm { tickers } => cli::metrics::capm_report(&calculator, &tickers).await,
        AppCommand::BlackScholes {
            ticker,
            option_type,
            strike_price,
            time_to_maturity,
        } => {
            cli::metrics::black_scholes_report(
                &calculator,
                &ticker,
                option_type,
                strike_price,
                time_to_maturity,
            )
            .await
        }
        AppCommand::Var {
            tickers,
            confidence_level,
        } => cli::metrics::var_report(&calculator, &tickers, confidence_level).await,
        AppCommand::ModelState => cli::metrics::model_state_report(
            &calculator,
            &config.proxies.risk_free,
            &config.proxies.market,
        ),
    };

    Ok(report.display_as_table())
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    api_url: Option<&str>,
) -> Result<()> {
    info!("finmodels starting...");

    let config = resolve_config(config_path, api_url)?;
    let output = execute(command, &config).await?;
    println!("{output}");
    Ok(())
}
