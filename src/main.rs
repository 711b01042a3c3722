use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use finmodels::core::calculator::DEFAULT_CONFIDENCE_LEVEL;
use finmodels::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Base URL of the market data API, overrides the configured one
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for finmodels::AppCommand {
    fn from(cmd: Commands) -> finmodels::AppCommand {
        match cmd {
            Commands::Capm { tickers } => finmodels::AppCommand::Capm { tickers },
            Commands::BlackScholes {
                ticker,
                option_type,
                strike,
                maturity,
            } => finmodels::AppCommand::BlackScholes {
                ticker,
                option_type: option_type.as_str().into(),
                strike_price: strike,
                time_to_maturity: maturity,
            },
            Commands::Var {
                tickers,
                confidence,
            } => finmodels::AppCommand::Var {
                tickers,
                confidence_level: confidence,
            },
            Commands::ModelState => finmodels::AppCommand::ModelState,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// CAPM alpha for one or more tickers
    Capm {
        #[arg(required = true)]
        tickers: Vec<String>,
    },
    /// Black-Scholes price of a European option
    BlackScholes {
        ticker: String,
        /// "call" prices a call, any other value prices a put
        #[arg(long, default_value = "call")]
        option_type: String,
        /// Strike price
        #[arg(long)]
        strike: f64,
        /// Time to maturity in years
        #[arg(long)]
        maturity: f64,
    },
    /// Historical simulation Value-at-Risk for one or more tickers
    Var {
        #[arg(required = true)]
        tickers: Vec<String>,
        /// Confidence level in (0, 1)
        #[arg(long, default_value_t = DEFAULT_CONFIDENCE_LEVEL)]
        confidence: f64,
    },
    /// Show the risk-free rate and market return used by the models
    ModelState,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => finmodels::cli::setup::setup(),
        Some(cmd) => {
            finmodels::run_command(
                cmd.into(),
                cli.config_path.as_deref(),
                cli.api_url.as_deref(),
            )
            .await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
