//! Pricer CLI - exact option prices and Greeks from the command line
//!
//! This is the operational entry point for the closed-form pricing engine.
//!
//! # Commands
//!
//! - `pricer european` - Value and Greeks of one European option
//! - `pricer perpetual` - Value, Greeks and exercise boundary of one perpetual American option
//! - `pricer parity` - Put-call parity check for a call/put pair (volatility only for missing quotes)
//! - `pricer sweep --config <file>` - Batch evaluation of a TOML-described scenario matrix
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires configuration and
//! logging around `pricer_models` and `pricer_risk`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pricer_core::types::MarketParams;
use pricer_models::instruments::{EuropeanOption, OptionType, PerpetualAmericanOption};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::{build_config, CliArgs, LogLevel};

/// Exact option pricing CLI
#[derive(Parser)]
#[command(name = "pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Spot bump for finite-difference Greeks
    #[arg(long, global = true)]
    step: Option<f64>,

    /// Row count from which sweeps are evaluated in parallel
    #[arg(long, global = true)]
    parallel_threshold: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

/// Market state shared by the single-instrument commands
#[derive(Args)]
struct MarketArgs {
    /// Spot price of the underlying
    #[arg(short, long)]
    spot: f64,

    /// Annualised volatility
    #[arg(short = 'v', long, alias = "vol")]
    volatility: f64,

    /// Risk-free rate
    #[arg(short, long, allow_negative_numbers = true)]
    rate: f64,

    /// Cost-of-carry (defaults to the rate)
    #[arg(short = 'b', long, allow_negative_numbers = true)]
    carry: Option<f64>,
}

impl MarketArgs {
    fn market(&self) -> Result<MarketParams> {
        Ok(MarketParams::new(
            self.spot,
            self.volatility,
            self.rate,
            self.carry.unwrap_or(self.rate),
        )?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European option and report its Greeks
    European {
        /// Option type (call, put, c, p)
        #[arg(short = 't', long = "type")]
        option_type: OptionType,

        /// Strike price
        #[arg(short = 'k', long)]
        strike: f64,

        /// Time to maturity in years
        #[arg(short = 'm', long)]
        maturity: f64,

        #[command(flatten)]
        market: MarketArgs,
    },

    /// Price a perpetual American option and report its Greeks
    Perpetual {
        /// Option type (call, put, c, p)
        #[arg(short = 't', long = "type")]
        option_type: OptionType,

        /// Strike price
        #[arg(short = 'k', long)]
        strike: f64,

        #[command(flatten)]
        market: MarketArgs,
    },

    /// Check put-call parity for a call/put pair
    Parity {
        /// Strike price
        #[arg(short = 'k', long)]
        strike: f64,

        /// Time to maturity in years
        #[arg(short = 'm', long)]
        maturity: f64,

        /// Quoted call price (model price if omitted)
        #[arg(long)]
        call_price: Option<f64>,

        /// Quoted put price (model price if omitted)
        #[arg(long)]
        put_price: Option<f64>,

        /// Maximum parity residual
        #[arg(long, default_value = "1e-8")]
        tolerance: f64,

        /// Spot price of the underlying
        #[arg(short, long)]
        spot: f64,

        /// Annualised volatility (only needed to price a missing quote)
        #[arg(short = 'v', long, alias = "vol")]
        volatility: Option<f64>,

        /// Risk-free rate
        #[arg(short, long, allow_negative_numbers = true)]
        rate: f64,

        /// Cost-of-carry (defaults to the rate)
        #[arg(short = 'b', long, allow_negative_numbers = true)]
        carry: Option<f64>,
    },

    /// Evaluate the scenario matrix described by the configuration file
    Sweep,
}

/// Initialise tracing, letting `RUST_LOG` take precedence over `level`
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config_file: cli.config.clone(),
        log_level: cli.log_level.clone(),
        step: cli.step,
        parallel_threshold: cli.parallel_threshold,
    };
    let config = build_config(&args)?;

    init_tracing(config.log_level);
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::European {
            option_type,
            strike,
            maturity,
            market,
        } => {
            let option = EuropeanOption::new(option_type, strike, maturity)?;
            commands::european::run(&option, &market.market()?, config.step)
        }
        Commands::Perpetual {
            option_type,
            strike,
            market,
        } => {
            let option = PerpetualAmericanOption::new(option_type, strike)?;
            commands::perpetual::run(&option, &market.market()?, config.step)
        }
        Commands::Parity {
            strike,
            maturity,
            call_price,
            put_price,
            tolerance,
            spot,
            volatility,
            rate,
            carry,
        } => {
            let request = commands::parity::ParityRequest {
                strike,
                maturity,
                spot,
                rate,
                carry: carry.unwrap_or(rate),
                volatility,
                call_price,
                put_price,
                tolerance,
            };
            commands::parity::run(&request)
        }
        Commands::Sweep => {
            if args.config_file.is_none() {
                return Err(CliError::InvalidArgument(
                    "sweep requires --config <file>".to_string(),
                ));
            }
            info!("Running scenario sweep");
            commands::sweep::run(&config)
        }
    }
}
