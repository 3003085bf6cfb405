//! Parity command implementation
//!
//! Checks put-call parity for a call/put pair sharing strike and maturity.
//! Quoted prices may be supplied; missing ones are taken from the model.

use pricer_core::types::MarketParams;
use pricer_models::instruments::{EuropeanOption, InstrumentTrait, OptionType};
use tracing::{info, warn};

use super::{fmt_value, render_table};
use crate::{CliError, Result};

/// Parity check inputs.
///
/// Volatility is only needed to fill in a missing quote.
#[derive(Debug, Clone, Copy)]
pub struct ParityRequest {
    pub strike: f64,
    pub maturity: f64,
    pub spot: f64,
    pub rate: f64,
    pub carry: f64,
    pub volatility: Option<f64>,
    pub call_price: Option<f64>,
    pub put_price: Option<f64>,
    pub tolerance: f64,
}

impl ParityRequest {
    fn market(&self) -> Result<MarketParams> {
        let volatility = self.volatility.ok_or_else(|| {
            CliError::InvalidArgument(
                "--volatility is required unless both --call-price and --put-price are given"
                    .to_string(),
            )
        })?;
        Ok(MarketParams::new(self.spot, volatility, self.rate, self.carry)?)
    }
}

/// Outcome of a parity check.
#[derive(Debug, Clone, PartialEq)]
pub struct ParityReport {
    pub call_price: f64,
    pub put_price: f64,
    pub implied_call: f64,
    pub implied_put: f64,
    pub holds: bool,
}

/// Evaluates the parity check.
pub fn check(request: &ParityRequest) -> Result<ParityReport> {
    let call = EuropeanOption::new(OptionType::Call, request.strike, request.maturity)?;
    let put = EuropeanOption::new(OptionType::Put, request.strike, request.maturity)?;

    let call_price = match request.call_price {
        Some(price) => price,
        None => call.price(&request.market()?)?,
    };
    let put_price = match request.put_price {
        Some(price) => price,
        None => put.price(&request.market()?)?,
    };

    let forward = request.spot * ((request.carry - request.rate) * request.maturity).exp()
        - request.strike * (-request.rate * request.maturity).exp();
    if !forward.is_finite() {
        return Err(CliError::InvalidArgument(format!(
            "parity forward is not finite: S = {}, r = {}, b = {}",
            request.spot, request.rate, request.carry
        )));
    }

    Ok(ParityReport {
        call_price,
        put_price,
        implied_call: put_price + forward,
        implied_put: call_price - forward,
        holds: EuropeanOption::check_parity(
            call_price,
            put_price,
            request.strike,
            request.maturity,
            request.spot,
            request.rate,
            request.carry,
            request.tolerance,
        ),
    })
}

/// Run the parity command
pub fn run(request: &ParityRequest) -> Result<()> {
    info!(
        strike = request.strike,
        maturity = request.maturity,
        tolerance = request.tolerance,
        "Checking put-call parity"
    );

    let report = check(request)?;
    if !report.holds {
        warn!(
            call = report.call_price,
            put = report.put_price,
            "put-call parity violated"
        );
    }

    let rows = vec![
        vec![
            "Call".to_string(),
            fmt_value(report.call_price),
            fmt_value(report.implied_call),
        ],
        vec![
            "Put".to_string(),
            fmt_value(report.put_price),
            fmt_value(report.implied_put),
        ],
    ];
    print!("{}", render_table(&["Option", "Price", "Parity price"], &rows));
    println!(
        "Parity {} (tolerance {:e})",
        if report.holds { "holds" } else { "violated" },
        request.tolerance
    );

    Ok(())
}
