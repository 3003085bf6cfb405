//! Perpetual command implementation

use pricer_core::types::MarketParams;
use pricer_models::instruments::{InstrumentTrait, OptionType, PerpetualAmericanOption};
use tracing::info;

use super::{fmt_value, render_table};
use crate::Result;

/// Builds the report rows for one perpetual American option.
pub fn report(
    option: &PerpetualAmericanOption,
    market: &MarketParams,
    step: f64,
) -> Result<Vec<Vec<String>>> {
    let boundary = option.exercise_boundary(market)?;
    let exercised = match option.option_type() {
        OptionType::Call => market.spot() >= boundary,
        OptionType::Put => market.spot() <= boundary,
    };
    let region = if exercised { "exercise" } else { "continuation" };

    let price = option.price(market)?;
    let delta = option.delta(market)?;
    let gamma = option.gamma(market)?;
    let approx_delta = option.approx_delta(market, step)?;
    let approx_gamma = option.approx_gamma(market, step)?;
    let h = format!("h = {}", step);

    Ok(vec![
        vec!["Exercise boundary".to_string(), fmt_value(boundary), region.to_string()],
        vec!["Price".to_string(), fmt_value(price), String::new()],
        vec!["Delta".to_string(), fmt_value(delta), String::new()],
        vec!["Gamma".to_string(), fmt_value(gamma), String::new()],
        vec!["Approx Delta".to_string(), fmt_value(approx_delta), h.clone()],
        vec![
            "Delta error".to_string(),
            format!("{:.3e}", (delta - approx_delta).abs()),
            h.clone(),
        ],
        vec!["Approx Gamma".to_string(), fmt_value(approx_gamma), h.clone()],
        vec![
            "Gamma error".to_string(),
            format!("{:.3e}", (gamma - approx_gamma).abs()),
            h,
        ],
    ])
}

/// Run the perpetual command
pub fn run(option: &PerpetualAmericanOption, market: &MarketParams, step: f64) -> Result<()> {
    info!(
        option_type = %option.option_type(),
        strike = option.strike(),
        spot = market.spot(),
        volatility = market.volatility(),
        rate = market.rate(),
        carry = market.carry(),
        "Pricing perpetual American option"
    );

    let rows = report(option, market, step)?;
    println!("\n{} {}", option.option_type(), option.type_name());
    print!("{}", render_table(&["Measure", "Value", "Note"], &rows));

    info!("Perpetual report complete");
    Ok(())
}
