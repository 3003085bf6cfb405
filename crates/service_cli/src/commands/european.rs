//! European command implementation
//!
//! Reports the closed-form value and Greeks of one European option together
//! with the finite-difference Delta and Gamma and their errors.

use pricer_core::types::MarketParams;
use pricer_models::instruments::{EuropeanOption, InstrumentTrait};
use tracing::info;

use super::{fmt_value, render_table};
use crate::Result;

/// Builds the report rows for one option.
pub fn report(
    option: &EuropeanOption,
    market: &MarketParams,
    step: f64,
) -> Result<Vec<Vec<String>>> {
    let greeks = option.greeks(market)?;
    let approx_delta = option.approx_delta(market, step)?;
    let approx_gamma = option.approx_gamma(market, step)?;
    let h = format!("h = {}", step);

    Ok(vec![
        vec!["Price".to_string(), fmt_value(greeks.price), String::new()],
        vec!["Delta".to_string(), fmt_value(greeks.delta), String::new()],
        vec!["Gamma".to_string(), fmt_value(greeks.gamma), String::new()],
        vec!["Theta".to_string(), fmt_value(greeks.theta), String::new()],
        vec!["Vega".to_string(), fmt_value(greeks.vega), String::new()],
        vec!["Approx Delta".to_string(), fmt_value(approx_delta), h.clone()],
        vec![
            "Delta error".to_string(),
            format!("{:.3e}", (greeks.delta - approx_delta).abs()),
            h.clone(),
        ],
        vec!["Approx Gamma".to_string(), fmt_value(approx_gamma), h.clone()],
        vec![
            "Gamma error".to_string(),
            format!("{:.3e}", (greeks.gamma - approx_gamma).abs()),
            h,
        ],
    ])
}

/// Run the european command
pub fn run(option: &EuropeanOption, market: &MarketParams, step: f64) -> Result<()> {
    info!(
        option_type = %option.option_type(),
        strike = option.strike(),
        maturity = option.maturity(),
        spot = market.spot(),
        volatility = market.volatility(),
        rate = market.rate(),
        carry = market.carry(),
        "Pricing European option"
    );

    let rows = report(option, market, step)?;
    println!("\n{} {}", option.option_type(), option.type_name());
    print!("{}", render_table(&["Measure", "Value", "Note"], &rows));

    info!("European report complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use approx::assert_relative_eq;
    use pricer_core::types::PricingError;
    use pricer_models::instruments::OptionType;

    #[test]
    fn test_report_values() {
        let market = MarketParams::new(60.0, 0.3, 0.08, 0.08).unwrap();
        let call = EuropeanOption::new(OptionType::Call, 65.0, 0.25).unwrap();
        let rows = report(&call, &market, 0.01).unwrap();

        assert_eq!(rows.len(), 9);
        assert_eq!(rows[0][0], "Price");
        let price: f64 = rows[0][1].parse().unwrap();
        assert_relative_eq!(price, 2.13337, epsilon = 1e-5);

        let delta: f64 = rows[1][1].parse().unwrap();
        let approx_delta: f64 = rows[5][1].parse().unwrap();
        assert_relative_eq!(delta, approx_delta, epsilon = 1e-5);
        assert_eq!(rows[5][2], "h = 0.01");
    }

    #[test]
    fn test_report_rejects_oversized_step() {
        let market = MarketParams::new(60.0, 0.3, 0.08, 0.08).unwrap();
        let call = EuropeanOption::new(OptionType::Call, 65.0, 0.25).unwrap();
        assert!(matches!(
            report(&call, &market, 60.0),
            Err(CliError::Pricing(PricingError::InvalidInput(_)))
        ));
    }
}
