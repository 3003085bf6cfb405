//! Sweep command implementation
//!
//! Builds a scenario matrix from the `[[sweep]]` and `[[row]]` tables of the
//! configuration and evaluates it in one batch per measure.

use pricer_core::types::PricingError;
use pricer_risk::parallel::ParallelConfig;
use pricer_risk::scenarios::{ScenarioMatrix, ScenarioRow};
use tracing::{info, warn};

use super::{fmt_value, render_table};
use crate::config::CliConfig;
use crate::{CliError, Result};

const HEADERS: [&str; 13] = [
    "#", "Family", "Type", "S", "σ", "r", "b", "K", "T", "Price", "Delta", "Gamma",
    "Approx Δ / Γ",
];

/// Builds the scenario matrix described by `config`.
///
/// Sweeps are added first, in file order, followed by the raw rows.
pub fn build_matrix(config: &CliConfig) -> Result<ScenarioMatrix> {
    if config.sweeps.is_empty() && config.rows.is_empty() {
        return Err(CliError::InvalidArgument(
            "configuration has no [[sweep]] or [[row]] entries".to_string(),
        ));
    }

    let mut matrix = ScenarioMatrix::new().with_parallel_config(
        ParallelConfig::default().with_parallel_threshold(config.parallel_threshold),
    );
    for (index, sweep) in config.sweeps.iter().enumerate() {
        let points = sweep.points(index)?;
        matrix.extend_sweep(&sweep.base(), sweep.parameter, &points)?;
    }
    for row in &config.rows {
        matrix.append(&row.values)?;
    }
    Ok(matrix)
}

fn cell(result: &std::result::Result<f64, PricingError>) -> String {
    match result {
        Ok(value) => fmt_value(*value),
        Err(_) => "error".to_string(),
    }
}

/// Evaluates every row of `matrix` and lays the results out as table rows.
pub fn report(matrix: &ScenarioMatrix, step: f64) -> Vec<Vec<String>> {
    let prices = matrix.price();
    let deltas = matrix.delta();
    let gammas = matrix.gamma();
    let approx_deltas = matrix.approx_delta(step);
    let approx_gammas = matrix.approx_gamma(step);

    matrix
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row): (usize, &ScenarioRow)| {
            for (measure, result) in [
                ("price", &prices[i]),
                ("delta", &deltas[i]),
                ("gamma", &gammas[i]),
                ("approx delta", &approx_deltas[i]),
                ("approx gamma", &approx_gammas[i]),
            ] {
                if let Err(err) = result {
                    warn!(row = i, measure, error = %err, "scenario evaluation failed");
                }
            }

            vec![
                i.to_string(),
                row.family().to_string(),
                row.option_type.to_string(),
                row.spot.to_string(),
                row.volatility.to_string(),
                row.rate.to_string(),
                row.carry.to_string(),
                row.strike.to_string(),
                row.maturity.map_or_else(|| "∞".to_string(), |t| t.to_string()),
                cell(&prices[i]),
                cell(&deltas[i]),
                cell(&gammas[i]),
                format!("{} / {}", cell(&approx_deltas[i]), cell(&approx_gammas[i])),
            ]
        })
        .collect()
}

/// Run the sweep command
pub fn run(config: &CliConfig) -> Result<()> {
    info!(
        sweeps = config.sweeps.len(),
        rows = config.rows.len(),
        step = config.step,
        parallel_threshold = config.parallel_threshold,
        "Building scenario matrix"
    );

    let matrix = build_matrix(config)?;
    let table = report(&matrix, config.step);
    let failed = table.iter().filter(|row| row.iter().any(|c| c.contains("error"))).count();

    print!("{}", render_table(&HEADERS, &table));
    println!("{} scenarios, {} with errors (h = {})", matrix.len(), failed, config.step);

    info!(scenarios = matrix.len(), failed, "Sweep complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RowSpec, SweepSpec};
    use approx::assert_relative_eq;
    use pricer_models::instruments::OptionType;
    use pricer_risk::scenarios::{ScenarioError, SweepParameter};

    fn spot_sweep() -> SweepSpec {
        SweepSpec {
            parameter: SweepParameter::Spot,
            spot: 100.0,
            volatility: 0.3,
            rate: 0.08,
            carry: 0.08,
            option_type: OptionType::Call,
            strike: 100.0,
            maturity: Some(0.25),
            values: Some(vec![90.0, 100.0, 110.0]),
            mesh: None,
        }
    }

    #[test]
    fn test_build_matrix_sweeps_then_rows() {
        let config = CliConfig {
            sweeps: vec![spot_sweep()],
            rows: vec![RowSpec {
                values: vec![110.0, 0.1, 0.1, 0.02, -1.0, 100.0],
            }],
            ..Default::default()
        };
        let matrix = build_matrix(&config).unwrap();
        assert_eq!(matrix.len(), 4);
        assert_eq!(matrix.rows()[1].spot, 100.0);
        assert!(matrix.rows()[3].is_perpetual());
        assert_eq!(matrix.parallel_config().parallel_threshold, config.parallel_threshold);
    }

    #[test]
    fn test_empty_configuration_rejected() {
        assert!(matches!(
            build_matrix(&CliConfig::default()),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_bad_row_rejected() {
        let config = CliConfig {
            rows: vec![RowSpec {
                values: vec![1.0, 2.0, 3.0],
            }],
            ..Default::default()
        };
        assert!(matches!(
            build_matrix(&config),
            Err(CliError::Scenario(ScenarioError::InvalidRowLength { len: 3 }))
        ));
    }

    #[test]
    fn test_report_marks_failed_rows() {
        let mut matrix = ScenarioMatrix::new();
        matrix.append(&[60.0, 0.3, 0.08, 0.08, 1.0, 65.0, 0.25]).unwrap();
        // Zero volatility is only rejected when the row is evaluated
        matrix.append(&[60.0, 0.0, 0.08, 0.08, 1.0, 65.0, 0.25]).unwrap();

        let table = report(&matrix, 0.01);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].len(), HEADERS.len());

        let price: f64 = table[0][9].parse().unwrap();
        assert_relative_eq!(price, 2.13337, epsilon = 1e-5);
        assert_eq!(table[1][9], "error");
        assert_eq!(table[1][12], "error / error");
    }

    #[test]
    fn test_report_perpetual_maturity_column() {
        let mut matrix = ScenarioMatrix::new();
        matrix.append(&[110.0, 0.1, 0.1, 0.02, -1.0, 100.0]).unwrap();
        let table = report(&matrix, 0.01);
        assert_eq!(table[0][1], "perpetual American");
        assert_eq!(table[0][2], "Put");
        assert_eq!(table[0][8], "∞");
    }
}
