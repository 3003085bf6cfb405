//! Scenario matrix: rows bound one-to-one to instruments.

use std::fmt;

use pricer_core::types::{MarketParams, PricingError};
use pricer_models::instruments::{Instrument, InstrumentTrait};
use tracing::{debug, warn};

use super::{BaseScenario, ScenarioError, ScenarioRow, SweepParameter};
use crate::parallel::{map_indexed, ParallelConfig};

/// Quantity computed per row by [`ScenarioMatrix::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    /// Analytic value
    Price,
    /// Analytic Delta
    Delta,
    /// Analytic Gamma
    Gamma,
    /// Central-difference Delta with spot bump `h`
    ApproxDelta {
        /// Spot bump
        h: f64,
    },
    /// Central second-difference Gamma with spot bump `h`
    ApproxGamma {
        /// Spot bump
        h: f64,
    },
    /// Analytic Theta (European rows only)
    Theta,
    /// Analytic Vega (European rows only)
    Vega,
}

impl Measure {
    /// Evaluates the measure for one instrument.
    pub fn apply(
        &self,
        instrument: &Instrument,
        market: &MarketParams,
    ) -> Result<f64, PricingError> {
        match *self {
            Measure::Price => instrument.price(market),
            Measure::Delta => instrument.delta(market),
            Measure::Gamma => instrument.gamma(market),
            Measure::ApproxDelta { h } => instrument.approx_delta(market, h),
            Measure::ApproxGamma { h } => instrument.approx_gamma(market, h),
            Measure::Theta => instrument.theta(market),
            Measure::Vega => instrument.vega(market),
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Price => write!(f, "price"),
            Measure::Delta => write!(f, "delta"),
            Measure::Gamma => write!(f, "gamma"),
            Measure::ApproxDelta { h } => write!(f, "approx_delta(h={})", h),
            Measure::ApproxGamma { h } => write!(f, "approx_gamma(h={})", h),
            Measure::Theta => write!(f, "theta"),
            Measure::Vega => write!(f, "vega"),
        }
    }
}

/// Ordered scenario rows, each bound to its own instrument.
///
/// # Invariants
/// - `rows.len() == instruments.len()`
/// - `instruments[i]` is built from the terms of `rows[i]`
/// - pairs are only appended, never removed; a rejected append leaves the
///   matrix untouched
///
/// Batch evaluators return one `Result` per row, in row order, so a bad row
/// (e.g. zero volatility) does not hide the results of the others.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionType;
/// use pricer_risk::scenarios::{ScenarioMatrix, ScenarioRow, SweepParameter};
///
/// let base = ScenarioRow::european(5.0, 0.5, 0.12, 0.12, OptionType::Call, 10.0, 1.0);
/// let spots = [5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0];
/// let matrix = ScenarioMatrix::sweep(&base, SweepParameter::Spot, &spots).unwrap();
///
/// let prices = matrix.price();
/// assert_eq!(prices.len(), 7);
/// assert!(prices.iter().all(|p| p.is_ok()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioMatrix {
    rows: Vec<ScenarioRow>,
    instruments: Vec<Instrument>,
    parallel_config: ParallelConfig,
}

impl ScenarioMatrix {
    /// Creates an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the parallel execution settings.
    pub fn with_parallel_config(mut self, config: ParallelConfig) -> Self {
        self.parallel_config = config;
        self
    }

    /// Returns the parallel execution settings.
    pub fn parallel_config(&self) -> &ParallelConfig {
        &self.parallel_config
    }

    /// Builds a matrix by sweeping one parameter of `base` over `values`.
    ///
    /// # Errors
    /// - `ScenarioError::UnsupportedSweep` for a maturity sweep on a perpetual base
    /// - `ScenarioError::Instrument` if a swept strike or maturity is invalid
    pub fn sweep(
        base: &BaseScenario,
        parameter: SweepParameter,
        values: &[f64],
    ) -> Result<Self, ScenarioError> {
        let mut matrix = Self::new();
        matrix.extend_sweep(base, parameter, values)?;
        Ok(matrix)
    }

    /// Appends a sweep to this matrix.
    ///
    /// All rows are built before any is stored, so on error the matrix is
    /// unchanged.
    pub fn extend_sweep(
        &mut self,
        base: &BaseScenario,
        parameter: SweepParameter,
        values: &[f64],
    ) -> Result<(), ScenarioError> {
        let pairs = values
            .iter()
            .map(|&value| {
                let row = base.with_parameter(parameter, value)?;
                let instrument = row.instrument()?;
                Ok((row, instrument))
            })
            .collect::<Result<Vec<_>, ScenarioError>>()
            .map_err(|err| {
                warn!(%parameter, error = %err, "rejected sweep");
                err
            })?;

        debug!(
            %parameter,
            family = base.family(),
            added = pairs.len(),
            "extending scenario matrix with sweep"
        );

        self.rows.reserve(pairs.len());
        self.instruments.reserve(pairs.len());
        for (row, instrument) in pairs {
            self.rows.push(row);
            self.instruments.push(instrument);
        }
        Ok(())
    }

    /// Appends one raw row: 6 values bind a perpetual American option,
    /// 7 values a European option.
    ///
    /// # Errors
    /// - `ScenarioError::InvalidRowLength` for any other length
    /// - `ScenarioError::Instrument` for an invalid strike or maturity
    ///
    /// # Examples
    /// ```
    /// use pricer_risk::scenarios::{ScenarioError, ScenarioMatrix};
    ///
    /// let mut matrix = ScenarioMatrix::new();
    /// matrix.append(&[110.0, 0.1, 0.1, 0.02, -1.0, 100.0]).unwrap();
    /// assert_eq!(
    ///     matrix.append(&[1.0, 2.0, 3.0]),
    ///     Err(ScenarioError::InvalidRowLength { len: 3 })
    /// );
    /// assert_eq!(matrix.len(), 1);
    /// ```
    pub fn append(&mut self, row: &[f64]) -> Result<(), ScenarioError> {
        let parsed = ScenarioRow::try_from(row).map_err(|err| {
            warn!(len = row.len(), error = %err, "rejected scenario row");
            err
        })?;
        self.push_row(parsed)
    }

    /// Appends one typed row.
    ///
    /// # Errors
    /// `ScenarioError::Instrument` for an invalid strike or maturity.
    pub fn push_row(&mut self, row: ScenarioRow) -> Result<(), ScenarioError> {
        let instrument = row.instrument().map_err(|err| {
            warn!(family = row.family(), error = %err, "rejected scenario row");
            ScenarioError::from(err)
        })?;
        self.rows.push(row);
        self.instruments.push(instrument);
        Ok(())
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the matrix has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Scenario rows, in insertion order.
    pub fn rows(&self) -> &[ScenarioRow] {
        &self.rows
    }

    /// Bound instruments, index-aligned with [`rows`](Self::rows).
    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Iterates over `(row, instrument)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&ScenarioRow, &Instrument)> {
        self.rows.iter().zip(self.instruments.iter())
    }

    /// Evaluates `measure` for every row, in row order.
    ///
    /// Runs on Rayon once the row count reaches the parallel threshold.
    pub fn evaluate(&self, measure: Measure) -> Vec<Result<f64, PricingError>> {
        let parallel = self.parallel_config.should_parallelize(self.len());
        debug!(rows = self.len(), %measure, parallel, "evaluating scenario matrix");

        map_indexed(&self.parallel_config, &self.rows, |i, row| {
            let market = row.market()?;
            measure.apply(&self.instruments[i], &market)
        })
    }

    /// Price of every row.
    pub fn price(&self) -> Vec<Result<f64, PricingError>> {
        self.evaluate(Measure::Price)
    }

    /// Delta of every row.
    pub fn delta(&self) -> Vec<Result<f64, PricingError>> {
        self.evaluate(Measure::Delta)
    }

    /// Gamma of every row.
    pub fn gamma(&self) -> Vec<Result<f64, PricingError>> {
        self.evaluate(Measure::Gamma)
    }

    /// Finite-difference Delta of every row.
    pub fn approx_delta(&self, h: f64) -> Vec<Result<f64, PricingError>> {
        self.evaluate(Measure::ApproxDelta { h })
    }

    /// Finite-difference Gamma of every row.
    pub fn approx_gamma(&self, h: f64) -> Vec<Result<f64, PricingError>> {
        self.evaluate(Measure::ApproxGamma { h })
    }

    /// Theta of every row; perpetual rows report `UnsupportedInstrument`.
    pub fn theta(&self) -> Vec<Result<f64, PricingError>> {
        self.evaluate(Measure::Theta)
    }

    /// Vega of every row; perpetual rows report `UnsupportedInstrument`.
    pub fn vega(&self) -> Vec<Result<f64, PricingError>> {
        self.evaluate(Measure::Vega)
    }
}
