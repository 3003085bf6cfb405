//! One-parameter sweeps.
//!
//! A sweep takes a base scenario, varies exactly one parameter over a
//! sequence of values and holds the rest fixed.

use std::fmt;
use std::str::FromStr;

use super::{ScenarioError, ScenarioRow};

/// Template row for a sweep.
///
/// Its maturity decides the instrument family of every generated row.
pub type BaseScenario = ScenarioRow;

/// Parameter varied by a sweep.
///
/// European scenarios support all six; perpetual American scenarios have no
/// maturity and support the first five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SweepParameter {
    /// Spot price
    Spot,
    /// Volatility
    Volatility,
    /// Risk-free rate
    Rate,
    /// Cost-of-carry
    Carry,
    /// Strike
    Strike,
    /// Time to maturity (European only)
    Maturity,
}

impl SweepParameter {
    /// All parameters, in row order.
    pub const ALL: [SweepParameter; 6] = [
        SweepParameter::Spot,
        SweepParameter::Volatility,
        SweepParameter::Rate,
        SweepParameter::Carry,
        SweepParameter::Strike,
        SweepParameter::Maturity,
    ];

    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            SweepParameter::Spot => "spot",
            SweepParameter::Volatility => "volatility",
            SweepParameter::Rate => "rate",
            SweepParameter::Carry => "carry",
            SweepParameter::Strike => "strike",
            SweepParameter::Maturity => "maturity",
        }
    }
}

impl fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SweepParameter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spot" | "s" => Ok(SweepParameter::Spot),
            "volatility" | "vol" | "sigma" => Ok(SweepParameter::Volatility),
            "rate" | "r" => Ok(SweepParameter::Rate),
            "carry" | "b" => Ok(SweepParameter::Carry),
            "strike" | "k" => Ok(SweepParameter::Strike),
            "maturity" | "expiry" | "t" => Ok(SweepParameter::Maturity),
            _ => Err(format!(
                "Unknown sweep parameter: {}. Valid: spot, volatility, rate, carry, strike, maturity",
                s
            )),
        }
    }
}

impl ScenarioRow {
    /// Copy of this row with `parameter` set to `value`.
    ///
    /// # Errors
    /// `ScenarioError::UnsupportedSweep` when sweeping maturity on a
    /// perpetual row.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::OptionType;
    /// use pricer_risk::scenarios::{ScenarioRow, SweepParameter};
    ///
    /// let base = ScenarioRow::perpetual(110.0, 0.1, 0.1, 0.02, OptionType::Put, 100.0);
    /// let row = base.with_parameter(SweepParameter::Strike, 90.0).unwrap();
    /// assert_eq!(row.strike, 90.0);
    /// assert!(base.with_parameter(SweepParameter::Maturity, 1.0).is_err());
    /// ```
    pub fn with_parameter(
        &self,
        parameter: SweepParameter,
        value: f64,
    ) -> Result<ScenarioRow, ScenarioError> {
        let mut row = *self;
        match parameter {
            SweepParameter::Spot => row.spot = value,
            SweepParameter::Volatility => row.volatility = value,
            SweepParameter::Rate => row.rate = value,
            SweepParameter::Carry => row.carry = value,
            SweepParameter::Strike => row.strike = value,
            SweepParameter::Maturity => {
                if self.is_perpetual() {
                    return Err(ScenarioError::UnsupportedSweep {
                        parameter,
                        instrument: self.family(),
                    });
                }
                row.maturity = Some(value);
            }
        }
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_models::instruments::OptionType;

    fn european() -> BaseScenario {
        ScenarioRow::european(5.0, 0.5, 0.12, 0.12, OptionType::Call, 10.0, 1.0)
    }

    #[test]
    fn test_each_parameter_lands_in_its_slot() {
        let base = european();
        for (slot, parameter) in SweepParameter::ALL.iter().enumerate() {
            let row = base.with_parameter(*parameter, 42.0).unwrap();
            let values = row.to_vec();
            for (i, value) in values.iter().enumerate() {
                // Slot 4 is the sign, so parameters after it shift by one
                let target = if slot < 4 { slot } else { slot + 1 };
                if i == target {
                    assert_eq!(*value, 42.0, "{} not set", parameter);
                } else {
                    assert_eq!(*value, base.to_vec()[i], "{} leaked into slot {}", parameter, i);
                }
            }
        }
    }

    #[test]
    fn test_maturity_sweep_rejected_for_perpetual() {
        let base = ScenarioRow::perpetual(110.0, 0.1, 0.1, 0.02, OptionType::Put, 100.0);
        assert_eq!(
            base.with_parameter(SweepParameter::Maturity, 1.0),
            Err(ScenarioError::UnsupportedSweep {
                parameter: SweepParameter::Maturity,
                instrument: "perpetual American",
            })
        );
        for parameter in &SweepParameter::ALL[..5] {
            assert!(base.with_parameter(*parameter, 1.0).is_ok());
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Spot".parse::<SweepParameter>(), Ok(SweepParameter::Spot));
        assert_eq!("vol".parse::<SweepParameter>(), Ok(SweepParameter::Volatility));
        assert_eq!("expiry".parse::<SweepParameter>(), Ok(SweepParameter::Maturity));
        assert!("dividend".parse::<SweepParameter>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for parameter in SweepParameter::ALL {
            assert_eq!(parameter.to_string().parse::<SweepParameter>(), Ok(parameter));
        }
    }
}
