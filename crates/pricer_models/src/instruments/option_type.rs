//! Option type (Call/Put) definitions.

use std::fmt;
use std::str::FromStr;

use super::error::InstrumentError;

/// Right conferred by an option.
///
/// Constructed from `'C'`/`'P'` (or `"call"`/`"put"`); anything else is a
/// construction error, never a silent default.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionType;
///
/// assert_eq!(OptionType::from_char('C').unwrap(), OptionType::Call);
/// assert_eq!("put".parse::<OptionType>().unwrap(), OptionType::Put);
/// assert!(OptionType::from_char('X').is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy at the strike
    Call,
    /// Right to sell at the strike
    Put,
}

impl OptionType {
    /// Parses the one-letter code (`'C'`/`'c'` or `'P'`/`'p'`).
    ///
    /// # Errors
    /// `InstrumentError::InvalidOptionType` for any other character.
    pub fn from_char(code: char) -> Result<Self, InstrumentError> {
        match code {
            'C' | 'c' => Ok(OptionType::Call),
            'P' | 'p' => Ok(OptionType::Put),
            other => Err(InstrumentError::InvalidOptionType {
                value: other.to_string(),
            }),
        }
    }

    /// Maps a scenario-row sign to an option type.
    ///
    /// Exactly `+1` is a call; every other value is a put.
    #[inline]
    pub fn from_sign(sign: f64) -> Self {
        if sign == 1.0 {
            OptionType::Call
        } else {
            OptionType::Put
        }
    }

    /// +1 for a call, -1 for a put.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Value of immediate exercise: max(±(S - K), 0).
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        (self.sign() * (spot - strike)).max(0.0)
    }

    /// Lowercase name for messages.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "call" => Ok(OptionType::Call),
            "p" | "put" => Ok(OptionType::Put),
            _ => Err(InstrumentError::InvalidOptionType {
                value: s.to_string(),
            }),
        }
    }
}
