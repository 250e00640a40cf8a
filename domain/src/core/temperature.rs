//! Sampling temperature value object

use super::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// Sampling temperature in `[0.0, 1.0]` (Value Object)
///
/// `0.0` is the most deterministic setting, `1.0` the most creative. A
/// temperature is fixed for the lifetime of an LLM client and applies to
/// every agent invocation in a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Temperature(f64);

impl Temperature {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 1.0;

    /// Create a temperature, rejecting NaN and values outside the range.
    pub fn new(value: f64) -> Result<Self, ConfigurationError> {
        if value.is_nan() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ConfigurationError::TemperatureOutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self(0.0)
    }
}

impl TryFrom<f64> for Temperature {
    type Error = ConfigurationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Temperature> for f64 {
    fn from(t: Temperature) -> Self {
        t.0
    }
}

impl std::fmt::Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(Temperature::new(0.0).unwrap().value(), 0.0);
        assert_eq!(Temperature::new(1.0).unwrap().value(), 1.0);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(
            Temperature::new(1.5),
            Err(ConfigurationError::TemperatureOutOfRange(1.5))
        );
        assert!(Temperature::new(-0.1).is_err());
        assert!(Temperature::new(f64::NAN).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Temperature = serde_json::from_str("0.7").unwrap();
        assert_eq!(ok.value(), 0.7);
        assert!(serde_json::from_str::<Temperature>("2.0").is_err());
    }
}
