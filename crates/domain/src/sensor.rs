//! One temperature/humidity sample from the growbox.

use serde::{Deserialize, Serialize};

use crate::error::{GrowboxError, ValidationError};
use crate::time::Timestamp;

/// An append-only temperature/humidity sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    pub timestamp: Timestamp,
}

impl SensorReading {
    /// Create a reading recorded at `timestamp` after validating the values.
    ///
    /// # Errors
    ///
    /// Returns [`GrowboxError::Validation`] when a value is not finite or the
    /// humidity falls outside `0..=100`.
    pub fn new(temperature: f64, humidity: f64, timestamp: Timestamp) -> Result<Self, GrowboxError> {
        let reading = Self {
            temperature,
            humidity,
            timestamp,
        };
        reading.validate()?;
        Ok(reading)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// See [`SensorReading::new`].
    pub fn validate(&self) -> Result<(), GrowboxError> {
        if !self.temperature.is_finite() {
            return Err(ValidationError::NonFiniteReading {
                field: "temperature",
            }
            .into());
        }
        if !self.humidity.is_finite() {
            return Err(ValidationError::NonFiniteReading { field: "humidity" }.into());
        }
        if !(0.0..=100.0).contains(&self.humidity) {
            return Err(ValidationError::HumidityOutOfRange(self.humidity).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now;

    #[test]
    fn should_build_reading_when_values_valid() {
        let at = now();
        let reading = SensorReading::new(24.5, 61.0, at).unwrap();
        assert!((reading.temperature - 24.5).abs() < f64::EPSILON);
        assert!((reading.humidity - 61.0).abs() < f64::EPSILON);
        assert_eq!(reading.timestamp, at);
    }

    #[test]
    fn should_accept_negative_temperature_and_humidity_bounds() {
        assert!(SensorReading::new(-5.0, 0.0, now()).is_ok());
        assert!(SensorReading::new(35.0, 100.0, now()).is_ok());
    }

    #[test]
    fn should_reject_non_finite_temperature() {
        let result = SensorReading::new(f64::NAN, 50.0, now());
        assert!(matches!(
            result,
            Err(GrowboxError::Validation(ValidationError::NonFiniteReading {
                field: "temperature"
            }))
        ));
    }

    #[test]
    fn should_reject_infinite_humidity() {
        let result = SensorReading::new(20.0, f64::INFINITY, now());
        assert!(matches!(
            result,
            Err(GrowboxError::Validation(ValidationError::NonFiniteReading {
                field: "humidity"
            }))
        ));
    }

    #[test]
    fn should_reject_humidity_above_hundred_percent() {
        let result = SensorReading::new(20.0, 100.5, now());
        assert!(matches!(
            result,
            Err(GrowboxError::Validation(ValidationError::HumidityOutOfRange(_)))
        ));
    }

    #[test]
    fn should_serialize_with_rfc3339_timestamp() {
        let at = chrono::DateTime::parse_from_rfc3339("2026-10-19T08:30:00Z")
            .unwrap()
            .to_utc();
        let reading = SensorReading::new(22.0, 55.5, at).unwrap();
        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["temperature"], 22.0);
        assert_eq!(json["humidity"], 55.5);
        assert_eq!(json["timestamp"], "2026-10-19T08:30:00Z");
    }
}
