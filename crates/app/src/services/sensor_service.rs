//! Sensor service — ingestion and lookup of sensor readings.

use growbox_domain::error::{GrowboxError, NotFoundError};
use growbox_domain::sensor::SensorReading;

use crate::ports::{Clock, SensorReadingRepository};
use crate::retry::{RetryPolicy, retry_on_contention};

/// Application service for the sensor reading log.
pub struct SensorService<R, C> {
    repo: R,
    clock: C,
    retry: RetryPolicy,
}

impl<R: SensorReadingRepository, C: Clock> SensorService<R, C> {
    /// Create a new service with the default retry policy.
    pub fn new(repo: R, clock: C) -> Self {
        Self {
            repo,
            clock,
            retry: RetryPolicy::default(),
        }
    }

    /// Replace the retry policy applied to ingestion.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Validate and append a reading stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`GrowboxError::Validation`] for non-finite or out-of-range
    /// values and [`GrowboxError::StoreUnavailable`] when the store stayed
    /// locked through the retry budget.
    pub async fn record(&self, temperature: f64, humidity: f64) -> Result<SensorReading, GrowboxError> {
        tracing::debug!(temperature, humidity, "received sensor data");
        let reading = SensorReading::new(temperature, humidity, self.clock.now())?;
        retry_on_contention(&self.retry, || self.repo.record(reading.clone())).await
    }

    /// Most recent reading.
    ///
    /// # Errors
    ///
    /// Returns [`GrowboxError::NotFound`] when nothing was recorded yet, or a
    /// storage error from the repository.
    pub async fn latest(&self) -> Result<SensorReading, GrowboxError> {
        self.repo.latest().await?.ok_or_else(|| {
            NotFoundError {
                entity: "SensorReading",
            }
            .into()
        })
    }
}
