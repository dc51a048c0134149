//! Storage port — repository traits for persistence.

use std::future::Future;

use growbox_domain::control::ControlState;
use growbox_domain::error::GrowboxError;
use growbox_domain::sensor::SensorReading;

/// Repository for the singleton [`ControlState`] record.
///
/// Implementations must report lock contention as
/// [`GrowboxError::Contention`] so callers can retry it.
pub trait ControlRepository {
    /// Return the stored record, atomically creating and persisting the
    /// default one when none exists yet.
    fn get_or_create(&self) -> impl Future<Output = Result<ControlState, GrowboxError>> + Send;

    /// Replace the stored record wholesale, inserting it when absent.
    fn upsert(
        &self,
        control: ControlState,
    ) -> impl Future<Output = Result<ControlState, GrowboxError>> + Send;
}

/// Append-only log of [`SensorReading`]s.
pub trait SensorReadingRepository {
    /// Append a reading.
    fn record(
        &self,
        reading: SensorReading,
    ) -> impl Future<Output = Result<SensorReading, GrowboxError>> + Send;

    /// Most recent reading by timestamp, if any.
    fn latest(&self) -> impl Future<Output = Result<Option<SensorReading>, GrowboxError>> + Send;
}
