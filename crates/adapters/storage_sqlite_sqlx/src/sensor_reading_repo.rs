//! `SQLite` implementation of [`SensorReadingRepository`].

use chrono::{SecondsFormat, SubsecRound};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use growbox_app::ports::SensorReadingRepository;
use growbox_domain::error::GrowboxError;
use growbox_domain::sensor::SensorReading;
use growbox_domain::time::Timestamp;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(SensorReading);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<SensorReading> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let temperature: f64 = row.try_get("temperature")?;
        let humidity: f64 = row.try_get("humidity")?;
        let recorded_at: String = row.try_get("recorded_at")?;

        let timestamp = chrono::DateTime::parse_from_rfc3339(&recorded_at)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();

        Ok(Self(SensorReading {
            temperature,
            humidity,
            timestamp,
        }))
    }
}

/// Fixed-width RFC 3339 so text ordering matches time ordering.
fn encode_timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

const INSERT: &str = r"
    INSERT INTO sensor_readings (temperature, humidity, recorded_at)
    VALUES (?, ?, ?)
";

const SELECT_LATEST: &str = r"
    SELECT temperature, humidity, recorded_at FROM sensor_readings
    ORDER BY recorded_at DESC, id DESC
    LIMIT 1
";

/// `SQLite`-backed append-only sensor log.
pub struct SqliteSensorReadingRepository {
    pool: SqlitePool,
}

impl SqliteSensorReadingRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SensorReadingRepository for SqliteSensorReadingRepository {
    async fn record(&self, mut reading: SensorReading) -> Result<SensorReading, GrowboxError> {
        // stored with microsecond precision; return exactly what a read gives back
        reading.timestamp = reading.timestamp.trunc_subsecs(6);

        sqlx::query(INSERT)
            .bind(reading.temperature)
            .bind(reading.humidity)
            .bind(encode_timestamp(reading.timestamp))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(reading)
    }

    async fn latest(&self) -> Result<Option<SensorReading>, GrowboxError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_LATEST)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }
}
