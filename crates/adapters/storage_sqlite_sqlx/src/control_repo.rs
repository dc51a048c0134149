//! `SQLite` implementation of [`ControlRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use growbox_app::ports::ControlRepository;
use growbox_domain::control::{ControlState, Mode, PowerState};
use growbox_domain::error::GrowboxError;
use growbox_domain::time::TimeOfDay;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`ControlState`].
struct Wrapper(ControlState);

fn decode_time(value: Option<String>) -> Result<Option<TimeOfDay>, sqlx::Error> {
    value
        .map(|raw| TimeOfDay::parse(&raw))
        .transpose()
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let state: String = row.try_get("state")?;
        let mode: String = row.try_get("mode")?;
        let start_time: Option<String> = row.try_get("start_time")?;
        let end_time: Option<String> = row.try_get("end_time")?;

        let state = PowerState::from_str(&state).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let mode = Mode::from_str(&mode).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(ControlState {
            state,
            mode,
            start_time: decode_time(start_time)?,
            end_time: decode_time(end_time)?,
        }))
    }
}

const INSERT_DEFAULT: &str = r"
    INSERT INTO control (id, state, mode, start_time, end_time)
    VALUES (1, ?, ?, NULL, NULL)
    ON CONFLICT (id) DO NOTHING
";

const SELECT: &str = "SELECT state, mode, start_time, end_time FROM control WHERE id = 1";

const UPSERT: &str = r"
    INSERT INTO control (id, state, mode, start_time, end_time)
    VALUES (1, ?, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE SET
        state = excluded.state,
        mode = excluded.mode,
        start_time = excluded.start_time,
        end_time = excluded.end_time
";

/// `SQLite`-backed store for the singleton control record.
pub struct SqliteControlRepository {
    pool: SqlitePool,
}

impl SqliteControlRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ControlRepository for SqliteControlRepository {
    async fn get_or_create(&self) -> Result<ControlState, GrowboxError> {
        // plain read first so existing records never take the write lock
        let existing: Option<Wrapper> = sqlx::query_as(SELECT)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        if let Some(row) = existing {
            return Ok(row.0);
        }

        let defaults = ControlState::default();
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        let created = sqlx::query(INSERT_DEFAULT)
            .bind(defaults.state.as_str())
            .bind(defaults.mode.as_str())
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?
            .rows_affected();

        let row: Wrapper = sqlx::query_as(SELECT)
            .fetch_one(&mut *tx)
            .await
            .map_err(StorageError::from)?;

        tx.commit().await.map_err(StorageError::from)?;

        if created > 0 {
            tracing::info!("created default control record");
        }
        Ok(row.0)
    }

    async fn upsert(&self, control: ControlState) -> Result<ControlState, GrowboxError> {
        sqlx::query(UPSERT)
            .bind(control.state.as_str())
            .bind(control.mode.as_str())
            .bind(control.start_time.map(|t| t.to_string()))
            .bind(control.end_time.map(|t| t.to_string()))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(control)
    }
}
