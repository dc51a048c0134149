//! Storage-specific error type wrapping sqlx errors.

use growbox_domain::error::GrowboxError;

/// `SQLite` primary result codes (and extended variants) meaning "another
/// connection holds the lock".
const CONTENTION_CODES: &[&str] = &["5", "6", "261", "262", "517"];

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StorageError {
    /// Whether the failure is transient lock contention worth retrying.
    #[must_use]
    pub fn is_contention(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::Database(err)) => {
                err.code()
                    .is_some_and(|code| CONTENTION_CODES.contains(&&*code))
                    || err.message().contains("database is locked")
            }
            Self::Database(sqlx::Error::PoolTimedOut) => true,
            _ => false,
        }
    }
}

impl From<StorageError> for GrowboxError {
    fn from(err: StorageError) -> Self {
        if err.is_contention() {
            Self::Contention(Box::new(err))
        } else {
            tracing::error!(error = ?err, "storage failure");
            Self::Storage(Box::new(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use std::time::Duration;

    #[test]
    fn should_treat_pool_timeout_as_contention() {
        let err: GrowboxError = StorageError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, GrowboxError::Contention(_)));
    }

    #[test]
    fn should_treat_row_not_found_as_plain_storage_error() {
        let err: GrowboxError = StorageError::Database(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, GrowboxError::Storage(_)));
    }

    #[tokio::test]
    async fn should_classify_locked_database_as_contention() {
        let path = std::env::temp_dir().join(format!("growbox-contention-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let db = Config {
            database_url: format!("sqlite:{}", path.display()),
            busy_timeout: Duration::ZERO,
            max_connections: 2,
        }
        .build()
        .await
        .unwrap();

        let mut holder = db.pool().acquire().await.unwrap();
        sqlx::query("BEGIN IMMEDIATE")
            .execute(&mut *holder)
            .await
            .unwrap();

        let err = sqlx::query(
            "INSERT INTO sensor_readings (temperature, humidity, recorded_at) VALUES (20.0, 50.0, '2026-10-19T08:00:00.000000Z')",
        )
        .execute(db.pool())
        .await
        .unwrap_err();
        let err = StorageError::from(err);
        assert!(err.is_contention(), "{err:?} should be contention");
        assert!(matches!(GrowboxError::from(err), GrowboxError::Contention(_)));

        sqlx::query("ROLLBACK").execute(&mut *holder).await.unwrap();
        drop(holder);
        db.pool().close().await;
        let _ = std::fs::remove_file(&path);
    }
}
