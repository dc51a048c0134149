//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod control;
#[allow(clippy::missing_errors_doc)]
pub mod sensor_data;

use axum::Router;
use axum::routing::get;
use serde::Serialize;

use growbox_app::ports::{Clock, ControlRepository, SensorReadingRepository};

use crate::state::AppState;

/// `{"status": "success"}` body returned by write endpoints.
#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
}

impl StatusBody {
    #[must_use]
    pub fn success() -> Self {
        Self { status: "success" }
    }
}

/// Build the `/api` sub-router.
pub fn routes<CR, SR, C>() -> Router<AppState<CR, SR, C>>
where
    CR: ControlRepository + Send + Sync + 'static,
    SR: SensorReadingRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        // Sensor data
        .route(
            "/sensor-data",
            get(sensor_data::latest::<CR, SR, C>).post(sensor_data::record::<CR, SR, C>),
        )
        // Control
        .route(
            "/control",
            get(control::get::<CR, SR, C>).post(control::set::<CR, SR, C>),
        )
        .route("/control/effective", get(control::effective::<CR, SR, C>))
}
