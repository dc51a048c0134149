//! JSON REST handlers for sensor data.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use growbox_app::ports::{Clock, ControlRepository, SensorReadingRepository};
use growbox_domain::sensor::SensorReading;

use super::StatusBody;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body posted by the sensor device.
#[derive(Deserialize)]
pub struct SensorDataRequest {
    pub temperature: f64,
    pub humidity: f64,
}

/// Possible responses from the record endpoint.
pub enum RecordResponse {
    Ok(Json<StatusBody>),
}

impl IntoResponse for RecordResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the latest endpoint.
pub enum LatestResponse {
    Ok(Json<SensorReading>),
}

impl IntoResponse for LatestResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/sensor-data`
pub async fn record<CR, SR, C>(
    State(state): State<AppState<CR, SR, C>>,
    payload: Result<Json<SensorDataRequest>, JsonRejection>,
) -> Result<RecordResponse, ApiError>
where
    CR: ControlRepository + Send + Sync + 'static,
    SR: SensorReadingRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(req) = payload?;
    state
        .sensor_service
        .record(req.temperature, req.humidity)
        .await?;
    Ok(RecordResponse::Ok(Json(StatusBody::success())))
}

/// `GET /api/sensor-data`: most recent reading.
pub async fn latest<CR, SR, C>(
    State(state): State<AppState<CR, SR, C>>,
) -> Result<LatestResponse, ApiError>
where
    CR: ControlRepository + Send + Sync + 'static,
    SR: SensorReadingRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let reading = state.sensor_service.latest().await?;
    Ok(LatestResponse::Ok(Json(reading)))
}
