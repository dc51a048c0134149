//! JSON REST handlers for the control record.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};

use growbox_app::ports::{Clock, ControlRepository, SensorReadingRepository};
use growbox_domain::control::{ControlRequest, ControlState};
use growbox_domain::reconciler::EffectiveCommand;

use super::StatusBody;
use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<ControlState>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the set endpoint.
pub enum SetResponse {
    Ok(Json<StatusBody>),
}

impl IntoResponse for SetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the effective command endpoint.
pub enum EffectiveResponse {
    Ok(Json<EffectiveCommand>),
}

impl IntoResponse for EffectiveResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/control`
pub async fn get<CR, SR, C>(State(state): State<AppState<CR, SR, C>>) -> Result<GetResponse, ApiError>
where
    CR: ControlRepository + Send + Sync + 'static,
    SR: SensorReadingRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let control = state.control_service.get_control().await?;
    Ok(GetResponse::Ok(Json(control)))
}

/// `POST /api/control`. Replaces all four fields of the record.
pub async fn set<CR, SR, C>(
    State(state): State<AppState<CR, SR, C>>,
    payload: Result<Json<ControlRequest>, JsonRejection>,
) -> Result<SetResponse, ApiError>
where
    CR: ControlRepository + Send + Sync + 'static,
    SR: SensorReadingRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(request) = payload?;
    state.control_service.set_control(&request).await?;
    Ok(SetResponse::Ok(Json(StatusBody::success())))
}

/// `GET /api/control/effective`
pub async fn effective<CR, SR, C>(
    State(state): State<AppState<CR, SR, C>>,
) -> Result<EffectiveResponse, ApiError>
where
    CR: ControlRepository + Send + Sync + 'static,
    SR: SensorReadingRepository + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let effective = state.control_service.effective_command().await?;
    Ok(EffectiveResponse::Ok(Json(effective)))
}
