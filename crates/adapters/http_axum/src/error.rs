//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use growbox_domain::error::GrowboxError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

/// Maps [`GrowboxError`] and malformed request bodies to an HTTP response
/// with the appropriate status code.
pub enum ApiError {
    /// An error returned by an application service.
    Domain(GrowboxError),
    /// The request body could not be decoded.
    MalformedBody(JsonRejection),
}

impl From<GrowboxError> for ApiError {
    fn from(err: GrowboxError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MalformedBody(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            Self::Domain(GrowboxError::Validation(err)) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::Domain(GrowboxError::NotFound(err)) => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Domain(err @ (GrowboxError::StoreUnavailable { .. } | GrowboxError::Contention(_))) => {
                tracing::warn!(error = %err, "storage locked");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            Self::Domain(GrowboxError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                status: "error",
                message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use growbox_domain::error::{NotFoundError, ValidationError};

    fn status_of(err: GrowboxError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn should_map_validation_to_bad_request() {
        assert_eq!(
            status_of(ValidationError::IncompleteWindow.into()),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn should_map_not_found_to_404() {
        let err = NotFoundError {
            entity: "SensorReading",
        };
        assert_eq!(status_of(err.into()), StatusCode::NOT_FOUND);
    }

    #[test]
    fn should_map_store_unavailable_to_500() {
        let err = GrowboxError::StoreUnavailable {
            attempts: 5,
            source: "database is locked".into(),
        };
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn should_map_storage_to_500() {
        let err = GrowboxError::Storage("disk I/O error".into());
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
