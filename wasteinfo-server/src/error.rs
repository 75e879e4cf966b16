//! Mapping from lookup failures to JSON error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use wasteinfo_core::LookupError;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: &'static str,
}

/// A failed `/waste-info` request.
#[derive(Debug)]
pub(crate) struct ApiError(pub(crate) LookupError);

impl ApiError {
    /// Status code and public message for the failure.
    pub(crate) fn parts(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            LookupError::InputMissing => (StatusCode::BAD_REQUEST, "Location not provided."),
            LookupError::GeocodingFailed { .. } => (
                StatusCode::BAD_REQUEST,
                "Geocoding failed. Please check the location or try again later.",
            ),
            LookupError::LocationNotFound => (StatusCode::NOT_FOUND, "Location not found."),
            LookupError::CoordinateResolutionFailed => {
                (StatusCode::BAD_REQUEST, "Unable to determine location.")
            }
            LookupError::Upstream { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
            }
        }
    }
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.parts();

        if status.is_server_error() {
            tracing::error!(error = %self.0, "waste info lookup failed");
        } else {
            tracing::info!(error = %self.0, %status, "waste info lookup rejected");
        }

        (status, Json(ErrorBody { error })).into_response()
    }
}
