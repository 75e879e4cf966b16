//! Request handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use wasteinfo_core::{LocationQuery, LookupError, WasteCenter};

use crate::app::AppState;
use crate::error::ApiError;

/// Body of `POST /waste-info`.
#[derive(Debug, Deserialize)]
pub(crate) struct WasteInfoRequest {
    pub(crate) location: Option<String>,
}

/// Successful `POST /waste-info` answer.
#[derive(Debug, Serialize)]
pub(crate) struct WasteInfoReply {
    pub(crate) reply: Vec<WasteCenter>,
}

/// Health check endpoint.
pub(crate) async fn health() -> impl IntoResponse {
    StatusCode::OK
}

/// Resolve the posted location and list waste centers around it.
pub(crate) async fn waste_info(
    State(state): State<AppState>,
    payload: Result<Json<WasteInfoRequest>, JsonRejection>,
) -> Result<Json<WasteInfoReply>, ApiError> {
    // A body that is not `{"location": "<text>"}` carries no usable location.
    let location = match payload {
        Ok(Json(request)) => request.location,
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable waste info request");
            return Err(LookupError::InputMissing.into());
        }
    };

    let query = LocationQuery::from_optional(location)?;
    let reply = state.service.find_waste_centers(&query).await?;

    Ok(Json(WasteInfoReply { reply }))
}
