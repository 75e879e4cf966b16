//! Traits describing provider capabilities and shared helper types.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;

use crate::model::{Coordinate, GeocodeReply, LocationQuery, PlaceRecord};

/// Search radius around the resolved coordinate, in meters.
pub const SEARCH_RADIUS_M: u32 = 15_000;

/// Place type sent with every nearby search.
pub const SEARCH_PLACE_TYPE: &str = "establishment";

/// Terms that together cover waste disposal, recycling, and municipal offices.
pub const WASTE_KEYWORDS: [&str; 17] = [
    "waste disposal",
    "recycling center",
    "scrap yard",
    "reuse center",
    "junkyard",
    "salvage yard",
    "second hand",
    "municipal corporation",
    "city hall",
    "municipality",
    "municipal council",
    "local government",
    "waste segregation",
    "public sanitation",
    "solid waste management",
    "garbage depot",
    "recycling depot",
];

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to provider backends.
pub enum PortError {
    /// Network layer failed, the HTTP status was an error, or the body did not decode.
    #[error("Network error: {0}")]
    Http(#[from] ReqwestError),
    /// Provider answered but refused or failed the request.
    #[error("{service} returned status {status}{}", message_suffix(.message.as_deref()))]
    UpstreamStatus {
        /// Which upstream API answered.
        service: &'static str,
        /// Raw status string.
        status: String,
        /// Provider-supplied explanation, if any.
        message: Option<String>,
    },
}

fn message_suffix(message: Option<&str>) -> String {
    message.map(|text| format!(": {text}")).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq)]
/// Parameters for one nearby search.
pub struct NearbyQuery {
    /// Center of the search circle.
    pub center: Coordinate,
    /// Radius in meters.
    pub radius_m: u32,
    /// Free-text keyword expression.
    pub keyword: String,
    /// Provider place type.
    pub place_type: String,
}

impl NearbyQuery {
    /// The fixed waste facility search around `center`.
    #[must_use]
    pub fn waste_facilities(center: Coordinate) -> Self {
        Self {
            center,
            radius_m: SEARCH_RADIUS_M,
            keyword: WASTE_KEYWORDS.join(" OR "),
            place_type: SEARCH_PLACE_TYPE.to_owned(),
        }
    }
}

#[async_trait]
/// Trait for backends that turn free text into coordinates.
pub trait GeocodingPort: Send + Sync {
    /// Geocode a location.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the provider cannot be reached or answers garbage.
    /// A provider-level status such as `ZERO_RESULTS` is not an error here; it is
    /// carried in the [`GeocodeReply`].
    async fn geocode(&self, query: &LocationQuery) -> Result<GeocodeReply, PortError>;
}

#[async_trait]
/// Trait for backends that list places around a coordinate.
pub trait PlacesPort: Send + Sync {
    /// Return the first page of places matching `query`, in provider order.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the provider request fails or is refused.
    async fn nearby(&self, query: &NearbyQuery) -> Result<Vec<PlaceRecord>, PortError>;
}
