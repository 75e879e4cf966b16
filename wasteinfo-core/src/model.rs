//! Domain data structures for location lookups, places, and waste centers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Placeholder used for every field the provider could not supply.
pub const NOT_AVAILABLE: &str = "Not available";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Free-text location typed by the user, e.g. "Pune, India".
pub struct LocationQuery(String);

impl LocationQuery {
    /// Wrap a user-supplied location.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InputMissing`] when the text is empty.
    pub fn new<S: Into<String>>(text: S) -> Result<Self, LookupError> {
        let text = text.into();
        if text.is_empty() {
            return Err(LookupError::InputMissing);
        }
        Ok(Self(text))
    }

    /// Same as [`LocationQuery::new`] but also treats an absent value as missing input.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InputMissing`] when the value is `None` or empty.
    pub fn from_optional<S: Into<String>>(text: Option<S>) -> Result<Self, LookupError> {
        text.map_or(Err(LookupError::InputMissing), Self::new)
    }

    /// Raw location text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Latitude/longitude pair resolved from the geocoder.
pub struct Coordinate {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Coordinate {
    /// Construct a coordinate from latitude and longitude.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{},{}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Status reported by the geocoding provider.
pub enum GeocodeStatus {
    /// At least one result is expected.
    Ok,
    /// The address was understood but nothing matched.
    ZeroResults,
    /// Billing or daily quota exhausted.
    OverDailyLimit,
    /// Request rate exceeded.
    OverQueryLimit,
    /// Credential rejected.
    RequestDenied,
    /// Malformed request, usually a missing address.
    InvalidRequest,
    /// Transient server-side failure.
    UnknownError,
    /// The response carried no status at all.
    Missing,
    /// Status string this crate does not know about.
    Other(String),
}

impl GeocodeStatus {
    /// Parse the provider's status string.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "OK" => Self::Ok,
            "ZERO_RESULTS" => Self::ZeroResults,
            "OVER_DAILY_LIMIT" => Self::OverDailyLimit,
            "OVER_QUERY_LIMIT" => Self::OverQueryLimit,
            "REQUEST_DENIED" => Self::RequestDenied,
            "INVALID_REQUEST" => Self::InvalidRequest,
            "UNKNOWN_ERROR" => Self::UnknownError,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Whether the provider accepted the request.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for GeocodeStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = match self {
            Self::Ok => "OK",
            Self::ZeroResults => "ZERO_RESULTS",
            Self::OverDailyLimit => "OVER_DAILY_LIMIT",
            Self::OverQueryLimit => "OVER_QUERY_LIMIT",
            Self::RequestDenied => "REQUEST_DENIED",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::Missing => "<missing>",
            Self::Other(raw) => raw,
        };
        formatter.write_str(raw)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// One candidate match returned by the geocoder.
pub struct GeocodeCandidate {
    /// Latitude, if the provider supplied one.
    pub latitude: Option<f64>,
    /// Longitude, if the provider supplied one.
    pub longitude: Option<f64>,
    /// Provider's canonical address for the match.
    pub formatted_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// Geocoder answer before any interpretation.
pub struct GeocodeReply {
    /// Provider status.
    pub status: GeocodeStatus,
    /// Candidates in provider order.
    pub candidates: Vec<GeocodeCandidate>,
}

impl GeocodeReply {
    /// Pick the coordinate of the first candidate.
    ///
    /// Ambiguous locations are not disambiguated: the first candidate always wins.
    ///
    /// # Errors
    ///
    /// - [`LookupError::GeocodingFailed`] when the status is not OK.
    /// - [`LookupError::LocationNotFound`] when the status is OK but nothing matched.
    /// - [`LookupError::CoordinateResolutionFailed`] when the first candidate has a
    ///   missing or zero latitude or longitude.
    pub fn resolve(self) -> Result<Coordinate, LookupError> {
        if !self.status.is_ok() {
            return Err(LookupError::GeocodingFailed {
                status: self.status,
            });
        }

        let first = self
            .candidates
            .into_iter()
            .next()
            .ok_or(LookupError::LocationNotFound)?;

        match (first.latitude, first.longitude) {
            (Some(latitude), Some(longitude)) if is_set(latitude) && is_set(longitude) => {
                Ok(Coordinate::new(latitude, longitude))
            }
            _ => Err(LookupError::CoordinateResolutionFailed),
        }
    }
}

// Zero counts as unset, matching the upstream contract for malformed results.
fn is_set(value: f64) -> bool {
    value != 0.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Opening hours block attached to a place.
pub struct OpeningHours {
    /// Whether the place is open at request time.
    pub open_now: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Place returned by a nearby search, in provider terms.
pub struct PlaceRecord {
    /// Display name.
    pub name: Option<String>,
    /// Short address.
    pub vicinity: Option<String>,
    /// Opening hours, when the provider knows them.
    pub opening_hours: Option<OpeningHours>,
    /// Category tags such as `point_of_interest`.
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Human-readable opening state of a waste center.
pub enum OpeningStatus {
    /// Provider reports the place as open.
    #[serde(rename = "Open now")]
    OpenNow,
    /// Hours are known but the place is not open.
    #[serde(rename = "Closed now")]
    ClosedNow,
    /// No hours known.
    #[serde(rename = "Not available")]
    NotAvailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Facility returned to clients.
pub struct WasteCenter {
    /// Facility name.
    pub name: String,
    /// Facility address.
    pub address: String,
    /// Contact details. Not looked up yet.
    pub contact: String,
    /// Current opening state.
    pub opening_hours: OpeningStatus,
    /// Category tags and address joined into one line.
    pub description: String,
}
