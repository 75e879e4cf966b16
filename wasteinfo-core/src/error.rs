//! Error types shared by the model and the lookup service.

use std::fmt;

use crate::model::GeocodeStatus;
use crate::ports::PortError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Stage of a lookup that talks to an upstream provider.
pub enum LookupStage {
    /// Resolving the location text to a coordinate.
    Geocoding,
    /// Listing places around the coordinate.
    Searching,
}

impl fmt::Display for LookupStage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Geocoding => "geocoding",
            Self::Searching => "nearby search",
        };
        formatter.write_str(label)
    }
}

#[derive(thiserror::Error, Debug)]
/// Every way a waste center lookup can fail.
pub enum LookupError {
    /// The request carried no location.
    #[error("Location not provided")]
    InputMissing,
    /// The geocoder returned a non-OK status.
    #[error("Geocoding failed with status {status}")]
    GeocodingFailed {
        /// Status reported by the geocoder.
        status: GeocodeStatus,
    },
    /// The geocoder answered OK with no results.
    #[error("Location not found")]
    LocationNotFound,
    /// The first geocoding result had no usable coordinate.
    #[error("Unable to determine location")]
    CoordinateResolutionFailed,
    /// An upstream call failed outright.
    #[error("{stage} failed: {source}")]
    Upstream {
        /// Stage that was running.
        stage: LookupStage,
        /// Underlying provider error.
        #[source]
        source: PortError,
    },
}

impl LookupError {
    pub(crate) fn upstream(stage: LookupStage) -> impl FnOnce(PortError) -> Self {
        move |source| Self::Upstream { stage, source }
    }
}
