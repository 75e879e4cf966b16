//! Bundle of ports a provider crate hands to the lookup service.

use std::fmt;
use std::sync::Arc;

use crate::ports::{GeocodingPort, PlacesPort};

/// Collection of ports implementing one upstream provider.
#[derive(Clone)]
pub struct ProviderSet {
    /// Short provider name used in logs.
    pub name: String,
    /// Implementation for geocoding free text.
    pub geocoding: Arc<dyn GeocodingPort>,
    /// Implementation for nearby place searches.
    pub places: Arc<dyn PlacesPort>,
}

impl ProviderSet {
    /// Bundle the two ports under a provider name.
    #[must_use]
    pub fn new<S: Into<String>>(
        name: S,
        geocoding: Arc<dyn GeocodingPort>,
        places: Arc<dyn PlacesPort>,
    ) -> Self {
        Self {
            name: name.into(),
            geocoding,
            places,
        }
    }
}

impl fmt::Debug for ProviderSet {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ProviderSet")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
