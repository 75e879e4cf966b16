//! High-level lookup service: geocode, search nearby, normalize.

use tracing::{debug, info, instrument};

use crate::error::{LookupError, LookupStage};
use crate::model::{LocationQuery, WasteCenter};
use crate::plugin::ProviderSet;
use crate::ports::NearbyQuery;

/// Public entry point for finding waste centers near a location.
#[derive(Debug, Clone)]
pub struct WasteInfoService {
    providers: ProviderSet,
}

impl WasteInfoService {
    /// Create a new service bound to the provided ports.
    #[must_use]
    pub fn new(providers: ProviderSet) -> Self {
        Self { providers }
    }

    /// Name of the provider bundle in use.
    #[must_use]
    pub fn provider_name(&self) -> &str {
        &self.providers.name
    }

    /// Find waste centers around `query`, in provider order.
    ///
    /// An empty list is a valid answer. Nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] describing the first stage that failed.
    #[instrument(skip_all, fields(provider = %self.providers.name, location = %query))]
    pub async fn find_waste_centers(
        &self,
        query: &LocationQuery,
    ) -> Result<Vec<WasteCenter>, LookupError> {
        debug!("geocoding");
        let reply = self
            .providers
            .geocoding
            .geocode(query)
            .await
            .map_err(LookupError::upstream(LookupStage::Geocoding))?;
        debug!(
            status = %reply.status,
            candidates = reply.candidates.len(),
            matched = reply
                .candidates
                .first()
                .and_then(|candidate| candidate.formatted_address.as_deref()),
            "geocoded"
        );
        let center = reply.resolve()?;

        debug!(%center, "searching nearby");
        let nearby = NearbyQuery::waste_facilities(center);
        let places = self
            .providers
            .places
            .nearby(&nearby)
            .await
            .map_err(LookupError::upstream(LookupStage::Searching))?;

        debug!(places = places.len(), "normalizing");
        let centers: Vec<WasteCenter> = places.iter().map(WasteCenter::from_place).collect();

        info!(count = centers.len(), "waste centers found");
        Ok(centers)
    }
}
