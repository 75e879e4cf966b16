//! Provider implementation backed by the Google Geocoding and Places Nearby Search APIs.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use wasteinfo_core::{
    model::{
        GeocodeCandidate, GeocodeReply, GeocodeStatus, LocationQuery, OpeningHours, PlaceRecord,
    },
    plugin::ProviderSet,
    ports::{GeocodingPort, NearbyQuery, PlacesPort, PortError},
};

/// Default Geocoding API endpoint.
pub const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
/// Default Places Nearby Search endpoint.
pub const NEARBY_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

const PROVIDER_NAME: &str = "google";

/// Credential and endpoints for the Google APIs.
#[derive(Clone)]
pub struct GoogleConfig {
    api_key: String,
    geocode_url: String,
    nearby_search_url: String,
    timeout: Option<Duration>,
}

impl GoogleConfig {
    /// Config for the public Google endpoints with the given API key.
    #[must_use]
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            geocode_url: GEOCODE_URL.to_owned(),
            nearby_search_url: NEARBY_SEARCH_URL.to_owned(),
            timeout: None,
        }
    }

    /// Send geocoding requests somewhere else.
    #[must_use]
    pub fn with_geocode_url<S: Into<String>>(mut self, url: S) -> Self {
        self.geocode_url = url.into();
        self
    }

    /// Send nearby searches somewhere else.
    #[must_use]
    pub fn with_nearby_search_url<S: Into<String>>(mut self, url: S) -> Self {
        self.nearby_search_url = url.into();
        self
    }

    /// Per-request timeout. Unset means the client default.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn apply_timeout(&self, req: RequestBuilder) -> RequestBuilder {
        match self.timeout {
            Some(timeout) => req.timeout(timeout),
            None => req,
        }
    }
}

impl fmt::Debug for GoogleConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("GoogleConfig")
            .field("api_key", &"<redacted>")
            .field("geocode_url", &self.geocode_url)
            .field("nearby_search_url", &self.nearby_search_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Response from the geocode endpoint.
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: Option<String>,
    results: Option<Vec<GeocodeResult>>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Option<Geometry>,
    formatted_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: Option<f64>,
    lng: Option<f64>,
}

/// Response from the nearby search endpoint.
#[derive(Debug, Deserialize)]
struct NearbyResponse {
    status: Option<String>,
    results: Option<Vec<NearbyPlace>>,
    error_message: Option<String>,
    // next_page_token is ignored, only the first page is used
}

/// Single place from the nearby search.
#[derive(Debug, Deserialize)]
struct NearbyPlace {
    name: Option<String>,
    vicinity: Option<String>,
    opening_hours: Option<NearbyOpeningHours>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct NearbyOpeningHours {
    open_now: Option<bool>,
}

impl From<GeocodeResult> for GeocodeCandidate {
    fn from(result: GeocodeResult) -> Self {
        let location = result.geometry.and_then(|geometry| geometry.location);
        Self {
            latitude: location.as_ref().and_then(|point| point.lat),
            longitude: location.as_ref().and_then(|point| point.lng),
            formatted_address: result.formatted_address,
        }
    }
}

impl From<NearbyPlace> for PlaceRecord {
    fn from(place: NearbyPlace) -> Self {
        Self {
            name: place.name,
            vicinity: place.vicinity,
            opening_hours: place.opening_hours.map(|hours| OpeningHours {
                open_now: hours.open_now,
            }),
            types: place.types,
        }
    }
}

/// Geocoding implementation for Google.
pub struct GoogleGeocodingPort {
    client: Client,
    config: GoogleConfig,
}

impl GoogleGeocodingPort {
    /// Create a new geocoding port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client, config: GoogleConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl GeocodingPort for GoogleGeocodingPort {
    async fn geocode(&self, query: &LocationQuery) -> Result<GeocodeReply, PortError> {
        let req = self.client.get(&self.config.geocode_url).query(&[
            ("address", query.as_str()),
            ("key", self.config.api_key.as_str()),
        ]);

        let resp = fetch_json::<GeocodeResponse>(self.config.apply_timeout(req)).await?;

        let status = resp
            .status
            .as_deref()
            .map_or(GeocodeStatus::Missing, GeocodeStatus::parse);
        let results = resp.results.unwrap_or_default();
        debug!(
            %status,
            results = results.len(),
            error_message = resp.error_message.as_deref(),
            "geocode response"
        );

        Ok(GeocodeReply {
            status,
            candidates: results.into_iter().map(GeocodeCandidate::from).collect(),
        })
    }
}

/// Nearby search implementation for Google.
pub struct GooglePlacesPort {
    client: Client,
    config: GoogleConfig,
}

impl GooglePlacesPort {
    /// Create a new places port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client, config: GoogleConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl PlacesPort for GooglePlacesPort {
    async fn nearby(&self, query: &NearbyQuery) -> Result<Vec<PlaceRecord>, PortError> {
        let location = query.center.to_string();
        let radius = query.radius_m.to_string();

        let req = self.client.get(&self.config.nearby_search_url).query(&[
            ("location", location.as_str()),
            ("radius", radius.as_str()),
            ("keyword", query.keyword.as_str()),
            ("type", query.place_type.as_str()),
            ("key", self.config.api_key.as_str()),
        ]);

        let resp = fetch_json::<NearbyResponse>(self.config.apply_timeout(req)).await?;
        let results = resp.results.unwrap_or_default();

        debug!(
            status = resp.status.as_deref(),
            results = results.len(),
            "nearby search response"
        );

        // ZERO_RESULTS is a normal empty answer; a body without status is read the same way.
        match resp.status.as_deref() {
            None | Some("OK" | "ZERO_RESULTS") => {}
            Some(status) => {
                return Err(PortError::UpstreamStatus {
                    service: "places nearby search",
                    status: status.to_owned(),
                    message: resp.error_message,
                });
            }
        }

        Ok(results.into_iter().map(PlaceRecord::from).collect())
    }
}

/// Build the provider bundle for Google.
#[must_use]
pub fn providers(client: Client, config: GoogleConfig) -> ProviderSet {
    let geocoding = Arc::new(GoogleGeocodingPort::new(client.clone(), config.clone()));
    let places = Arc::new(GooglePlacesPort::new(client, config));

    ProviderSet::new(PROVIDER_NAME, geocoding, places)
}

// Small helper to fetch and decode JSON with status handling.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, PortError> {
    req.send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .json()
        .await
        .map_err(PortError::from)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use tokio::net::TcpListener;
    use wasteinfo_core::error::LookupError;
    use wasteinfo_core::model::Coordinate;

    use super::*;

    type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

    #[derive(Clone)]
    struct Upstream {
        body: Value,
        seen: Seen,
    }

    async fn respond(
        State(upstream): State<Upstream>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Json<Value> {
        upstream.seen.lock().expect("lock").push(params);
        Json(upstream.body)
    }

    /// Serve `body` for every GET on a local port and return the base URL.
    async fn serve(body: Value) -> (String, Seen) {
        let seen = Seen::default();
        let app = Router::new()
            .route("/json", get(respond))
            .with_state(Upstream {
                body,
                seen: Arc::clone(&seen),
            });
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        (format!("http://{addr}/json"), seen)
    }

    fn config(url: &str) -> GoogleConfig {
        GoogleConfig::new("test-key")
            .with_geocode_url(url)
            .with_nearby_search_url(url)
    }

    #[tokio::test]
    async fn geocode_sends_address_and_key() {
        let (url, seen) = serve(json!({
            "status": "OK",
            "results": [{
                "formatted_address": "Pune, Maharashtra, India",
                "geometry": { "location": { "lat": 18.5204, "lng": 73.8567 } }
            }]
        }))
        .await;
        let port = GoogleGeocodingPort::new(Client::new(), config(&url));

        let reply = port
            .geocode(&LocationQuery::new("Pune, India").expect("query"))
            .await
            .expect("geocode");

        assert_eq!(reply.status, GeocodeStatus::Ok, "status parsed");
        let candidate = reply.candidates.first().expect("one candidate");
        assert_eq!(candidate.latitude, Some(18.5204), "lat");
        assert_eq!(candidate.longitude, Some(73.8567), "lng");
        assert_eq!(
            candidate.formatted_address.as_deref(),
            Some("Pune, Maharashtra, India"),
            "address"
        );

        let params = seen.lock().expect("lock");
        let first = params.first().expect("one request");
        assert_eq!(
            first.get("address").map(String::as_str),
            Some("Pune, India"),
            "address param"
        );
        assert_eq!(
            first.get("key").map(String::as_str),
            Some("test-key"),
            "key param"
        );
    }

    #[tokio::test]
    async fn geocode_tolerates_missing_geometry() {
        let (url, _seen) = serve(json!({
            "status": "OK",
            "results": [{ "formatted_address": "Somewhere" }]
        }))
        .await;
        let port = GoogleGeocodingPort::new(Client::new(), config(&url));

        let reply = port
            .geocode(&LocationQuery::new("Somewhere").expect("query"))
            .await
            .expect("decodes");

        let candidate = reply.candidates.first().expect("one candidate");
        assert_eq!(candidate.latitude, None, "no lat");
        assert_eq!(candidate.longitude, None, "no lng");
    }

    #[tokio::test]
    async fn geocode_passes_non_ok_status_through() {
        let (url, _seen) = serve(json!({ "status": "ZERO_RESULTS", "results": [] })).await;
        let port = GoogleGeocodingPort::new(Client::new(), config(&url));

        let reply = port
            .geocode(&LocationQuery::new("Nowhere at all").expect("query"))
            .await
            .expect("status is data, not an error");

        assert_eq!(reply.status, GeocodeStatus::ZeroResults, "status");
        assert!(reply.candidates.is_empty(), "no candidates");
    }

    #[tokio::test]
    async fn geocode_without_status_is_not_ok() {
        let (url, _seen) = serve(json!({ "results": [] })).await;
        let port = GoogleGeocodingPort::new(Client::new(), config(&url));

        let reply = port
            .geocode(&LocationQuery::new("Pune").expect("query"))
            .await
            .expect("missing status still decodes");

        assert_eq!(reply.status, GeocodeStatus::Missing, "status");
        assert!(
            matches!(reply.resolve(), Err(LookupError::GeocodingFailed { .. })),
            "reads as a geocoding failure"
        );
    }

    #[tokio::test]
    async fn geocode_null_results_is_not_found() {
        let (url, _seen) = serve(json!({ "status": "OK", "results": null })).await;
        let port = GoogleGeocodingPort::new(Client::new(), config(&url));

        let reply = port
            .geocode(&LocationQuery::new("Pune").expect("query"))
            .await
            .expect("null results still decode");

        assert!(reply.candidates.is_empty(), "no candidates");
        assert!(
            matches!(reply.resolve(), Err(LookupError::LocationNotFound)),
            "reads as not found"
        );
    }

    #[tokio::test]
    async fn nearby_sends_fixed_search_parameters() {
        let (url, seen) = serve(json!({
            "status": "OK",
            "results": [
                {
                    "name": "Kothrud Recycling Depot",
                    "vicinity": "Paud Road",
                    "opening_hours": { "open_now": false },
                    "types": ["point_of_interest", "establishment"]
                },
                { "name": "Scrap Yard" }
            ]
        }))
        .await;
        let port = GooglePlacesPort::new(Client::new(), config(&url));
        let query = NearbyQuery::waste_facilities(Coordinate::new(18.5204, 73.8567));

        let places = port.nearby(&query).await.expect("nearby");

        assert_eq!(places.len(), 2, "both places");
        let depot = places.first().expect("depot");
        assert_eq!(depot.name.as_deref(), Some("Kothrud Recycling Depot"), "name");
        assert_eq!(
            depot.opening_hours,
            Some(OpeningHours {
                open_now: Some(false)
            }),
            "hours kept"
        );
        assert_eq!(depot.types, ["point_of_interest", "establishment"], "types");
        let yard = places.get(1).expect("yard");
        assert_eq!(yard.vicinity, None, "no vicinity");
        assert!(yard.types.is_empty(), "no types");

        let params = seen.lock().expect("lock");
        let first = params.first().expect("one request");
        assert_eq!(
            first.get("location").map(String::as_str),
            Some("18.5204,73.8567"),
            "location param"
        );
        assert_eq!(
            first.get("radius").map(String::as_str),
            Some("15000"),
            "radius"
        );
        assert_eq!(
            first.get("type").map(String::as_str),
            Some("establishment"),
            "type"
        );
        assert_eq!(first.get("keyword"), Some(&query.keyword), "keyword");
        assert_eq!(first.get("key").map(String::as_str), Some("test-key"), "key");
    }

    #[tokio::test]
    async fn nearby_zero_results_is_empty() {
        let (url, _seen) = serve(json!({ "status": "ZERO_RESULTS", "results": [] })).await;
        let port = GooglePlacesPort::new(Client::new(), config(&url));

        let places = port
            .nearby(&NearbyQuery::waste_facilities(Coordinate::new(1.0, 2.0)))
            .await
            .expect("empty answer");

        assert!(places.is_empty(), "no places");
    }

    #[tokio::test]
    async fn nearby_null_or_missing_results_is_empty() {
        for body in [
            json!({ "status": "ZERO_RESULTS", "results": null }),
            json!({ "status": "ZERO_RESULTS" }),
        ] {
            let (url, _seen) = serve(body).await;
            let port = GooglePlacesPort::new(Client::new(), config(&url));

            let places = port
                .nearby(&NearbyQuery::waste_facilities(Coordinate::new(1.0, 2.0)))
                .await
                .expect("empty answer");

            assert!(places.is_empty(), "no places");
        }
    }

    #[tokio::test]
    async fn nearby_refusal_is_an_upstream_error() {
        let (url, _seen) = serve(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "results": []
        }))
        .await;
        let port = GooglePlacesPort::new(Client::new(), config(&url));

        let err = port
            .nearby(&NearbyQuery::waste_facilities(Coordinate::new(1.0, 2.0)))
            .await
            .expect_err("refused");

        match err {
            PortError::UpstreamStatus {
                status, message, ..
            } => {
                assert_eq!(status, "REQUEST_DENIED", "status");
                assert_eq!(
                    message.as_deref(),
                    Some("The provided API key is invalid."),
                    "message"
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_upstream_is_an_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);
        let port = GoogleGeocodingPort::new(Client::new(), config(&format!("http://{addr}/json")));

        let err = port
            .geocode(&LocationQuery::new("Pune").expect("query"))
            .await
            .expect_err("nothing listening");

        assert!(matches!(err, PortError::Http(_)), "got {err:?}");
    }

    #[test]
    fn debug_output_hides_the_api_key() {
        let rendered = format!("{:?}", GoogleConfig::new("super-secret"));
        assert!(!rendered.contains("super-secret"), "key redacted");
        assert!(rendered.contains(GEOCODE_URL), "endpoints shown");
    }
}
