//! Command line and environment configuration.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use wasteinfo_provider_google::{GEOCODE_URL, GoogleConfig, NEARBY_SEARCH_URL};

#[derive(Debug, Parser)]
#[command(name = "wasteinfo")]
#[command(about = "Find waste disposal and recycling facilities near a location")]
#[command(version)]
pub(crate) struct Cli {
    /// Address to bind the HTTP server to.
    #[arg(long, env = "WASTEINFO_HOST", default_value = "0.0.0.0")]
    pub(crate) host: String,

    /// Port to listen on.
    #[arg(long, env = "WASTEINFO_PORT", default_value_t = 5000)]
    pub(crate) port: u16,

    /// Google API key used for geocoding and nearby search.
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub(crate) google_api_key: String,

    /// Geocoding endpoint.
    #[arg(long, env = "WASTEINFO_GEOCODE_URL", default_value = GEOCODE_URL)]
    pub(crate) geocode_url: String,

    /// Places nearby search endpoint.
    #[arg(long, env = "WASTEINFO_NEARBY_SEARCH_URL", default_value = NEARBY_SEARCH_URL)]
    pub(crate) nearby_search_url: String,

    /// Timeout for each upstream request, in seconds.
    #[arg(long, env = "WASTEINFO_REQUEST_TIMEOUT_SECS")]
    pub(crate) request_timeout_secs: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl Cli {
    /// Socket address from `--host` and `--port`.
    pub(crate) fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }

    /// Provider configuration with the credential passed in explicitly.
    pub(crate) fn google_config(&self) -> GoogleConfig {
        GoogleConfig::new(self.google_api_key.clone())
            .with_geocode_url(self.geocode_url.clone())
            .with_nearby_search_url(self.nearby_search_url.clone())
            .with_timeout(self.request_timeout_secs.map(Duration::from_secs))
    }
}
