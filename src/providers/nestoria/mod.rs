//! Nestoria listing API adapter.
//!
//! See <http://www.nestoria.co.uk/help/api> for the wire protocol.

pub mod listing;

use crate::error::{RepoError, Result};
use crate::models::Listing;
use crate::providers::traits::Repository;
use crate::providers::types::Query;
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, info, warn};

pub use listing::{NestoriaListing, RawNestoriaListing};

const SCHEME: &str = "http";
const URL_PATH: &str = "api";

/// Lowercase country names and codes mapped to their API host
pub const COUNTRY_ENDPOINTS: &[(&str, &str)] = &[
    ("deutschland", "api.nestoria.de"),
    ("de", "api.nestoria.de"),
    ("germany", "api.nestoria.de"),
    ("france", "api.nestoria.fr"),
    ("fr", "api.nestoria.fr"),
    ("united kingdom", "api.nestoria.co.uk"),
    ("uk", "api.nestoria.co.uk"),
    ("england", "api.nestoria.co.uk"),
    ("scotland", "api.nestoria.co.uk"),
    ("spain", "api.nestoria.es"),
    ("es", "api.nestoria.es"),
    ("italy", "api.nestoria.it"),
    ("it", "api.nestoria.it"),
    ("brazil", "api.nestoria.com.br"),
    ("br", "api.nestoria.com.br"),
    ("india", "api.nestoria.in"),
    ("in", "api.nestoria.in"),
    ("mexico", "api.nestoria.mx"),
    ("mx", "api.nestoria.mx"),
];

/// Looks up the API host for a country, ignoring case.
pub fn endpoint_for(country: &str) -> Option<&'static str> {
    let country = country.to_lowercase();
    COUNTRY_ENDPOINTS
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, host)| *host)
}

/// Per-instance settings of a [`NestoriaRepo`]
#[derive(Debug, Clone)]
pub struct NestoriaConfig {
    /// Ask the API for pretty-printed JSON and log response bodies
    pub pretty: bool,
    /// Upper bound for a single request
    pub timeout: Duration,
}

impl Default for NestoriaConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Nestoria implementation of [`Repository`]
pub struct NestoriaRepo {
    client: Client,
    base: Url,
    config: NestoriaConfig,
}

impl NestoriaRepo {
    /// Create a repository for a known country, see [`COUNTRY_ENDPOINTS`]
    pub fn new(country: &str) -> Result<Self> {
        Self::for_country(country, NestoriaConfig::default())
    }

    pub fn for_country(country: &str, config: NestoriaConfig) -> Result<Self> {
        let host = endpoint_for(country)
            .ok_or_else(|| RepoError::UnknownCountry(country.to_lowercase()))?;
        Self::with_config(host, config)
    }

    /// Create a repository talking to an arbitrary API host (`host[:port]`)
    pub fn with_endpoint(endpoint: &str) -> Result<Self> {
        Self::with_config(endpoint, NestoriaConfig::default())
    }

    pub fn with_config(endpoint: &str, config: NestoriaConfig) -> Result<Self> {
        let base = Url::parse(&format!("{SCHEME}://{endpoint}/{URL_PATH}"))
            .map_err(|e| RepoError::InvalidEndpoint(format!("{endpoint}: {e}")))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("houser/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base,
            config,
        })
    }

    /// Host (and port) this repository talks to
    pub fn endpoint(&self) -> &str {
        self.base.authority()
    }

    pub fn config(&self) -> &NestoriaConfig {
        &self.config
    }

    /// Builds the `search_listings` request URL for a query.
    ///
    /// Unset criteria are left out of the request. Property type is not
    /// supported by the API and is ignored.
    pub fn search_url(&self, query: &Query) -> Url {
        let mut url = self.api_url("search_listings");
        {
            let mut params = url.query_pairs_mut();
            if let Some(city) = &query.city {
                params.append_pair("place_name", city);
            }
            if let Some(kind) = query.transaction_type {
                params.append_pair("listing_type", kind.as_str());
            }
            if let Some(rooms) = query.room_min {
                params.append_pair("room_min", &truncate(rooms));
            }
            if let Some(rooms) = query.room_max {
                params.append_pair("room_max", &truncate(rooms));
            }
            if let Some(price) = query.price_max {
                params.append_pair("price_max", &price.to_string());
            }
            if let Some(price) = query.price_min {
                params.append_pair("price_min", &price.to_string());
            }
            if let Some(area) = query.area_min {
                params.append_pair("size_min", &area.to_string());
            }
            if let Some(area) = query.area_max {
                params.append_pair("size_max", &area.to_string());
            }
            if let Some(since) = query.updated_since {
                params.append_pair("updated_min", &since.timestamp().to_string());
            }
        }
        url
    }

    fn api_url(&self, action: &str) -> Url {
        let mut url = self.base.clone();
        {
            let mut params = url.query_pairs_mut();
            params.append_pair("action", action);
            params.append_pair("encoding", "json");
            if self.config.pretty {
                params.append_pair("pretty", "true");
            }
        }
        url
    }
}

fn truncate(rooms: f64) -> String {
    (rooms.trunc() as i64).to_string()
}

#[async_trait]
impl Repository for NestoriaRepo {
    async fn search(&self, query: &Query) -> Result<Vec<Listing>> {
        query.validate()?;

        let url = self.search_url(query);
        debug!("Fetching URL: {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Nestoria returned status: {}", status);
            return Err(RepoError::Status(status.to_string()));
        }
        debug!("status code = {}", status);

        let body = response.bytes().await?;
        debug!("Downloaded {} bytes of JSON", body.len());
        if self.config.pretty {
            debug!("response body:\n{}", String::from_utf8_lossy(&body));
        }

        let envelope: listing::SearchEnvelope = serde_json::from_slice(&body)?;
        let listings: Vec<Listing> = envelope
            .response
            .listings
            .into_iter()
            .map(|raw| raw.finish().into_listing())
            .collect();

        info!("Found {} listings on {}", listings.len(), self.endpoint());
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "Nestoria"
    }
}
