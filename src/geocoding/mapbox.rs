use super::traits::GeocodeTransport;
use super::types::GeocodeResponse;
use crate::config::{default_geocoding_url, with_trailing_slash, AppConfig};
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("rental-scout/", env!("CARGO_PKG_VERSION"));

/// Mapbox place-search over HTTP
pub struct MapboxGeocoder {
    client: Client,
    base_url: Url,
    access_token: Option<String>,
}

impl MapboxGeocoder {
    pub fn new(base_url: Url, access_token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
            access_token,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.geocoding_url.clone(), config.mapbox_token.clone())
    }

    /// `<base>/<query>.json?access_token=<token>`, with the query as one
    /// percent-encoded path segment
    pub fn request_url(&self, query: &str) -> Result<Url> {
        let token = self
            .access_token
            .as_deref()
            .ok_or_else(|| anyhow!("MAPBOX_TOKEN is not configured"))?;

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Geocoding URL cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .push(&format!("{}.json", query));
        url.query_pairs_mut().append_pair("access_token", token);
        Ok(url)
    }
}

impl Default for MapboxGeocoder {
    fn default() -> Self {
        Self {
            client: Client::new(),
            base_url: default_geocoding_url(),
            access_token: None,
        }
    }
}

#[async_trait]
impl GeocodeTransport for MapboxGeocoder {
    async fn search(&self, query: &str) -> Result<GeocodeResponse> {
        let url = self.request_url(query)?;
        debug!("Geocoding {:?} via {}", query, self.base_url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to reach geocoding service")?;

        if !response.status().is_success() {
            bail!("Geocoding service returned status: {}", response.status());
        }

        response
            .json::<GeocodeResponse>()
            .await
            .context("Failed to parse geocoding response")
    }

    fn source_name(&self) -> &'static str {
        "Mapbox"
    }
}
