use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_GEOCODING_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places/";

const APP_DIR_NAME: &str = "rental-scout";

/// Environment-supplied settings. Every field may be missing; features that
/// need a missing value fall back to their failure path instead of aborting.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub mapbox_token: Option<String>,
    pub api_base_url: Option<Url>,
    pub geocoding_url: Url,
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        // A missing .env file is the normal case
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mapbox_token = var("MAPBOX_TOKEN");
        if mapbox_token.is_none() {
            debug!("MAPBOX_TOKEN not set; geocoding will fall back to raw input");
        }

        let api_base_url = var("API_URL").and_then(|raw| parse_url("API_URL", &raw));

        let geocoding_url = var("GEOCODING_URL")
            .and_then(|raw| parse_url("GEOCODING_URL", &raw))
            .map(with_trailing_slash)
            .unwrap_or_else(default_geocoding_url);

        let data_dir = var("RENTAL_SCOUT_DATA_DIR")
            .map(PathBuf::from)
            .or_else(|| dirs::data_dir().map(|d| d.join(APP_DIR_NAME)))
            .unwrap_or_else(|| PathBuf::from(".rental-scout"));

        Self {
            mapbox_token,
            api_base_url,
            geocoding_url,
            data_dir,
        }
    }
}

pub fn default_geocoding_url() -> Url {
    Url::parse(DEFAULT_GEOCODING_URL).unwrap_or_else(|_| unreachable!("constant URL is valid"))
}

fn parse_url(key: &str, raw: &str) -> Option<Url> {
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}

/// `Url::join` drops the last path segment unless it ends with '/'
pub(crate) fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
