use crate::models::Coordinate;
use anyhow::{bail, Context, Result};
use std::fmt;
use tracing::warn;
use url::form_urlencoded;
use url::Url;

pub const RESULTS_PATH: &str = "/rentals";

/// Navigation target of the results view: `/rentals?location=…&lat=…&lng=…`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsRoute {
    pub location: Option<String>,
    pub coordinate: Option<Coordinate>,
}

impl ResultsRoute {
    pub fn for_search(location: impl Into<String>, coordinate: Option<Coordinate>) -> Self {
        Self {
            location: Some(location.into()),
            coordinate,
        }
    }

    pub fn to_path(&self) -> String {
        let Some(location) = &self.location else {
            return RESULTS_PATH.to_string();
        };

        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("location", location);
        if let Some(coord) = self.coordinate {
            query.append_pair("lat", &coord.lat.to_string());
            query.append_pair("lng", &coord.lng.to_string());
        }
        format!("{}?{}", RESULTS_PATH, query.finish())
    }

    /// Parse a path such as `/rentals?location=Austin&lat=30.2&lng=-97.7`.
    /// A missing or unparsable lat/lng pair drops the coordinate.
    pub fn parse(path: &str) -> Result<Self> {
        let base = Url::parse("http://localhost/").context("Invalid base URL")?;
        let url = base.join(path).with_context(|| format!("Invalid route: {}", path))?;
        if url.path() != RESULTS_PATH {
            bail!("Not a results route: {}", url.path());
        }

        let mut location = None;
        let mut lat = None;
        let mut lng = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "location" => location = Some(value.into_owned()),
                "lat" => lat = Some(value.into_owned()),
                "lng" => lng = Some(value.into_owned()),
                _ => {}
            }
        }

        let coordinate = match (lat, lng) {
            (Some(lat), Some(lng)) => match (lat.parse::<f64>(), lng.parse::<f64>()) {
                (Ok(lat), Ok(lng)) => Some(Coordinate::new(lng, lat)),
                _ => {
                    warn!("Ignoring unparsable coordinates lat={:?} lng={:?}", lat, lng);
                    None
                }
            },
            _ => None,
        };

        Ok(Self {
            location,
            coordinate,
        })
    }
}

impl fmt::Display for ResultsRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}
