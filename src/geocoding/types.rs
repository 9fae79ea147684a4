use crate::models::Coordinate;
use serde::Deserialize;

/// Place-search response body; only the fields we read
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub place_name: String,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    /// `[lng, lat]`
    pub coordinates: Vec<f64>,
}

impl Feature {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self.geometry.coordinates.as_slice() {
            [lng, lat, ..] if lng.is_finite() && lat.is_finite() => Some(Coordinate::new(*lng, *lat)),
            _ => None,
        }
    }
}

/// Outcome of resolving one search text
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    /// Canonical place name, or the input text when nothing was found
    pub label: String,
    pub coordinate: Option<Coordinate>,
}

impl GeocodeResult {
    pub fn unresolved(text: impl Into<String>) -> Self {
        Self {
            label: text.into(),
            coordinate: None,
        }
    }
}

impl GeocodeResponse {
    /// First candidate with a usable position
    pub fn best_match(&self) -> Option<GeocodeResult> {
        let first = self.features.first()?;
        Some(GeocodeResult {
            label: first.place_name.clone(),
            coordinate: Some(first.coordinate()?),
        })
    }
}
