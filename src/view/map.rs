use crate::models::Coordinate;
use std::fmt;

pub const DEFAULT_ZOOM: f64 = 12.0;
pub const INITIAL_ZOOM: f64 = 2.0;

/// Map rendering backend
pub trait MapView {
    fn fly_to(&mut self, center: Coordinate, zoom: f64);

    /// Create the marker, or move it if it exists
    fn place_marker(&mut self, at: Coordinate);

    /// Popup text on the marker; `None` removes the popup
    fn set_popup(&mut self, label: Option<&str>);
}

/// Drives a [`MapView`] from search results
pub struct MapController<M> {
    map: M,
    zoom: f64,
}

impl<M: MapView> MapController<M> {
    pub fn new(map: M) -> Self {
        Self {
            map,
            zoom: DEFAULT_ZOOM,
        }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    /// Without a center the map is left as it is
    pub fn show(&mut self, center: Option<Coordinate>, label: &str) {
        let Some(center) = center else {
            return;
        };
        self.map.fly_to(center, self.zoom);
        self.map.place_marker(center);
        let label = label.trim();
        self.map.set_popup((!label.is_empty()).then_some(label));
    }
}

/// In-memory map that renders as a single line of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextMap {
    pub center: Coordinate,
    pub zoom: f64,
    pub marker: Option<Coordinate>,
    pub popup: Option<String>,
}

impl Default for TextMap {
    fn default() -> Self {
        Self {
            center: Coordinate::default(),
            zoom: INITIAL_ZOOM,
            marker: None,
            popup: None,
        }
    }
}

impl MapView for TextMap {
    fn fly_to(&mut self, center: Coordinate, zoom: f64) {
        self.center = center;
        self.zoom = zoom;
    }

    fn place_marker(&mut self, at: Coordinate) {
        self.marker = Some(at);
    }

    fn set_popup(&mut self, label: Option<&str>) {
        self.popup = label.map(str::to_string);
    }
}

impl fmt::Display for TextMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Map @ {} (zoom {})", self.center, self.zoom)?;
        match (&self.marker, &self.popup) {
            (Some(_), Some(label)) => write!(f, " 📍 {}", label),
            (Some(_), None) => write!(f, " 📍"),
            _ => Ok(()),
        }
    }
}
