pub mod client;
pub mod mapbox;
pub mod sequence;
pub mod traits;
pub mod types;

pub use client::{Geocoder, Resolution};
pub use mapbox::MapboxGeocoder;
pub use sequence::{RequestSequencer, Ticket};
pub use traits::GeocodeTransport;
pub use types::{GeocodeResponse, GeocodeResult};
