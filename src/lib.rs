//! Rental Scout - search rental listings by location
//!
//! The pipeline behind a search: free text is geocoded to a place name and
//! position, recorded in a short most-recent-first history, and matched
//! against the listing store. Around it sit the filter state the results
//! page shows, a client for the external auth API, and text renderings of
//! the map, listing cards and detail views.
//!
//! # Example
//!
//! ```no_run
//! use rental_scout::filters::FilterState;
//! use rental_scout::geocoding::{Geocoder, MapboxGeocoder};
//! use rental_scout::listings::ListingStore;
//! use rental_scout::search::{SearchOutcome, SearchSession};
//! use rental_scout::storage::{MemoryStore, SearchHistory};
//! use rental_scout::AppConfig;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = AppConfig::from_env();
//! let geocoder = Geocoder::new(MapboxGeocoder::from_config(&config)?);
//! let session = SearchSession::new(geocoder, SearchHistory::new(MemoryStore::new()), ListingStore::sample());
//!
//! if let SearchOutcome::Completed(results) = session.search("Austin, TX", &FilterState::default()).await {
//!     println!("{} listings, next page {}", results.listings.len(), results.route);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod filters;
pub mod geocoding;
mod in_flight;
pub mod listings;
pub mod models;
pub mod search;
pub mod storage;
pub mod view;

pub use config::AppConfig;
pub use error::{AuthError, FilterError};
pub use models::{Coordinate, Listing, SearchHistoryEntry};
