use super::route::ResultsRoute;
use crate::filters::FilterState;
use crate::geocoding::{GeocodeTransport, Geocoder, Resolution};
use crate::listings::{self, ListingStore, MAX_RESULTS};
use crate::models::{Listing, SearchHistoryEntry};
use crate::storage::{KeyValueStore, SearchHistory};
use chrono::Utc;
use tracing::{info, warn};

/// How much of the [`FilterState`] a selection honours
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// Location only; price, beds and the rest are carried but unused
    #[default]
    LocationOnly,
    /// Location, then every active filter
    Strict,
}

/// A completed search ready to render
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub entry: SearchHistoryEntry,
    pub route: ResultsRoute,
    pub listings: Vec<Listing>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Blank input
    Skipped,
    /// A newer search was started before this one resolved
    Superseded,
    Completed(SearchResults),
}

/// Landing page "continue your search" content
#[derive(Debug, Clone, PartialEq)]
pub struct ContinueView {
    pub recent: Vec<SearchHistoryEntry>,
    pub listings: Vec<Listing>,
}

/// Number of recent searches the landing page offers
pub const RECENT_SHOWN: usize = 2;

/// Geocode → record history → select listings
pub struct SearchSession<T, S> {
    geocoder: Geocoder<T>,
    history: SearchHistory<S>,
    store: ListingStore,
    mode: SelectionMode,
}

impl<T: GeocodeTransport, S: KeyValueStore> SearchSession<T, S> {
    pub fn new(geocoder: Geocoder<T>, history: SearchHistory<S>, store: ListingStore) -> Self {
        Self {
            geocoder,
            history,
            store,
            mode: SelectionMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn store(&self) -> &ListingStore {
        &self.store
    }

    pub fn history(&self) -> &SearchHistory<S> {
        &self.history
    }

    /// Search controls are disabled while this is true
    pub fn is_searching(&self) -> bool {
        self.geocoder.is_in_flight()
    }

    /// Run one search. Failures in geocoding or history persistence degrade
    /// to fallbacks and never abort the search.
    pub async fn search(&self, text: &str, filters: &FilterState) -> SearchOutcome {
        let result = match self.geocoder.resolve_latest(text).await {
            Resolution::Skipped => return SearchOutcome::Skipped,
            Resolution::Superseded(_) => return SearchOutcome::Superseded,
            Resolution::Current(result) => result,
        };

        let entry = SearchHistoryEntry::new(result.label.clone(), result.coordinate, Utc::now());
        if let Err(e) = self.history.record(entry.clone()) {
            warn!("Search history not saved: {:#}", e);
        }

        let listings = self.select(&result.label, filters);
        info!("🏠 {} listings for {}", listings.len(), result.label);

        SearchOutcome::Completed(SearchResults {
            route: ResultsRoute::for_search(result.label, result.coordinate),
            entry,
            listings,
        })
    }

    /// Listings for the results page behind `route`
    pub fn results_for(&self, route: &ResultsRoute, filters: &FilterState) -> Vec<Listing> {
        match &route.location {
            Some(location) => self.select(location, filters),
            None => self.first_page(),
        }
    }

    /// Recent searches plus listings for the newest of them, or the first
    /// page of the store when there is no history
    pub fn continue_search(&self) -> ContinueView {
        let mut recent = self.history.load_all();
        let listings = match recent.first() {
            Some(last) => self.select(&last.location, &FilterState::default()),
            None => self.first_page(),
        };
        recent.truncate(RECENT_SHOWN);
        ContinueView { recent, listings }
    }

    fn select(&self, location: &str, filters: &FilterState) -> Vec<Listing> {
        let selected = match self.mode {
            SelectionMode::LocationOnly => listings::select(location, self.store.all()),
            SelectionMode::Strict => listings::select_filtered(location, filters, self.store.all()),
        };
        selected.into_iter().cloned().collect()
    }

    fn first_page(&self) -> Vec<Listing> {
        self.store.all().iter().take(MAX_RESULTS).cloned().collect()
    }
}
