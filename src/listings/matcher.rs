use crate::filters::{matches_filters, FilterState};
use crate::models::Listing;
use tracing::{debug, info};

/// Most listings a single selection returns
pub const MAX_RESULTS: usize = 6;

/// Location key derived from free-text input
struct LocationQuery {
    term: String,
    city: String,
}

impl LocationQuery {
    fn parse(text: &str) -> Self {
        let term = text.trim().to_lowercase();
        let city = term.split(',').next().unwrap_or_default().trim().to_string();
        Self { term, city }
    }

    fn matches(&self, listing: &Listing) -> bool {
        let location = listing.location.to_lowercase();
        let address = listing.address.to_lowercase();
        [location, address]
            .iter()
            .any(|field| field.contains(&self.city) || field.contains(&self.term))
    }
}

/// Listings whose location or address mentions the searched city, in store
/// order, or the whole store when nothing matches
fn location_matches<'a>(text: &str, listings: &'a [Listing]) -> Vec<&'a Listing> {
    let query = LocationQuery::parse(text);
    let matched: Vec<&Listing> = listings.iter().filter(|l| query.matches(l)).collect();

    if matched.is_empty() {
        info!("No exact matches found for {:?}, showing all available properties", text);
        listings.iter().collect()
    } else {
        matched
    }
}

/// Select up to [`MAX_RESULTS`] listings for a location search
///
/// Never empty for a non-empty store. Active filters play no part in this
/// selection; see [`select_filtered`] for that.
pub fn select<'a>(location: &str, listings: &'a [Listing]) -> Vec<&'a Listing> {
    let mut selected = location_matches(location, listings);
    selected.truncate(MAX_RESULTS);
    info!("Found {} properties for {:?}", selected.len(), location);
    selected
}

/// Like [`select`], then drop listings failing any active filter
///
/// The fallback to the whole store happens before filtering, so an
/// over-constrained search can come back empty.
pub fn select_filtered<'a>(
    location: &str,
    filters: &FilterState,
    listings: &'a [Listing],
) -> Vec<&'a Listing> {
    let candidates = location_matches(location, listings);
    let total = candidates.len();

    let selected: Vec<&Listing> = candidates
        .into_iter()
        .filter(|l| matches_filters(l, filters))
        .take(MAX_RESULTS)
        .collect();

    debug!("{} of {} location matches passed the active filters", selected.len(), total);
    info!("Found {} properties for {:?}", selected.len(), location);
    selected
}
