use super::card::{render_card, Favorites, ImageCarousel};
use crate::filters::FilterState;
use crate::models::{Listing, SearchHistoryEntry};

/// Listings column of the results page
pub fn render_listings(heading: &str, listings: &[Listing], favorites: &Favorites) -> String {
    if listings.is_empty() {
        return format!("{}\nNo listings match these filters.", heading);
    }

    let cards: Vec<String> = listings
        .iter()
        .map(|l| render_card(l, favorites.contains(l.id), &ImageCarousel::for_listing(l)))
        .collect();
    format!("{} ({} results)\n\n{}", heading, listings.len(), cards.join("\n\n"))
}

/// One line of active filter chips, or `None` when nothing is applied
pub fn render_filter_summary(filters: &FilterState) -> Option<String> {
    let chips = filters.summary();
    (!chips.is_empty()).then(|| chips.join(" | "))
}

pub fn render_history(entries: &[SearchHistoryEntry]) -> String {
    if entries.is_empty() {
        return "No recent searches.".to_string();
    }
    entries
        .iter()
        .map(|e| {
            let when = e.timestamp.format("%Y-%m-%d %H:%M");
            match e.coords {
                Some(c) => format!("{}  {}  ({})", when, e.location, c),
                None => format!("{}  {}", when, e.location),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::BedsFilter;
    use crate::listings::ListingStore;
    use crate::models::Coordinate;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_empty_results_message() {
        let text = render_listings("Austin", &[], &Favorites::default());
        assert!(text.ends_with("No listings match these filters."));
    }

    #[test]
    fn test_results_include_every_card() {
        let store = ListingStore::sample();
        let listings = store.all()[..3].to_vec();
        let text = render_listings("Rentals", &listings, &Favorites::default());

        assert!(text.starts_with("Rentals (3 results)"));
        assert!(text.contains("#1 $1850+"));
        assert!(text.contains("#3 $2100+"));
    }

    #[test]
    fn test_filter_summary() {
        assert_eq!(render_filter_summary(&FilterState::default()), None);

        let filters = FilterState {
            beds: BedsFilter::AtLeast(2),
            ..FilterState::default()
        };
        assert_eq!(render_filter_summary(&filters).as_deref(), Some("Beds: 2+ bed, Any bath"));
    }

    #[test]
    fn test_history_lines() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let entries = vec![
            SearchHistoryEntry::new("Austin, Texas", Some(Coordinate::new(-97.7431, 30.2672)), at),
            SearchHistoryEntry::new("atlantis", None, at),
        ];
        assert_eq!(
            render_history(&entries),
            "2024-05-01 09:30  Austin, Texas  (30.2672, -97.7431)\n2024-05-01 09:30  atlantis"
        );
    }
}
