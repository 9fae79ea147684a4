use super::state::{FilterState, MoreOptions};
use crate::models::{Listing, PetPolicy};

/// Whether `listing` satisfies every active refinement in `filters`
///
/// - price bounds are inclusive
/// - keyword terms must each appear in title, address, description or amenities
/// - "no pets" excludes listings that accept any pet; other pet choices
///   must all be accepted
/// - move-in date, commute and 3D tour have no listing attribute to test
pub fn matches_filters(listing: &Listing, filters: &FilterState) -> bool {
    filters.price.contains(listing.price)
        && filters.beds.matches(listing.bedrooms)
        && filters.baths.matches(listing.bathrooms)
        && filters.property_type.matches(listing.property_type)
        && matches_more_options(listing, &filters.more_options)
}

fn matches_more_options(listing: &Listing, more: &MoreOptions) -> bool {
    if more.short_term_lease && !listing.short_term_lease {
        return false;
    }
    matches_pets(listing, more) && matches_keywords(listing, more)
}

fn matches_pets(listing: &Listing, more: &MoreOptions) -> bool {
    more.pets.iter().all(|pet| match pet {
        PetPolicy::NoPets => !listing.allows_pets(),
        wanted => listing.pets.contains(wanted),
    })
}

fn matches_keywords(listing: &Listing, more: &MoreOptions) -> bool {
    let terms = more.keyword_terms();
    if terms.is_empty() {
        return true;
    }

    let haystack = format!(
        "{} {} {} {}",
        listing.title,
        listing.address,
        listing.description,
        listing.amenities.join(" ")
    )
    .to_lowercase();

    terms.iter().all(|term| haystack.contains(term.as_str()))
}
