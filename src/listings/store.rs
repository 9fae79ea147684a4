use crate::models::{Listing, PetPolicy, PropertyType};
use anyhow::{bail, Result};
use std::collections::HashSet;

/// Immutable in-memory listing collection. Ids are unique and order is fixed
/// for the lifetime of the store.
#[derive(Debug, Clone)]
pub struct ListingStore {
    listings: Vec<Listing>,
}

impl ListingStore {
    /// Build a store, rejecting duplicate ids
    pub fn new(listings: Vec<Listing>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(listings.len());
        for listing in &listings {
            if !seen.insert(listing.id) {
                bail!("Duplicate listing id {} in store", listing.id);
            }
        }
        Ok(Self { listings })
    }

    /// The bundled sample listings standing in for a backend
    pub fn sample() -> Self {
        Self {
            listings: sample_listings(),
        }
    }

    pub fn all(&self) -> &[Listing] {
        &self.listings
    }

    pub fn get(&self, id: u32) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

fn images(slug: &str, count: usize) -> Vec<String> {
    (1..=count)
        .map(|i| format!("/images/listings/{}-{}.jpg", slug, i))
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn sample_listings() -> Vec<Listing> {
    vec![
        Listing {
            id: 1,
            title: "The Monarch at East Sixth".to_string(),
            address: "1201 E 6th St, Austin, TX 78702".to_string(),
            location: "Austin, TX".to_string(),
            price: 1_850,
            bedrooms: 1,
            bathrooms: 1.0,
            images: images("monarch", 4),
            offer: Some("1 month free".to_string()),
            style: "Apartment".to_string(),
            property_type: PropertyType::Apartment,
            description: "Loft-style units a short walk from the East Side bars and coffee shops.".to_string(),
            amenities: strings(&["Pool", "Fitness center", "In-unit laundry"]),
            pets: vec![PetPolicy::SmallDogs, PetPolicy::Cats],
            short_term_lease: false,
        },
        Listing {
            id: 2,
            title: "Barton Hills Bungalow".to_string(),
            address: "2308 Barton Hills Dr, Austin, TX 78704".to_string(),
            location: "Austin, TX".to_string(),
            price: 3_200,
            bedrooms: 3,
            bathrooms: 2.0,
            images: images("barton", 3),
            offer: None,
            style: "House".to_string(),
            property_type: PropertyType::House,
            description: "Renovated bungalow with a fenced yard near the greenbelt trails.".to_string(),
            amenities: strings(&["Fenced yard", "Garage", "Dishwasher"]),
            pets: vec![PetPolicy::SmallDogs, PetPolicy::LargeDogs, PetPolicy::Cats],
            short_term_lease: false,
        },
        Listing {
            id: 3,
            title: "LoHi Lofts".to_string(),
            address: "3300 Tejon St, Denver, CO 80211".to_string(),
            location: "Denver, CO".to_string(),
            price: 2_100,
            bedrooms: 2,
            bathrooms: 1.0,
            images: images("lohi", 5),
            offer: Some("Reduced deposit".to_string()),
            style: "Apartment".to_string(),
            property_type: PropertyType::Apartment,
            description: "Bright corner units with mountain views and a rooftop deck.".to_string(),
            amenities: strings(&["Rooftop deck", "Bike storage", "Furnished"]),
            pets: vec![PetPolicy::Cats],
            short_term_lease: true,
        },
        Listing {
            id: 4,
            title: "Capitol Hill Condo".to_string(),
            address: "1530 Bellevue Ave, Seattle, WA 98122".to_string(),
            location: "Seattle, WA".to_string(),
            price: 2_650,
            bedrooms: 2,
            bathrooms: 2.0,
            images: images("caphill", 3),
            offer: None,
            style: "Condo".to_string(),
            property_type: PropertyType::Condo,
            description: "Top-floor condo with skyline views, two blocks from light rail.".to_string(),
            amenities: strings(&["Concierge", "Parking", "In-unit laundry"]),
            pets: vec![],
            short_term_lease: false,
        },
        Listing {
            id: 5,
            title: "Wicker Park Walk-up".to_string(),
            address: "1642 N Damen Ave, Chicago, IL 60647".to_string(),
            location: "Chicago, IL".to_string(),
            price: 1_600,
            bedrooms: 1,
            bathrooms: 1.0,
            images: images("wicker", 2),
            offer: None,
            style: "Apartment".to_string(),
            property_type: PropertyType::Apartment,
            description: "Classic greystone walk-up with hardwood floors and a shared garden.".to_string(),
            amenities: strings(&["Hardwood floors", "Shared garden"]),
            pets: vec![PetPolicy::Cats],
            short_term_lease: true,
        },
        Listing {
            id: 6,
            title: "Brickell Bay Residences".to_string(),
            address: "1100 Brickell Bay Dr, Miami, FL 33131".to_string(),
            location: "Miami, FL".to_string(),
            price: 3_450,
            bedrooms: 2,
            bathrooms: 2.5,
            images: images("brickell", 6),
            offer: Some("6 weeks free".to_string()),
            style: "Condo".to_string(),
            property_type: PropertyType::Condo,
            description: "Waterfront high-rise with a resort-style pool deck and marina access.".to_string(),
            amenities: strings(&["Pool", "Marina", "Valet parking", "Fitness center"]),
            pets: vec![PetPolicy::SmallDogs],
            short_term_lease: true,
        },
        Listing {
            id: 7,
            title: "Alberta Arts Townhome".to_string(),
            address: "4821 NE 27th Ave, Portland, OR 97211".to_string(),
            location: "Portland, OR".to_string(),
            price: 2_400,
            bedrooms: 3,
            bathrooms: 2.5,
            images: images("alberta", 4),
            offer: None,
            style: "Townhouse".to_string(),
            property_type: PropertyType::Townhouse,
            description: "Three-level townhome with an attached garage and private patio.".to_string(),
            amenities: strings(&["Garage", "Patio", "EV charging"]),
            pets: vec![PetPolicy::SmallDogs, PetPolicy::LargeDogs, PetPolicy::Cats],
            short_term_lease: false,
        },
        Listing {
            id: 8,
            title: "Mueller Park Flats".to_string(),
            address: "1900 Aldrich St, Austin, TX 78723".to_string(),
            location: "Austin, TX".to_string(),
            price: 1_450,
            bedrooms: 0,
            bathrooms: 1.0,
            images: images("mueller", 1),
            offer: Some("Reduced deposit".to_string()),
            style: "Studio".to_string(),
            property_type: PropertyType::Apartment,
            description: "Efficient studios facing the lake park, furnished options available.".to_string(),
            amenities: strings(&["Furnished", "Fitness center"]),
            pets: vec![PetPolicy::Cats],
            short_term_lease: true,
        },
        Listing {
            id: 9,
            title: "Park Slope Brownstone Floor".to_string(),
            address: "482 5th St, Brooklyn, NY 11215".to_string(),
            location: "Brooklyn, NY".to_string(),
            price: 4_100,
            bedrooms: 2,
            bathrooms: 1.0,
            images: images("parkslope", 3),
            offer: None,
            style: "Apartment".to_string(),
            property_type: PropertyType::Apartment,
            description: "Parlor floor of a restored brownstone with original moldings.".to_string(),
            amenities: strings(&["Fireplace", "Dishwasher"]),
            pets: vec![],
            short_term_lease: false,
        },
        Listing {
            id: 10,
            title: "Highlands Family Home".to_string(),
            address: "3710 W 32nd Ave, Denver, CO 80211".to_string(),
            location: "Denver, CO".to_string(),
            price: 3_900,
            bedrooms: 4,
            bathrooms: 3.0,
            images: images("highlands", 5),
            offer: None,
            style: "House".to_string(),
            property_type: PropertyType::House,
            description: "Four-bedroom home on a tree-lined street with a finished basement.".to_string(),
            amenities: strings(&["Finished basement", "Garage", "Fenced yard"]),
            pets: vec![PetPolicy::SmallDogs, PetPolicy::LargeDogs],
            short_term_lease: false,
        },
        Listing {
            id: 11,
            title: "Mission Dolores Flat".to_string(),
            address: "3601 18th St, San Francisco, CA 94110".to_string(),
            location: "San Francisco, CA".to_string(),
            price: 3_750,
            bedrooms: 2,
            bathrooms: 1.0,
            images: images("mission", 4),
            offer: Some("Move-in special".to_string()),
            style: "Apartment".to_string(),
            property_type: PropertyType::Apartment,
            description: "Edwardian flat across from the park, bay windows throughout.".to_string(),
            amenities: strings(&["Bay windows", "Shared laundry"]),
            pets: vec![PetPolicy::Cats],
            short_term_lease: false,
        },
        Listing {
            id: 12,
            title: "South Congress Townhouse".to_string(),
            address: "610 W Live Oak St, Austin, TX 78704".to_string(),
            location: "Austin, TX".to_string(),
            price: 2_950,
            bedrooms: 2,
            bathrooms: 2.5,
            images: images("soco", 3),
            offer: None,
            style: "Townhouse".to_string(),
            property_type: PropertyType::Townhouse,
            description: "Modern townhouse minutes from South Congress shops, with a 3D tour.".to_string(),
            amenities: strings(&["Rooftop deck", "Garage", "Smart home"]),
            pets: vec![PetPolicy::SmallDogs, PetPolicy::Cats],
            short_term_lease: false,
        },
    ]
}
