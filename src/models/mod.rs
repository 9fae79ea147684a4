use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of dwelling a listing offers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Apartment,
    House,
    Condo,
    Townhouse,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Condo,
        PropertyType::Townhouse,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::House => "House",
            PropertyType::Condo => "Condo",
            PropertyType::Townhouse => "Townhouse",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        PropertyType::ALL
            .into_iter()
            .find(|t| t.label().to_lowercase() == wanted)
            .ok_or_else(|| format!("unknown property type: {}", s.trim()))
    }
}

/// Pet rules, both as a listing attribute and as a search refinement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum PetPolicy {
    SmallDogs,
    LargeDogs,
    Cats,
    NoPets,
}

impl PetPolicy {
    pub const ALL: [PetPolicy; 4] = [
        PetPolicy::SmallDogs,
        PetPolicy::LargeDogs,
        PetPolicy::Cats,
        PetPolicy::NoPets,
    ];

    /// Stable identifier used on the command line and in persisted filters
    pub fn id(self) -> &'static str {
        match self {
            PetPolicy::SmallDogs => "small-dogs",
            PetPolicy::LargeDogs => "large-dogs",
            PetPolicy::Cats => "cats",
            PetPolicy::NoPets => "no-pets",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PetPolicy::SmallDogs => "Allows small dogs",
            PetPolicy::LargeDogs => "Allows large dogs",
            PetPolicy::Cats => "Allows cats",
            PetPolicy::NoPets => "No pets allowed",
        }
    }
}

impl FromStr for PetPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        PetPolicy::ALL
            .into_iter()
            .find(|p| p.id() == wanted)
            .ok_or_else(|| format!("unknown pet option: {} (expected one of small-dogs, large-dogs, cats, no-pets)", s.trim()))
    }
}

/// Geographic position as returned by the geocoding service
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Core rental listing data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: u32,
    pub title: String,
    pub address: String,
    /// City and region, e.g. "Austin, TX"
    pub location: String,
    /// Monthly rent in whole dollars
    pub price: u64,
    pub bedrooms: u8,
    pub bathrooms: f32,
    pub images: Vec<String>,
    pub offer: Option<String>,
    pub style: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub description: String,
    pub amenities: Vec<String>,
    /// Pets the landlord accepts; empty means no pets
    pub pets: Vec<PetPolicy>,
    pub short_term_lease: bool,
}

impl Listing {
    pub fn allows_pets(&self) -> bool {
        self.pets.iter().any(|p| *p != PetPolicy::NoPets)
    }
}

/// A past location search, most recent first in the persisted list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHistoryEntry {
    pub id: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<Coordinate>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl SearchHistoryEntry {
    /// New entry stamped with `at`; the id is the millisecond timestamp
    pub fn new(location: impl Into<String>, coords: Option<Coordinate>, at: DateTime<Utc>) -> Self {
        Self {
            id: at.timestamp_millis().to_string(),
            location: location.into(),
            coords,
            timestamp: at,
        }
    }
}
