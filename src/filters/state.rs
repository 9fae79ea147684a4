use crate::error::FilterError;
use crate::models::{PetPolicy, PropertyType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Inclusive monthly rent bounds; `None` on either side is unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl PriceRange {
    /// Validate raw bounds. A zero minimum is the same as no minimum.
    pub fn new(min: Option<i64>, max: Option<i64>) -> Result<Self, FilterError> {
        if min.is_some_and(|v| v < 0) || max.is_some_and(|v| v < 0) {
            return Err(FilterError::NegativePrice);
        }
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(FilterError::MinAboveMax);
            }
        }
        Ok(Self {
            min: min.filter(|v| *v > 0).map(|v| v as u64),
            max: max.map(|v| v as u64),
        })
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, price: u64) -> bool {
        self.min.map_or(true, |lo| price >= lo) && self.max.map_or(true, |hi| price <= hi)
    }

    /// "$1000 - $2500", with "∞" for an open top
    pub fn label(&self) -> String {
        let max = self.max.map_or_else(|| "∞".to_string(), |v| v.to_string());
        format!("${} - ${}", self.min.unwrap_or(0), max)
    }
}

/// Parse one price input box. Blank means unbounded; decimals are rounded
/// to whole dollars.
pub fn parse_price_input(input: &str) -> Result<Option<i64>, FilterError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(whole) = trimmed.parse::<i64>() {
        return Ok(Some(whole));
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value.round() as i64)),
        _ => Err(FilterError::InvalidPrice(trimmed.to_string())),
    }
}

/// Bedroom refinement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BedsFilter {
    #[default]
    Any,
    AtLeast(u8),
    Exactly(u8),
}

impl BedsFilter {
    pub const CHOICES: [&'static str; 6] = ["Any", "1+", "2+", "3+", "4+", "5+"];

    /// Parse one of [`Self::CHOICES`]; `exact` turns "n+" into exactly n
    pub fn from_choice(choice: &str, exact: bool) -> Result<Self, FilterError> {
        let choice = choice.trim();
        if choice.eq_ignore_ascii_case("any") {
            return Ok(BedsFilter::Any);
        }
        let count: u8 = choice
            .strip_suffix('+')
            .unwrap_or(choice)
            .parse()
            .map_err(|_| FilterError::UnknownOption(choice.to_string()))?;
        if !(1..=5).contains(&count) {
            return Err(FilterError::UnknownOption(choice.to_string()));
        }
        Ok(if exact {
            BedsFilter::Exactly(count)
        } else {
            BedsFilter::AtLeast(count)
        })
    }

    pub fn matches(&self, bedrooms: u8) -> bool {
        match *self {
            BedsFilter::Any => true,
            BedsFilter::AtLeast(n) => bedrooms >= n,
            BedsFilter::Exactly(n) => bedrooms == n,
        }
    }
}

impl fmt::Display for BedsFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BedsFilter::Any => f.write_str("Any"),
            BedsFilter::AtLeast(n) => write!(f, "{}+", n),
            BedsFilter::Exactly(n) => write!(f, "{}", n),
        }
    }
}

/// Bathroom refinement, counted in half baths so "1.5+" stays exact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BathsFilter {
    #[default]
    Any,
    AtLeastHalves(u8),
}

impl BathsFilter {
    pub const CHOICES: [&'static str; 6] = ["Any", "1+", "1.5+", "2+", "3+", "4+"];

    pub fn from_choice(choice: &str) -> Result<Self, FilterError> {
        let choice = choice.trim();
        if choice.eq_ignore_ascii_case("any") {
            return Ok(BathsFilter::Any);
        }
        let halves = match choice.strip_suffix('+').unwrap_or(choice) {
            "1" => 2,
            "1.5" => 3,
            "2" => 4,
            "3" => 6,
            "4" => 8,
            _ => return Err(FilterError::UnknownOption(choice.to_string())),
        };
        Ok(BathsFilter::AtLeastHalves(halves))
    }

    pub fn matches(&self, bathrooms: f32) -> bool {
        match *self {
            BathsFilter::Any => true,
            BathsFilter::AtLeastHalves(halves) => bathrooms * 2.0 >= f32::from(halves),
        }
    }
}

impl fmt::Display for BathsFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BathsFilter::Any => f.write_str("Any"),
            BathsFilter::AtLeastHalves(h) if h % 2 == 0 => write!(f, "{}+", h / 2),
            BathsFilter::AtLeastHalves(h) => write!(f, "{}.5+", h / 2),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyTypeFilter {
    #[default]
    All,
    Only(PropertyType),
}

impl PropertyTypeFilter {
    pub fn matches(&self, property_type: PropertyType) -> bool {
        match self {
            PropertyTypeFilter::All => true,
            PropertyTypeFilter::Only(t) => *t == property_type,
        }
    }
}

impl fmt::Display for PropertyTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyTypeFilter::All => f.write_str("All types"),
            PropertyTypeFilter::Only(t) => f.write_str(t.label()),
        }
    }
}

/// The "More options" group, applied and reset as a unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoreOptions {
    pub move_in_date: Option<NaiveDate>,
    pub pets: BTreeSet<PetPolicy>,
    pub short_term_lease: bool,
    pub commute: String,
    pub show_commute_filters: bool,
    pub keywords: String,
    pub three_d_tour: bool,
}

impl MoreOptions {
    pub fn toggle_pet(&mut self, pet: PetPolicy) {
        if !self.pets.remove(&pet) {
            self.pets.insert(pet);
        }
    }

    /// Comma separated keyword terms, lower-cased, blanks dropped
    pub fn keyword_terms(&self) -> Vec<String> {
        self.keywords
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    }

    pub fn is_default(&self) -> bool {
        *self == MoreOptions::default()
    }
}

/// Which part of the state a reset clears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterGroup {
    Price,
    BedsBaths,
    PropertyType,
    MoreOptions,
    All,
}

/// Every refinement currently applied to a search. Replaced wholesale on
/// each change; the default applies nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub price: PriceRange,
    pub beds: BedsFilter,
    pub baths: BathsFilter,
    pub property_type: PropertyTypeFilter,
    pub more_options: MoreOptions,
}

impl FilterState {
    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }

    /// Copy of `self` with `group` back at its defaults
    pub fn reset(&self, group: FilterGroup) -> FilterState {
        let mut next = self.clone();
        match group {
            FilterGroup::Price => next.price = PriceRange::default(),
            FilterGroup::BedsBaths => {
                next.beds = BedsFilter::default();
                next.baths = BathsFilter::default();
            }
            FilterGroup::PropertyType => next.property_type = PropertyTypeFilter::default(),
            FilterGroup::MoreOptions => next.more_options = MoreOptions::default(),
            FilterGroup::All => next = FilterState::default(),
        }
        next
    }

    /// "Any", or "2+ bed, 1.5+ bath"
    pub fn beds_baths_label(&self) -> String {
        if self.beds == BedsFilter::Any && self.baths == BathsFilter::Any {
            "Any".to_string()
        } else {
            format!("{} bed, {} bath", self.beds, self.baths)
        }
    }

    /// Human-readable chips for every non-default refinement
    pub fn summary(&self) -> Vec<String> {
        let mut chips = Vec::new();
        if !self.price.is_unbounded() {
            chips.push(format!("Price: {}", self.price.label()));
        }
        if self.beds != BedsFilter::Any || self.baths != BathsFilter::Any {
            chips.push(format!("Beds: {}", self.beds_baths_label()));
        }
        if self.property_type != PropertyTypeFilter::All {
            chips.push(format!("Type: {}", self.property_type));
        }

        let more = &self.more_options;
        if let Some(date) = more.move_in_date {
            chips.push(format!("Move in date: {}", date.format("%m/%d/%Y")));
        }
        if !more.pets.is_empty() {
            let pets: Vec<&str> = more.pets.iter().map(|p| p.id()).collect();
            chips.push(format!("Pets: {}", pets.join(", ")));
        }
        if more.short_term_lease {
            chips.push("Short term lease available".to_string());
        }
        if !more.commute.trim().is_empty() {
            chips.push(format!("Commute time: {}", more.commute.trim()));
        }
        if !more.keywords.trim().is_empty() {
            chips.push(format!("Keywords: {}", more.keywords.trim()));
        }
        chips
    }
}
