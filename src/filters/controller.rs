use super::state::{
    parse_price_input, BathsFilter, BedsFilter, FilterGroup, FilterState, MoreOptions, PriceRange,
    PropertyTypeFilter,
};
use crate::error::FilterError;
use tracing::debug;

type Listener = Box<dyn FnMut(&FilterState) + Send>;

/// Owns the current [`FilterState`] and reports every accepted change to a
/// single listener, always with the complete new state.
#[derive(Default)]
pub struct FilterController {
    state: FilterState,
    listener: Option<Listener>,
}

impl FilterController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the change listener, replacing any previous one
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(&FilterState) + Send + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Apply a price range. Invalid ranges are rejected and nothing changes.
    pub fn set_price(&mut self, min: Option<i64>, max: Option<i64>) -> Result<(), FilterError> {
        let price = PriceRange::new(min, max)?;
        self.replace(FilterState {
            price,
            ..self.state.clone()
        });
        Ok(())
    }

    /// Apply the raw text of the min/max price boxes
    pub fn apply_price_input(&mut self, min: &str, max: &str) -> Result<(), FilterError> {
        let min = parse_price_input(min)?;
        let max = parse_price_input(max)?;
        self.set_price(min, max)
    }

    pub fn set_beds(&mut self, beds: BedsFilter) {
        self.replace(FilterState {
            beds,
            ..self.state.clone()
        });
    }

    /// Beds and baths come from the same dialog and change together
    pub fn set_beds_baths(&mut self, beds: BedsFilter, baths: BathsFilter) {
        self.replace(FilterState {
            beds,
            baths,
            ..self.state.clone()
        });
    }

    pub fn set_property_type(&mut self, property_type: PropertyTypeFilter) {
        self.replace(FilterState {
            property_type,
            ..self.state.clone()
        });
    }

    pub fn set_more_options(&mut self, more_options: MoreOptions) {
        self.replace(FilterState {
            more_options,
            ..self.state.clone()
        });
    }

    pub fn reset(&mut self, group: FilterGroup) {
        let next = self.state.reset(group);
        self.replace(next);
    }

    fn replace(&mut self, next: FilterState) {
        debug!(?next, "Filter state changed");
        self.state = next;
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.state);
        }
    }
}
