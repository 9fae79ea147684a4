pub mod apply;
pub mod controller;
pub mod state;

pub use apply::matches_filters;
pub use controller::FilterController;
pub use state::{
    parse_price_input, BathsFilter, BedsFilter, FilterGroup, FilterState, MoreOptions, PriceRange,
    PropertyTypeFilter,
};
