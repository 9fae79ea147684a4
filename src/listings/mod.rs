pub mod matcher;
pub mod store;

pub use matcher::{select, select_filtered, MAX_RESULTS};
pub use store::ListingStore;
