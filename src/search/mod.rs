pub mod route;
pub mod session;

pub use route::{ResultsRoute, RESULTS_PATH};
pub use session::{ContinueView, SearchOutcome, SearchResults, SearchSession, SelectionMode, RECENT_SHOWN};
