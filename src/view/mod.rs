pub mod card;
pub mod detail;
pub mod map;
pub mod panel;

pub use card::{render_card, Favorites, ImageCarousel};
pub use detail::render_detail;
pub use map::{MapController, MapView, TextMap};
pub use panel::{render_filter_summary, render_history, render_listings};
