use crate::models::Listing;
use std::collections::BTreeSet;

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Position in a listing's image list; wraps at both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageCarousel {
    index: usize,
    len: usize,
}

impl ImageCarousel {
    pub fn for_listing(listing: &Listing) -> Self {
        Self {
            index: 0,
            len: listing.images.len(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    pub fn current<'a>(&self, listing: &'a Listing) -> &'a str {
        listing
            .images
            .get(self.index)
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// "2/5", only when there is more than one image
    pub fn counter(&self) -> Option<String> {
        (self.len > 1).then(|| format!("{}/{}", self.index + 1, self.len))
    }
}

/// Favorited listing ids
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    ids: BTreeSet<u32>,
}

impl Favorites {
    /// Flip `id`; returns whether it is now a favorite
    pub fn toggle(&mut self, id: u32) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }
}

/// Compact listing card
pub fn render_card(listing: &Listing, favorited: bool, carousel: &ImageCarousel) -> String {
    let heart = if favorited { "♥" } else { "♡" };
    let mut badges = format!("[{}]", listing.style);
    if let Some(offer) = &listing.offer {
        badges.push_str(&format!(" [{}]", offer));
    }
    if let Some(counter) = carousel.counter() {
        badges.push_str(&format!("  {}", counter));
    }

    format!(
        "#{} ${}+ {} bd  {}\n   {}\n   {}\n   {}  {}",
        listing.id,
        listing.price,
        listing.bedrooms,
        heart,
        listing.title,
        listing.address,
        badges,
        carousel.current(listing)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::ListingStore;

    #[test]
    fn test_carousel_wraps_both_ways() {
        let listing = ListingStore::sample().get(2).cloned().unwrap();
        let mut carousel = ImageCarousel::for_listing(&listing);
        assert_eq!(listing.images.len(), 3);

        carousel.prev();
        assert_eq!(carousel.index(), 2);
        carousel.next();
        assert_eq!(carousel.index(), 0);
        assert_eq!(carousel.counter().as_deref(), Some("1/3"));
    }

    #[test]
    fn test_listing_without_images_shows_placeholder() {
        let mut listing = ListingStore::sample().get(1).cloned().unwrap();
        listing.images.clear();
        let mut carousel = ImageCarousel::for_listing(&listing);
        carousel.next();

        assert_eq!(carousel.current(&listing), PLACEHOLDER_IMAGE);
        assert_eq!(carousel.counter(), None);
    }

    #[test]
    fn test_card_shows_price_beds_and_offer() {
        let listing = ListingStore::sample().get(1).cloned().unwrap();
        let card = render_card(&listing, true, &ImageCarousel::for_listing(&listing));

        assert!(card.starts_with("#1 $1850+ 1 bd  ♥"));
        assert!(card.contains("[Apartment] [1 month free]  1/4"));
    }

    #[test]
    fn test_favorites_toggle() {
        let mut favorites = Favorites::default();
        assert!(favorites.toggle(3));
        assert!(favorites.contains(3));
        assert!(!favorites.toggle(3));
        assert!(!favorites.contains(3));
    }
}
