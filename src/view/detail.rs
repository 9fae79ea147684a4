use super::card::ImageCarousel;
use crate::models::Listing;

/// Full listing view, as shown in the details modal
pub fn render_detail(listing: &Listing, favorited: bool, carousel: &ImageCarousel) -> String {
    let heart = if favorited { " ♥" } else { "" };

    let mut lines = vec![
        format!("{}{}", listing.title, heart),
        "=".repeat(listing.title.chars().count()),
        listing.address.clone(),
        listing.location.clone(),
        String::new(),
        format!(
            "${}/mo · {} bd · {} ba · {}",
            listing.price, listing.bedrooms, listing.bathrooms, listing.property_type
        ),
    ];
    if let Some(offer) = &listing.offer {
        lines.push(format!("Offer: {}", offer));
    }
    if listing.short_term_lease {
        lines.push("Short term lease available".to_string());
    }

    let pets = if listing.allows_pets() {
        listing
            .pets
            .iter()
            .map(|p| p.label())
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        "No pets allowed".to_string()
    };
    lines.push(format!("Pets: {}", pets));

    if !listing.description.is_empty() {
        lines.push(String::new());
        lines.push(listing.description.clone());
    }

    if !listing.amenities.is_empty() {
        lines.push(String::new());
        lines.push("Amenities:".to_string());
        lines.extend(listing.amenities.iter().map(|a| format!("  • {}", a)));
    }

    lines.push(String::new());
    lines.push(match carousel.counter() {
        Some(counter) => format!("Image {}: {}", counter, carousel.current(listing)),
        None => format!("Image: {}", carousel.current(listing)),
    });

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
