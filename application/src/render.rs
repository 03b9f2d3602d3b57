//! Plain-text rendering of browsing results.

use common::{DateTimeOf, Money};
use service::domain::{Chip, Listing};
use time::{
    format_description::BorrowedFormatItem, macros::format_description,
};

/// Format of a rendered move-in date.
const MOVE_IN: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none]");

/// Renders a monthly rent amount, grouping thousands the marketplace way.
#[must_use]
pub fn price(amount: Money) -> String {
    let plain = amount.to_string();
    let (int, frac) = match plain.split_once('.') {
        Some((int, frac)) => (int.to_owned(), Some(frac.to_owned())),
        None => (plain, None),
    };

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 && c.is_ascii_digit() {
            grouped.push('.');
        }
        grouped.push(c);
    }

    match frac {
        Some(frac) => format!("{grouped},{frac} ₺/month"),
        None => format!("{grouped} ₺/month"),
    }
}

/// Renders a move-in date, if any.
#[must_use]
pub fn move_in<Of: ?Sized>(date: Option<DateTimeOf<Of>>) -> String {
    date.and_then(|date| {
        time::OffsetDateTime::from(date).format(MOVE_IN).ok()
    })
    .unwrap_or_else(|| "Flexible move-in".to_owned())
}

/// Renders a single [`Listing`] card.
#[must_use]
pub fn card(listing: &Listing) -> String {
    let kind = listing.kind.map_or("Listing", |kind| kind.label());
    let room = listing.room_kind.map_or("Room type", |kind| kind.label());
    let place = if listing.neighborhood.is_empty() {
        &listing.address
    } else {
        &listing.neighborhood
    };

    let mut card = format!(
        "{title} ({price})\n  {kind} \u{b7} {room} \u{b7} \
         {available}/{total} rooms \u{b7} {move_in}",
        title = listing.title,
        price = price(listing.rent),
        available = listing.available_rooms,
        total = listing.total_rooms,
        move_in = move_in(listing.available_from),
    );

    if !place.is_empty() {
        card.push_str("\n  ");
        card.push_str(place);
    }

    if !listing.amenities.is_empty() {
        let shown = listing
            .amenities
            .iter()
            .take(3)
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(", ");
        card.push_str("\n  ");
        card.push_str(&shown);
        if listing.amenities.len() > 3 {
            card.push_str(&format!(" +{} more", listing.amenities.len() - 3));
        }
    }

    card
}

/// Renders the removable active filter [`Chip`]s as one line.
#[must_use]
pub fn chips(chips: &[Chip]) -> String {
    chips
        .iter()
        .map(|chip| format!("[{} \u{d7}]", chip.label))
        .collect::<Vec<_>>()
        .join(" ")
}
