//! Codec of the persisted [`Criteria`] representation.
//!
//! The persisted representation is a flat URL query string. Decoding is
//! total: any input, including a garbled one, produces a best-effort
//! [`Criteria`] with defaults for missing or invalid fields. Encoding emits
//! a key only for a non-default field, so `decode(encode(c)) == c` holds for
//! every [`Criteria`] a prior [`decode`] could have produced.

use url::form_urlencoded;

use crate::domain::{
    criteria::{Amenity, LocationQuery},
    Criteria,
};

/// Query key of the location filter.
const LOCATION: &str = "location";

/// Query key of the lower price bound.
const PRICE_MIN: &str = "price_min";

/// Query key of the upper price bound.
const PRICE_MAX: &str = "price_max";

/// Query key of the listing kind filter.
const LISTING_TYPE: &str = "listing_type";

/// Query key of the room kind filter.
const ROOM_TYPE: &str = "room_type";

/// Query key of the comma-joined amenities filter.
const AMENITIES: &str = "amenities";

/// Decodes a [`Criteria`] from its persisted representation.
///
/// The first occurrence of a key wins; unknown keys are ignored.
#[must_use]
pub fn decode(query: &str) -> Criteria {
    let pairs: Vec<(String, String)> =
        form_urlencoded::parse(query.as_bytes()).into_owned().collect();
    let first = |key: &str| {
        pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    };

    Criteria {
        location: first(LOCATION).and_then(LocationQuery::new),
        price_min: first(PRICE_MIN).and_then(|v| v.parse().ok()),
        price_max: first(PRICE_MAX).and_then(|v| v.parse().ok()),
        kind: first(LISTING_TYPE).and_then(|v| v.trim().parse().ok()),
        room_kind: first(ROOM_TYPE).and_then(|v| v.trim().parse().ok()),
        amenities: first(AMENITIES)
            .map(|v| v.split(',').filter_map(Amenity::new).collect())
            .unwrap_or_default(),
    }
}

/// Encodes the given [`Criteria`] into its persisted representation.
#[must_use]
pub fn encode(criteria: &Criteria) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    if let Some(location) = &criteria.location {
        _ = query.append_pair(LOCATION, location.as_ref());
    }
    if let Some(min) = &criteria.price_min {
        _ = query.append_pair(PRICE_MIN, &min.to_string());
    }
    if let Some(max) = &criteria.price_max {
        _ = query.append_pair(PRICE_MAX, &max.to_string());
    }
    if let Some(kind) = criteria.kind {
        _ = query.append_pair(LISTING_TYPE, &kind.to_string());
    }
    if let Some(room_kind) = criteria.room_kind {
        _ = query.append_pair(ROOM_TYPE, &room_kind.to_string());
    }
    if !criteria.amenities.is_empty() {
        let joined = criteria
            .amenities
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(",");
        _ = query.append_pair(AMENITIES, &joined);
    }

    query.finish()
}
