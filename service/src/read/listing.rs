//! [`Listing`]-related read definitions.

use std::cmp::Reverse;

use common::{define_kind, Money};
use serde::Deserialize;
use url::form_urlencoded;

use crate::domain::{
    criteria::{Amenity, LocationQuery},
    Criteria, Listing,
};

/// Server-side subset of a [`Criteria`] a remote fetch is keyed on.
///
/// Listing and room kinds are deliberately left out of the remote contract
/// and refined client-side instead (see [`refine`]).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Selector {
    /// Free-text location (or keyword) to search for.
    pub location: Option<LocationQuery>,

    /// Lower bound of the monthly rent.
    pub price_min: Option<Money>,

    /// Upper bound of the monthly rent.
    pub price_max: Option<Money>,

    /// [`Amenity`]s a [`Listing`] must provide.
    pub amenities: Vec<Amenity>,
}

impl From<&Criteria> for Selector {
    fn from(criteria: &Criteria) -> Self {
        Self {
            location: criteria.location.clone(),
            price_min: criteria.price_min,
            price_max: criteria.price_max,
            amenities: criteria.amenities.clone(),
        }
    }
}

impl Selector {
    /// Encodes this [`Selector`] as remote query parameters.
    #[must_use]
    pub fn query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(location) = &self.location {
            _ = query.append_pair("location", location.as_ref());
        }
        if let Some(min) = &self.price_min {
            _ = query.append_pair("price_min", &min.to_string());
        }
        if let Some(max) = &self.price_max {
            _ = query.append_pair("price_max", &max.to_string());
        }
        if !self.amenities.is_empty() {
            let joined = self
                .amenities
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .join(",");
            _ = query.append_pair("amenities", &joined);
        }
        query.finish()
    }
}

/// One page of [`Listing`]s returned by a remote.
///
/// Remotes reply either with a bare collection or with a paginated envelope
/// carrying a `results` field; both shapes are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Page {
    /// Bare collection of [`Listing`]s.
    Bare(Vec<Listing>),

    /// Paginated envelope of [`Listing`]s.
    Envelope {
        /// [`Listing`]s of this [`Page`].
        results: Vec<Listing>,
    },
}

impl Page {
    /// Consumes this [`Page`] and returns its [`Listing`]s.
    #[must_use]
    pub fn into_listings(self) -> Vec<Listing> {
        match self {
            Self::Bare(listings) | Self::Envelope { results: listings } => {
                listings
            }
        }
    }
}

define_kind! {
    #[doc = "Sort order applied to refined [`Listing`]s."]
    enum Sort {
        #[doc = "Most recently created first."]
        Newest,

        #[doc = "Cheapest first."]
        PriceLow,

        #[doc = "Most expensive first."]
        PriceHigh,

        #[doc = "Most available rooms first."]
        Rooms,
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::Newest
    }
}

/// Refines a fetched [`Listing`] collection against the active [`Criteria`]
/// and sorts it.
///
/// The kind filters excluded from the remote [`Selector`] are applied here:
/// a [`Listing`] with an unrecognized kind never matches a concrete filter.
/// The sort is stable, so ties keep the filtered order; listings with
/// malformed sort fields sort by their zero sentinels.
#[must_use]
pub fn refine<'l>(
    listings: &'l [Listing],
    active: &Criteria,
    sort: Sort,
) -> Vec<&'l Listing> {
    let mut refined: Vec<&Listing> = listings
        .iter()
        .filter(|l| active.kind.map_or(true, |kind| l.kind == Some(kind)))
        .filter(|l| {
            active
                .room_kind
                .map_or(true, |kind| l.room_kind == Some(kind))
        })
        .collect();

    match sort {
        Sort::Newest => refined.sort_by_key(|l| Reverse(l.created_at)),
        Sort::PriceLow => refined.sort_by_key(|l| l.rent),
        Sort::PriceHigh => refined.sort_by_key(|l| Reverse(l.rent)),
        Sort::Rooms => refined.sort_by_key(|l| Reverse(l.available_rooms)),
    }

    refined
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::domain::{Criteria, Listing};

    use super::{refine, Page, Selector, Sort};

    fn listing(value: serde_json::Value) -> Listing {
        serde_json::from_value(value).unwrap()
    }

    fn titles(listings: &[&Listing]) -> Vec<String> {
        listings.iter().map(|l| l.title.clone()).collect()
    }

    #[test]
    fn selector_takes_server_side_subset_only() {
        let criteria = Criteria {
            location: "campus".parse().ok(),
            price_max: "5000".parse().ok(),
            kind: "apartment".parse().ok(),
            room_kind: "private".parse().ok(),
            ..Criteria::default()
        };

        let selector = Selector::from(&criteria);
        assert_eq!(selector.query(), "location=campus&price_max=5000");

        let narrowed = Criteria {
            kind: "house".parse().ok(),
            ..criteria
        };
        assert_eq!(selector, Selector::from(&narrowed));
    }

    #[test]
    fn page_accepts_both_wire_shapes() {
        let bare: Page =
            serde_json::from_value(json!([{"title": "a"}])).unwrap();
        assert_eq!(bare.into_listings().len(), 1);

        let envelope: Page = serde_json::from_value(json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [{"title": "a"}],
        }))
        .unwrap();
        assert_eq!(envelope.into_listings().len(), 1);
    }

    #[test]
    fn refines_kinds_client_side() {
        let listings = vec![
            listing(json!({"title": "flat", "listing_type": "apartment"})),
            listing(json!({"title": "house", "listing_type": "house"})),
            listing(json!({"title": "odd", "listing_type": "castle"})),
        ];

        let any = Criteria::default();
        assert_eq!(
            titles(&refine(&listings, &any, Sort::PriceLow)).len(),
            3,
        );

        let apartments = Criteria {
            kind: "apartment".parse().ok(),
            ..Criteria::default()
        };
        assert_eq!(
            titles(&refine(&listings, &apartments, Sort::PriceLow)),
            vec!["flat"],
        );
    }

    #[test]
    fn sorts_by_price_deterministically() {
        let listings = vec![
            listing(json!({"title": "mid", "rent_amount": 300})),
            listing(json!({"title": "low", "rent_amount": 100})),
            listing(json!({"title": "high", "rent_amount": 200})),
        ];

        assert_eq!(
            titles(&refine(&listings, &Criteria::default(), Sort::PriceLow)),
            vec!["low", "high", "mid"],
        );
        assert_eq!(
            titles(&refine(&listings, &Criteria::default(), Sort::PriceHigh)),
            vec!["mid", "high", "low"],
        );
    }

    #[test]
    fn sorts_newest_first_with_epoch_fallback_last() {
        let listings = vec![
            listing(json!({"title": "t2", "created_at": "2024-02-01T00:00:00Z"})),
            listing(json!({"title": "t1", "created_at": "2024-01-01T00:00:00Z"})),
            listing(json!({"title": "t3", "created_at": "2024-03-01T00:00:00Z"})),
            listing(json!({"title": "odd", "created_at": "garbled"})),
        ];

        assert_eq!(
            titles(&refine(&listings, &Criteria::default(), Sort::Newest)),
            vec!["t3", "t2", "t1", "odd"],
        );
    }

    #[test]
    fn sorts_by_available_rooms() {
        let listings = vec![
            listing(json!({"title": "one", "available_rooms": 1})),
            listing(json!({"title": "three", "available_rooms": 3})),
            listing(json!({"title": "none"})),
        ];

        assert_eq!(
            titles(&refine(&listings, &Criteria::default(), Sort::Rooms)),
            vec!["three", "one", "none"],
        );
    }

    #[test]
    fn keeps_tie_order_stable() {
        let listings = vec![
            listing(json!({"title": "first", "rent_amount": 100})),
            listing(json!({"title": "second", "rent_amount": 100})),
        ];

        assert_eq!(
            titles(&refine(&listings, &Criteria::default(), Sort::PriceLow)),
            vec!["first", "second"],
        );
    }
}
