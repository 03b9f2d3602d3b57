//! [`Chip`] definitions.

use common::define_kind;

use super::criteria::{Amenity, Criteria};

/// Removable summary of one active filter component.
///
/// Chips are ephemeral: they are derived from the active [`Criteria`] on
/// demand and never stored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Chip {
    /// Unique key of this [`Chip`] among its siblings.
    pub key: String,

    /// Human-readable label of this [`Chip`].
    pub label: String,

    /// [`Kind`] of the filter component this [`Chip`] summarizes.
    pub kind: Kind,

    /// [`Amenity`] this [`Chip`] summarizes, if it's a [`Kind::Amenity`] one.
    pub amenity: Option<Amenity>,
}

define_kind! {
    #[doc = "Kind of a filter component a [`Chip`] summarizes."]
    enum Kind {
        #[doc = "Free-text location filter."]
        Location,

        #[doc = "Price bounds filter."]
        Price,

        #[doc = "Listing kind filter."]
        ListingKind,

        #[doc = "Room kind filter."]
        RoomKind,

        #[doc = "Single amenity filter."]
        Amenity,
    }
}

impl Criteria {
    /// Derives the [`Chip`]s summarizing the non-default components of this
    /// [`Criteria`].
    ///
    /// One [`Chip`] is emitted per component, except amenities, which emit
    /// one [`Chip`] each, in their stored order. A single price [`Chip`]
    /// covers both bounds.
    #[must_use]
    pub fn chips(&self) -> Vec<Chip> {
        let mut chips = Vec::new();

        if let Some(location) = &self.location {
            chips.push(Chip {
                key: Kind::Location.to_string(),
                label: format!("Location: {location}"),
                kind: Kind::Location,
                amenity: None,
            });
        }

        if self.price_min.is_some() || self.price_max.is_some() {
            let min = self
                .price_min
                .map_or_else(|| "Any".to_owned(), |min| format!("₺{min}"));
            let max = self
                .price_max
                .map_or_else(|| "Any".to_owned(), |max| format!("₺{max}"));
            chips.push(Chip {
                key: Kind::Price.to_string(),
                label: format!("Budget: {min} - {max}"),
                kind: Kind::Price,
                amenity: None,
            });
        }

        if let Some(kind) = self.kind {
            chips.push(Chip {
                key: Kind::ListingKind.to_string(),
                label: kind.label().to_owned(),
                kind: Kind::ListingKind,
                amenity: None,
            });
        }

        if let Some(room_kind) = self.room_kind {
            chips.push(Chip {
                key: Kind::RoomKind.to_string(),
                label: room_kind.label().to_owned(),
                kind: Kind::RoomKind,
                amenity: None,
            });
        }

        for amenity in &self.amenities {
            chips.push(Chip {
                key: format!("amenity-{amenity}"),
                label: amenity.to_string(),
                kind: Kind::Amenity,
                amenity: Some(amenity.clone()),
            });
        }

        chips
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::{criteria::Amenity, Criteria};

    use super::Kind;

    #[test]
    fn derives_no_chips_for_defaults() {
        assert_eq!(Criteria::default().chips(), vec![]);
    }

    #[test]
    fn derives_chips_in_component_order() {
        let criteria = Criteria {
            location: "campus".parse().ok(),
            price_min: "2000".parse().ok(),
            price_max: "5000".parse().ok(),
            kind: "apartment".parse().ok(),
            room_kind: "private".parse().ok(),
            amenities: vec![
                Amenity::new("Furnished").unwrap(),
                Amenity::new("Gym Access").unwrap(),
            ],
        };

        let chips = criteria.chips();
        assert_eq!(
            chips.iter().map(|c| c.kind).collect::<Vec<_>>(),
            vec![
                Kind::Location,
                Kind::Price,
                Kind::ListingKind,
                Kind::RoomKind,
                Kind::Amenity,
                Kind::Amenity,
            ],
        );
        assert_eq!(chips[0].label, "Location: campus");
        assert_eq!(chips[1].label, "Budget: ₺2000 - ₺5000");
        assert_eq!(chips[2].label, "Apartment");
        assert_eq!(chips[3].label, "Private Room");
        assert_eq!(chips[4].label, "Furnished");
        assert_eq!(chips[5].label, "Gym Access");
        assert_eq!(chips[5].key, "amenity-Gym Access");
    }

    #[test]
    fn derives_single_price_chip_for_either_bound() {
        let min_only = Criteria {
            price_min: "1000".parse().ok(),
            ..Criteria::default()
        };
        assert_eq!(
            min_only.chips()[0].label,
            "Budget: ₺1000 - Any",
        );

        let max_only = Criteria {
            price_max: "5000".parse().ok(),
            ..Criteria::default()
        };
        assert_eq!(
            max_only.chips()[0].label,
            "Budget: Any - ₺5000",
        );
    }
}
