//! [`Criteria`] definitions.

use std::str::FromStr;

use common::Money;
use derive_more::{AsRef, Display};

use super::listing;

/// Filter criteria of a [`Listing`] search.
///
/// Every field defaults to "no filter": [`None`] for the scalar filters and
/// an empty sequence for the amenities. Values of this type are always
/// copied, never shared, between the draft and the active set.
///
/// The `price_min <= price_max` relation is intentionally not enforced: both
/// bounds travel to the remote independently.
///
/// [`Listing`]: super::Listing
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Criteria {
    /// Free-text location (or keyword) to search for.
    pub location: Option<LocationQuery>,

    /// Lower bound of the monthly rent.
    pub price_min: Option<Money>,

    /// Upper bound of the monthly rent.
    pub price_max: Option<Money>,

    /// [`listing::Kind`] to narrow the search to.
    pub kind: Option<listing::Kind>,

    /// [`listing::RoomKind`] to narrow the search to.
    pub room_kind: Option<listing::RoomKind>,

    /// [`Amenity`]s a [`Listing`] must provide, in selection order.
    ///
    /// [`Listing`]: super::Listing
    pub amenities: Vec<Amenity>,
}

impl Criteria {
    /// Toggles the provided [`Amenity`] in this [`Criteria`]: removes it when
    /// present, appends it otherwise.
    pub fn toggle_amenity(&mut self, amenity: Amenity) {
        if let Some(at) = self.amenities.iter().position(|a| *a == amenity) {
            _ = self.amenities.remove(at);
        } else {
            self.amenities.push(amenity);
        }
    }

    /// Removes the provided [`Amenity`] from this [`Criteria`], if present.
    pub fn remove_amenity(&mut self, amenity: &Amenity) {
        self.amenities.retain(|a| a != amenity);
    }
}

/// Free-text location (or keyword) filter of a [`Criteria`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct LocationQuery(String);

impl LocationQuery {
    /// Creates a new [`LocationQuery`] from the given `query`, trimming it.
    ///
    /// [`None`] is returned if the trimmed `query` is empty.
    #[must_use]
    pub fn new(query: impl AsRef<str>) -> Option<Self> {
        let query = query.as_ref().trim();
        (!query.is_empty()).then(|| Self(query.to_owned()))
    }
}

impl FromStr for LocationQuery {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("empty `LocationQuery`")
    }
}

/// Single amenity tag of a [`Listing`] or a [`Criteria`].
///
/// [`Listing`]: super::Listing
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
pub struct Amenity(String);

impl Amenity {
    /// Creates a new [`Amenity`] from the given `name`, trimming it.
    ///
    /// [`None`] is returned if the trimmed `name` is empty.
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Option<Self> {
        let name = name.as_ref().trim();
        (!name.is_empty()).then(|| Self(name.to_owned()))
    }
}

impl FromStr for Amenity {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("empty `Amenity`")
    }
}

#[cfg(test)]
mod spec {
    use super::{Amenity, Criteria, LocationQuery};

    fn amenity(name: &str) -> Amenity {
        Amenity::new(name).unwrap()
    }

    #[test]
    fn location_query_is_trimmed() {
        assert_eq!(
            AsRef::<str>::as_ref(&LocationQuery::new("  campus  ").unwrap()),
            "campus",
        );
        assert_eq!(LocationQuery::new("   "), None);
        assert_eq!(LocationQuery::new(""), None);
    }

    #[test]
    fn toggling_amenity_is_symmetric() {
        let mut criteria = Criteria::default();

        criteria.toggle_amenity(amenity("Furnished"));
        criteria.toggle_amenity(amenity("Parking Spot"));
        assert_eq!(
            criteria.amenities,
            vec![amenity("Furnished"), amenity("Parking Spot")],
        );

        criteria.toggle_amenity(amenity("Furnished"));
        assert_eq!(criteria.amenities, vec![amenity("Parking Spot")]);

        criteria.toggle_amenity(amenity("Furnished"));
        assert_eq!(
            criteria.amenities,
            vec![amenity("Parking Spot"), amenity("Furnished")],
        );
    }

    #[test]
    fn removing_absent_amenity_is_noop() {
        let mut criteria = Criteria::default();
        criteria.toggle_amenity(amenity("Gym Access"));

        criteria.remove_amenity(&amenity("Furnished"));
        assert_eq!(criteria.amenities, vec![amenity("Gym Access")]);
    }
}
