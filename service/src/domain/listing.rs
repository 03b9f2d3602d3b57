//! [`Listing`] definitions.

use common::{define_kind, unit, DateTimeOf, Money};
#[cfg(doc)]
use common::DateTime;
use derive_more::{Display, From, Into};
use serde::Deserialize;

use super::criteria::Amenity;

/// Housing listing sourced from a remote collection.
///
/// Instances are read-only on this side of the wire and decoded leniently:
/// malformed scalar fields fall back to their zero sentinels instead of
/// failing the whole [`Listing`].
#[derive(Clone, Debug, Deserialize)]
pub struct Listing {
    /// ID of this [`Listing`].
    #[serde(default, deserialize_with = "de::id", rename = "listing_id")]
    pub id: Id,

    /// Title of this [`Listing`].
    #[serde(default)]
    pub title: String,

    /// Description of this [`Listing`].
    #[serde(default)]
    pub description: String,

    /// [`Kind`] of this [`Listing`], if recognized.
    #[serde(default, deserialize_with = "de::kind", rename = "listing_type")]
    pub kind: Option<Kind>,

    /// [`RoomKind`] of this [`Listing`], if recognized.
    #[serde(default, deserialize_with = "de::room_kind", rename = "room_type")]
    pub room_kind: Option<RoomKind>,

    /// Street address of this [`Listing`].
    #[serde(default)]
    pub address: String,

    /// Neighborhood of this [`Listing`].
    #[serde(default)]
    pub neighborhood: String,

    /// Monthly rent of this [`Listing`].
    #[serde(default, deserialize_with = "de::money", rename = "rent_amount")]
    pub rent: Money,

    /// [`DateTime`] this [`Listing`] becomes available from, if any.
    #[serde(
        default,
        deserialize_with = "de::date_opt",
        rename = "available_from"
    )]
    pub available_from: Option<AvailabilityDateTime>,

    /// Total number of rooms in this [`Listing`].
    #[serde(default, deserialize_with = "de::count", rename = "total_rooms")]
    pub total_rooms: u32,

    /// Number of still available rooms in this [`Listing`].
    #[serde(
        default,
        deserialize_with = "de::count",
        rename = "available_rooms"
    )]
    pub available_rooms: u32,

    /// [`Amenity`]s this [`Listing`] provides.
    #[serde(default, deserialize_with = "de::amenities")]
    pub amenities: Vec<Amenity>,

    /// [`Image`]s of this [`Listing`].
    #[serde(default)]
    pub images: Vec<Image>,

    /// Legacy single image URL of this [`Listing`].
    #[serde(default)]
    pub image: Option<String>,

    /// [`DateTime`] this [`Listing`] was created at.
    #[serde(
        default = "epoch",
        deserialize_with = "de::datetime",
        rename = "created_at"
    )]
    pub created_at: CreationDateTime,

    /// Indicator whether this [`Listing`] is still active.
    #[serde(default = "active", rename = "is_active")]
    pub is_active: bool,
}

impl Listing {
    /// Returns the cover image URL of this [`Listing`].
    ///
    /// The legacy single `image` field wins; otherwise the primary [`Image`]
    /// is used, otherwise the first one.
    #[must_use]
    pub fn cover(&self) -> Option<&str> {
        self.image
            .as_deref()
            .filter(|url| !url.is_empty())
            .or_else(|| {
                self.images
                    .iter()
                    .find(|img| img.is_primary)
                    .or_else(|| self.images.first())
                    .map(|img| img.url.as_str())
            })
    }
}

/// ID of a [`Listing`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
)]
pub struct Id(i64);

/// Image of a [`Listing`].
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Image {
    /// URL of this [`Image`].
    #[serde(default, rename = "image_url")]
    pub url: String,

    /// Indicator whether this [`Image`] is the primary one.
    #[serde(default, rename = "is_primary")]
    pub is_primary: bool,
}

define_kind! {
    #[doc = "Kind of a [`Listing`]."]
    enum Kind {
        #[doc = "An apartment in a building."]
        Apartment,

        #[doc = "A whole house."]
        House,

        #[doc = "A single room."]
        Room,
    }
}

impl Kind {
    /// Returns a human-readable label of this [`Kind`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Apartment => "Apartment",
            Self::House => "House",
            Self::Room => "Room",
        }
    }
}

define_kind! {
    #[doc = "Kind of a room arrangement in a [`Listing`]."]
    enum RoomKind {
        #[doc = "A private room."]
        Private,

        #[doc = "A shared room."]
        Shared,

        #[doc = "An entire place."]
        EntirePlace,
    }
}

impl RoomKind {
    /// Returns a human-readable label of this [`RoomKind`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Private => "Private Room",
            Self::Shared => "Shared Room",
            Self::EntirePlace => "Entire Place",
        }
    }
}

/// [`DateTime`] when a [`Listing`] was created.
pub type CreationDateTime = DateTimeOf<(Listing, unit::Creation)>;

/// [`DateTime`] when a [`Listing`] becomes available.
pub type AvailabilityDateTime = DateTimeOf<(Listing, unit::Availability)>;

/// Default [`CreationDateTime`] of a [`Listing`] with a missing or malformed
/// `created_at` field.
fn epoch() -> CreationDateTime {
    CreationDateTime::UNIX_EPOCH
}

/// Default `is_active` of a [`Listing`] with a missing field.
fn active() -> bool {
    true
}

mod de {
    //! Lenient deserializers of [`Listing`] wire fields.

    use common::{DateTime, Money};
    use serde::{Deserialize as _, Deserializer};
    use serde_json::Value;

    use super::{
        epoch, Amenity, AvailabilityDateTime, CreationDateTime, Id, Kind,
        RoomKind,
    };

    /// Wire representations of a [`Listing`]'s amenities.
    ///
    /// Remotes have historically emitted amenities as a JSON array, as a
    /// JSON-encoded string, or as a comma-separated string; all three
    /// normalize to the same sequence.
    ///
    /// [`Listing`]: super::Listing
    #[derive(Debug, serde::Deserialize)]
    #[serde(untagged)]
    enum AmenitiesRepr {
        /// Already a sequence of tags.
        Seq(Vec<String>),

        /// A JSON-encoded or comma-separated string.
        Raw(String),
    }

    impl AmenitiesRepr {
        /// Normalizes this representation into a sequence of [`Amenity`]s.
        fn normalize(self) -> Vec<Amenity> {
            match self {
                Self::Seq(tags) => {
                    tags.into_iter().filter_map(Amenity::new).collect()
                }
                Self::Raw(raw) => {
                    if let Ok(tags) =
                        serde_json::from_str::<Vec<String>>(&raw)
                    {
                        return tags
                            .into_iter()
                            .filter_map(Amenity::new)
                            .collect();
                    }
                    raw.split(',').filter_map(Amenity::new).collect()
                }
            }
        }
    }

    /// Deserializes amenities from any of the known wire shapes.
    ///
    /// Unknown shapes produce an empty sequence.
    pub(super) fn amenities<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<Vec<Amenity>, D::Error> {
        let value = Value::deserialize(de)?;
        Ok(serde_json::from_value::<AmenitiesRepr>(value)
            .map(AmenitiesRepr::normalize)
            .unwrap_or_default())
    }

    /// Deserializes an [`Id`], falling back to zero.
    pub(super) fn id<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<Id, D::Error> {
        let value = Value::deserialize(de)?;
        Ok(value.as_i64().unwrap_or_default().into())
    }

    /// Deserializes a [`Kind`] token, falling back to [`None`].
    pub(super) fn kind<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<Option<Kind>, D::Error> {
        let value = Value::deserialize(de)?;
        Ok(value.as_str().and_then(|s| s.trim().parse().ok()))
    }

    /// Deserializes a [`RoomKind`] token, falling back to [`None`].
    pub(super) fn room_kind<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<Option<RoomKind>, D::Error> {
        let value = Value::deserialize(de)?;
        Ok(value.as_str().and_then(|s| s.trim().parse().ok()))
    }

    /// Deserializes a [`Money`] amount from a number or a numeric string,
    /// falling back to [`Money::ZERO`].
    pub(super) fn money<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<Money, D::Error> {
        let value = Value::deserialize(de)?;
        Ok(match value {
            Value::Number(number) => {
                number.to_string().parse().unwrap_or(Money::ZERO)
            }
            Value::String(s) => s.parse().unwrap_or(Money::ZERO),
            Value::Null
            | Value::Bool(_)
            | Value::Array(_)
            | Value::Object(_) => Money::ZERO,
        })
    }

    /// Deserializes a non-negative count, falling back to zero.
    pub(super) fn count<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<u32, D::Error> {
        let value = Value::deserialize(de)?;
        Ok(match value {
            Value::Number(number) => number
                .as_u64()
                .unwrap_or_default()
                .try_into()
                .unwrap_or(u32::MAX),
            Value::String(s) => s.trim().parse().unwrap_or_default(),
            Value::Null
            | Value::Bool(_)
            | Value::Array(_)
            | Value::Object(_) => 0,
        })
    }

    /// Deserializes a [`CreationDateTime`], falling back to the Unix epoch.
    pub(super) fn datetime<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<CreationDateTime, D::Error> {
        let value = Value::deserialize(de)?;
        Ok(value
            .as_str()
            .and_then(|s| parse_datetime(s).map(DateTime::coerce))
            .unwrap_or_else(epoch))
    }

    /// Deserializes an optional [`AvailabilityDateTime`], falling back to
    /// [`None`].
    pub(super) fn date_opt<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<Option<AvailabilityDateTime>, D::Error> {
        let value = Value::deserialize(de)?;
        Ok(value
            .as_str()
            .and_then(|s| parse_datetime(s).map(DateTime::coerce)))
    }

    /// Parses a wire date-time: an [RFC 3339] value or a bare calendar date.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    fn parse_datetime(input: &str) -> Option<DateTime> {
        let input = input.trim();
        DateTime::from_rfc3339(input)
            .or_else(|_| DateTime::from_date(input))
            .ok()
    }
}
