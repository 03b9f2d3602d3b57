//! Draft and active [`Criteria`] store.

use crate::domain::{chip, Chip, Criteria};

/// Pair of the draft and the active filter [`Criteria`].
///
/// The two are always independent copies: draft edits never leak into the
/// active set until [`Filters::apply`], and applying never aliases the two.
#[derive(Clone, Debug, Default)]
pub struct Filters {
    /// User-edited, not yet applied [`Criteria`].
    draft: Criteria,

    /// Last applied [`Criteria`], driving fetches and refinement.
    active: Criteria,
}

impl Filters {
    /// Returns the draft [`Criteria`].
    #[must_use]
    pub fn draft(&self) -> &Criteria {
        &self.draft
    }

    /// Returns the draft [`Criteria`] for editing.
    pub fn draft_mut(&mut self) -> &mut Criteria {
        &mut self.draft
    }

    /// Returns the active [`Criteria`].
    #[must_use]
    pub fn active(&self) -> &Criteria {
        &self.active
    }

    /// Applies the draft [`Criteria`], copying it into the active set.
    pub fn apply(&mut self) {
        self.active = self.draft.clone();
    }

    /// Resets both the draft and the active [`Criteria`] to their defaults.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Resets both the draft and the active [`Criteria`] to the provided
    /// value.
    pub fn reset_to(&mut self, criteria: Criteria) {
        self.draft = criteria.clone();
        self.active = criteria;
    }

    /// Removes the filter component summarized by the provided [`Chip`] from
    /// the active [`Criteria`] directly, keeping the draft in sync.
    ///
    /// This is the only operation mutating the active set without an
    /// explicit [`apply`](Filters::apply).
    pub fn remove(&mut self, chip: &Chip) {
        match chip.kind {
            chip::Kind::Location => self.active.location = None,
            chip::Kind::Price => {
                self.active.price_min = None;
                self.active.price_max = None;
            }
            chip::Kind::ListingKind => self.active.kind = None,
            chip::Kind::RoomKind => self.active.room_kind = None,
            chip::Kind::Amenity => {
                if let Some(amenity) = &chip.amenity {
                    self.active.remove_amenity(amenity);
                }
            }
        }
        self.draft = self.active.clone();
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::{criteria::Amenity, Criteria};

    use super::Filters;

    fn amenity(name: &str) -> Amenity {
        Amenity::new(name).unwrap()
    }

    fn edited() -> Criteria {
        Criteria {
            location: "campus".parse().ok(),
            price_min: "1000".parse().ok(),
            price_max: "5000".parse().ok(),
            kind: "apartment".parse().ok(),
            room_kind: "private".parse().ok(),
            amenities: vec![amenity("Furnished"), amenity("Gym Access")],
        }
    }

    #[test]
    fn apply_copies_draft_into_active() {
        let mut filters = Filters::default();
        *filters.draft_mut() = edited();
        assert_eq!(*filters.active(), Criteria::default());

        filters.apply();
        assert_eq!(*filters.active(), edited());
    }

    #[test]
    fn apply_is_idempotent() {
        let mut filters = Filters::default();
        *filters.draft_mut() = edited();

        filters.apply();
        let applied = filters.active().clone();
        filters.apply();
        assert_eq!(*filters.active(), applied);
    }

    #[test]
    fn draft_edits_after_apply_leave_active_untouched() {
        let mut filters = Filters::default();
        *filters.draft_mut() = edited();
        filters.apply();

        filters.draft_mut().toggle_amenity(amenity("Parking Spot"));
        filters.draft_mut().location = None;

        assert_eq!(*filters.active(), edited());
        assert_ne!(filters.draft(), filters.active());
    }

    #[test]
    fn clear_resets_both_copies() {
        let mut filters = Filters::default();
        *filters.draft_mut() = edited();
        filters.apply();

        filters.clear();
        assert_eq!(*filters.draft(), Criteria::default());
        assert_eq!(*filters.active(), Criteria::default());
    }

    #[test]
    fn removing_each_chip_resets_only_its_component() {
        for chip in edited().chips() {
            let mut filters = Filters::default();
            filters.reset_to(edited());

            filters.remove(&chip);

            let mut expected = edited();
            match chip.kind {
                crate::domain::chip::Kind::Location => {
                    expected.location = None;
                }
                crate::domain::chip::Kind::Price => {
                    expected.price_min = None;
                    expected.price_max = None;
                }
                crate::domain::chip::Kind::ListingKind => {
                    expected.kind = None;
                }
                crate::domain::chip::Kind::RoomKind => {
                    expected.room_kind = None;
                }
                crate::domain::chip::Kind::Amenity => {
                    expected
                        .remove_amenity(chip.amenity.as_ref().unwrap());
                }
            }

            assert_eq!(*filters.active(), expected, "chip `{}`", chip.key);
            assert_eq!(filters.draft(), filters.active());
        }
    }
}
