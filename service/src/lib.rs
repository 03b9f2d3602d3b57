//! Service contains the listing browsing logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod codec;
pub mod domain;
pub mod fetch;
pub mod infra;
pub mod read;
pub mod store;

use common::{
    operations::{By, Select},
    Money,
};
use futures::future::{Abortable, Aborted};
use tokio::sync::watch;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        criteria::{Amenity, LocationQuery},
        listing,
        Chip, Criteria, Listing,
    },
    fetch::{Fetcher, Refresh},
    infra::remote,
    read::listing::{Page, Selector, Sort},
    store::Filters,
};

pub use self::infra::Remote;

/// Coordinator of listing browsing: filter state, remote fetching and
/// client-side refinement.
///
/// All state lives on one logical thread; the only suspension point is
/// [`refresh`](Browser::refresh)ing against the remote.
#[derive(Debug)]
pub struct Browser<A> {
    /// Remote [`Listing`] collection.
    api: A,

    /// Draft and active filter [`Criteria`].
    filters: Filters,

    /// [`Sort`] order of the refined listings.
    ///
    /// View-only state: not a part of [`Criteria`] and never persisted.
    sort: Sort,

    /// Fetch coordination state.
    fetcher: Fetcher,

    /// Navigation channel publishing the encoded active [`Criteria`].
    navigation: watch::Sender<String>,
}

impl<A> Browser<A> {
    /// Creates a new [`Browser`] over the provided remote.
    pub fn new(api: A) -> Self {
        Self {
            api,
            filters: Filters::default(),
            sort: Sort::default(),
            fetcher: Fetcher::default(),
            navigation: watch::Sender::new(String::new()),
        }
    }

    /// Subscribes to the navigation notifications of this [`Browser`].
    ///
    /// Whenever the active [`Criteria`] changes from within (applying,
    /// clearing, or removing a [`Chip`]), its encoded persisted
    /// representation is published here. A navigation shell decides how, and
    /// whether, to reflect it in a location bar.
    #[must_use]
    pub fn navigation(&self) -> watch::Receiver<String> {
        self.navigation.subscribe()
    }

    /// Returns the draft [`Criteria`].
    #[must_use]
    pub fn draft(&self) -> &Criteria {
        self.filters.draft()
    }

    /// Returns the active [`Criteria`].
    #[must_use]
    pub fn active(&self) -> &Criteria {
        self.filters.active()
    }

    /// Returns the [`Sort`] order of the refined listings.
    #[must_use]
    pub fn sort(&self) -> Sort {
        self.sort
    }

    /// Sets the [`Sort`] order of the refined listings.
    ///
    /// Resorting is purely client-side and never refetches.
    pub fn set_sort(&mut self, sort: Sort) {
        self.sort = sort;
    }

    /// Indicates whether a fetch is in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.fetcher.loading()
    }

    /// Returns the error of the last completed fetch, if it failed.
    #[must_use]
    pub fn error(&self) -> Option<&Traced<remote::Error>> {
        self.fetcher.error()
    }

    /// Returns the fetched [`Listing`]s refined against the active
    /// [`Criteria`] and sorted.
    #[must_use]
    pub fn listings(&self) -> Vec<&Listing> {
        read::listing::refine(
            self.fetcher.fetched(),
            self.filters.active(),
            self.sort,
        )
    }

    /// Derives the [`Chip`]s summarizing the active [`Criteria`].
    #[must_use]
    pub fn chips(&self) -> Vec<Chip> {
        self.filters.active().chips()
    }

    /// Replaces the location filter of the draft [`Criteria`].
    pub fn set_draft_location(&mut self, location: Option<LocationQuery>) {
        self.filters.draft_mut().location = location;
    }

    /// Replaces the lower price bound of the draft [`Criteria`].
    pub fn set_draft_price_min(&mut self, min: Option<Money>) {
        self.filters.draft_mut().price_min = min;
    }

    /// Replaces the upper price bound of the draft [`Criteria`].
    pub fn set_draft_price_max(&mut self, max: Option<Money>) {
        self.filters.draft_mut().price_max = max;
    }

    /// Replaces the [`listing::Kind`] filter of the draft [`Criteria`].
    pub fn set_draft_kind(&mut self, kind: Option<listing::Kind>) {
        self.filters.draft_mut().kind = kind;
    }

    /// Replaces the [`listing::RoomKind`] filter of the draft [`Criteria`].
    pub fn set_draft_room_kind(&mut self, kind: Option<listing::RoomKind>) {
        self.filters.draft_mut().room_kind = kind;
    }

    /// Toggles the provided [`Amenity`] in the draft [`Criteria`].
    pub fn toggle_draft_amenity(&mut self, amenity: Amenity) {
        self.filters.draft_mut().toggle_amenity(amenity);
    }

    /// Applies the draft [`Criteria`], publishing the new active set and
    /// beginning a refetch if its server-side subset changed.
    pub fn apply(&mut self) -> Option<Refresh> {
        self.filters.apply();
        self.publish();
        self.sync()
    }

    /// Resets both the draft and the active [`Criteria`] to their defaults,
    /// publishing the change and beginning a refetch if needed.
    pub fn clear(&mut self) -> Option<Refresh> {
        self.filters.clear();
        self.publish();
        self.sync()
    }

    /// Removes the filter component summarized by the provided [`Chip`] from
    /// the active [`Criteria`] directly, publishing the change and beginning
    /// a refetch if needed.
    pub fn remove_chip(&mut self, chip: &Chip) -> Option<Refresh> {
        self.filters.remove(chip);
        self.publish();
        self.sync()
    }

    /// Resets both the draft and the active [`Criteria`] from the provided
    /// persisted representation, beginning a refetch if needed.
    ///
    /// The change came from the navigation shell, so it's not published
    /// back.
    pub fn navigate(&mut self, query: &str) -> Option<Refresh> {
        self.filters.reset_to(codec::decode(query));
        self.sync()
    }

    /// Publishes the encoded active [`Criteria`] to the navigation channel.
    fn publish(&self) {
        _ = self
            .navigation
            .send_replace(codec::encode(self.filters.active()));
    }

    /// Begins a refetch if the server-side subset of the active [`Criteria`]
    /// differs from the one of the in-flight (or last issued) fetch.
    fn sync(&mut self) -> Option<Refresh> {
        let selector = Selector::from(self.filters.active());
        self.fetcher
            .needs(&selector)
            .then(|| self.fetcher.begin(selector))
    }
}

impl<A> Browser<A>
where
    A: Remote<
        Select<By<Page, Selector>>,
        Ok = Vec<Listing>,
        Err = Traced<remote::Error>,
    >,
{
    /// Executes the provided [`Refresh`] against the remote and commits its
    /// outcome.
    ///
    /// A [`Refresh`] superseded while in flight is aborted and commits as a
    /// no-op: only the most recently issued one may mutate the displayed
    /// state, whatever the arrival order.
    pub async fn refresh(&mut self, refresh: Refresh) {
        let (seq, selector, registration) = refresh.into_parts();

        let outcome = match Abortable::new(
            self.api.execute(Select(By::new(selector))),
            registration,
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(Aborted) => Err(tracerr::new!(remote::Error::Aborted)),
        };

        if let Err(e) = &outcome {
            if !matches!(e.as_ref(), remote::Error::Aborted) {
                log::warn!("listings fetch failed: {e}");
            }
        }

        self.fetcher.commit(seq, outcome);
    }
}
