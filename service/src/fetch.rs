//! Remote fetch coordination.

use derive_more::{Display, From, Into};
use futures::future::{AbortHandle, AbortRegistration};
use tracerr::Traced;

use crate::{domain::Listing, infra::remote, read::listing::Selector};

/// Monotonically increasing sequence number of an issued fetch.
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, Into, PartialEq,
)]
pub struct Seq(u64);

/// Ticket of a single issued fetch.
///
/// Returned by [`Fetcher::begin`]; the outcome is reported back through
/// [`Fetcher::commit`] under this ticket's [`Seq`].
#[derive(Debug)]
pub struct Refresh {
    /// [`Seq`] this fetch was issued under.
    seq: Seq,

    /// [`Selector`] this fetch is keyed on.
    selector: Selector,

    /// Registration aborting this fetch once it's superseded.
    registration: AbortRegistration,
}

impl Refresh {
    /// Returns the [`Seq`] this fetch was issued under.
    #[must_use]
    pub fn seq(&self) -> Seq {
        self.seq
    }

    /// Returns the [`Selector`] this fetch is keyed on.
    #[must_use]
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Destructures this [`Refresh`] into its parts.
    #[must_use]
    pub fn into_parts(self) -> (Seq, Selector, AbortRegistration) {
        let Self {
            seq,
            selector,
            registration,
        } = self;
        (seq, selector, registration)
    }
}

/// State machine coordinating remote [`Listing`] fetches.
///
/// Exactly one fetch is current at any time: beginning a new one aborts the
/// in-flight one, and a late outcome of a superseded fetch is discarded by
/// the [`Seq`] comparison in [`commit`](Fetcher::commit), whatever its
/// arrival order.
#[derive(Debug, Default)]
pub struct Fetcher {
    /// [`Seq`] of the most recently issued fetch.
    seq: Seq,

    /// [`Selector`] of the most recently issued fetch, if any.
    selector: Option<Selector>,

    /// Handle aborting the in-flight fetch.
    abort: Option<AbortHandle>,

    /// Indicator whether a fetch is in flight.
    loading: bool,

    /// Error of the last completed fetch, if it failed.
    error: Option<Traced<remote::Error>>,

    /// Raw [`Listing`]s of the last successful fetch.
    fetched: Vec<Listing>,
}

impl Fetcher {
    /// Indicates whether a fetch keyed on the provided [`Selector`] needs to
    /// be issued.
    ///
    /// `true` is returned until the first fetch is issued, and whenever the
    /// provided [`Selector`] differs from the most recently issued one.
    #[must_use]
    pub fn needs(&self, selector: &Selector) -> bool {
        self.selector.as_ref() != Some(selector)
    }

    /// Begins a new fetch keyed on the provided [`Selector`].
    ///
    /// Aborts the in-flight fetch, transitions to loading immediately and
    /// clears the previous error. The previously fetched [`Listing`]s remain
    /// until the new fetch succeeds.
    pub fn begin(&mut self, selector: Selector) -> Refresh {
        if let Some(abort) = self.abort.take() {
            abort.abort();
        }

        self.seq = Seq(u64::from(self.seq).wrapping_add(1));
        self.selector = Some(selector.clone());
        self.loading = true;
        self.error = None;

        let (handle, registration) = AbortHandle::new_pair();
        self.abort = Some(handle);

        Refresh {
            seq: self.seq,
            selector,
            registration,
        }
    }

    /// Commits the outcome of the fetch issued under the provided [`Seq`].
    ///
    /// An outcome of a superseded fetch is discarded wholesale, and an
    /// [`Aborted`] failure of the current one is a no-op. Any other failure
    /// records the error, keeping the previously fetched [`Listing`]s.
    ///
    /// [`Aborted`]: remote::Error::Aborted
    pub fn commit(
        &mut self,
        seq: Seq,
        outcome: Result<Vec<Listing>, Traced<remote::Error>>,
    ) {
        if seq != self.seq {
            return;
        }

        match outcome {
            Ok(listings) => {
                self.fetched = listings;
                self.error = None;
                self.loading = false;
            }
            Err(e) if matches!(e.as_ref(), remote::Error::Aborted) => {}
            Err(e) => {
                self.error = Some(e);
                self.loading = false;
            }
        }
    }

    /// Returns the raw [`Listing`]s of the last successful fetch.
    #[must_use]
    pub fn fetched(&self) -> &[Listing] {
        &self.fetched
    }

    /// Indicates whether a fetch is in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Returns the error of the last completed fetch, if it failed.
    #[must_use]
    pub fn error(&self) -> Option<&Traced<remote::Error>> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod spec {
    use futures::future::{self, Abortable, Aborted};

    use crate::{
        domain::Listing,
        infra::remote,
        read::listing::Selector,
    };

    use super::Fetcher;

    fn selector(location: &str) -> Selector {
        Selector {
            location: location.parse().ok(),
            ..Selector::default()
        }
    }

    fn listings(title: &str) -> Vec<Listing> {
        vec![serde_json::from_value(serde_json::json!({"title": title}))
            .unwrap()]
    }

    fn failure() -> tracerr::Traced<remote::Error> {
        tracerr::new!(remote::Error::Http(remote::http::Error::Status(500)))
    }

    #[test]
    fn needs_fetch_until_selector_repeats() {
        let mut fetcher = Fetcher::default();
        assert!(fetcher.needs(&Selector::default()));

        _ = fetcher.begin(Selector::default());
        assert!(!fetcher.needs(&Selector::default()));
        assert!(fetcher.needs(&selector("campus")));
    }

    #[test]
    fn loads_synchronously_and_commits_success() {
        let mut fetcher = Fetcher::default();

        let refresh = fetcher.begin(selector("campus"));
        assert!(fetcher.loading());

        fetcher.commit(refresh.seq(), Ok(listings("flat")));
        assert!(!fetcher.loading());
        assert!(fetcher.error().is_none());
        assert_eq!(fetcher.fetched().len(), 1);
    }

    #[test]
    fn discards_late_outcome_of_superseded_fetch() {
        let mut fetcher = Fetcher::default();

        let a = fetcher.begin(selector("a"));
        let b = fetcher.begin(selector("b"));

        // B resolves first, A arrives afterwards.
        fetcher.commit(b.seq(), Ok(listings("b")));
        fetcher.commit(a.seq(), Ok(listings("a")));

        assert_eq!(fetcher.fetched()[0].title, "b");
        assert!(!fetcher.loading());
    }

    #[test]
    fn failure_keeps_previously_fetched_listings() {
        let mut fetcher = Fetcher::default();

        let first = fetcher.begin(selector("a"));
        fetcher.commit(first.seq(), Ok(listings("stale")));

        let second = fetcher.begin(selector("b"));
        assert!(fetcher.error().is_none());

        fetcher.commit(second.seq(), Err(failure()));
        assert!(fetcher.error().is_some());
        assert!(!fetcher.loading());
        assert_eq!(fetcher.fetched()[0].title, "stale");
    }

    #[test]
    fn abort_of_current_fetch_is_a_noop() {
        let mut fetcher = Fetcher::default();

        let refresh = fetcher.begin(selector("a"));
        fetcher.commit(
            refresh.seq(),
            Err(tracerr::new!(remote::Error::Aborted)),
        );

        // Still loading: an abort is not a completed outcome.
        assert!(fetcher.loading());
        assert!(fetcher.error().is_none());
    }

    #[test]
    fn error_is_cleared_when_a_new_fetch_begins() {
        let mut fetcher = Fetcher::default();

        let failed = fetcher.begin(selector("a"));
        fetcher.commit(failed.seq(), Err(failure()));
        assert!(fetcher.error().is_some());

        _ = fetcher.begin(selector("b"));
        assert!(fetcher.error().is_none());
        assert!(fetcher.loading());
    }

    #[tokio::test]
    async fn superseding_fetch_aborts_the_previous_one() {
        let mut fetcher = Fetcher::default();

        let (_, _, registration) =
            fetcher.begin(selector("a")).into_parts();
        let in_flight =
            Abortable::new(future::pending::<()>(), registration);

        _ = fetcher.begin(selector("b"));

        assert_eq!(in_flight.await, Err(Aborted));
    }
}
