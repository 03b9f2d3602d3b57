//! [`Remote`]-related implementations.

#[cfg(feature = "http")]
pub mod http;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "http")]
pub use self::http::Http;

/// Remote [`Listing`] collection operation.
///
/// [`Listing`]: crate::domain::Listing
pub use common::Handler as Remote;

/// [`Remote`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Fetch was superseded and aborted before completing.
    ///
    /// Not a failure: a superseded fetch is discarded silently.
    #[display("fetch superseded and aborted")]
    Aborted,

    #[cfg(feature = "http")]
    /// [`Http`] remote error.
    Http(http::Error),
}
