//! HTTP [`Remote`] implementation.

use std::time::Duration;

use common::operations::{By, Select};
use derive_more::{Display, Error as StdError};
use tracerr::Traced;
use tracing as log;
use url::Url;

use crate::{
    domain::Listing,
    infra::session::Session,
    read::listing::{Page, Selector},
};

use super::Remote;

/// Configuration of an [`Http`] remote.
#[derive(Clone, Debug)]
pub struct Config {
    /// URL of the listings collection endpoint.
    pub endpoint: Url,

    /// Timeout of a single request.
    pub timeout: Duration,
}

/// [`Remote`] fetching [`Listing`]s over HTTP.
#[derive(Clone, Debug)]
pub struct Http<S> {
    /// Underlying HTTP client.
    client: reqwest::Client,

    /// URL of the listings collection endpoint.
    endpoint: Url,

    /// [`Session`] the requests are made under.
    session: S,
}

impl<S: Session> Http<S> {
    /// Creates a new [`Http`] remote with the provided parameters.
    ///
    /// # Errors
    ///
    /// Errors if the underlying HTTP client cannot be constructed.
    pub fn new(config: &Config, session: S) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::Client)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            session,
        })
    }

    /// Fetches one [`Page`] of [`Listing`]s matching the provided
    /// [`Selector`].
    async fn fetch(&self, selector: Selector) -> Result<Vec<Listing>, Error> {
        let mut url = self.endpoint.clone();
        let query = selector.query();
        url.set_query((!query.is_empty()).then_some(query.as_str()));

        let mut request = self.client.get(url);
        if let Some(token) = self.session.credentials() {
            request = request
                .header(reqwest::header::AUTHORIZATION, format!("Token {token}"));
        }

        let response = request.send().await.map_err(Error::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let page: Page = response.json().await.map_err(Error::Decode)?;
        let listings = page.into_listings();
        log::debug!("fetched {} listings", listings.len());

        Ok(listings)
    }
}

impl<S: Session> Remote<Select<By<Page, Selector>>> for Http<S> {
    type Ok = Vec<Listing>;
    type Err = Traced<super::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Page, Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.fetch(by.into_inner())
            .await
            .map_err(tracerr::from_and_wrap!())
    }
}

/// [`Http`] remote error.
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// Failed to construct the HTTP client.
    #[display("failed to construct HTTP client: {_0}")]
    Client(reqwest::Error),

    /// Request failed to complete.
    #[display("request failed: {_0}")]
    Request(reqwest::Error),

    /// Remote replied with a non-success status.
    #[display("remote replied with status {_0}")]
    Status(#[error(not(source))] u16),

    /// Failed to decode the response body.
    #[display("failed to decode response: {_0}")]
    Decode(reqwest::Error),
}
