// SPDX-License-Identifier: MPL-2.0
//! HTTP adapter for the APOD archive implementing [`ArchiveSource`].
//!
//! One `GET` per range, with the access key and both dates passed as query
//! parameters:
//!
//! ```text
//! <endpoint>?api_key=<key>&start_date=YYYY-MM-DD&end_date=YYYY-MM-DD
//! ```
//!
//! [`ArchiveSource`]: crate::application::port::ArchiveSource

use std::time::Duration;

use reqwest::Url;

use crate::application::port::{ArchiveFuture, ArchiveSource, BytesFuture};
use crate::domain::archive::{decode_result_set, DateRange};
use crate::error::{Error, FetchError};

/// Public APOD endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.nasa.gov/planetary/apod";

/// Shared, rate-limited key accepted by the public endpoint.
pub const DEMO_API_KEY: &str = "DEMO_KEY";

const USER_AGENT: &str = concat!("IcedApod/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`ApodClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApodOptions {
    pub endpoint: String,
    pub api_key: String,
    /// Overall request timeout. `None` leaves it to the HTTP client.
    pub timeout: Option<Duration>,
}

impl Default for ApodOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: DEMO_API_KEY.to_string(),
            timeout: None,
        }
    }
}

/// reqwest-backed archive source.
///
/// Cheap to clone: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApodClient {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl ApodClient {
    /// Builds a client for `options`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the endpoint is not an absolute URL or
    /// the HTTP client cannot be initialized.
    pub fn new(options: ApodOptions) -> Result<Self, Error> {
        let endpoint = Url::parse(&options.endpoint)
            .map_err(|e| Error::Config(format!("invalid endpoint '{}': {e}", options.endpoint)))?;

        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            api_key: options.api_key,
        })
    }

    /// Full request URL for `range`.
    #[must_use]
    pub fn request_url(&self, range: DateRange) -> Url {
        build_request_url(&self.endpoint, &self.api_key, range)
    }
}

/// Appends the key and ISO dates to `endpoint`, keeping any query it
/// already carries.
#[must_use]
pub fn build_request_url(endpoint: &Url, api_key: &str, range: DateRange) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .append_pair("api_key", api_key)
        .append_pair("start_date", &range.start_param())
        .append_pair("end_date", &range.end_param());
    url
}

impl ArchiveSource for ApodClient {
    fn fetch_range(&self, range: DateRange) -> ArchiveFuture {
        let client = self.client.clone();
        let url = self.request_url(range);

        Box::pin(async move {
            log::debug!("GET {} ({range})", url.path());
            let response = client.get(url).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }

            let body = response.bytes().await?;
            Ok(decode_result_set(&body)?)
        })
    }

    fn fetch_image(&self, url: &str) -> BytesFuture {
        let client = self.client.clone();
        let url = url.to_string();

        Box::pin(async move {
            let response = client.get(&url).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }

            Ok(response.bytes().await?.to_vec())
        })
    }
}
