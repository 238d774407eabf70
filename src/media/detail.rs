// SPDX-License-Identifier: MPL-2.0
//! The larger image shown by the detail view.
//!
//! Only one record is open at a time, so the detail image lives in a single
//! slot instead of the thumbnail cache. Completions for a URL other than the
//! one requested last are dropped.

use crate::error::FetchError;
use crate::media::Preview;

#[derive(Debug, Clone, Default)]
pub enum DetailImage {
    #[default]
    Empty,
    Loading(String),
    Ready(String, Preview),
    Failed(String),
}

impl DetailImage {
    /// Switches to `url`. Returns `true` if it has to be downloaded.
    pub fn request(&mut self, url: &str) -> bool {
        if self.url() == Some(url) && !matches!(self, Self::Failed(_)) {
            return false;
        }
        *self = Self::Loading(url.to_string());
        true
    }

    /// Applies a finished download. Returns `false` if `url` is no longer
    /// the one being shown.
    pub fn complete(&mut self, url: String, result: Result<Preview, FetchError>) -> bool {
        if !matches!(self, Self::Loading(current) if *current == url) {
            return false;
        }
        *self = match result {
            Ok(preview) => Self::Ready(url, preview),
            Err(err) => {
                log::debug!("Detail image {url} failed ({}): {err}", err.kind());
                Self::Failed(url)
            }
        };
        true
    }

    pub fn clear(&mut self) {
        *self = Self::Empty;
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Loading(url) | Self::Ready(url, _) | Self::Failed(url) => Some(url),
        }
    }

    /// The decoded image, once it is ready.
    #[must_use]
    pub fn preview(&self) -> Option<&Preview> {
        match self {
            Self::Ready(_, preview) => Some(preview),
            _ => None,
        }
    }

    #[must_use]
    pub fn has_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
