// SPDX-License-Identifier: MPL-2.0
//! Archive record types.
//!
//! These types mirror the JSON objects returned by the archive endpoint.
//! Only the fields the gallery shows are kept; unknown fields are ignored.

pub mod range;

pub use range::{DateRange, RangeError, ARCHIVE_EPOCH, DATE_FORMAT};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of media attached to a record.
///
/// The archive uses `"image"` and `"video"` today, but anything that is
/// not an image is treated the same way, so unknown values are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
    Image,
    Other(String),
}

impl MediaType {
    #[must_use]
    pub fn is_image(&self) -> bool {
        matches!(self, MediaType::Image)
    }
}

impl From<String> for MediaType {
    fn from(raw: String) -> Self {
        if raw == "image" {
            MediaType::Image
        } else {
            MediaType::Other(raw)
        }
    }
}

impl From<MediaType> for String {
    fn from(media_type: MediaType) -> Self {
        match media_type {
            MediaType::Image => "image".to_string(),
            MediaType::Other(raw) => raw,
        }
    }
}

/// One dated entry of the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub title: String,
    pub explanation: String,
    pub media_type: MediaType,
    /// Resource locator; only meaningful for images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// High resolution variant, when the archive provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

impl Record {
    /// Whether the record can be shown in the gallery.
    ///
    /// An image without a URL has nothing to display and is filtered out
    /// together with the non-image records.
    #[must_use]
    pub fn is_displayable_image(&self) -> bool {
        self.media_type.is_image() && self.url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// Ordered records returned for one range query, in the order received.
pub type ResultSet = Vec<Record>;

/// Decodes a response body into a [`ResultSet`].
pub fn decode_result_set(body: &[u8]) -> Result<ResultSet, serde_json::Error> {
    serde_json::from_slice(body)
}
