// SPDX-License-Identifier: MPL-2.0
//! Gallery item construction.
//!
//! Pure mapping from archive records to displayable units. No state, no
//! network access: the grid and the modal both read from these values.

use crate::domain::archive::{Record, DATE_FORMAT};
use crate::domain::ui::DisplayText;
use chrono::NaiveDate;

/// One tile of the gallery grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    /// Source record, handed to the modal on selection.
    pub record: Record,
    /// Thumbnail source.
    pub image_url: String,
    pub title: DisplayText,
    /// Labeled date, e.g. `Date: 2024-01-01`.
    pub date_label: String,
    pub explanation: DisplayText,
}

impl GalleryItem {
    /// Builds the tile for `record`, or `None` when the record is not an image.
    #[must_use]
    pub fn from_record(record: &Record) -> Option<Self> {
        if !record.is_displayable_image() {
            return None;
        }
        let image_url = record.url.clone()?;

        Some(Self {
            image_url,
            title: DisplayText::neutralize(&record.title),
            date_label: date_label(record.date),
            explanation: DisplayText::neutralize(&record.explanation),
            record: record.clone(),
        })
    }
}

/// Maps a result set to gallery items, dropping every non-image record.
///
/// Order is preserved.
#[must_use]
pub fn build_gallery(records: &[Record]) -> Vec<GalleryItem> {
    records.iter().filter_map(GalleryItem::from_record).collect()
}

/// Formats the date label shown on tiles and in the modal.
#[must_use]
pub fn date_label(date: NaiveDate) -> String {
    format!("Date: {}", date.format(DATE_FORMAT))
}
