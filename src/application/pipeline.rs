// SPDX-License-Identifier: MPL-2.0
//! Date-range fetch-and-render pipeline.
//!
//! The pipeline owns the [`ViewState`] of the content area. A load is split
//! in two halves so the UI loop never blocks:
//!
//! 1. [`Pipeline::load_range`] switches to [`ViewState::Loading`] right away
//!    and hands back the pending archive future together with its
//!    [`RequestId`].
//! 2. [`Pipeline::complete`] applies the outcome once the future resolves.
//!
//! Only the most recent request may complete. An older one finishing late is
//! reported as [`Completion::Stale`] and dropped, so a slow response can
//! never overwrite a newer range.

use crate::application::gallery::{build_gallery, GalleryItem};
use crate::application::port::{ArchiveFuture, ArchiveSource};
use crate::domain::archive::{DateRange, Record, ResultSet};
use crate::error::FetchError;

/// Ticket issued for every load, increasing monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// What the content area currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request succeeded.
    Loaded(ResultSet),
    /// The last request failed.
    Failed(FetchError),
}

/// Outcome of [`Pipeline::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result replaced the content area.
    Applied,
    /// A newer request was issued meanwhile; the result was discarded.
    Stale,
}

/// A request issued by [`Pipeline::load_range`] that still has to be awaited.
pub struct PendingLoad {
    pub id: RequestId,
    pub range: DateRange,
    pub future: ArchiveFuture,
}

impl std::fmt::Debug for PendingLoad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingLoad")
            .field("id", &self.id)
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct Pipeline {
    state: ViewState,
    items: Vec<GalleryItem>,
    issued: u64,
    in_flight: Option<RequestId>,
    last_range: Option<DateRange>,
}

impl Pipeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a request for `range` against `source`.
    ///
    /// The view is in [`ViewState::Loading`] when this returns; prior items
    /// are gone.
    pub fn load_range(&mut self, range: DateRange, source: &dyn ArchiveSource) -> PendingLoad {
        let id = self.begin(range);
        PendingLoad {
            id,
            range,
            future: source.fetch_range(range),
        }
    }

    /// Starts a load without touching any source.
    ///
    /// Split out of [`Self::load_range`] for callers that drive the fetch
    /// themselves.
    pub fn begin(&mut self, range: DateRange) -> RequestId {
        self.issued += 1;
        let id = RequestId(self.issued);

        self.in_flight = Some(id);
        self.last_range = Some(range);
        self.state = ViewState::Loading;
        self.items.clear();

        log::info!("Loading archive range {range} (request #{})", id.0);
        id
    }

    /// Applies the outcome of request `id`.
    pub fn complete(&mut self, id: RequestId, result: Result<ResultSet, FetchError>) -> Completion {
        if self.in_flight != Some(id) {
            log::debug!("Ignoring stale archive response #{}", id.0);
            return Completion::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(records) => {
                self.items = build_gallery(&records);
                log::info!(
                    "Request #{} returned {} records, {} images",
                    id.0,
                    records.len(),
                    self.items.len()
                );
                self.state = ViewState::Loaded(records);
            }
            Err(err) => {
                log::warn!("Request #{} failed ({}): {err}", id.0, err.kind());
                self.items.clear();
                self.state = ViewState::Failed(err);
            }
        }
        Completion::Applied
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading)
    }

    /// Gallery items of the last applied result set.
    #[must_use]
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    /// Record behind the gallery item at `index`.
    #[must_use]
    pub fn select(&self, index: usize) -> Option<&Record> {
        self.items.get(index).map(|item| &item.record)
    }

    /// Request whose completion will be applied, if one is outstanding.
    #[must_use]
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Range of the most recent load, used by the retry action.
    #[must_use]
    pub fn last_range(&self) -> Option<DateRange> {
        self.last_range
    }

    #[must_use]
    pub fn failure(&self) -> Option<&FetchError> {
        match &self.state {
            ViewState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::archive::MediaType;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn range() -> DateRange {
        DateRange::new(day(1), day(3), day(10)).unwrap()
    }

    fn image(d: u32) -> Record {
        Record {
            date: day(d),
            title: format!("Title {d}"),
            explanation: String::new(),
            media_type: MediaType::Image,
            url: Some(format!("https://example.org/{d}.jpg")),
            hdurl: None,
            copyright: None,
        }
    }

    #[test]
    fn begin_switches_to_loading() {
        let mut pipeline = Pipeline::new();
        assert_eq!(pipeline.state(), &ViewState::Idle);

        pipeline.begin(range());

        assert!(pipeline.is_loading());
        assert_eq!(pipeline.last_range(), Some(range()));
    }

    #[test]
    fn request_ids_increase() {
        let mut pipeline = Pipeline::new();
        let first = pipeline.begin(range());
        let second = pipeline.begin(range());
        assert!(second > first);
    }

    #[test]
    fn success_builds_items() {
        let mut pipeline = Pipeline::new();
        let id = pipeline.begin(range());

        let outcome = pipeline.complete(id, Ok(vec![image(1), image(2)]));

        assert_eq!(outcome, Completion::Applied);
        assert_eq!(pipeline.items().len(), 2);
        assert!(matches!(pipeline.state(), ViewState::Loaded(set) if set.len() == 2));
    }

    #[test]
    fn failure_clears_items() {
        let mut pipeline = Pipeline::new();
        let id = pipeline.begin(range());
        pipeline.complete(id, Ok(vec![image(1)]));

        let id = pipeline.begin(range());
        pipeline.complete(id, Err(FetchError::Status(500)));

        assert!(pipeline.items().is_empty());
        assert_eq!(pipeline.failure(), Some(&FetchError::Status(500)));
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut pipeline = Pipeline::new();
        let old = pipeline.begin(range());
        let new = pipeline.begin(range());

        assert_eq!(pipeline.complete(new, Ok(vec![image(3)])), Completion::Applied);
        assert_eq!(pipeline.complete(old, Ok(vec![image(1), image(2)])), Completion::Stale);

        assert_eq!(pipeline.items().len(), 1);
        assert_eq!(pipeline.items()[0].record.date, day(3));
    }

    #[test]
    fn completion_is_applied_once() {
        let mut pipeline = Pipeline::new();
        let id = pipeline.begin(range());
        pipeline.complete(id, Ok(vec![image(1)]));

        assert_eq!(pipeline.complete(id, Ok(vec![])), Completion::Stale);
        assert_eq!(pipeline.items().len(), 1);
    }

    #[test]
    fn select_returns_record_at_index() {
        let mut pipeline = Pipeline::new();
        let id = pipeline.begin(range());
        pipeline.complete(id, Ok(vec![image(1), image(2)]));

        assert_eq!(pipeline.select(1).map(|r| r.date), Some(day(2)));
        assert!(pipeline.select(2).is_none());
    }
}
