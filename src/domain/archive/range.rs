// SPDX-License-Identifier: MPL-2.0
//! Date range value object for archive queries.
//!
//! A [`DateRange`] can only be built through [`DateRange::new`] (or the
//! string parser used by the range selector), so every range handed to the
//! pipeline already satisfies `start <= end` and lies inside the archive
//! window `[ARCHIVE_EPOCH, today]`.

use chrono::{Days, NaiveDate};
use std::fmt;

/// First day published by the archive.
pub const ARCHIVE_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1995, 6, 16) {
    Some(date) => date,
    None => panic!("archive epoch must be a valid date"),
};

/// Textual date format understood by the archive (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a pair of dates was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// One or both dates were left empty.
    Missing,
    /// A date could not be parsed as `YYYY-MM-DD`.
    Unparseable(String),
    /// A date precedes [`ARCHIVE_EPOCH`].
    BeforeEpoch(NaiveDate),
    /// A date lies in the future.
    AfterToday(NaiveDate),
    /// `start` is after `end`.
    Reversed { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::Missing => write!(f, "Please select both start and end dates."),
            RangeError::Unparseable(raw) => {
                write!(f, "\"{raw}\" is not a valid date (expected YYYY-MM-DD).")
            }
            RangeError::BeforeEpoch(date) => write!(
                f,
                "{} is before the archive begins ({}).",
                date.format(DATE_FORMAT),
                ARCHIVE_EPOCH.format(DATE_FORMAT)
            ),
            RangeError::AfterToday(date) => {
                write!(f, "{} is in the future.", date.format(DATE_FORMAT))
            }
            RangeError::Reversed { start, end } => write!(
                f,
                "Start date {} is after end date {}.",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            ),
        }
    }
}

impl std::error::Error for RangeError {}

/// Inclusive range of archive days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Validates and builds a range against the archive window ending `today`.
    pub fn new(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Result<Self, RangeError> {
        for date in [start, end] {
            if date < ARCHIVE_EPOCH {
                return Err(RangeError::BeforeEpoch(date));
            }
            if date > today {
                return Err(RangeError::AfterToday(date));
            }
        }
        if start > end {
            return Err(RangeError::Reversed { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses the two raw input values of the range selector.
    ///
    /// Blank values (after trimming) are reported as [`RangeError::Missing`]
    /// before any parsing happens.
    pub fn parse(start: &str, end: &str, today: NaiveDate) -> Result<Self, RangeError> {
        let (start, end) = (start.trim(), end.trim());
        if start.is_empty() || end.is_empty() {
            return Err(RangeError::Missing);
        }
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        Self::new(start, end, today)
    }

    /// Default selection: the last `span_days` days up to and including `today`.
    ///
    /// The start is clamped to [`ARCHIVE_EPOCH`].
    #[must_use]
    pub fn trailing(span_days: u32, today: NaiveDate) -> Self {
        let today = today.max(ARCHIVE_EPOCH);
        let start = today
            .checked_sub_days(Days::new(u64::from(span_days)))
            .unwrap_or(ARCHIVE_EPOCH)
            .max(ARCHIVE_EPOCH);
        Self { start, end: today }
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, both ends included.
    #[must_use]
    pub fn len_days(&self) -> u64 {
        (self.end - self.start).num_days().unsigned_abs() + 1
    }

    /// `start` formatted for the archive query string.
    #[must_use]
    pub fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// `end` formatted for the archive query string.
    #[must_use]
    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start_param(), self.end_param())
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, RangeError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| RangeError::Unparseable(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn parse_accepts_iso_dates() {
        let range = DateRange::parse("2024-01-01", "2024-01-03", date(2024, 6, 1)).unwrap();
        assert_eq!(range.start(), date(2024, 1, 1));
        assert_eq!(range.end(), date(2024, 1, 3));
        assert_eq!(range.len_days(), 3);
    }

    #[test]
    fn parse_reports_missing_before_format_errors() {
        let today = date(2024, 6, 1);
        assert_eq!(DateRange::parse("", "2024-01-03", today), Err(RangeError::Missing));
        assert_eq!(DateRange::parse("2024-01-01", "   ", today), Err(RangeError::Missing));
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = DateRange::parse("01/02/2024", "2024-01-03", date(2024, 6, 1)).unwrap_err();
        assert_eq!(err, RangeError::Unparseable("01/02/2024".to_string()));
    }

    #[test]
    fn new_rejects_dates_outside_archive_window() {
        let today = date(2024, 6, 1);
        assert_eq!(
            DateRange::new(date(1995, 6, 15), date(1995, 7, 1), today),
            Err(RangeError::BeforeEpoch(date(1995, 6, 15)))
        );
        assert_eq!(
            DateRange::new(date(2024, 5, 30), date(2024, 6, 2), today),
            Err(RangeError::AfterToday(date(2024, 6, 2)))
        );
    }

    #[test]
    fn new_rejects_reversed_range() {
        let err = DateRange::new(date(2024, 1, 3), date(2024, 1, 1), date(2024, 6, 1)).unwrap_err();
        assert!(matches!(err, RangeError::Reversed { .. }));
    }

    #[test]
    fn single_day_range_is_valid() {
        let day = date(2024, 1, 1);
        let range = DateRange::new(day, day, day).unwrap();
        assert_eq!(range.len_days(), 1);
    }

    #[test]
    fn trailing_range_covers_span_up_to_today() {
        let range = DateRange::trailing(9, date(2024, 3, 10));
        assert_eq!(range.start(), date(2024, 3, 1));
        assert_eq!(range.end(), date(2024, 3, 10));
    }

    #[test]
    fn trailing_range_is_clamped_to_epoch() {
        let range = DateRange::trailing(30, date(1995, 6, 20));
        assert_eq!(range.start(), ARCHIVE_EPOCH);
    }

    #[test]
    fn params_use_iso_format() {
        let range = DateRange::new(date(2024, 1, 5), date(2024, 2, 9), date(2024, 6, 1)).unwrap();
        assert_eq!(range.start_param(), "2024-01-05");
        assert_eq!(range.end_param(), "2024-02-09");
        assert_eq!(range.to_string(), "2024-01-05..2024-02-09");
    }

    #[test]
    fn missing_message_matches_notice_text() {
        assert_eq!(
            RangeError::Missing.to_string(),
            "Please select both start and end dates."
        );
    }
}
