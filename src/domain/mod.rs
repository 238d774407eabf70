// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core types with no presentation or I/O dependencies.
//!
//! Besides `std`, the domain only leans on `chrono` for calendar dates and
//! `serde` to describe the archive's wire shape.
//!
//! # Modules
//!
//! - [`archive`]: Archive records ([`Record`](archive::Record),
//!   [`MediaType`](archive::MediaType)) and the validated
//!   [`DateRange`](archive::DateRange)
//! - [`ui`]: UI value objects ([`DisplayText`](ui::DisplayText),
//!   [`PreviewSize`](ui::PreviewSize), [`SpanDays`](ui::SpanDays))

pub mod archive;
pub mod ui;
