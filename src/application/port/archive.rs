// SPDX-License-Identifier: MPL-2.0
//! Archive access port definition.
//!
//! This module defines the [`ArchiveSource`] trait the fetch pipeline talks
//! to. The HTTP adapter lives in `infrastructure::apod`; tests provide
//! in-memory sources.
//!
//! # Design Notes
//!
//! - No `async fn`: methods hand back boxed `'static` futures, which callers
//!   wrap in an Iced `Task::perform`
//! - The trait is `Send + Sync` so one source can be shared behind an `Arc`
//! - Failures are reported as [`FetchError`], never as panics

use crate::domain::archive::{DateRange, ResultSet};
use crate::error::FetchError;
use futures_util::future::BoxFuture;

/// Outcome of an archive range query.
pub type ArchiveFuture = BoxFuture<'static, Result<ResultSet, FetchError>>;

/// Outcome of a raw image download.
pub type BytesFuture = BoxFuture<'static, Result<Vec<u8>, FetchError>>;

/// Read-only access to the remote archive.
pub trait ArchiveSource: Send + Sync {
    /// Issues exactly one request for every record in `range`.
    fn fetch_range(&self, range: DateRange) -> ArchiveFuture;

    /// Downloads the bytes behind a record's image URL.
    fn fetch_image(&self, url: &str) -> BytesFuture;
}
