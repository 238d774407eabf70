// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`.
//!
//! - [`apod`]: HTTP archive access via `reqwest` (implements [`ArchiveSource`])
//!
//! [`ArchiveSource`]: crate::application::port::ArchiveSource

pub mod apod;

pub use apod::{ApodClient, ApodOptions};
