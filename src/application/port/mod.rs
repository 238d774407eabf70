// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`archive`]: Range queries and image downloads against the remote archive

pub mod archive;

pub use archive::{ArchiveFuture, ArchiveSource, BytesFuture};
