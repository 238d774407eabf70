// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Archive**: Endpoint, access key, startup range and request timeout
//! - **Gallery**: Thumbnail and detail resolution, thumbnail cache budget

use crate::domain::ui::newtypes::{preview_bounds, span_bounds};
use crate::media::preview_cache;

// ==========================================================================
// Archive Defaults
// ==========================================================================

pub use crate::infrastructure::apod::{DEFAULT_ENDPOINT, DEMO_API_KEY as DEFAULT_API_KEY};

/// Number of days before today covered by the startup range.
pub const DEFAULT_SPAN_DAYS: u32 = span_bounds::DEFAULT;

/// Minimum request timeout (in seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout (in seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

// ==========================================================================
// Gallery Defaults
// ==========================================================================

/// Longest edge of grid thumbnails (in pixels).
pub const DEFAULT_THUMBNAIL_SIZE: u32 = preview_bounds::DEFAULT;

/// Longest edge of the detail view image (in pixels).
pub const DEFAULT_DETAIL_SIZE: u32 = preview_bounds::DETAIL_DEFAULT;

/// Preview cache budget (in megabytes).
pub const DEFAULT_THUMBNAIL_CACHE_MB: u32 = preview_cache::DEFAULT_CACHE_MB;

// ==========================================================================
// Compile-time validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_SPAN_DAYS <= span_bounds::MAX);

    assert!(MIN_REQUEST_TIMEOUT_SECS > 0);
    assert!(MAX_REQUEST_TIMEOUT_SECS >= MIN_REQUEST_TIMEOUT_SECS);

    assert!(DEFAULT_THUMBNAIL_SIZE >= preview_bounds::MIN);
    assert!(DEFAULT_THUMBNAIL_SIZE <= preview_bounds::MAX);
    assert!(DEFAULT_DETAIL_SIZE >= DEFAULT_THUMBNAIL_SIZE);
    assert!(DEFAULT_DETAIL_SIZE <= preview_bounds::MAX);

    assert!(DEFAULT_THUMBNAIL_CACHE_MB >= preview_cache::MIN_CACHE_MB);
    assert!(DEFAULT_THUMBNAIL_CACHE_MB <= preview_cache::MAX_CACHE_MB);
};
