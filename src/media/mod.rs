// SPDX-License-Identifier: MPL-2.0
//! Image decoding and caching for gallery previews.
//!
//! Archive images are downloaded through the [`ArchiveSource`] port,
//! decoded with the `image` crate and downscaled once. The resulting
//! [`Preview`] handle is kept in the thumbnail cache for the grid, or in
//! the [`DetailImage`] slot at a larger size for the modal.
//!
//! [`ArchiveSource`]: crate::application::port::ArchiveSource

pub mod detail;
pub mod preview;
pub mod preview_cache;

pub use detail::DetailImage;
pub use preview::{decode_preview, load_preview, Preview};
pub use preview_cache::{Admission, PreviewCache, PreviewCacheConfig};
