// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::application::modal;
use crate::application::RequestId;
use crate::domain::archive::ResultSet;
use crate::error::FetchError;
use crate::media::Preview;
use crate::ui::gallery;
use crate::ui::notifications;
use crate::ui::range_selector;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    RangeSelector(range_selector::Message),
    Gallery(gallery::Message),
    Modal(modal::Event),
    Notification(notifications::NotificationMessage),
    /// The archive request issued as `id` finished.
    ArchiveLoaded {
        id: RequestId,
        result: Result<ResultSet, FetchError>,
    },
    /// A thumbnail download finished.
    PreviewLoaded {
        url: String,
        result: Result<Preview, FetchError>,
    },
    /// The detail view image finished downloading.
    DetailLoaded {
        url: String,
        result: Result<Preview, FetchError>,
    },
    Tick(Instant), // Spinner animation and toast auto-dismiss
}

/// Runtime flags passed from the launcher into the application.
#[derive(Debug, Default)]
pub struct Flags {
    /// First day of the startup range (`YYYY-MM-DD`).
    pub start: Option<String>,
    /// Last day of the startup range (`YYYY-MM-DD`).
    pub end: Option<String>,
    /// Optional config directory override (from --config-dir CLI argument).
    pub config_dir: Option<String>,
    /// Access key overriding the one from `settings.toml`.
    pub api_key: Option<String>,
}
