// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the range selector,
//! the fetch pipeline and the detail modal.
//!
//! The `App` struct owns every state object and translates messages into
//! side effects like archive requests and thumbnail downloads. State is only
//! ever mutated from `App::update`.

pub mod config;
mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::application::port::{ArchiveFuture, ArchiveSource, BytesFuture};
use crate::application::{ModalController, Pipeline};
use crate::domain::archive::{DateRange, RangeError};
use crate::domain::ui::{PreviewSize, SpanDays};
use crate::error::FetchError;
use crate::infrastructure::{ApodClient, ApodOptions};
use crate::media::{DetailImage, PreviewCache};
use crate::ui::gallery::loading;
use crate::ui::notifications::{self, Notification, Topic};
use crate::ui::range_selector;
use crate::ui::theming::ThemeMode;
use chrono::NaiveDate;
use config::Config;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::sync::Arc;

pub const APP_NAME: &str = "IcedApod";

/// Root Iced application state.
pub struct App {
    pipeline: Pipeline,
    modal: ModalController,
    selector: range_selector::State,
    previews: PreviewCache,
    detail: DetailImage,
    loading: loading::State,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
    source: Arc<dyn ArchiveSource>,
    theme_mode: ThemeMode,
    preview_size: PreviewSize,
    detail_size: PreviewSize,
    /// Whether the error placeholder shows its technical details.
    show_error_details: bool,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("state", self.pipeline.state())
            .field("modal_open", &self.modal.is_open())
            .field("previews", &self.previews.len())
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1100;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 640;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Current local calendar date; upper bound of the archive window.
fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Range requested on startup: the CLI dates when given, otherwise the last
/// `span` days up to `today`.
fn initial_range(
    flags: &Flags,
    span: SpanDays,
    today: NaiveDate,
) -> Result<DateRange, RangeError> {
    match (&flags.start, &flags.end) {
        (None, None) => Ok(DateRange::trailing(span.value(), today)),
        (start, end) => DateRange::parse(
            start.as_deref().unwrap_or_default(),
            end.as_deref().unwrap_or_default(),
            today,
        ),
    }
}

/// Creates the HTTP source, falling back to the public defaults if the
/// configured endpoint is unusable.
fn build_source(options: ApodOptions) -> (Arc<dyn ArchiveSource>, Option<Notification>) {
    match ApodClient::new(options) {
        Ok(client) => (Arc::new(client), None),
        Err(err) => {
            log::warn!("Archive settings rejected: {err}");
            let warning = Notification::warning(format!("{err}. Using the public NASA endpoint."))
                .with_topic(Topic::Config);
            match ApodClient::new(ApodOptions::default()) {
                Ok(client) => (Arc::new(client), Some(warning)),
                Err(err) => {
                    let notice = Notification::error(format!("Archive unreachable: {err}"))
                        .with_topic(Topic::Config);
                    (Arc::new(Unavailable(err.to_string())), Some(notice))
                }
            }
        }
    }
}

/// Source used when no HTTP client could be built; every request fails.
struct Unavailable(String);

impl ArchiveSource for Unavailable {
    fn fetch_range(&self, _range: DateRange) -> ArchiveFuture {
        let reason = self.0.clone();
        Box::pin(async move { Err(FetchError::Network(reason)) })
    }

    fn fetch_image(&self, _url: &str) -> BytesFuture {
        let reason = self.0.clone();
        Box::pin(async move { Err(FetchError::Network(reason)) })
    }
}

impl App {
    /// Loads the settings, builds the archive client and kicks off the
    /// startup load.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let options = config.archive_options(flags.api_key.clone());
        let (source, source_warning) = build_source(options);

        let (mut app, task) = Self::with_source(&config, source, &flags, today());

        if let Some(warning) = config_warning {
            app.notifications
                .push(Notification::warning(warning).with_topic(Topic::Config));
        }
        if let Some(notice) = source_warning {
            app.notifications.push(notice);
        }

        (app, task)
    }

    fn with_source(
        config: &Config,
        source: Arc<dyn ArchiveSource>,
        flags: &Flags,
        today: NaiveDate,
    ) -> (Self, Task<Message>) {
        let span = config.span_days();
        let mut app = App {
            pipeline: Pipeline::new(),
            modal: ModalController::new(),
            selector: range_selector::State::default(),
            previews: PreviewCache::new(config.preview_cache()),
            detail: DetailImage::default(),
            loading: loading::State::default(),
            notifications: notifications::Manager::new(),
            source,
            theme_mode: config.general.theme_mode,
            preview_size: config.preview_size(),
            detail_size: config.detail_size(),
            show_error_details: false,
        };

        let range = initial_range(flags, span, today).unwrap_or_else(|err| {
            log::warn!("Ignoring startup range: {err}");
            app.notifications
                .push(Notification::warning(err.to_string()).with_topic(Topic::RangeInput));
            DateRange::trailing(span.value(), today)
        });
        app.selector = range_selector::State::new(range);

        let task = update::start_load(&mut app.context(), range);
        (app, task)
    }

    fn context(&mut self) -> update::UpdateContext<'_> {
        update::UpdateContext {
            pipeline: &mut self.pipeline,
            modal: &mut self.modal,
            selector: &mut self.selector,
            previews: &mut self.previews,
            detail: &mut self.detail,
            loading: &mut self.loading,
            notifications: &mut self.notifications,
            show_error_details: &mut self.show_error_details,
            source: &self.source,
            preview_size: self.preview_size,
            detail_size: self.detail_size,
        }
    }

    fn title(&self) -> String {
        match self.pipeline.last_range() {
            Some(range) if range.start() == range.end() => {
                format!("{} - {APP_NAME}", range.start_param())
            }
            Some(range) => format!(
                "{} to {} - {APP_NAME}",
                range.start_param(),
                range.end_param()
            ),
            None => APP_NAME.to_string(),
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription(self.modal.is_open());
        let tick_sub = subscription::create_tick_subscription(
            self.loading.is_loading(),
            self.notifications.has_notifications(),
        );

        Subscription::batch([event_sub, tick_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = self.context();

        match message {
            Message::RangeSelector(selector_message) => {
                update::handle_range_selector_message(&mut ctx, selector_message, today())
            }
            Message::Gallery(gallery_message) => {
                update::handle_gallery_message(&mut ctx, gallery_message)
            }
            Message::Modal(event) => update::handle_modal_event(&mut ctx, event),
            Message::Notification(notification_message) => {
                ctx.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::ArchiveLoaded { id, result } => {
                update::handle_archive_loaded(&mut ctx, id, result)
            }
            Message::PreviewLoaded { url, result } => {
                update::handle_preview_loaded(&mut ctx, url, result)
            }
            Message::DetailLoaded { url, result } => {
                update::handle_detail_loaded(&mut ctx, url, result)
            }
            Message::Tick(_) => update::handle_tick(&mut ctx),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            pipeline: &self.pipeline,
            modal: &self.modal,
            selector: &self.selector,
            previews: &self.previews,
            detail: &self.detail,
            loading: &self.loading,
            notifications: &self.notifications,
            show_error_details: self.show_error_details,
            today: today(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::modal::{Event as ModalEvent, ModalKey};
    use crate::application::ViewState;
    use crate::domain::archive::{MediaType, Record, ResultSet};
    use crate::ui::gallery;

    struct StaticSource(ResultSet);

    impl ArchiveSource for StaticSource {
        fn fetch_range(&self, _range: DateRange) -> ArchiveFuture {
            let records = self.0.clone();
            Box::pin(async move { Ok(records) })
        }

        fn fetch_image(&self, _url: &str) -> BytesFuture {
            Box::pin(async { Err(FetchError::Status(404)) })
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn record(d: u32, media_type: MediaType) -> Record {
        Record {
            date: day(d),
            title: format!("Day {d}"),
            explanation: format!("Explanation {d}"),
            media_type,
            url: Some(format!("https://example.org/{d}.jpg")),
            hdurl: None,
            copyright: None,
        }
    }

    fn sample() -> ResultSet {
        vec![
            record(1, MediaType::Image),
            record(2, MediaType::Other("video".into())),
            record(3, MediaType::Image),
        ]
    }

    fn boot(flags: Flags) -> App {
        let source: Arc<dyn ArchiveSource> = Arc::new(StaticSource(sample()));
        let (app, _task) = App::with_source(&Config::default(), source, &flags, day(20));
        app
    }

    fn range_flags() -> Flags {
        Flags {
            start: Some("2024-01-01".into()),
            end: Some("2024-01-03".into()),
            ..Flags::default()
        }
    }

    /// Feeds the outstanding archive response back into the app.
    fn deliver(app: &mut App, result: Result<ResultSet, FetchError>) {
        let id = app.pipeline.in_flight().expect("request in flight");
        let _ = app.update(Message::ArchiveLoaded { id, result });
    }

    #[test]
    fn startup_loads_trailing_range_by_default() {
        let app = boot(Flags::default());

        assert!(app.pipeline.is_loading());
        assert!(app.loading.is_loading());
        let range = app.pipeline.last_range().expect("range");
        assert_eq!(range.end(), day(20));
        assert_eq!(range.start(), day(11));
    }

    #[test]
    fn startup_uses_cli_range() {
        let app = boot(range_flags());

        assert_eq!(app.selector.start_input(), "2024-01-01");
        assert_eq!(app.selector.end_input(), "2024-01-03");
        assert_eq!(app.title(), "2024-01-01 to 2024-01-03 - IcedApod");
    }

    #[test]
    fn invalid_cli_range_falls_back_with_notice() {
        let app = boot(Flags {
            start: Some("2024-01-05".into()),
            ..Flags::default()
        });

        assert_eq!(app.notifications.visible_count(), 1);
        assert_eq!(app.pipeline.last_range().map(|r| r.end()), Some(day(20)));
    }

    #[test]
    fn loaded_response_renders_only_images() {
        let mut app = boot(range_flags());
        deliver(&mut app, Ok(sample()));

        assert!(matches!(app.pipeline.state(), ViewState::Loaded(_)));
        assert!(!app.loading.is_loading());
        let dates: Vec<_> = app.pipeline.items().iter().map(|i| i.record.date).collect();
        assert_eq!(dates, vec![day(1), day(3)]);
        // Both thumbnails were requested.
        assert!(app.previews.is_pending("https://example.org/1.jpg"));
        assert!(app.previews.is_pending("https://example.org/3.jpg"));
    }

    #[test]
    fn selecting_item_opens_modal_and_escape_closes_it() {
        let mut app = boot(range_flags());
        deliver(&mut app, Ok(sample()));

        let _ = app.update(Message::Gallery(gallery::Message::ItemSelected(1)));
        assert_eq!(app.modal.record().map(|r| r.date), Some(day(3)));

        let _ = app.update(Message::Modal(ModalEvent::ContentPressed));
        assert!(app.modal.is_open());

        let _ = app.update(Message::Modal(ModalEvent::KeyPressed(ModalKey::Escape)));
        assert!(!app.modal.is_open());
    }

    #[test]
    fn selecting_item_fetches_detail_image_only() {
        let mut app = boot(range_flags());
        deliver(&mut app, Ok(sample()));
        // The first thumbnail finished, the second is still downloading.
        let _ = app.update(Message::PreviewLoaded {
            url: "https://example.org/1.jpg".into(),
            result: Ok(crate::media::Preview::from_rgba(1, 1, vec![0; 4])),
        });

        let _ = app.update(Message::Gallery(gallery::Message::ItemSelected(0)));

        assert_eq!(app.detail.url(), Some("https://example.org/1.jpg"));
        assert!(!app.previews.is_pending("https://example.org/1.jpg"));
        assert!(app.previews.is_pending("https://example.org/3.jpg"));

        let _ = app.update(Message::DetailLoaded {
            url: "https://example.org/1.jpg".into(),
            result: Ok(crate::media::Preview::from_rgba(4, 4, vec![0; 64])),
        });
        assert_eq!(app.detail.preview().map(|p| p.width), Some(4));

        let _ = app.update(Message::Modal(ModalEvent::CloseButton));
        assert_eq!(app.detail.url(), None);
    }

    #[test]
    fn detail_image_of_closed_record_is_dropped() {
        let mut app = boot(range_flags());
        deliver(&mut app, Ok(sample()));

        let _ = app.update(Message::Gallery(gallery::Message::ItemSelected(0)));
        let _ = app.update(Message::Gallery(gallery::Message::ItemSelected(1)));
        let _ = app.update(Message::DetailLoaded {
            url: "https://example.org/1.jpg".into(),
            result: Ok(crate::media::Preview::from_rgba(1, 1, vec![0; 4])),
        });

        assert_eq!(app.detail.url(), Some("https://example.org/3.jpg"));
        assert!(app.detail.preview().is_none());
    }

    #[test]
    fn copying_hd_link_confirms_with_toast() {
        let mut records = sample();
        records[0].hdurl = Some("https://example.org/1_hd.jpg".into());
        let mut app = boot(range_flags());
        deliver(&mut app, Ok(records));

        let _ = app.update(Message::Gallery(gallery::Message::ItemSelected(0)));
        let _ = app.update(Message::Modal(ModalEvent::CopyHdLink));

        assert!(app.modal.is_open());
        let notices: Vec<_> = app.notifications.visible().map(|n| n.message()).collect();
        assert_eq!(notices, vec![gallery::modal::LINK_COPIED]);
    }

    #[test]
    fn unusable_endpoint_falls_back_with_warning() {
        let (_source, notice) = build_source(ApodOptions {
            endpoint: "not a url".into(),
            ..ApodOptions::default()
        });

        let notice = notice.expect("fallback notice");
        assert_eq!(notice.severity(), notifications::Severity::Warning);
        assert_eq!(notice.topic(), Topic::Config);
    }

    #[test]
    fn rejected_submission_keeps_content_and_warns() {
        let mut app = boot(range_flags());
        deliver(&mut app, Ok(sample()));

        let _ = app.update(Message::RangeSelector(range_selector::Message::EndChanged(
            String::new(),
        )));
        let _ = app.update(Message::RangeSelector(range_selector::Message::Submit));

        assert!(matches!(app.pipeline.state(), ViewState::Loaded(_)));
        let notice: Vec<_> = app.notifications.visible().map(|n| n.message()).collect();
        assert_eq!(notice, vec!["Please select both start and end dates."]);
    }

    #[test]
    fn retry_reissues_last_range() {
        let mut app = boot(range_flags());
        deliver(&mut app, Err(FetchError::Network("offline".into())));
        assert!(matches!(app.pipeline.state(), ViewState::Failed(_)));

        let first = app.pipeline.last_range();
        let _ = app.update(Message::Gallery(gallery::Message::Retry));

        assert!(app.pipeline.is_loading());
        assert_eq!(app.pipeline.last_range(), first);
    }

    #[test]
    fn failed_thumbnail_is_not_requested_again() {
        let mut app = boot(range_flags());
        deliver(&mut app, Ok(sample()));

        let _ = app.update(Message::PreviewLoaded {
            url: "https://example.org/1.jpg".into(),
            result: Err(FetchError::Status(404)),
        });

        assert!(app.previews.has_failed("https://example.org/1.jpg"));
        assert!(!app.previews.is_pending("https://example.org/1.jpg"));
        assert_eq!(app.pipeline.state().clone(), ViewState::Loaded(sample()));
    }

    #[test]
    fn error_details_toggle() {
        let mut app = boot(range_flags());
        deliver(&mut app, Err(FetchError::Status(500)));

        let _ = app.update(Message::Gallery(gallery::Message::ToggleErrorDetails));
        assert!(app.show_error_details);

        let _ = app.update(Message::Gallery(gallery::Message::Retry));
        assert!(!app.show_error_details);
    }
}
