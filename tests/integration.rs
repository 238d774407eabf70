// SPDX-License-Identifier: MPL-2.0
use chrono::NaiveDate;
use iced_apod::app::config::{self, Config};
use iced_apod::application::modal::{Event, ModalKey, ModalState};
use iced_apod::application::port::{ArchiveFuture, ArchiveSource, BytesFuture};
use iced_apod::application::{Completion, ModalController, Pipeline, ViewState};
use iced_apod::domain::archive::{decode_result_set, DateRange};
use iced_apod::error::FetchError;
use iced_apod::infrastructure::apod::build_request_url;
use iced_apod::ui::theming::ThemeMode;
use reqwest::Url;
use std::sync::Mutex;
use tempfile::tempdir;

const THREE_DAYS: &str = r#"[
  {
    "date": "2024-01-01",
    "title": "The Horsehead Nebula",
    "explanation": "A dark nebula in Orion.",
    "media_type": "image",
    "url": "https://apod.nasa.gov/apod/image/2401/horsehead.jpg",
    "hdurl": "https://apod.nasa.gov/apod/image/2401/horsehead_big.jpg",
    "service_version": "v1"
  },
  {
    "date": "2024-01-02",
    "title": "Launch Replay",
    "explanation": "A rocket launch in time-lapse.",
    "media_type": "other",
    "url": "https://www.youtube.com/embed/example"
  },
  {
    "date": "2024-01-03",
    "title": "Quadrantid Meteors",
    "explanation": "Meteors over the <b>desert</b> &amp; sky.",
    "media_type": "image",
    "url": "https://apod.nasa.gov/apod/image/2401/quadrantids.jpg",
    "copyright": "Jane Doe"
  }
]"#;

/// In-memory archive returning a canned body and recording every request.
struct FakeArchive {
    body: Result<Vec<u8>, FetchError>,
    requests: Mutex<Vec<DateRange>>,
}

impl FakeArchive {
    fn with_body(body: &str) -> Self {
        Self {
            body: Ok(body.as_bytes().to_vec()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn failing(err: FetchError) -> Self {
        Self {
            body: Err(err),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl ArchiveSource for FakeArchive {
    fn fetch_range(&self, range: DateRange) -> ArchiveFuture {
        self.requests.lock().unwrap().push(range);
        let body = self.body.clone();
        Box::pin(async move {
            let bytes = body?;
            Ok(decode_result_set(&bytes)?)
        })
    }

    fn fetch_image(&self, _url: &str) -> BytesFuture {
        Box::pin(async { Err(FetchError::Status(404)) })
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn first_days_of_2024() -> DateRange {
    DateRange::new(date(2024, 1, 1), date(2024, 1, 3), date(2024, 6, 1)).unwrap()
}

#[tokio::test]
async fn non_image_day_is_left_out_of_the_gallery() {
    let archive = FakeArchive::with_body(THREE_DAYS);
    let mut pipeline = Pipeline::new();

    let pending = pipeline.load_range(first_days_of_2024(), &archive);
    assert_eq!(pipeline.state(), &ViewState::Loading);
    assert_eq!(archive.request_count(), 1);

    let result = pending.future.await;
    assert_eq!(pipeline.complete(pending.id, result), Completion::Applied);

    let items = pipeline.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].record.date, date(2024, 1, 1));
    assert_eq!(items[0].title.as_str(), "The Horsehead Nebula");
    assert_eq!(items[0].date_label, "Date: 2024-01-01");
    assert_eq!(items[1].record.date, date(2024, 1, 3));
    assert_eq!(items[1].explanation.as_str(), "Meteors over the desert & sky.");
}

#[tokio::test]
async fn range_without_images_renders_no_items() {
    let body = r#"[{"date":"2024-01-02","title":"Video","explanation":"","media_type":"video"}]"#;
    let archive = FakeArchive::with_body(body);
    let mut pipeline = Pipeline::new();

    let pending = pipeline.load_range(first_days_of_2024(), &archive);
    let result = pending.future.await;
    pipeline.complete(pending.id, result);

    assert!(matches!(pipeline.state(), ViewState::Loaded(records) if records.len() == 1));
    assert!(pipeline.items().is_empty());
}

#[tokio::test]
async fn malformed_body_fails_the_load() {
    let archive = FakeArchive::with_body(r#"{"code":400,"msg":"Date must be between"}"#);
    let mut pipeline = Pipeline::new();

    let pending = pipeline.load_range(first_days_of_2024(), &archive);
    let result = pending.future.await;
    pipeline.complete(pending.id, result);

    assert!(matches!(pipeline.failure(), Some(FetchError::Decode(_))));
    assert!(pipeline.items().is_empty());
}

#[tokio::test]
async fn network_failure_fails_the_load() {
    let archive = FakeArchive::failing(FetchError::Status(503));
    let mut pipeline = Pipeline::new();

    let pending = pipeline.load_range(first_days_of_2024(), &archive);
    let result = pending.future.await;
    pipeline.complete(pending.id, result);

    assert_eq!(pipeline.failure(), Some(&FetchError::Status(503)));
}

#[tokio::test]
async fn slow_first_response_cannot_overwrite_second() {
    let archive = FakeArchive::with_body(THREE_DAYS);
    let empty = FakeArchive::with_body("[]");
    let mut pipeline = Pipeline::new();

    let first = pipeline.load_range(first_days_of_2024(), &archive);
    let second = pipeline.load_range(first_days_of_2024(), &empty);

    let second_result = second.future.await;
    assert_eq!(pipeline.complete(second.id, second_result), Completion::Applied);

    let first_result = first.future.await;
    assert_eq!(pipeline.complete(first.id, first_result), Completion::Stale);

    assert_eq!(pipeline.state(), &ViewState::Loaded(Vec::new()));
}

#[tokio::test]
async fn selected_item_opens_and_closes_the_modal() {
    let archive = FakeArchive::with_body(THREE_DAYS);
    let mut pipeline = Pipeline::new();
    let pending = pipeline.load_range(first_days_of_2024(), &archive);
    let result = pending.future.await;
    pipeline.complete(pending.id, result);

    let mut modal = ModalController::new();
    let record = pipeline.select(1).cloned().expect("second item");
    modal.open(record.clone());
    assert_eq!(modal.state(), &ModalState::Open(record));

    let content = modal.content().expect("content");
    assert_eq!(content.title.as_str(), "Quadrantid Meteors");
    assert_eq!(content.date_label, "Date: 2024-01-03");
    assert_eq!(
        content.copyright.as_ref().map(|c| c.as_str()),
        Some("Jane Doe")
    );

    assert!(!modal.handle(Event::ContentPressed));
    assert!(!modal.handle(Event::KeyPressed(ModalKey::Other)));
    assert!(modal.is_open());

    assert!(modal.handle(Event::BackdropPressed));
    assert_eq!(modal.state(), &ModalState::Closed);
    assert!(!modal.close());
}

#[test]
fn request_url_carries_key_and_iso_dates() {
    let endpoint = Url::parse("https://api.nasa.gov/planetary/apod").unwrap();
    let url = build_request_url(&endpoint, "DEMO_KEY", first_days_of_2024());
    assert_eq!(
        url.as_str(),
        "https://api.nasa.gov/planetary/apod?api_key=DEMO_KEY&start_date=2024-01-01&end_date=2024-01-03"
    );
}

#[test]
fn settings_round_trip_through_disk() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("settings.toml");

    let mut settings = Config::default();
    settings.general.theme_mode = ThemeMode::Dark;
    settings.archive.api_key = Some("personal-key".into());
    settings.archive.default_span_days = Some(3);
    settings.gallery.thumbnail_size = Some(512);
    config::save_to_path(&settings, &path).expect("save");

    let loaded = config::load_from_path(&path).expect("load");
    assert_eq!(loaded, settings);
    assert_eq!(loaded.span_days().value(), 3);
    assert_eq!(loaded.archive_options(None).api_key, "personal-key");
    assert_eq!(
        loaded.archive_options(Some("cli-key".into())).api_key,
        "cli-key"
    );
}
