// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Each handler receives an [`UpdateContext`] borrowing the parts of `App`
//! it may touch and returns the follow-up [`Task`].

use super::{notifications, Message};
use crate::application::modal::{self, ModalController};
use crate::application::pipeline::PendingLoad;
use crate::application::port::ArchiveSource;
use crate::application::{Completion, Pipeline, RequestId};
use crate::domain::archive::{DateRange, ResultSet};
use crate::domain::ui::PreviewSize;
use crate::error::FetchError;
use crate::media::{load_preview, Admission, DetailImage, Preview, PreviewCache};
use crate::ui::gallery::{self, loading};
use crate::ui::notifications::{Notification, Topic};
use crate::ui::range_selector::{self, Event as RangeEvent};
use chrono::NaiveDate;
use iced::Task;
use std::sync::Arc;

/// Mutable view over `App` handed to the message handlers.
pub struct UpdateContext<'a> {
    pub pipeline: &'a mut Pipeline,
    pub modal: &'a mut ModalController,
    pub selector: &'a mut range_selector::State,
    pub previews: &'a mut PreviewCache,
    pub detail: &'a mut DetailImage,
    pub loading: &'a mut loading::State,
    pub notifications: &'a mut notifications::Manager,
    pub show_error_details: &'a mut bool,
    pub source: &'a Arc<dyn ArchiveSource>,
    pub preview_size: PreviewSize,
    pub detail_size: PreviewSize,
}

/// Starts loading `range`, replacing whatever the content area shows.
pub fn start_load(ctx: &mut UpdateContext<'_>, range: DateRange) -> Task<Message> {
    ctx.modal.close();
    ctx.detail.clear();
    *ctx.show_error_details = false;
    ctx.loading.handle(loading::Message::StartLoading);

    let PendingLoad { id, future, .. } = ctx.pipeline.load_range(range, ctx.source.as_ref());
    Task::perform(future, move |result| Message::ArchiveLoaded { id, result })
}

pub fn handle_range_selector_message(
    ctx: &mut UpdateContext<'_>,
    message: range_selector::Message,
    today: NaiveDate,
) -> Task<Message> {
    match ctx.selector.update(message, today) {
        RangeEvent::None => Task::none(),
        RangeEvent::Submitted(range) => {
            ctx.notifications.clear_topic(Topic::RangeInput);
            start_load(ctx, range)
        }
        RangeEvent::Rejected(err) => {
            // One notice at a time for the selector.
            ctx.notifications.clear_topic(Topic::RangeInput);
            ctx.notifications
                .push(Notification::warning(err.to_string()).with_topic(Topic::RangeInput));
            Task::none()
        }
    }
}

pub fn handle_gallery_message(
    ctx: &mut UpdateContext<'_>,
    message: gallery::Message,
) -> Task<Message> {
    match message {
        gallery::Message::ItemSelected(index) => {
            let Some(record) = ctx.pipeline.select(index).cloned() else {
                log::debug!("Ignoring selection of unknown gallery item {index}");
                return Task::none();
            };
            ctx.modal.open(record);
            request_detail(ctx)
        }
        gallery::Message::Retry => match ctx.pipeline.last_range() {
            Some(range) => {
                ctx.previews.clear_failures();
                start_load(ctx, range)
            }
            None => Task::none(),
        },
        gallery::Message::ToggleErrorDetails => {
            *ctx.show_error_details = !*ctx.show_error_details;
            Task::none()
        }
    }
}

pub fn handle_modal_event(ctx: &mut UpdateContext<'_>, event: modal::Event) -> Task<Message> {
    if event == modal::Event::CopyHdLink {
        return copy_hd_link(ctx);
    }
    if ctx.modal.handle(event) {
        log::debug!("Detail view closed by {event:?}");
        ctx.detail.clear();
    }
    Task::none()
}

/// Puts the open record's high resolution link on the clipboard.
fn copy_hd_link(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(url) = ctx.modal.content().and_then(|c| c.hd_url.clone()) else {
        return Task::none();
    };
    ctx.notifications.push(Notification::info(gallery::modal::LINK_COPIED));
    iced::clipboard::write(url)
}

pub fn handle_archive_loaded(
    ctx: &mut UpdateContext<'_>,
    id: RequestId,
    result: Result<ResultSet, FetchError>,
) -> Task<Message> {
    match ctx.pipeline.complete(id, result) {
        Completion::Stale => Task::none(),
        Completion::Applied => {
            ctx.loading.handle(loading::Message::StopLoading);
            ctx.previews.pin(ctx.pipeline.items().iter().map(|item| item.image_url.as_str()));
            request_previews(ctx)
        }
    }
}

pub fn handle_preview_loaded(
    ctx: &mut UpdateContext<'_>,
    url: String,
    result: Result<Preview, FetchError>,
) -> Task<Message> {
    match result {
        Ok(preview) => match ctx.previews.insert(url.clone(), preview) {
            Admission::Stored | Admission::Skipped => {}
            Admission::TooLarge => ctx.previews.mark_failed(&url),
        },
        Err(err) => {
            log::debug!("Thumbnail {url} failed ({}): {err}", err.kind());
            ctx.previews.mark_failed(&url);
        }
    }
    Task::none()
}

pub fn handle_detail_loaded(
    ctx: &mut UpdateContext<'_>,
    url: String,
    result: Result<Preview, FetchError>,
) -> Task<Message> {
    if !ctx.detail.complete(url, result) {
        log::debug!("Dropping detail image for a closed record");
    }
    Task::none()
}

pub fn handle_tick(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    ctx.notifications
        .handle_message(&notifications::NotificationMessage::Tick);

    if ctx.loading.handle(loading::Message::SpinnerTick) == loading::Effect::BecameSlow {
        log::info!("Archive request is taking longer than expected");
    }
    Task::none()
}

/// Requests every rendered thumbnail that is not cached, in flight or failed.
fn request_previews(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let urls = ctx.pipeline.items().iter().map(|item| item.image_url.as_str());
    let claimed = ctx.previews.claim(urls);
    if claimed.is_empty() {
        return Task::none();
    }
    log::debug!("Requesting {} thumbnails", claimed.len());

    let size = ctx.preview_size;
    Task::batch(claimed.into_iter().map(|url| {
        Task::perform(load_preview(Arc::clone(ctx.source), url, size), |(url, result)| {
            Message::PreviewLoaded { url, result }
        })
    }))
}

/// Downloads the open record's image at detail size.
fn request_detail(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(url) = ctx.modal.content().and_then(|c| c.image_url.clone()) else {
        ctx.detail.clear();
        return Task::none();
    };
    if !ctx.detail.request(&url) {
        return Task::none();
    }

    Task::perform(
        load_preview(Arc::clone(ctx.source), url, ctx.detail_size),
        |(url, result)| Message::DetailLoaded { url, result },
    )
}
