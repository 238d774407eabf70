// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Layers, bottom to top: range selector and content area, the detail modal
//! when open, then the toast overlay.

use super::{notifications, Message};
use crate::application::{ModalController, Pipeline};
use crate::media::{DetailImage, PreviewCache};
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::gallery::{self, loading};
use crate::ui::notifications::Toast;
use crate::ui::range_selector;
use chrono::NaiveDate;
use iced::widget::{Column, Container, Stack, Text};
use iced::{alignment, Element, Length};

pub const HEADING: &str = "Astronomy Picture of the Day";

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub pipeline: &'a Pipeline,
    pub modal: &'a ModalController,
    pub selector: &'a range_selector::State,
    pub previews: &'a PreviewCache,
    pub detail: &'a DetailImage,
    pub loading: &'a loading::State,
    pub notifications: &'a notifications::Manager,
    pub show_error_details: bool,
    pub today: NaiveDate,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let heading = Container::new(Text::new(HEADING).size(typography::TITLE_MD))
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center);

    let selector = Container::new(ctx.selector.view(ctx.today).map(Message::RangeSelector))
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center);

    let content = gallery::view(gallery::ViewContext {
        state: ctx.pipeline.state(),
        items: ctx.pipeline.items(),
        previews: ctx.previews,
        loading: ctx.loading,
        show_error_details: ctx.show_error_details,
        scroll_locked: ctx.modal.scroll_locked(),
    })
    .map(Message::Gallery);

    let base = Column::new()
        .spacing(spacing::MD)
        .padding([spacing::MD, 0.0])
        .push(heading)
        .push(selector)
        .push(
            Container::new(content)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill);

    let mut layers = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(base);

    if let Some(content) = ctx.modal.content() {
        let modal = gallery::modal::view(content, ctx.detail, ctx.previews);
        layers = layers.push(modal.map(Message::Modal));
    }

    layers
        .push(Toast::view_overlay(ctx.notifications).map(Message::Notification))
        .into()
}
