// SPDX-License-Identifier: MPL-2.0
//! Content-area placeholders shown instead of the grid.

use super::loading;
use super::{muted_text, Message};
use crate::error::FetchError;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::{button, rule, Column, Container, Row, Text};
use iced::{alignment, Element, Length};

pub const IDLE_HINT: &str = "Choose a date range and launch the mission.";
pub const LOADING_TITLE: &str = "Mission in Progress";
pub const LOADING_MESSAGE: &str =
    "Houston, we are go for launch! Retrieving spectacular space imagery from NASA archives...";
pub const SLOW_HINT: &str = "The archive is taking longer than usual to answer.";
pub const EMPTY_HINT: &str = "No images in this range";
pub const ERROR_TITLE: &str = "Mission Control Alert";
pub const ERROR_MESSAGE: &str = "Houston, we have a problem! Communication with NASA servers \
     interrupted. Please check your connection and retry mission.";
pub const RETRY_LABEL: &str = "Retry Mission";
pub const SHOW_DETAILS_LABEL: &str = "Show details";
pub const HIDE_DETAILS_LABEL: &str = "Hide details";

pub fn idle<'a>() -> Element<'a, Message> {
    centered(Column::new().push(secondary_text(IDLE_HINT)))
}

pub fn loading(state: &loading::State) -> Element<'_, Message> {
    let spinner = AnimatedSpinner::new(palette::PRIMARY_500, state.spinner_rotation())
        .size(sizing::ICON_XL)
        .into_element();

    let mut column = Column::new()
        .spacing(spacing::SM)
        .align_x(alignment::Horizontal::Center)
        .max_width(sizing::PLACEHOLDER_MAX_WIDTH)
        .push(spinner)
        .push(Text::new(LOADING_TITLE).size(typography::TITLE_MD))
        .push(
            Container::new(Text::new(LOADING_MESSAGE).size(typography::BODY))
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Center),
        );

    if state.is_slow() {
        column = column.push(secondary_text(SLOW_HINT));
    }

    centered(column)
}

/// Drawn when the range held records but none of them were images.
pub fn empty<'a>() -> Element<'a, Message> {
    centered(Column::new().push(secondary_text(EMPTY_HINT)))
}

/// Drawn when the archive request failed.
///
/// Every failure looks the same; the kind only appears in the details.
pub fn failed(error: &FetchError, show_details: bool) -> Element<'static, Message> {
    let badge = Container::new(Text::new("!").size(typography::TITLE_MD).color(palette::WHITE))
        .width(Length::Fixed(sizing::ICON_XL))
        .height(Length::Fixed(sizing::ICON_XL))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::container::alert_badge);

    let retry = button(Text::new(RETRY_LABEL))
        .padding([spacing::XS, spacing::MD])
        .style(styles::button::primary)
        .on_press(Message::Retry);

    let toggle = button(Text::new(details_toggle_label(show_details)).size(typography::BODY_SM))
        .style(button::text)
        .on_press(Message::ToggleErrorDetails);

    let mut column = Column::new()
        .spacing(spacing::SM)
        .align_x(alignment::Horizontal::Center)
        .width(Length::Fill)
        .push(
            Text::new(ERROR_TITLE)
                .size(typography::TITLE_MD)
                .color(palette::ERROR_500),
        )
        .push(
            Container::new(Text::new(ERROR_MESSAGE).size(typography::BODY))
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Center),
        )
        .push(retry)
        .push(toggle);

    if show_details {
        column = column.push(
            Column::new()
                .spacing(spacing::XS)
                .width(Length::Fill)
                .push(rule::horizontal(1))
                .push(
                    Text::new(failure_details(error))
                        .size(typography::CAPTION)
                        .style(muted_text),
                ),
        );
    }

    let card = Container::new(
        Row::new()
            .spacing(spacing::MD)
            .align_y(alignment::Vertical::Top)
            .push(badge)
            .push(column),
    )
    .width(Length::Fill)
    .max_width(sizing::PLACEHOLDER_MAX_WIDTH)
    .padding(spacing::LG)
    .style(styles::container::failure_card);

    centered(card)
}

fn details_toggle_label(show_details: bool) -> &'static str {
    if show_details {
        HIDE_DETAILS_LABEL
    } else {
        SHOW_DETAILS_LABEL
    }
}

/// Technical line under the failure card: the failure kind and its cause.
fn failure_details(error: &FetchError) -> String {
    format!("[{}] {error}", error.kind())
}

fn secondary_text<'a>(content: &'a str) -> Element<'a, Message> {
    Text::new(content)
        .size(typography::BODY_LG)
        .style(muted_text)
        .into()
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .padding(spacing::LG)
        .into()
}
