// SPDX-License-Identifier: MPL-2.0
//! Date range selector: two date inputs and a submit control.
//!
//! Input is free text in `YYYY-MM-DD` form. Validation happens on submit
//! against the archive window, so the pipeline only ever receives a valid
//! [`DateRange`].

use crate::domain::archive::{DateRange, RangeError, ARCHIVE_EPOCH, DATE_FORMAT};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use chrono::NaiveDate;
use iced::widget::{button, column, container, row, text, text_input};
use iced::{alignment, Element, Length};

/// Label of the submit control.
pub const SUBMIT_LABEL: &str = "Launch Mission";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    StartChanged(String),
    EndChanged(String),
    Submit,
}

/// What a selector update asks the application to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    /// A valid range was submitted.
    Submitted(DateRange),
    /// The submission was rejected and must be reported to the user.
    Rejected(RangeError),
}

#[derive(Debug, Clone, Default)]
pub struct State {
    start: String,
    end: String,
}

impl State {
    /// Creates a selector prefilled with `range`.
    #[must_use]
    pub fn new(range: DateRange) -> Self {
        Self {
            start: range.start_param(),
            end: range.end_param(),
        }
    }

    #[must_use]
    pub fn start_input(&self) -> &str {
        &self.start
    }

    #[must_use]
    pub fn end_input(&self) -> &str {
        &self.end
    }

    /// Validates the current inputs against the archive window ending `today`.
    pub fn submit(&self, today: NaiveDate) -> Result<DateRange, RangeError> {
        DateRange::parse(&self.start, &self.end, today)
    }

    pub fn update(&mut self, message: Message, today: NaiveDate) -> Event {
        match message {
            Message::StartChanged(value) => {
                self.start = value;
                Event::None
            }
            Message::EndChanged(value) => {
                self.end = value;
                Event::None
            }
            Message::Submit => match self.submit(today) {
                Ok(range) => Event::Submitted(range),
                Err(err) => Event::Rejected(err),
            },
        }
    }

    pub fn view(&self, today: NaiveDate) -> Element<'_, Message> {
        let placeholder = "YYYY-MM-DD";

        let start_input = text_input(placeholder, &self.start)
            .on_input(Message::StartChanged)
            .on_submit(Message::Submit)
            .size(typography::BODY)
            .padding(spacing::XS)
            .width(Length::Fixed(sizing::DATE_INPUT_WIDTH));

        let end_input = text_input(placeholder, &self.end)
            .on_input(Message::EndChanged)
            .on_submit(Message::Submit)
            .size(typography::BODY)
            .padding(spacing::XS)
            .width(Length::Fixed(sizing::DATE_INPUT_WIDTH));

        let submit = button(text(SUBMIT_LABEL).size(typography::BODY))
            .on_press(Message::Submit)
            .padding([spacing::XS, spacing::MD])
            .style(styles::button::primary);

        let labeled = |label: &'static str, input| {
            column![text(label).size(typography::CAPTION), input].spacing(spacing::XXS)
        };

        let window_hint = text(format!(
            "Archive available from {} to {}",
            ARCHIVE_EPOCH.format(DATE_FORMAT),
            today.format(DATE_FORMAT)
        ))
        .size(typography::CAPTION);

        let controls = row![
            labeled("Start date", start_input),
            labeled("End date", end_input),
            submit
        ]
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Bottom);

        container(column![controls, window_hint].spacing(spacing::XS))
            .padding(spacing::MD)
            .style(styles::container::panel)
            .into()
    }
}
