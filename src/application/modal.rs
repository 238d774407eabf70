// SPDX-License-Identifier: MPL-2.0
//! Modal detail view state machine.
//!
//! `Closed ⇄ Open(Record)`. Opening while already open swaps the record.
//! Only three triggers close it: the close button, a press on the backdrop
//! and Escape. Presses on the content region are reported as their own
//! event so they can be told apart from backdrop presses, and are ignored.

use crate::application::gallery::date_label;
use crate::domain::archive::Record;
use crate::domain::ui::DisplayText;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open(Record),
}

/// Keyboard input relevant to the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKey {
    Escape,
    Other,
}

/// Input events routed to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    CloseButton,
    BackdropPressed,
    ContentPressed,
    /// Copy the high resolution link of the open record.
    CopyHdLink,
    KeyPressed(ModalKey),
}

/// Text and image source shown by the open modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalContent {
    pub image_url: Option<String>,
    pub hd_url: Option<String>,
    pub title: DisplayText,
    pub date_label: String,
    pub explanation: DisplayText,
    pub copyright: Option<DisplayText>,
}

impl ModalContent {
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self {
            image_url: record.url.clone(),
            hd_url: record.hdurl.clone(),
            title: DisplayText::neutralize(&record.title),
            date_label: date_label(record.date),
            explanation: DisplayText::neutralize(&record.explanation),
            copyright: record
                .copyright
                .as_deref()
                .map(DisplayText::neutralize)
                .filter(|text| !text.is_empty()),
        }
    }
}

#[derive(Debug, Default)]
pub struct ModalController {
    state: ModalState,
    content: Option<ModalContent>,
}

impl ModalController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `record`, replacing whatever was open.
    pub fn open(&mut self, record: Record) {
        log::debug!("Opening detail view for {}", record.date);
        self.content = Some(ModalContent::from_record(&record));
        self.state = ModalState::Open(record);
    }

    /// Hides the modal. Returns `false` when it was already closed.
    pub fn close(&mut self) -> bool {
        if matches!(self.state, ModalState::Closed) {
            return false;
        }
        self.state = ModalState::Closed;
        self.content = None;
        true
    }

    /// Routes an input event. Returns `true` when the modal closed.
    pub fn handle(&mut self, event: Event) -> bool {
        match event {
            Event::CloseButton
            | Event::BackdropPressed
            | Event::KeyPressed(ModalKey::Escape) => self.close(),
            Event::ContentPressed | Event::CopyHdLink | Event::KeyPressed(ModalKey::Other) => {
                false
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> &ModalState {
        &self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    #[must_use]
    pub fn record(&self) -> Option<&Record> {
        match &self.state {
            ModalState::Open(record) => Some(record),
            ModalState::Closed => None,
        }
    }

    #[must_use]
    pub fn content(&self) -> Option<&ModalContent> {
        self.content.as_ref()
    }

    /// Whether the gallery behind the modal must stop scrolling.
    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        self.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::archive::MediaType;
    use chrono::NaiveDate;

    fn record() -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            title: "Orion".into(),
            explanation: "A nebula.".into(),
            media_type: MediaType::Image,
            url: Some("https://example.org/orion.jpg".into()),
            hdurl: Some("https://example.org/orion_hd.jpg".into()),
            copyright: Some("  ".into()),
        }
    }

    fn opened() -> ModalController {
        let mut modal = ModalController::new();
        modal.open(record());
        modal
    }

    #[test]
    fn open_populates_content() {
        let modal = opened();
        let content = modal.content().unwrap();

        assert!(modal.scroll_locked());
        assert_eq!(content.title.as_str(), "Orion");
        assert_eq!(content.date_label, "Date: 2024-01-02");
        assert_eq!(content.explanation.as_str(), "A nebula.");
        assert_eq!(content.image_url.as_deref(), Some("https://example.org/orion.jpg"));
        assert!(content.copyright.is_none());
    }

    #[test]
    fn close_triggers_close() {
        for event in [
            Event::CloseButton,
            Event::BackdropPressed,
            Event::KeyPressed(ModalKey::Escape),
        ] {
            let mut modal = opened();
            assert!(modal.handle(event), "{event:?} should close");
            assert_eq!(modal.state(), &ModalState::Closed);
            assert!(!modal.scroll_locked());
        }
    }

    #[test]
    fn other_inputs_keep_modal_open() {
        let mut modal = opened();
        assert!(!modal.handle(Event::ContentPressed));
        assert!(!modal.handle(Event::CopyHdLink));
        assert!(!modal.handle(Event::KeyPressed(ModalKey::Other)));
        assert_eq!(modal.record(), Some(&record()));
    }

    #[test]
    fn close_when_closed_is_noop() {
        let mut modal = ModalController::new();
        assert!(!modal.close());
        assert!(!modal.handle(Event::KeyPressed(ModalKey::Escape)));
        assert_eq!(modal.state(), &ModalState::Closed);
    }

    #[test]
    fn open_while_open_replaces_record() {
        let mut modal = opened();
        let mut other = record();
        other.title = "Andromeda".into();

        modal.open(other.clone());

        assert_eq!(modal.record(), Some(&other));
        assert_eq!(modal.content().unwrap().title.as_str(), "Andromeda");
    }
}
