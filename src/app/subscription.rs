// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::Message;
use crate::application::modal::{Event as ModalEvent, ModalKey};
use iced::{event, keyboard, time, Subscription};
use std::time::Duration;

/// Routes Escape to the modal while it is open.
///
/// Other keys never reach the modal, and nothing is routed while it is
/// closed.
pub fn create_event_subscription(modal_open: bool) -> Subscription<Message> {
    if !modal_open {
        return Subscription::none();
    }

    event::listen_with(|event, _status, _window_id| match event {
        event::Event::Keyboard(keyboard::Event::KeyPressed {
            key: keyboard::Key::Named(keyboard::key::Named::Escape),
            ..
        }) => Some(Message::Modal(ModalEvent::KeyPressed(ModalKey::Escape))),
        _ => None,
    })
}

/// Creates a periodic tick subscription for the loading spinner and
/// notification auto-dismiss.
pub fn create_tick_subscription(is_loading: bool, has_notifications: bool) -> Subscription<Message> {
    if is_loading || has_notifications {
        time::every(Duration::from_millis(100)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
