// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Keyboard arrows drive the carousel; a timer animates the loading
//! spinner while a fetch is in flight.

use super::Message;
use crate::ui::carousel;
use iced::{event, keyboard, time, Subscription};
use std::time::Duration;

/// Creates the keyboard subscription.
///
/// Arrow keys page through the carousel. Events captured by a widget
/// (typing in the focused search input) are left alone.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, _window_id| {
        if status == event::Status::Captured {
            return None;
        }

        match event {
            event::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(keyboard::key::Named::ArrowLeft),
                ..
            }) => Some(Message::Carousel(carousel::Message::Previous)),
            event::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(keyboard::key::Named::ArrowRight),
                ..
            }) => Some(Message::Carousel(carousel::Message::Next)),
            _ => None,
        }
    })
}

/// Creates a periodic tick subscription for the spinner animation.
pub fn create_tick_subscription(is_loading: bool) -> Subscription<Message> {
    if is_loading {
        time::every(Duration::from_millis(100)).map(|_| Message::Tick)
    } else {
        Subscription::none()
    }
}
