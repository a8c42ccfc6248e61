// SPDX-License-Identifier: MPL-2.0
//! Timer and event subscriptions for the application.
//!
//! Two repeating timers exist: the countdown's 1-second tick, which always
//! runs (its effect is idempotent past the target), and the slider's
//! auto-advance tick, which is withheld entirely while the slider is
//! paused or has nothing to rotate. Both die with the view — the runtime
//! drops a subscription the moment it stops being returned here, so no
//! timer can fire against disposed state.

use super::{App, Message};
use crate::gallery::Slider;
use iced::{event, keyboard, time, Subscription};
use std::time::Duration;

/// Period of the countdown tick.
const COUNTDOWN_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Creates the 1 Hz countdown tick subscription.
pub fn create_countdown_subscription() -> Subscription<Message> {
    time::every(COUNTDOWN_TICK_PERIOD).map(|_| Message::CountdownTick)
}

/// Creates the slider auto-advance subscription.
///
/// Returns no subscription while the slider is paused or has fewer than
/// two slides, which suspends the timer without tracking any timer handle.
pub fn create_slider_subscription(slider: &Slider) -> Subscription<Message> {
    if slider.is_paused() || slider.carousel().len() < 2 {
        Subscription::none()
    } else {
        time::every(slider.interval().as_duration()).map(|_| Message::SliderTick)
    }
}

/// Creates the keyboard subscription for lightbox navigation.
///
/// Arrow keys and Escape are only meaningful while the lightbox is open;
/// the update loop ignores them otherwise.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, _window| {
        // Keys captured by a focused widget are not navigation
        if matches!(status, event::Status::Captured) {
            return None;
        }

        match event {
            event::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(keyboard::key::Named::ArrowRight),
                ..
            }) => Some(Message::LightboxNext),
            event::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(keyboard::key::Named::ArrowLeft),
                ..
            }) => Some(Message::LightboxPrevious),
            event::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(keyboard::key::Named::Escape),
                ..
            }) => Some(Message::CloseLightbox),
            _ => None,
        }
    })
}

impl App {
    /// Combined subscription for the current application state.
    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            create_countdown_subscription(),
            create_slider_subscription(&self.slider),
            create_event_subscription(),
        ])
    }
}
