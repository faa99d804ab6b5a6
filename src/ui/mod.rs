//! Widget trees and message handlers for each screen
//!
//! Every app module exposes its own `Message`, an `update` that mutates the
//! app's state struct, and a `view` that builds the widget tree from it.

pub mod calculator;
pub mod editor;
pub mod gallery;
pub mod launcher;
pub mod weather;

use iced::widget::{button, horizontal_space, row, text};
use iced::{Alignment, Element};

use crate::Message;

/// Theme toggle label, showing the theme a click switches to
pub fn theme_label(light_theme: bool) -> &'static str {
    if light_theme {
        "☾ Dark"
    } else {
        "☀ Light"
    }
}

/// Header row shared by every app screen: Home, title, theme toggle
pub fn header<'a>(title: &'a str, light_theme: bool) -> Element<'a, Message> {
    row![
        button("⌂ Home").on_press(Message::Home).padding(6),
        text(title).size(20),
        horizontal_space(),
        button(theme_label(light_theme))
            .on_press(Message::ToggleTheme)
            .padding(6),
    ]
    .spacing(10)
    .padding(6)
    .align_y(Alignment::Center)
    .into()
}
