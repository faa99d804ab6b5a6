//! VarOS home screen: app icons on the left, system buttons on the right

use iced::widget::{button, column, container, horizontal_space, row, text, vertical_space, Column};
use iced::{Alignment, Element, Length};

use crate::Message;

/// Which screen the shell is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Screen {
    Launcher,
    Calculator,
    Gallery,
    Editor,
    Weather,
}

impl Screen {
    /// Apps reachable from the launcher, in display order
    pub const APPS: [Screen; 4] = [
        Screen::Calculator,
        Screen::Gallery,
        Screen::Editor,
        Screen::Weather,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Launcher => "VarOS",
            Screen::Calculator => "Calculator",
            Screen::Gallery => "Gallery",
            Screen::Editor => "Text Editor",
            Screen::Weather => "Weather",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Screen::Launcher => "⌂",
            Screen::Calculator => "🧮",
            Screen::Gallery => "🖼",
            Screen::Editor => "📝",
            Screen::Weather => "🌤",
        }
    }
}

pub fn view(light_theme: bool) -> Element<'static, Message> {
    let apps: Column<Message> = Column::with_children(Screen::APPS.iter().map(|&screen| {
        button(
            column![text(screen.icon()).size(32), text(screen.title()).size(12)]
                .align_x(Alignment::Center)
                .spacing(4),
        )
        .on_press(Message::Open(screen))
        .width(96)
        .padding(8)
        .into()
    }))
    .spacing(12)
    .padding(12);

    let system = column![
        vertical_space(),
        button("⌂").on_press(Message::Home).width(48).padding(8),
        button(text(super::theme_label(light_theme)).size(12))
            .on_press(Message::ToggleTheme)
            .width(48)
            .padding(8),
        vertical_space(),
        button("⏻").on_press(Message::Logout).width(48).padding(8),
    ]
    .spacing(12)
    .padding(12)
    .height(Length::Fill);

    container(row![apps, horizontal_space(), system])
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
