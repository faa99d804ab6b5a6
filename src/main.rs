//! VarOS: a tiny desktop shell hosting a calculator, an image gallery,
//! a text editor and a weather viewer.
//!
//! Run without arguments to land on the launcher, or jump straight into an
//! app with `--app calculator|gallery|editor|weather`.

use clap::Parser;
use iced::widget::{column, container};
use iced::{Element, Length, Task, Theme};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod calc;
mod config;
mod editor;
mod gallery;
mod state;
mod ui;
mod weather;

use config::Settings;
use state::calculator::CalculatorState;
use state::gallery::GalleryState;
use state::weather::WeatherState;
use ui::editor::EditorState;
use ui::launcher::Screen;

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Tiny desktop shell with a few everyday apps")]
struct Cli {
    /// Screen to start on
    #[arg(long, value_enum, default_value_t = Screen::Launcher)]
    app: Screen,

    /// Folder the gallery opens (overrides the config file)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Main application state
struct VarOs {
    screen: Screen,
    light_theme: bool,
    settings: Settings,
    http: reqwest::Client,
    calculator: CalculatorState,
    gallery: GalleryState,
    editor: EditorState,
    weather: WeatherState,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Launcher icon clicked
    Open(Screen),
    /// Back to the launcher
    Home,
    ToggleTheme,
    /// Quit the shell
    Logout,
    Calculator(ui::calculator::Message),
    Gallery(ui::gallery::Message),
    Editor(ui::editor::Message),
    Weather(ui::weather::Message),
}

impl VarOs {
    /// Create a new instance of the application
    fn new(cli: Cli, settings: Settings) -> (Self, Task<Message>) {
        let gallery_dir = cli.dir.clone().unwrap_or_else(|| settings.gallery_start_dir());
        let gallery = GalleryState::open(&gallery_dir, 0);

        let http = reqwest::Client::builder()
            .user_agent(concat!("varos/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                warn!("⚠️  Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        if settings.weather.api_key.is_none() {
            warn!("⚠️  No weather API key configured; the weather app will show an error");
        }

        info!(
            "🎨 VarOS initialized: {} image(s) in {}",
            gallery.count(),
            gallery_dir.display()
        );

        let mut app = VarOs {
            screen: Screen::Launcher,
            light_theme: settings.light_theme,
            weather: WeatherState::new(settings.weather.cities.clone()),
            settings,
            http,
            calculator: CalculatorState::new(),
            gallery,
            editor: EditorState::new(),
        };

        let thumbnails = ui::gallery::load_thumbnails(&app.gallery).map(Message::Gallery);
        let open = app.switch_to(cli.app);

        (app, Task::batch([thumbnails, open]))
    }

    fn title(&self) -> String {
        match self.screen {
            Screen::Launcher => "VarOS".to_string(),
            screen => format!("{} - VarOS", screen.title()),
        }
    }

    fn switch_to(&mut self, screen: Screen) -> Task<Message> {
        info!(screen = screen.title(), "switching screen");
        self.screen = screen;
        match screen {
            Screen::Calculator => ui::calculator::focus_input().map(Message::Calculator),
            _ => Task::none(),
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Open(screen) => self.switch_to(screen),
            Message::Home => self.switch_to(Screen::Launcher),
            Message::ToggleTheme => {
                self.light_theme = !self.light_theme;
                Task::none()
            }
            Message::Logout => {
                info!("👋 Logging out");
                iced::exit()
            }
            Message::Calculator(message) => {
                ui::calculator::update(&mut self.calculator, message).map(Message::Calculator)
            }
            Message::Gallery(message) => {
                ui::gallery::update(&mut self.gallery, message).map(Message::Gallery)
            }
            Message::Editor(message) => {
                ui::editor::update(&mut self.editor, message).map(Message::Editor)
            }
            Message::Weather(message) => ui::weather::update(
                &mut self.weather,
                &self.http,
                &self.settings.weather,
                message,
            )
            .map(Message::Weather),
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let body: Element<Message> = match self.screen {
            Screen::Launcher => return ui::launcher::view(self.light_theme),
            Screen::Calculator => ui::calculator::view(&self.calculator).map(Message::Calculator),
            Screen::Gallery => ui::gallery::view(&self.gallery).map(Message::Gallery),
            Screen::Editor => ui::editor::view(&self.editor).map(Message::Editor),
            Screen::Weather => ui::weather::view(&self.weather).map(Message::Weather),
        };

        container(column![ui::header(self.screen.title(), self.light_theme), body])
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        if self.light_theme {
            Theme::Light
        } else {
            Theme::Dark
        }
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let settings = config::load_settings(cli.config.as_deref());

    iced::application(VarOs::title, VarOs::update, VarOs::view)
        .theme(VarOs::theme)
        .window_size((650.0, 520.0))
        .centered()
        .run_with(move || VarOs::new(cli, settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> VarOs {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            app: Screen::Launcher,
            dir: Some(dir.path().to_path_buf()),
            config: None,
        };
        VarOs::new(cli, Settings::default()).0
    }

    #[test]
    fn test_screen_switching_and_theme() {
        let mut app = app();
        assert_eq!(app.screen, Screen::Launcher);
        assert_eq!(app.title(), "VarOS");

        let _ = app.update(Message::Open(Screen::Weather));
        assert_eq!(app.screen, Screen::Weather);
        assert_eq!(app.title(), "Weather - VarOS");

        assert!(app.light_theme);
        let _ = app.update(Message::ToggleTheme);
        assert!(!app.light_theme);
        assert_eq!(app.theme(), Theme::Dark);

        let _ = app.update(Message::Home);
        assert_eq!(app.screen, Screen::Launcher);
    }

    #[test]
    fn test_messages_reach_app_state() {
        let mut app = app();
        let _ = app.update(Message::Open(Screen::Calculator));
        let _ = app.update(Message::Calculator(ui::calculator::Message::InputChanged("6*7".into())));
        let _ = app.update(Message::Calculator(ui::calculator::Message::Evaluate));
        assert_eq!(app.calculator.input, "42");

        // Gallery on an empty folder shows the placeholder
        assert_eq!(app.gallery.count(), 1);
        let _ = app.update(Message::Gallery(ui::gallery::Message::Next));
        assert_eq!(app.gallery.index(), 0);
    }
}
