use iced::widget::image::Handle;
use iced::widget::{button, column, container, horizontal_space, image, row, scrollable, text, vertical_space, Row};
use iced::{Alignment, ContentFit, Element, Length, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use tracing::info;

use crate::gallery::thumbnail::{self, ThumbnailBatch, THUMBNAIL_SIZE};
use crate::state::gallery::GalleryState;

/// Size of the main viewer (square)
const VIEWER_SIZE: f32 = 400.0;

#[derive(Debug, Clone)]
pub enum Message {
    /// Folder button: show the native folder picker
    PickFolder,
    Prev,
    Next,
    /// A thumbnail was clicked
    Select(usize),
    ThumbnailsLoaded(ThumbnailBatch),
}

/// Start decoding thumbnails for the current listing
pub fn load_thumbnails(state: &GalleryState) -> Task<Message> {
    Task::perform(
        thumbnail::load_thumbnails(state.files().to_vec(), state.generation),
        Message::ThumbnailsLoaded,
    )
}

/// Throw away the current gallery and list `dir` instead
pub fn open_folder(state: &mut GalleryState, dir: PathBuf) -> Task<Message> {
    info!("🔍 Opening gallery folder: {}", dir.display());
    *state = GalleryState::open(&dir, state.generation + 1);
    info!("🖼  {} image(s) listed", state.count());
    load_thumbnails(state)
}

pub fn update(state: &mut GalleryState, message: Message) -> Task<Message> {
    match message {
        Message::PickFolder => {
            let folder = FileDialog::new()
                .set_title("Select Folder with Images")
                .set_directory(&state.dir)
                .pick_folder();

            if let Some(dir) = folder {
                return open_folder(state, dir);
            }
            Task::none()
        }
        Message::Prev => {
            state.prev();
            Task::none()
        }
        Message::Next => {
            state.next();
            Task::none()
        }
        Message::Select(index) => {
            state.select(index);
            Task::none()
        }
        Message::ThumbnailsLoaded(batch) => {
            if !state.apply_thumbnails(batch.generation, batch.thumbnails) {
                info!("Dropping thumbnails from an older folder");
            }
            Task::none()
        }
    }
}

pub fn view(state: &GalleryState) -> Element<'_, Message> {
    let current = state.current_path();

    let top = row![
        button("📂").on_press(Message::PickFolder).padding(6),
        text(current.display().to_string()),
        horizontal_space(),
        text(format!("{} / {}", state.index() + 1, state.count())),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let viewer = image(Handle::from_path(current))
        .width(VIEWER_SIZE)
        .height(VIEWER_SIZE)
        .content_fit(ContentFit::Contain);

    let prev = button("◀").padding(10).on_press_maybe((state.index() > 0).then_some(Message::Prev));
    let next = button("▶")
        .padding(10)
        .on_press_maybe((state.index() + 1 < state.count()).then_some(Message::Next));

    let middle = row![prev, horizontal_space(), viewer, horizontal_space(), next]
        .align_y(Alignment::Center)
        .width(Length::Fill);

    let size = THUMBNAIL_SIZE as f32;
    let tiles: Row<Message> = Row::with_children(state.thumbnails.iter().enumerate().map(|(i, thumb)| {
        let face: Element<Message> = match thumb {
            Some(thumb) => image(thumb.handle.clone())
                .width(size)
                .height(size)
                .content_fit(ContentFit::Contain)
                .into(),
            None => container(text(" ")).width(size).height(size).into(),
        };
        let style: fn(&Theme, button::Status) -> button::Style = if i == state.index() {
            button::primary
        } else {
            button::secondary
        };
        button(face)
            .on_press(Message::Select(i))
            .style(style)
            .padding(2)
            .into()
    }))
    .spacing(6);

    let strip = scrollable(tiles)
        .direction(scrollable::Direction::Horizontal(scrollable::Scrollbar::default()))
        .width(Length::Fill);

    column![top, vertical_space(), middle, vertical_space(), strip]
        .spacing(10)
        .padding(10)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_open_folder_rebuilds_state() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), b"x").unwrap();
        std::fs::write(dir.path().join("b.jpg"), b"x").unwrap();

        let mut state = GalleryState::open(Path::new("/definitely/not/here"), 3);
        assert_eq!(state.count(), 1);

        let _ = open_folder(&mut state, dir.path().to_path_buf());
        assert_eq!(state.count(), 2);
        assert_eq!(state.index(), 0);
        assert_eq!(state.generation, 4);

        let _ = update(&mut state, Message::Next);
        let _ = update(&mut state, Message::Next);
        assert_eq!(state.index(), 1);
        let _ = update(&mut state, Message::Select(7));
        assert_eq!(state.index(), 1);
    }
}
