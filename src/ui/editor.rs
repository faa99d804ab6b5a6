//! Text editor screen: a tab per open document

use iced::widget::{button, column, container, horizontal_space, row, text, text_editor, Row};
use iced::{Alignment, Element, Length, Task, Theme};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::editor::{self, NativeSaveDialog};
use crate::state::editor::{Document, FileState, SaveOutcome};

/// A document plus the widget buffer that displays it
pub struct Tab {
    pub title: String,
    pub document: Document,
    pub content: text_editor::Content,
}

impl Tab {
    fn untitled() -> Self {
        Self {
            title: "Untitled".to_string(),
            document: Document::new(),
            content: text_editor::Content::new(),
        }
    }

    fn opened(path: &Path, text: &str) -> Self {
        let title = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled".to_string());
        Self {
            title,
            document: Document::with_text(text),
            content: text_editor::Content::with_text(text),
        }
    }

    /// Tab caption with a marker for unsaved changes
    fn caption(&self) -> String {
        match self.document.status.state() {
            FileState::UnsavedEdited | FileState::SavedEdited => format!("{} •", self.title),
            _ => self.title.clone(),
        }
    }
}

/// All open documents; never empty
pub struct EditorState {
    pub tabs: Vec<Tab>,
    pub active: usize,
    /// Non-blocking notification (save result, errors)
    pub notice: Option<String>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            tabs: vec![Tab::untitled()],
            active: 0,
            notice: None,
        }
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_tab(&self) -> &Tab {
        &self.tabs[self.active]
    }

    fn active_tab_mut(&mut self) -> &mut Tab {
        &mut self.tabs[self.active]
    }

    fn push_tab(&mut self, tab: Tab) {
        self.tabs.push(tab);
        self.active = self.tabs.len() - 1;
    }

    /// Drop a tab (releasing its file handle); keeps at least one open
    fn close_tab(&mut self, index: usize) {
        if index >= self.tabs.len() {
            return;
        }
        let tab = self.tabs.remove(index);
        if let Some(path) = tab.document.destination_path() {
            info!("Closing {}", path.display());
        }
        if self.tabs.is_empty() {
            self.tabs.push(Tab::untitled());
        }
        if self.active >= self.tabs.len() || self.active > index {
            self.active = self.active.saturating_sub(1).min(self.tabs.len() - 1);
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Edit(text_editor::Action),
    New,
    Open,
    Opened(Result<(PathBuf, String), String>),
    Save,
    SelectTab(usize),
    CloseTab(usize),
    DismissNotice,
}

pub fn update(state: &mut EditorState, message: Message) -> Task<Message> {
    match message {
        Message::Edit(action) => {
            let tab = state.active_tab_mut();
            let is_edit = action.is_edit();
            tab.content.perform(action);
            if is_edit {
                tab.document.set_text(tab.content.text());
            }
        }
        Message::New => state.push_tab(Tab::untitled()),
        Message::Open => {
            if let Some(path) = editor::pick_text_file() {
                return Task::perform(editor::read_text(path), |result| {
                    Message::Opened(result.map_err(|e| e.to_string()))
                });
            }
        }
        Message::Opened(Ok((path, text))) => {
            info!("📄 Opened {}", path.display());
            state.push_tab(Tab::opened(&path, &text));
        }
        Message::Opened(Err(e)) => {
            error!("❌ {}", e);
            state.notice = Some(e);
        }
        Message::Save => {
            let tab = state.active_tab_mut();
            let result = tab.document.save(&mut NativeSaveDialog);
            match result {
                Ok(SaveOutcome::Cancelled) => {}
                Ok(outcome) => {
                    if outcome == SaveOutcome::WrittenToNew {
                        if let Some(name) = tab
                            .document
                            .destination_path()
                            .and_then(|p| p.file_name())
                        {
                            tab.title = name.to_string_lossy().to_string();
                        }
                    }
                    let path = tab
                        .document
                        .destination_path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default();
                    state.notice = Some(format!(
                        "Saved to {} at {}",
                        path,
                        chrono::Local::now().format("%H:%M:%S")
                    ));
                }
                Err(e) => {
                    error!("❌ Save failed: {}", e);
                    state.notice = Some(e.to_string());
                }
            }
        }
        Message::SelectTab(index) => {
            if index < state.tabs.len() {
                state.active = index;
            }
        }
        Message::CloseTab(index) => state.close_tab(index),
        Message::DismissNotice => state.notice = None,
    }
    Task::none()
}

pub fn view(state: &EditorState) -> Element<'_, Message> {
    let menu = row![
        button("New").on_press(Message::New).padding(6),
        button("Open").on_press(Message::Open).padding(6),
        button("Save").on_press(Message::Save).padding(6),
    ]
    .spacing(6);

    let tabs: Row<Message> = Row::with_children(state.tabs.iter().enumerate().map(|(i, tab)| {
        let style: fn(&Theme, button::Status) -> button::Style = if i == state.active {
            button::primary
        } else {
            button::secondary
        };
        row![
            button(text(tab.caption()).size(14))
                .on_press(Message::SelectTab(i))
                .style(style)
                .padding(4),
            button(text("×").size(14))
                .on_press(Message::CloseTab(i))
                .style(button::text)
                .padding(4),
        ]
        .into()
    }))
    .spacing(4);

    let body = text_editor(&state.active_tab().content)
        .on_action(Message::Edit)
        .height(Length::Fill);

    let mut content = column![menu, tabs, body].spacing(6).padding(6);

    if let Some(notice) = &state.notice {
        content = content.push(
            container(
                row![
                    text(notice).size(14),
                    horizontal_space(),
                    button(text("×").size(14))
                        .on_press(Message::DismissNotice)
                        .style(button::text),
                ]
                .align_y(Alignment::Center),
            )
            .padding(4)
            .style(container::rounded_box),
        );
    }

    content.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_close_tabs() {
        let mut state = EditorState::new();
        let _ = update(&mut state, Message::New);
        let _ = update(&mut state, Message::New);
        assert_eq!(state.tabs.len(), 3);
        assert_eq!(state.active, 2);

        let _ = update(&mut state, Message::CloseTab(0));
        assert_eq!(state.tabs.len(), 2);
        assert_eq!(state.active, 1);

        let _ = update(&mut state, Message::CloseTab(1));
        let _ = update(&mut state, Message::CloseTab(0));
        assert_eq!(state.tabs.len(), 1);
        assert_eq!(state.active, 0);
    }

    #[test]
    fn test_opened_file_gets_fresh_tab() {
        let mut state = EditorState::new();
        let _ = update(
            &mut state,
            Message::Opened(Ok((PathBuf::from("/tmp/notes.txt"), "hello".into()))),
        );
        assert_eq!(state.tabs.len(), 2);
        let tab = state.active_tab();
        assert_eq!(tab.title, "notes.txt");
        assert_eq!(tab.document.text(), "hello");
        assert_eq!(tab.document.status.state(), FileState::UnsavedUntouched);
    }

    #[test]
    fn test_open_error_becomes_notice() {
        let mut state = EditorState::new();
        let _ = update(&mut state, Message::Opened(Err("boom".into())));
        assert_eq!(state.notice.as_deref(), Some("boom"));
        let _ = update(&mut state, Message::DismissNotice);
        assert!(state.notice.is_none());
    }
}
