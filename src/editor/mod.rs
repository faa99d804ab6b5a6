//! Plain-text file I/O for the editor
//!
//! - Destinations: where a document is saved, plus the open handle
//! - Native open/save dialogs restricted to `.txt`
//! - Async file reading for "Open"

use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use rfd::FileDialog;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("background task failed: {0}")]
    Task(String),
}

/// A save target that stays open for the life of its document
///
/// Dropping it closes the file.
#[derive(Debug)]
pub struct Destination {
    path: PathBuf,
    file: File,
}

impl Destination {
    /// Open (creating if needed) a file for repeated saves
    pub fn create(path: &Path) -> Result<Self, EditorError> {
        // No truncate here: contents are replaced by write_text
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|source| EditorError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the file contents with `text`
    pub fn write_text(&mut self, text: &str) -> Result<(), EditorError> {
        let path = self.path.clone();
        let wrap = |source| EditorError::Write {
            path: path.clone(),
            source,
        };

        // Truncate, then rewind so the next write starts at byte 0
        self.file.set_len(0).map_err(wrap)?;
        self.file.seek(SeekFrom::Start(0)).map_err(wrap)?;
        self.file.write_all(text.as_bytes()).map_err(wrap)?;
        self.file.flush().map_err(wrap)?;

        info!("💾 Saved to... {}", self.path.display());
        Ok(())
    }
}

/// Something that can ask the user where to save
///
/// Returns `None` when the user cancels.
pub trait DestinationPrompt {
    fn pick_save_path(&mut self) -> Option<PathBuf>;
}

/// Native "Save As" dialog
#[derive(Debug, Default)]
pub struct NativeSaveDialog;

impl DestinationPrompt for NativeSaveDialog {
    fn pick_save_path(&mut self) -> Option<PathBuf> {
        let picked = FileDialog::new()
            .set_title("Save File")
            .add_filter("Text", &["txt"])
            .save_file();
        if picked.is_none() {
            info!("Cancelled");
        }
        picked
    }
}

/// Native "Open" dialog restricted to `.txt`
pub fn pick_text_file() -> Option<PathBuf> {
    let picked = FileDialog::new()
        .set_title("Open File")
        .add_filter("Text", &["txt"])
        .pick_file();
    if picked.is_none() {
        info!("Cancelled");
    }
    picked
}

/// Read a text file without blocking the UI thread
pub async fn read_text(path: PathBuf) -> Result<(PathBuf, String), EditorError> {
    // std::fs is blocking; run it on tokio's blocking pool
    tokio::task::spawn_blocking(move || {
        std::fs::read_to_string(&path)
            .map(|text| (path.clone(), text))
            .map_err(|source| EditorError::Read { path, source })
    })
    .await
    // The join error only happens if the read panicked
    .map_err(|e| EditorError::Task(e.to_string()))?
}
