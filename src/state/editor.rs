//! Text editor documents and their file status
//!
//! A document moves between four states:
//!
//! | saved | edited | meaning                         |
//! |-------|--------|---------------------------------|
//! | false | false  | new, untouched                  |
//! | false | true   | new, typed into                 |
//! | true  | false  | saved, clean                    |
//! | true  | true   | saved, changed since last save  |

use std::path::Path;

use crate::editor::{Destination, DestinationPrompt, EditorError};

/// Save bookkeeping for one document
#[derive(Debug, Default)]
pub struct FileStatus {
    pub saved: bool,
    pub edited: bool,
    /// Set by the first successful save; released when the document is dropped
    pub destination: Option<Destination>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    UnsavedUntouched,
    UnsavedEdited,
    SavedClean,
    SavedEdited,
}

impl FileStatus {
    pub fn state(&self) -> FileState {
        match (self.saved, self.edited) {
            (false, false) => FileState::UnsavedUntouched,
            (false, true) => FileState::UnsavedEdited,
            (true, false) => FileState::SavedClean,
            (true, true) => FileState::SavedEdited,
        }
    }
}

/// What a save attempt ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Wrote to the destination recorded by an earlier save
    Written,
    /// Prompted for a destination, then wrote to it
    WrittenToNew,
    /// The user dismissed the prompt
    Cancelled,
}

/// One open document
#[derive(Debug, Default)]
pub struct Document {
    text: String,
    pub status: FileStatus,
}

impl Document {
    /// Empty document with a fresh status
    pub fn new() -> Self {
        Self::default()
    }

    /// Document pre-filled with text (e.g. from "Open"); status is still fresh
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            status: FileStatus::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Any change to the buffer marks the document edited
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.status.edited = true;
    }

    pub fn destination_path(&self) -> Option<&Path> {
        self.status.destination.as_ref().map(Destination::path)
    }

    /// Save the buffer
    ///
    /// With a recorded destination this writes straight through and the
    /// prompt is never consulted. Without one, the prompt is asked exactly
    /// once; the chosen file becomes the destination on success.
    ///
    /// A failed write leaves the status untouched (`edited` stays as it was).
    pub fn save(&mut self, prompt: &mut dyn DestinationPrompt) -> Result<SaveOutcome, EditorError> {
        if let Some(destination) = self.status.destination.as_mut() {
            destination.write_text(&self.text)?;
            self.status.saved = true;
            self.status.edited = false;
            return Ok(SaveOutcome::Written);
        }

        let Some(path) = prompt.pick_save_path() else {
            return Ok(SaveOutcome::Cancelled);
        };

        let mut destination = Destination::create(&path)?;
        destination.write_text(&self.text)?;

        self.status.destination = Some(destination);
        self.status.saved = true;
        self.status.edited = false;
        Ok(SaveOutcome::WrittenToNew)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Prompt stub that counts how often it was asked
    struct CountingPrompt {
        answer: Option<PathBuf>,
        calls: usize,
    }

    impl DestinationPrompt for CountingPrompt {
        fn pick_save_path(&mut self) -> Option<PathBuf> {
            self.calls += 1;
            self.answer.clone()
        }
    }

    #[test]
    fn test_state_transitions() {
        let dir = tempfile::tempdir().unwrap();
        let mut prompt = CountingPrompt {
            answer: Some(dir.path().join("doc.txt")),
            calls: 0,
        };

        let mut doc = Document::new();
        assert_eq!(doc.status.state(), FileState::UnsavedUntouched);

        doc.set_text("hello");
        assert_eq!(doc.status.state(), FileState::UnsavedEdited);

        assert_eq!(doc.save(&mut prompt).unwrap(), SaveOutcome::WrittenToNew);
        assert_eq!(doc.status.state(), FileState::SavedClean);

        doc.set_text("hello again");
        assert_eq!(doc.status.state(), FileState::SavedEdited);
    }

    #[test]
    fn test_first_save_prompts_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        let mut prompt = CountingPrompt {
            answer: Some(path.clone()),
            calls: 0,
        };

        let mut doc = Document::new();
        doc.set_text("first");
        doc.save(&mut prompt).unwrap();

        assert_eq!(prompt.calls, 1);
        assert_eq!(doc.destination_path(), Some(path.as_path()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");
    }

    #[test]
    fn test_save_with_destination_does_not_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        let mut prompt = CountingPrompt {
            answer: Some(path.clone()),
            calls: 0,
        };

        let mut doc = Document::new();
        doc.set_text("v1");
        doc.save(&mut prompt).unwrap();

        doc.set_text("v2");
        assert_eq!(doc.save(&mut prompt).unwrap(), SaveOutcome::Written);
        doc.set_text("v3");
        assert_eq!(doc.save(&mut prompt).unwrap(), SaveOutcome::Written);

        assert_eq!(prompt.calls, 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "v3");
    }

    #[test]
    fn test_cancelled_prompt_changes_nothing() {
        let mut prompt = CountingPrompt {
            answer: None,
            calls: 0,
        };

        let mut doc = Document::new();
        doc.set_text("draft");
        assert_eq!(doc.save(&mut prompt).unwrap(), SaveOutcome::Cancelled);

        assert_eq!(prompt.calls, 1);
        assert_eq!(doc.status.state(), FileState::UnsavedEdited);
        assert!(doc.destination_path().is_none());
    }

    #[test]
    fn test_failed_save_keeps_edited_flag() {
        let dir = tempfile::tempdir().unwrap();
        let mut prompt = CountingPrompt {
            answer: Some(dir.path().join("missing-dir").join("doc.txt")),
            calls: 0,
        };

        let mut doc = Document::new();
        doc.set_text("draft");
        assert!(doc.save(&mut prompt).is_err());

        assert!(doc.status.edited);
        assert!(!doc.status.saved);
        assert!(doc.destination_path().is_none());
    }

    #[test]
    fn test_opened_document_starts_fresh() {
        let doc = Document::with_text("loaded from disk");
        assert_eq!(doc.text(), "loaded from disk");
        assert_eq!(doc.status.state(), FileState::UnsavedUntouched);
    }
}
