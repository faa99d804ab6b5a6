//! Gallery screen state
//!
//! A gallery is rebuilt from scratch whenever the user picks a new folder.
//! The `generation` counter lets late thumbnail results for an old folder
//! be recognised and dropped.

use std::path::{Path, PathBuf};

use crate::gallery;
use crate::gallery::thumbnail::Thumbnail;

#[derive(Debug, Clone)]
pub struct GalleryState {
    /// Directory the listing came from
    pub dir: PathBuf,
    /// Never empty (falls back to the placeholder image)
    files: Vec<PathBuf>,
    /// Always in `0..files.len()`
    index: usize,
    /// One slot per file, filled in once decoding finishes
    pub thumbnails: Vec<Option<Thumbnail>>,
    pub generation: u64,
}

impl GalleryState {
    /// List `dir` and start at the first image
    pub fn open(dir: &Path, generation: u64) -> Self {
        let files = gallery::image_file_list(dir);
        Self::from_files(dir.to_path_buf(), files, generation)
    }

    /// Build from an existing list; an empty list gets the placeholder
    pub fn from_files(dir: PathBuf, mut files: Vec<PathBuf>, generation: u64) -> Self {
        if files.is_empty() {
            files.push(PathBuf::from(gallery::PLACEHOLDER_IMAGE));
        }
        let thumbnails = vec![None; files.len()];
        Self {
            dir,
            files,
            index: 0,
            thumbnails,
            generation,
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn count(&self) -> usize {
        self.files.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_path(&self) -> &Path {
        &self.files[self.index]
    }

    /// Step forward; stays on the last image
    pub fn next(&mut self) -> bool {
        if self.index + 1 < self.files.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Step back; stays on the first image
    pub fn prev(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to a thumbnail; out-of-range indices are ignored
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.files.len() {
            self.index = index;
            true
        } else {
            false
        }
    }

    /// Store decoded thumbnails if they belong to this listing
    pub fn apply_thumbnails(&mut self, generation: u64, thumbnails: Vec<Option<Thumbnail>>) -> bool {
        if generation != self.generation || thumbnails.len() != self.files.len() {
            return false;
        }
        self.thumbnails = thumbnails;
        true
    }
}
