use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Extensions the gallery shows (compared case-insensitively)
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Shown when a directory holds no images at all
pub const PLACEHOLDER_IMAGE: &str = "./notfound/noimage.png";

/// Check if a path looks like a supported image by its extension
///
/// Matching deliberately ignores case (wider than an exact `"jpg"` check),
/// so camera-style `IMG_0001.JPG` names are listed too.
pub fn is_image_file(path: &Path) -> bool {
    match path.extension() {
        Some(extension) => {
            // Normalize before comparing against the lowercase allow-list
            let ext = extension.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// List the images directly inside `dir`, sorted by file name
///
/// Subdirectories are not descended into. If nothing matches (or the
/// directory cannot be read) the list holds exactly the placeholder path,
/// so callers can always index element 0.
pub fn image_file_list(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    // Depth 1 = direct children only
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
    {
        // An unreadable directory yields one error entry; log it and fall
        // through to the placeholder below
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("⚠️  Cannot read {}: {}", dir.display(), err);
                continue;
            }
        };

        // Skip folders, even ones named like images
        if !entry.file_type().is_file() {
            continue;
        }

        if is_image_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    // Never hand back an empty list: the viewer always shows something
    if files.is_empty() {
        debug!(dir = %dir.display(), "no images found, using placeholder");
        files.push(PathBuf::from(PLACEHOLDER_IMAGE));
    }

    files
}
