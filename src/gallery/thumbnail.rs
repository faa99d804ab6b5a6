use iced::widget::image::Handle;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::{debug, warn};

/// Edge length of gallery thumbnails (square bounding box)
pub const THUMBNAIL_SIZE: u32 = 50;

/// Decoded thumbnail, already wrapped in a renderer handle
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub handle: Handle,
}

/// Thumbnails for a whole listing, tagged with the gallery generation
/// they were requested for
#[derive(Debug, Clone)]
pub struct ThumbnailBatch {
    pub generation: u64,
    /// One slot per file; `None` when the file could not be decoded
    pub thumbnails: Vec<Option<Thumbnail>>,
}

/// Decode and shrink every file in `files`
///
/// Runs on a blocking thread because image decoding is CPU-bound.
pub async fn load_thumbnails(files: Vec<PathBuf>, generation: u64) -> ThumbnailBatch {
    let count = files.len();
    let thumbnails = task::spawn_blocking(move || {
        files
            .iter()
            .map(|path| generate_thumbnail(path))
            .collect::<Vec<_>>()
    })
    .await
    .unwrap_or_else(|e| {
        warn!("❌ Thumbnail task join error: {}", e);
        vec![None; count]
    });

    ThumbnailBatch {
        generation,
        thumbnails,
    }
}

/// Generate a thumbnail for one image file
/// Returns None if the file is missing or not decodable
pub fn generate_thumbnail(path: &Path) -> Option<Thumbnail> {
    let img = match image::open(path) {
        Ok(img) => img,
        Err(e) => {
            debug!("Skipping thumbnail for {}: {}", path.display(), e);
            return None;
        }
    };

    // resize keeps the aspect ratio inside the bounding box
    let small = img.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Triangle);
    let rgba = small.to_rgba8();
    let (width, height) = rgba.dimensions();

    Some(Thumbnail {
        width,
        height,
        handle: Handle::from_rgba(width, height, rgba.into_raw()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    #[test]
    fn test_thumbnail_fits_bounding_box() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(200, 100, Rgb([10, 20, 30]));
        img.save(&path).unwrap();

        let thumb = generate_thumbnail(&path).unwrap();
        assert_eq!(thumb.width, THUMBNAIL_SIZE);
        assert_eq!(thumb.height, THUMBNAIL_SIZE / 2);
    }

    #[test]
    fn test_undecodable_file_has_no_thumbnail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        assert!(generate_thumbnail(&path).is_none());
        assert!(generate_thumbnail(&dir.path().join("missing.png")).is_none());
    }
}
