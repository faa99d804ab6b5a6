/// Gallery file handling
///
/// This module handles:
/// - Listing image files in a directory (listing.rs)
/// - Decoding small thumbnails off the UI thread (thumbnail.rs)

pub mod listing;
pub mod thumbnail;

pub use listing::{image_file_list, PLACEHOLDER_IMAGE};
