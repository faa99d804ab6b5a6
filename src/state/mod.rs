/// State management module
///
/// Every app screen owns an explicit state struct:
/// - Calculator input, output and history (calculator.rs)
/// - Gallery listing and current image (gallery.rs)
/// - Editor documents and file status (editor.rs)
/// - Weather city selection and last snapshot (weather.rs)

pub mod calculator;
pub mod editor;
pub mod gallery;
pub mod weather;
