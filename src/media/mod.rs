/// Image file loading module
///
/// This module handles:
/// - Reading the files picked by the user
/// - Decoding them to validate and measure them
/// - Generating the small thumbnails shown in the staging list

pub mod loader;

pub use loader::{load_images, LoadError};
