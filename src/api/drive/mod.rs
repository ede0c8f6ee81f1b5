//! Document-library operations. Every call requires a resolved drive.

mod download;
mod items;
mod list;
mod upload;

pub use upload::SIMPLE_UPLOAD_MAX_BYTES;

/// Folder id Graph uses for the top of a drive.
pub const ROOT_FOLDER: &str = "root";
