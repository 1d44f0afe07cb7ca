//! Archive assembly for bulk asset downloads.
//!
//! Fetched asset bytes are laid out as `<game>/<category>/<name>.<ext>`
//! and packed into a single Deflate-compressed zip.

mod builder;
mod naming;
mod path;

pub use builder::{ArchiveBuilder, ArchiveEntry};
pub use naming::archive_filename;
pub use path::{entry_path, sanitize_extension, sanitize_segment};

/// Deflate level used for bulk archives; trades size for latency.
pub const BALANCED_LEVEL: i64 = 6;

/// Errors produced while building an archive.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("archive is empty")]
    Empty,
}
