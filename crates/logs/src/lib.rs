pub mod archive;
pub mod extract;
pub mod patterns;

pub use archive::{ArchiveError, read_archive};
pub use extract::extract_errors;
