//! Local storage helpers: folder inspection, file-name cleanup and text search.
//!
//! Everything here is read-only; nothing creates, rewrites or deletes files.

mod cleanup;
mod dedup;
mod folder;
mod search;

pub use cleanup::{file_name_cleanup, CleanupOptions};
pub use dedup::{remove_duplicates_orderly, KeepOccurrence};
pub use folder::is_folder_empty;
pub use search::{text_file_search, text_file_search_all, SearchOptions};
