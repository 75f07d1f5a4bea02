//! Directory emptiness check.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// True iff the directory at `path` has no entries right now.
///
/// `read_dir` never yields the `.` and `..` pseudo-entries, so hidden files
/// count but self/parent do not. Symlinks to directories are followed. The
/// answer is a snapshot: another process may add or remove entries right after.
///
/// Fails with `NotFound` if `path` does not exist (including dangling
/// symlinks), `NotADirectory` if it is not a directory, and
/// `PermissionDenied` if it cannot be listed.
pub fn is_folder_empty(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    let meta = fs::metadata(path).map_err(|e| Error::from_io(path, e))?;
    if !meta.is_dir() {
        return Err(Error::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    let mut entries = fs::read_dir(path).map_err(|e| Error::from_io(path, e))?;
    let empty = match entries.next() {
        None => true,
        Some(Ok(_)) => false,
        Some(Err(e)) => return Err(Error::from_io(path, e)),
    };
    tracing::trace!("{} empty={}", path.display(), empty);
    Ok(empty)
}
