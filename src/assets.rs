//! Static asset publishing.

use std::fs;
use std::path::Path;

use crate::error::PageError;

/// Replace `dest` with a fresh copy of `source`.
///
/// Anything already in `dest` is removed first. A missing `source` leaves an
/// empty `dest`. Returns the number of files copied.
pub fn copy_static(source: &Path, dest: &Path) -> Result<usize, PageError> {
    if dest.exists() {
        tracing::debug!(path = %dest.display(), "Cleaning destination directory");
        fs::remove_dir_all(dest).map_err(|e| PageError::io(dest, e))?;
    }
    fs::create_dir_all(dest).map_err(|e| PageError::io(dest, e))?;

    if !source.exists() {
        tracing::warn!(path = %source.display(), "Static directory does not exist");
        return Ok(0);
    }

    let copied = copy_tree(source, dest)?;
    tracing::info!(
        from = %source.display(),
        to = %dest.display(),
        files = copied,
        "Copied static files"
    );
    Ok(copied)
}

fn copy_tree(source: &Path, dest: &Path) -> Result<usize, PageError> {
    let mut copied = 0;
    let entries = fs::read_dir(source).map_err(|e| PageError::io(source, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| PageError::io(source, e))?;
        let from = entry.path();
        let Some(name) = from.file_name() else {
            continue;
        };
        let to = dest.join(name);
        let file_type = entry.file_type().map_err(|e| PageError::io(&from, e))?;

        if file_type.is_dir() {
            fs::create_dir(&to).map_err(|e| PageError::io(&to, e))?;
            copied += copy_tree(&from, &to)?;
        } else if from.is_file() {
            tracing::debug!(from = %from.display(), to = %to.display(), "Copying file");
            fs::copy(&from, &to).map_err(|e| PageError::io(&from, e))?;
            copied += 1;
        } else {
            tracing::warn!(path = %from.display(), "Skipping entry that is neither a file nor a directory");
        }
    }

    Ok(copied)
}
