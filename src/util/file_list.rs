//! Input discovery: the `.txt` files of one directory.
//!
//! [`list_input_files`] looks at the immediate children of a directory only
//! (walkdir with `max_depth(1)`), keeps regular files whose name ends with the
//! requested suffix and returns them sorted by file name, so the same directory
//! always yields the same batch assignment.
//!
//! **Symlink handling**: symlinks are not followed, so a link to a `.txt` file
//! is not listed.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// List regular files directly inside `dir` whose name ends with `extension`.
///
/// A directory that does not exist yields an empty list, matching the
/// "nothing to do" outcome of an empty directory. Any other traversal error
/// is returned.
pub fn list_input_files(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut result = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|e| {
            e.io_error()
                .map(|io| io::Error::new(io.kind(), io.to_string()))
                .unwrap_or_else(|| io::Error::other(e.to_string()))
        })?;
        if entry.file_type().is_file() && has_extension(entry.file_name(), extension) {
            result.push(entry.into_path());
        }
    }
    Ok(result)
}

fn has_extension(name: &std::ffi::OsStr, extension: &str) -> bool {
    name.to_str().is_some_and(|n| n.ends_with(extension))
}
