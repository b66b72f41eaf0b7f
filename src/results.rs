//! Per-thread-count timing records.
//!
//! Each run with `T` threads leaves `versao_T_threads.txt` in the results
//! directory, holding one line: the elapsed milliseconds. A later run with
//! the same `T` overwrites it; runs with other counts never touch it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::timefn::DurationMs;

/// Path of the record for `threads` inside `dir`.
pub fn result_path(dir: &Path, threads: usize) -> PathBuf {
    dir.join(format!("versao_{}_threads.txt", threads))
}

/// Writes `elapsed_ms` to the record for `threads`, creating `dir` (and its
/// parents) first if needed. Returns the path written.
pub fn save_elapsed(dir: &Path, threads: usize, elapsed_ms: DurationMs) -> io::Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| {
        io::Error::new(e.kind(), format!("cannot create directory {}: {}", dir.display(), e))
    })?;
    let path = result_path(dir, threads);
    fs::write(&path, format!("{}\n", elapsed_ms))?;
    // Best effort: report an absolute path when one can be resolved.
    Ok(fs::canonicalize(&path).unwrap_or(path))
}

/// Reads back a record written by [`save_elapsed`].
pub fn load_elapsed(dir: &Path, threads: usize) -> io::Result<DurationMs> {
    let text = fs::read_to_string(result_path(dir, threads))?;
    text.trim()
        .parse()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("bad timing record: {}", e)))
}
