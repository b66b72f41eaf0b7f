// Integration tests for input discovery (src/util/file_list.rs).
//
//   - Only regular files directly inside the directory are listed
//   - Only names ending in the requested suffix are kept (case-sensitive)
//   - The result is sorted by file name
//   - A missing directory yields an empty list, not an error
//   - list_input_files is re-exported at cpfr::util level

use cpfr::config::INPUT_EXTENSION;
use cpfr::util::file_list::list_input_files;

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Collect the file names (not full paths) in listing order.
fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_directory_yields_empty_list() {
    let dir = TempDir::new().unwrap();
    assert!(list_input_files(dir.path(), INPUT_EXTENSION).unwrap().is_empty());
}

#[test]
fn non_txt_files_are_ignored() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("cpfs.csv"), "52998224725\n").unwrap();
    fs::write(dir.path().join("README"), "x").unwrap();
    fs::write(dir.path().join("upper.TXT"), "x").unwrap();
    fs::write(dir.path().join("txt"), "x").unwrap();
    fs::write(dir.path().join("ok.txt"), "x").unwrap();
    let list = list_input_files(dir.path(), INPUT_EXTENSION).unwrap();
    assert_eq!(file_names(&list), ["ok.txt"]);
}

#[test]
fn listing_is_sorted_by_name() {
    let dir = TempDir::new().unwrap();
    for name in ["c.txt", "a.txt", "b10.txt", "b02.txt"] {
        fs::write(dir.path().join(name), "").unwrap();
    }
    let list = list_input_files(dir.path(), INPUT_EXTENSION).unwrap();
    assert_eq!(file_names(&list), ["a.txt", "b02.txt", "b10.txt", "c.txt"]);
}

#[test]
fn nested_directories_are_not_descended() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("deep/deeper")).unwrap();
    fs::write(dir.path().join("deep/x.txt"), "").unwrap();
    fs::write(dir.path().join("deep/deeper/y.txt"), "").unwrap();
    fs::write(dir.path().join("top.txt"), "").unwrap();
    let list = list_input_files(dir.path(), INPUT_EXTENSION).unwrap();
    assert_eq!(file_names(&list), ["top.txt"]);
}

#[test]
fn listed_paths_are_inside_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "").unwrap();
    let list = list_input_files(dir.path(), INPUT_EXTENSION).unwrap();
    assert_eq!(list, [dir.path().join("a.txt")]);
}

#[test]
fn missing_directory_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let list = list_input_files(&dir.path().join("cpfs"), INPUT_EXTENSION).unwrap();
    assert!(list.is_empty());
}

#[test]
fn reexported_at_util_level() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "").unwrap();
    assert_eq!(cpfr::util::list_input_files(dir.path(), ".txt").unwrap().len(), 1);
}
