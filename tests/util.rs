#[path = "util/file_list.rs"]
mod file_list;
