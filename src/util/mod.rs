//! Filesystem helpers shared by the binary and the integration tests.
//!
//! - [`file_list`] — input discovery (`list_input_files`)

pub mod file_list;

pub use file_list::list_input_files;
