// config.rs — Compile-time configuration constants and environment overrides.
//
// Defaults can be overridden at runtime by the CPFR_INPUT_DIR and
// CPFR_RESULTS_DIR environment variables, and those in turn by the
// -i / -o command-line flags.

use std::path::PathBuf;

use crate::cli::constants::display_level;

// Thread counts the user may select for a run, in display order.
pub const THREAD_OPTIONS: &[usize] = &[1, 2, 3, 5, 6, 10, 15, 30];

// Shell choice that ends the interactive loop.
pub const EXIT_CHOICE: usize = 0;

// Directory scanned for input files (relative to the working directory).
pub const DEFAULT_INPUT_DIR: &str = "cpfs";

// Directory receiving one timing record per thread count.
pub const DEFAULT_RESULTS_DIR: &str = "resultados";

// Only files whose name ends with this suffix are processed.
pub const INPUT_EXTENSION: &str = ".txt";

// Number of digits in a CPF, check digits included.
pub const CPF_LENGTH: usize = 11;

pub const ENV_INPUT_DIR: &str = "CPFR_INPUT_DIR";
pub const ENV_RESULTS_DIR: &str = "CPFR_RESULTS_DIR";

/// Returns `true` if `threads` is one of [`THREAD_OPTIONS`].
pub fn is_valid_thread_option(threads: usize) -> bool {
    THREAD_OPTIONS.contains(&threads)
}

/// Input directory from `CPFR_INPUT_DIR`, or [`DEFAULT_INPUT_DIR`].
pub fn init_input_dir() -> PathBuf {
    init_input_dir_from(std::env::var(ENV_INPUT_DIR).ok().as_deref())
}

/// Testable core of [`init_input_dir`].
pub fn init_input_dir_from(env_val: Option<&str>) -> PathBuf {
    dir_from_env(ENV_INPUT_DIR, env_val, DEFAULT_INPUT_DIR)
}

/// Results directory from `CPFR_RESULTS_DIR`, or [`DEFAULT_RESULTS_DIR`].
pub fn init_results_dir() -> PathBuf {
    init_results_dir_from(std::env::var(ENV_RESULTS_DIR).ok().as_deref())
}

/// Testable core of [`init_results_dir`].
pub fn init_results_dir_from(env_val: Option<&str>) -> PathBuf {
    dir_from_env(ENV_RESULTS_DIR, env_val, DEFAULT_RESULTS_DIR)
}

fn dir_from_env(name: &str, env_val: Option<&str>, default: &str) -> PathBuf {
    if let Some(env) = env_val {
        let trimmed = env.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
        // Blank value — warn and fall through to default.
        if display_level() >= 2 {
            eprintln!("Ignore environment variable setting {}=\"{}\": empty path ", name, env);
        }
    }
    PathBuf::from(default)
}
