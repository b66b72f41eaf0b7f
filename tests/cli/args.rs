// Integration tests for argument parsing and settings resolution
// (src/cli/args.rs, src/config.rs).
//
//   - flag > environment > default precedence for both directories
//   - --threads accepts only the selectable counts, in the order given
//   - -v / -q move the display level within 0..=4
//   - --help / --version are reported as non-error exits

use cpfr::cli::args::{parse_args_from, DEFAULT_DISPLAY_LEVEL};
use cpfr::config::{
    init_input_dir_from, init_results_dir_from, DEFAULT_INPUT_DIR, DEFAULT_RESULTS_DIR,
};
use std::path::PathBuf;

#[test]
fn defaults_without_flags() {
    let s = parse_args_from(["cpfr"]).unwrap().resolve();
    assert_eq!(s.display_level, DEFAULT_DISPLAY_LEVEL);
    assert!(s.threads.is_empty());
    assert!(s.run_options.save);
}

#[test]
fn long_flags() {
    let s = parse_args_from([
        "cpfr",
        "--input-dir",
        "data",
        "--results-dir",
        "timings",
        "--threads",
        "30,1",
    ])
    .unwrap()
    .resolve();
    assert_eq!(s.input_dir, PathBuf::from("data"));
    assert_eq!(s.run_options.results_dir, PathBuf::from("timings"));
    assert_eq!(s.threads, [30, 1]);
}

#[test]
fn repeated_threads_flag_accumulates() {
    let args = parse_args_from(["cpfr", "-t", "2", "-t", "5,6"]).unwrap();
    assert_eq!(args.threads, [2, 5, 6]);
}

#[test]
fn thread_zero_is_not_a_run() {
    assert!(parse_args_from(["cpfr", "-t", "0"]).is_err());
}

#[test]
fn verbose_and_quiet_conflict() {
    assert!(parse_args_from(["cpfr", "-v", "-q"]).is_err());
}

#[test]
fn help_and_version_are_not_errors() {
    for flag in ["--help", "--version"] {
        let e = parse_args_from(["cpfr", flag]).unwrap_err();
        assert!(!e.use_stderr(), "{flag} should print to stdout");
    }
}

#[test]
fn unknown_flag_is_an_error() {
    let e = parse_args_from(["cpfr", "--frobnicate"]).unwrap_err();
    assert!(e.use_stderr());
}

#[test]
fn environment_values_parse() {
    assert_eq!(init_input_dir_from(Some("/srv/cpfs")), PathBuf::from("/srv/cpfs"));
    assert_eq!(init_results_dir_from(Some("bench")), PathBuf::from("bench"));
    assert_eq!(init_input_dir_from(None), PathBuf::from(DEFAULT_INPUT_DIR));
    assert_eq!(init_results_dir_from(Some("")), PathBuf::from(DEFAULT_RESULTS_DIR));
}
