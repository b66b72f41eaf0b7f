//! Command-line argument parsing for the `cpfr` binary.
//!
//! [`parse_args`] reads `std::env::args()`; [`parse_args_from`] takes an
//! explicit list and is what the tests call. Both yield [`ParsedArgs`], which
//! [`ParsedArgs::resolve`] turns into final [`Settings`] by layering flags over
//! environment variables over compile-time defaults.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::cli::constants::DISPLAY_LEVEL_MAX;
use crate::config::{init_input_dir, init_results_dir, is_valid_thread_option, THREAD_OPTIONS};
use crate::coordinator::RunOptions;

/// Display level used when neither `-v` nor `-q` is given.
pub const DEFAULT_DISPLAY_LEVEL: u32 = 2;

/// Raw options as typed on the command line.
#[derive(Debug, Parser)]
#[command(
    name = "cpfr",
    version,
    about = "Validate CPF numbers from .txt files with a fixed-size thread pool",
    long_about = "Validate CPF numbers from .txt files with a fixed-size thread pool.\n\n\
        Without --threads, an interactive prompt asks for the thread count of each run.\n\
        Every run's wall-clock time is written to <RESULTS_DIR>/versao_<T>_threads.txt."
)]
pub struct ParsedArgs {
    /// Directory holding the .txt input files [env: CPFR_INPUT_DIR] [default: cpfs]
    #[arg(short = 'i', long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory receiving timing records [env: CPFR_RESULTS_DIR] [default: resultados]
    #[arg(short = 'o', long, value_name = "DIR")]
    pub results_dir: Option<PathBuf>,

    /// Run these thread counts in order, then exit (e.g. -t 1,2,5)
    #[arg(
        short = 't',
        long,
        value_name = "LIST",
        value_delimiter = ',',
        value_parser = parse_thread_option
    )]
    pub threads: Vec<usize>,

    /// Report results without writing timing records
    #[arg(long)]
    pub no_save: bool,

    /// Increase verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity (repeatable)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub run_options: RunOptions,
    /// Empty means interactive mode.
    pub threads: Vec<usize>,
    pub display_level: u32,
}

impl ParsedArgs {
    /// Applies flag > environment > default precedence.
    pub fn resolve(self) -> Settings {
        let display_level = (DEFAULT_DISPLAY_LEVEL + u32::from(self.verbose))
            .saturating_sub(u32::from(self.quiet))
            .min(DISPLAY_LEVEL_MAX);
        Settings {
            input_dir: self.input_dir.unwrap_or_else(init_input_dir),
            run_options: RunOptions {
                results_dir: self.results_dir.unwrap_or_else(init_results_dir),
                save: !self.no_save,
            },
            threads: self.threads,
            display_level,
        }
    }
}

/// Parse `std::env::args()`.
pub fn parse_args() -> Result<ParsedArgs, clap::Error> {
    ParsedArgs::try_parse()
}

/// Parse an explicit argument list; `argv[0]` is the program name.
pub fn parse_args_from<I, T>(argv: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    ParsedArgs::try_parse_from(argv)
}

fn parse_thread_option(s: &str) -> Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a thread count", s))?;
    if is_valid_thread_option(n) {
        Ok(n)
    } else {
        Err(format!("{} is not one of {:?}", n, THREAD_OPTIONS))
    }
}
