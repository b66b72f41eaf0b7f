//! Binary entry point for the `cpfr` command-line tool.
//!
//! # Control flow
//!
//! 1. [`parse_args`] reads the command line; [`ParsedArgs::resolve`] layers
//!    flags over environment variables over defaults.
//! 2. The input directory is listed once; an empty or unlistable directory
//!    ends the program.
//! 3. With `--threads`, each listed count is run in order. Otherwise the
//!    interactive shell asks for a count per run until the user types `0`.
//!
//! [`ParsedArgs::resolve`]: cpfr::cli::args::ParsedArgs::resolve

use std::io;

use anyhow::Context;

use cpfr::cli::args::{parse_args, Settings};
use cpfr::cli::constants::{set_display_level, PROGRAM_NAME};
use cpfr::config::INPUT_EXTENSION;
use cpfr::coordinator;
use cpfr::shell::run_shell;
use cpfr::util::list_input_files;
use cpfr::{displaylevel, displayout};

fn run(settings: Settings) -> anyhow::Result<()> {
    displaylevel!(
        3,
        "*** {} v{} {}-bit, parallel CPF validator ***\n",
        PROGRAM_NAME,
        cpfr::CPFR_VERSION_STRING,
        std::mem::size_of::<*const ()>() * 8
    );

    let input_dir = &settings.input_dir;
    let files = list_input_files(input_dir, INPUT_EXTENSION).unwrap_or_else(|e| {
        displaylevel!(1, "cannot list input directory {}: {}\n", input_dir.display(), e);
        Vec::new()
    });
    if files.is_empty() {
        displayout!("No {} files found in '{}'.\n", INPUT_EXTENSION, input_dir.display());
        return Ok(());
    }
    displaylevel!(3, "{} input files in {}\n", files.len(), input_dir.display());
    for (u, p) in files.iter().enumerate() {
        displaylevel!(4, "{} {}\n", u, p.display());
    }

    let opts = &settings.run_options;
    if !settings.threads.is_empty() {
        for &threads in &settings.threads {
            coordinator::run(&files, threads, opts);
        }
        return Ok(());
    }

    run_shell(io::stdin().lock(), &mut io::stdout(), |threads| {
        coordinator::run(&files, threads, opts);
    })
    .context("console I/O failed")?;
    Ok(())
}

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            // --help / --version arrive here too and are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let settings = args.resolve();
    set_display_level(settings.display_level);

    if let Err(e) = run(settings) {
        displaylevel!(1, "{}: {:#}\n", PROGRAM_NAME, e);
        std::process::exit(1);
    }
}
