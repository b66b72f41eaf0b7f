//! Interactive thread-count selection loop.
//!
//! Generic over input, output and the run callback so tests can drive it with
//! in-memory buffers; `main` wires it to stdin, stdout and
//! [`crate::coordinator::run`].

use std::io::{self, BufRead, Write};

use crate::config::{is_valid_thread_option, EXIT_CHOICE, THREAD_OPTIONS};

/// What one line of user input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Leave the loop.
    Exit,
    /// Run with this many threads (always one of the valid options).
    Run(usize),
    /// A number that is not one of the valid options.
    InvalidOption(i64),
    /// Not an integer at all.
    NotANumber,
}

/// Interprets one input line.
pub fn parse_choice(line: &str) -> Choice {
    match line.trim().parse::<i64>() {
        Err(_) => Choice::NotANumber,
        Ok(n) if n == EXIT_CHOICE as i64 => Choice::Exit,
        Ok(n) => match usize::try_from(n) {
            Ok(t) if is_valid_thread_option(t) => Choice::Run(t),
            _ => Choice::InvalidOption(n),
        },
    }
}

/// Renders the valid options as `[1, 2, 3, ...]`.
pub fn options_label() -> String {
    format!("{:?}", THREAD_OPTIONS)
}

/// Prompts until the user exits or input ends, calling `on_run` for every
/// valid selection. Returns how many runs were started.
pub fn run_shell<R, W, F>(mut input: R, out: &mut W, mut on_run: F) -> io::Result<usize>
where
    R: BufRead,
    W: Write,
    F: FnMut(usize),
{
    let mut runs = 0;
    let mut buf = Vec::with_capacity(16);
    loop {
        writeln!(out)?;
        writeln!(out, "Select the number of threads (or type {} to exit):", EXIT_CHOICE)?;
        writeln!(out, "Valid options: {}", options_label())?;
        write!(out, "Your choice: ")?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            // End of input behaves like an explicit exit.
            writeln!(out)?;
            writeln!(out, "Exiting.")?;
            return Ok(runs);
        }

        // Undecodable bytes become U+FFFD and fall through to NotANumber.
        match parse_choice(&String::from_utf8_lossy(&buf)) {
            Choice::NotANumber => writeln!(out, "Invalid input. Try again.")?,
            Choice::InvalidOption(_) => writeln!(out, "Invalid option. Try again.")?,
            Choice::Exit => {
                writeln!(out, "Exiting.")?;
                return Ok(runs);
            }
            Choice::Run(threads) => {
                on_run(threads);
                runs += 1;
            }
        }
    }
}
