//! Per-batch file processing.
//!
//! [`process`] walks its batch in order, classifies every non-blank line with
//! [`crate::cpf::validate`] and returns a [`Tally`]. A file that cannot be
//! opened is reported on stderr and skipped; it never aborts the batch.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::ops::AddAssign;
use std::path::Path;

use crate::cpf;
use crate::displaylevel;

/// Counts produced by one batch (or, summed, by a whole run).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub valid: u64,
    pub invalid: u64,
    /// Files that could not be opened or read to the end.
    pub unreadable: u64,
}

impl Tally {
    /// Number of classified lines.
    pub fn lines(&self) -> u64 {
        self.valid + self.invalid
    }

    fn record(&mut self, line: &str) {
        if cpf::validate(line) {
            self.valid += 1;
        } else {
            self.invalid += 1;
            displaylevel!(4, "  rejected {:?}: {}\n", line, cpf::inspect(line));
        }
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Tally) {
        self.valid += rhs.valid;
        self.invalid += rhs.invalid;
        self.unreadable += rhs.unreadable;
    }
}

impl std::iter::Sum for Tally {
    fn sum<I: Iterator<Item = Tally>>(iter: I) -> Tally {
        iter.fold(Tally::default(), |mut acc, t| {
            acc += t;
            acc
        })
    }
}

/// Processes every file of `batch` in order and returns the combined counts.
pub fn process<P: AsRef<Path>>(batch: &[P]) -> Tally {
    let mut tally = Tally::default();
    for path in batch {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                displaylevel!(1, "file not found: {} ({})\n", display_name(path), e);
                tally.unreadable += 1;
                continue;
            }
        };
        if let Err(e) = process_reader(BufReader::new(file), &mut tally) {
            displaylevel!(1, "error reading {}: {}\n", display_name(path), e);
            tally.unreadable += 1;
        }
        displaylevel!(4, "{}: done\n", path.display());
    }
    tally
}

/// Classifies every non-blank line of `reader` into `tally`.
///
/// A line ends at `\n`, a lone `\r`, or one of U+0085, U+2028, U+2029.
/// Bytes that are not UTF-8 are replaced rather than rejected, since the
/// digits around them still count. On a read error the lines seen so far stay
/// counted.
pub fn process_reader<R: BufRead>(mut reader: R, tally: &mut Tally) -> io::Result<()> {
    let mut buf = Vec::with_capacity(64);
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let chunk = String::from_utf8_lossy(&buf);
        for line in chunk.split(is_line_break).map(trim_control) {
            if !line.is_empty() {
                tally.record(line);
            }
        }
    }
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}')
}

/// Strips ASCII control characters and spaces from both ends, leaving other
/// Unicode whitespace in place.
fn trim_control(line: &str) -> &str {
    line.trim_matches(|c: char| c <= ' ')
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
