// cli/constants.rs — Program identity, display level and display macros.

use std::sync::atomic::{AtomicU32, Ordering};

pub const PROGRAM_NAME: &str = "cpfr";

// ── Display level global ──────────────────────────────────────────────────────
//
// 0 = no output; 1 = errors only; 2 = normal (default); 3 = progress; 4 = verbose
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Highest meaningful display level.
pub const DISPLAY_LEVEL_MAX: u32 = 4;

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level, clamped to [`DISPLAY_LEVEL_MAX`].
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level.min(DISPLAY_LEVEL_MAX), Ordering::Relaxed);
}

// ── Display helpers ───────────────────────────────────────────────────────────
//
//   displayout!(...)      → print!(...)
//   displaylevel!(l, ...) → if display_level() >= l { eprint!(...) }

/// Print to stdout.
#[macro_export]
macro_rules! displayout {
    ($($arg:tt)*) => { print!($($arg)*) };
}

/// Conditionally print to stderr at or above `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
