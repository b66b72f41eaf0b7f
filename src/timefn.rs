// timefn - monotonic wall-clock timing for benchmark runs
//
// std::time::Instant is monotonic and safe to read from any thread; run
// timings are reported at millisecond resolution.

use std::time::{Duration, Instant};

/// Millisecond duration type used in reports and result records.
pub type DurationMs = u64;

/// Opaque timestamp container. The absolute value is not meaningful;
/// use it only to compute a duration between two measurements.
#[derive(Clone, Copy, Debug)]
pub struct TimeT {
    pub(crate) t: Instant,
}

/// Returns current monotonic timestamp.
pub fn get_time() -> TimeT {
    TimeT { t: Instant::now() }
}

/// Returns the duration between `clock_start` and `clock_end`.
/// Saturates to zero if `clock_end` precedes `clock_start`.
pub fn span(clock_start: TimeT, clock_end: TimeT) -> Duration {
    clock_end.t.saturating_duration_since(clock_start.t)
}

/// Returns the whole milliseconds between `clock_start` and `clock_end`.
pub fn span_ms(clock_start: TimeT, clock_end: TimeT) -> DurationMs {
    to_ms(span(clock_start, clock_end))
}

/// Measures milliseconds elapsed since `clock_start`.
pub fn clock_span_ms(clock_start: TimeT) -> DurationMs {
    span_ms(clock_start, get_time())
}

fn to_ms(d: Duration) -> DurationMs {
    d.as_millis().min(DurationMs::MAX as u128) as DurationMs
}
