//! One timed validation run over the whole file list.
//!
//! [`run`] splits the files into one batch per worker, submits every batch to
//! a [`WorkerPool`] of exactly the requested size, shuts the pool down (which
//! drains it), sums the per-batch [`Tally`] values on the calling thread and
//! reports the totals. The elapsed time is then persisted under the thread
//! count through [`crate::results`].
//!
//! Nothing here is fatal. A batch whose job panics is logged and counted in
//! [`RunSummary::failed_batches`]; missing files are handled inside the
//! processor; a persistence failure only loses the record.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use crate::batch;
use crate::config::DEFAULT_RESULTS_DIR;
use crate::processor::{self, Tally};
use crate::results;
use crate::threadpool::WorkerPool;
use crate::timefn::{clock_span_ms, get_time, DurationMs};
use crate::{displaylevel, displayout};

/// Settings that do not change between runs of one session.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory receiving `versao_T_threads.txt` records.
    pub results_dir: PathBuf,
    /// When `false`, runs are reported but not persisted.
    pub save: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions { results_dir: PathBuf::from(DEFAULT_RESULTS_DIR), save: true }
    }
}

/// Aggregate result of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Worker threads the run was configured with.
    pub threads: usize,
    /// Batches actually submitted (at most `threads`).
    pub batches: usize,
    pub tally: Tally,
    /// Batches whose job failed; their counts are missing from `tally`.
    pub failed_batches: usize,
    pub elapsed_ms: DurationMs,
    /// Where the timing record went, if it was written.
    pub saved_to: Option<PathBuf>,
}

/// Runs, reports on stdout and persists one validation pass.
pub fn run(files: &[PathBuf], threads: usize, opts: &RunOptions) -> RunSummary {
    let mut summary = execute(files, threads);

    let stdout = io::stdout();
    if let Err(e) = write_report(&mut stdout.lock(), &summary) {
        displaylevel!(1, "cannot write report: {}\n", e);
    }

    if opts.save {
        match results::save_elapsed(&opts.results_dir, threads, summary.elapsed_ms) {
            Ok(path) => {
                displayout!("Time saved to: {}\n", path.display());
                summary.saved_to = Some(path);
            }
            Err(e) => displaylevel!(1, "error saving time: {}\n", e),
        }
    }
    summary
}

/// Splits, processes and sums without reporting or persisting.
pub fn execute(files: &[PathBuf], threads: usize) -> RunSummary {
    execute_with(files, threads, |batch: &[PathBuf]| processor::process(batch))
}

/// [`execute`] with a caller-supplied batch job.
pub fn execute_with<F>(files: &[PathBuf], threads: usize, job: F) -> RunSummary
where
    F: Fn(&[PathBuf]) -> Tally + Send + Sync + 'static,
{
    let start = get_time();
    let batches = batch::split(files, threads);
    let nb_batches = batches.len();
    displaylevel!(3, "{} files in {} batches over {} threads\n", files.len(), nb_batches, threads);

    let mut tally = Tally::default();
    let mut failed_batches = 0;

    match WorkerPool::new(threads) {
        Ok(pool) => {
            displaylevel!(4, "pool ready with {} workers\n", pool.threads());
            let job = Arc::new(job);
            let handles: Vec<_> = batches
                .iter()
                .enumerate()
                .map(|(index, files)| {
                    let files = files.to_vec();
                    let job = Arc::clone(&job);
                    pool.submit(move || {
                        let t = (*job)(files.as_slice());
                        displaylevel!(
                            3,
                            "batch {}: {} files, {} valid, {} invalid\n",
                            index,
                            files.len(),
                            t.valid,
                            t.invalid
                        );
                        t
                    })
                })
                .collect();

            // No further submissions; outstanding jobs drain before this returns.
            pool.shutdown();

            for (index, handle) in handles.into_iter().enumerate() {
                match handle.join() {
                    Ok(t) => tally += t,
                    Err(e) => {
                        displaylevel!(1, "batch {} failed: {}\n", index, e);
                        failed_batches += 1;
                    }
                }
            }
        }
        Err(e) => {
            displaylevel!(1, "warning: {}; processing {} batches on the main thread\n", e, nb_batches);
            for files in &batches {
                tally += job(*files);
            }
        }
    }

    RunSummary {
        threads,
        batches: nb_batches,
        tally,
        failed_batches,
        elapsed_ms: clock_span_ms(start),
        saved_to: None,
    }
}

/// Writes the console report for `summary`.
pub fn write_report<W: Write>(out: &mut W, summary: &RunSummary) -> io::Result<()> {
    writeln!(out, "Valid CPFs: {}", summary.tally.valid)?;
    writeln!(out, "Invalid CPFs: {}", summary.tally.invalid)?;
    if summary.tally.unreadable > 0 {
        writeln!(out, "Unreadable files: {}", summary.tally.unreadable)?;
    }
    if summary.failed_batches > 0 {
        writeln!(out, "Failed batches: {}", summary.failed_batches)?;
    }
    writeln!(
        out,
        "Total execution time with {} threads: {} ms",
        summary.threads, summary.elapsed_ms
    )?;
    out.flush()
}
