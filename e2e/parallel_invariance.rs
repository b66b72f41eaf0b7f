// e2e/parallel_invariance.rs — aggregate counts do not depend on thread count
//
// Builds a few dozen input files of uneven size from generated CPFs (valid,
// corrupted, degenerate, malformed) and checks that every selectable thread
// count yields exactly the counts of a sequential single-worker run, and that
// those counts match what was written.

use std::fs;
use std::path::PathBuf;

use cpfr::coordinator::{execute, run, RunOptions};
use cpfr::cpf::check_digits;
use cpfr::config::{INPUT_EXTENSION, THREAD_OPTIONS};
use cpfr::processor::{process, Tally};
use cpfr::results::load_elapsed;
use cpfr::util::list_input_files;
use tempfile::TempDir;

/// Writes `files` input files and returns the expected tally.
fn build_corpus(dir: &TempDir, files: usize) -> Tally {
    let mut expected = Tally::default();
    let mut seed: u32 = 12345;
    let mut next = move || {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
        (seed >> 16) as usize
    };

    for f in 0..files {
        let mut text = String::new();
        for _ in 0..(next() % 40) {
            let mut base = [0u8; 9];
            for d in base.iter_mut() {
                *d = (next() % 10) as u8;
            }
            let (d10, d11) = check_digits(&base);
            let digits: String = base
                .iter()
                .chain([d10, d11].iter())
                .map(|d| char::from(b'0' + d))
                .collect();
            let degenerate = digits.bytes().all(|b| b == digits.as_bytes()[0]);
            match next() % 4 {
                0 if !degenerate => {
                    text.push_str(&format!("{}.{}.{}-{}\n", &digits[..3], &digits[3..6], &digits[6..9], &digits[9..]));
                    expected.valid += 1;
                }
                1 => {
                    // Corrupt the last verifier digit.
                    let last = (d11 + 1) % 10;
                    text.push_str(&format!("{}{}\n", &digits[..10], last));
                    expected.invalid += 1;
                }
                2 => {
                    text.push_str(&digits[..7]);
                    text.push('\n');
                    expected.invalid += 1;
                }
                _ => text.push_str("   \n"),
            }
        }
        fs::write(dir.path().join(format!("lote_{:03}{}", f, INPUT_EXTENSION)), text).unwrap();
    }
    expected
}

fn corpus_files(dir: &TempDir) -> Vec<PathBuf> {
    list_input_files(dir.path(), INPUT_EXTENSION).unwrap()
}

#[test]
fn every_thread_option_matches_sequential_counts() {
    let dir = TempDir::new().unwrap();
    let expected = build_corpus(&dir, 37);
    let files = corpus_files(&dir);
    assert_eq!(files.len(), 37);

    let sequential = process(&files);
    assert_eq!(sequential, expected);

    for &threads in THREAD_OPTIONS {
        let summary = execute(&files, threads);
        assert_eq!(summary.tally, sequential, "threads={threads}");
        assert_eq!(summary.failed_batches, 0);
        assert!(summary.batches <= threads);
    }
}

#[test]
fn vanished_file_only_loses_its_own_lines() {
    let dir = TempDir::new().unwrap();
    build_corpus(&dir, 12);
    let files = corpus_files(&dir);
    let full = execute(&files, 1).tally;

    let victim = files[5].clone();
    let lost = process(&[victim.clone()]);
    fs::remove_file(&victim).unwrap();

    for &threads in THREAD_OPTIONS {
        let t = execute(&files, threads).tally;
        assert_eq!(t.valid, full.valid - lost.valid, "threads={threads}");
        assert_eq!(t.invalid, full.invalid - lost.invalid, "threads={threads}");
        assert_eq!(t.unreadable, 1, "threads={threads}");
    }
}

#[test]
fn run_records_are_keyed_by_thread_count() {
    let dir = TempDir::new().unwrap();
    build_corpus(&dir, 4);
    let files = corpus_files(&dir);
    let opts = RunOptions { results_dir: dir.path().join("resultados"), save: true };

    let five = run(&files, 5, &opts);
    let ten = run(&files, 10, &opts);
    assert_ne!(five.saved_to, ten.saved_to);
    assert_eq!(load_elapsed(&opts.results_dir, 5).unwrap(), five.elapsed_ms);
    assert_eq!(load_elapsed(&opts.results_dir, 10).unwrap(), ten.elapsed_ms);

    let again = run(&files, 5, &opts);
    assert_eq!(load_elapsed(&opts.results_dir, 5).unwrap(), again.elapsed_ms);
}
