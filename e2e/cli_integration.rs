// e2e/cli_integration.rs — CLI integration tests
//
// Drives the `cpfr` binary as a black box with std::process::Command:
// discovery, the interactive loop over piped stdin, --threads batch mode,
// result records, and exit codes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Locate the `cpfr` binary produced by Cargo.
fn cpfr_bin() -> PathBuf {
    // CARGO_BIN_EXE_cpfr is set by Cargo when running integration tests.
    // Fall back to walking up from the test binary location.
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_cpfr") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop(); // remove test binary filename
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("cpfr");
    p
}

/// A working directory with `cpfs/` holding three small input files:
/// 4 valid and 5 invalid CPFs in total, plus blank lines and a non-.txt file.
fn make_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    let cpfs = dir.path().join("cpfs");
    fs::create_dir(&cpfs).unwrap();
    fs::write(cpfs.join("a.txt"), "529.982.247-25\n111.111.111-11\n\n123\n").unwrap();
    fs::write(cpfs.join("b.txt"), "12345678909\n52998224726\n").unwrap();
    fs::write(cpfs.join("c.txt"), "  52998224725  \n12345678909\nabc\n\n00000000000\n").unwrap();
    fs::write(cpfs.join("ignored.csv"), "52998224725\n").unwrap();
    dir
}

/// Run the binary in `cwd` with `args`, feeding `stdin`.
fn run_cpfr(cwd: &Path, args: &[&str], stdin: &str) -> Output {
    run_cpfr_bytes(cwd, args, stdin.as_bytes())
}

fn run_cpfr_bytes(cwd: &Path, args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(cpfr_bin())
        .args(args)
        .current_dir(cwd)
        .env_remove("CPFR_INPUT_DIR")
        .env_remove("CPFR_RESULTS_DIR")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn cpfr");
    // The child may exit before reading everything (e.g. no input files).
    let _ = child.stdin.take().unwrap().write_all(stdin);
    child.wait_with_output().expect("failed to wait for cpfr")
}

fn stdout_of(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

// ── 1. Interactive loop ──────────────────────────────────────────────────────

#[test]
fn test_cli_interactive_run_then_exit() {
    let ws = make_workspace();
    let out = run_cpfr(ws.path(), &[], "2\n0\n");
    assert!(out.status.success());
    let stdout = stdout_of(&out);
    assert!(stdout.contains("Valid CPFs: 4"), "{stdout}");
    assert!(stdout.contains("Invalid CPFs: 5"), "{stdout}");
    assert!(stdout.contains("Total execution time with 2 threads:"), "{stdout}");
    assert!(stdout.contains("Exiting."));

    let record = ws.path().join("resultados/versao_2_threads.txt");
    let text = fs::read_to_string(&record).expect("record written");
    assert!(text.trim().parse::<u64>().is_ok(), "record holds milliseconds: {text:?}");
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn test_cli_invalid_choices_do_not_run() {
    let ws = make_workspace();
    let out = run_cpfr(ws.path(), &[], "4\nabc\n0\n");
    assert!(out.status.success());
    let stdout = stdout_of(&out);
    assert!(stdout.contains("Invalid option. Try again."));
    assert!(stdout.contains("Invalid input. Try again."));
    assert!(!stdout.contains("Valid CPFs:"));
    assert!(!ws.path().join("resultados").exists());
}

#[test]
fn test_cli_closed_stdin_exits_cleanly() {
    let ws = make_workspace();
    let out = run_cpfr(ws.path(), &[], "");
    assert!(out.status.success());
}

#[test]
fn test_cli_undecodable_choice_reprompts() {
    let ws = make_workspace();
    let out = run_cpfr_bytes(ws.path(), &["--no-save"], b"\xff\n1\n0\n");
    assert_eq!(out.status.code(), Some(0));
    let stdout = stdout_of(&out);
    assert!(stdout.contains("Invalid input. Try again."), "{stdout}");
    assert!(stdout.contains("Valid CPFs: 4"), "{stdout}");
    assert!(stdout.contains("Exiting."));
}

// ── 2. Batch mode ────────────────────────────────────────────────────────────

#[test]
fn test_cli_threads_flag_writes_one_record_per_count() {
    let ws = make_workspace();
    let out = run_cpfr(ws.path(), &["--threads", "1,5,30"], "");
    assert!(out.status.success());
    let stdout = stdout_of(&out);
    assert_eq!(stdout.matches("Valid CPFs: 4").count(), 3, "{stdout}");
    for t in [1, 5, 30] {
        assert!(ws.path().join(format!("resultados/versao_{t}_threads.txt")).is_file());
    }
    assert!(!ws.path().join("resultados/versao_10_threads.txt").exists());
}

#[test]
fn test_cli_rerun_overwrites_record() {
    let ws = make_workspace();
    let record = ws.path().join("resultados/versao_5_threads.txt");
    fs::create_dir_all(record.parent().unwrap()).unwrap();
    fs::write(&record, "stale content that is not a number\n").unwrap();

    let out = run_cpfr(ws.path(), &["-t", "5"], "");
    assert!(out.status.success());
    let text = fs::read_to_string(&record).unwrap();
    assert!(text.trim().parse::<u64>().is_ok(), "{text:?}");
}

#[test]
fn test_cli_no_save() {
    let ws = make_workspace();
    let out = run_cpfr(ws.path(), &["-t", "3", "--no-save"], "");
    assert!(out.status.success());
    assert!(stdout_of(&out).contains("Valid CPFs: 4"));
    assert!(!ws.path().join("resultados").exists());
}

#[test]
fn test_cli_custom_directories() {
    let ws = make_workspace();
    fs::rename(ws.path().join("cpfs"), ws.path().join("input")).unwrap();
    let out = run_cpfr(ws.path(), &["-i", "input", "-o", "timings", "-t", "6"], "");
    assert!(out.status.success());
    assert!(ws.path().join("timings/versao_6_threads.txt").is_file());
}

#[test]
fn test_cli_env_input_dir() {
    let ws = make_workspace();
    fs::rename(ws.path().join("cpfs"), ws.path().join("from_env")).unwrap();
    let out = Command::new(cpfr_bin())
        .args(["-t", "1", "--no-save"])
        .current_dir(ws.path())
        .env("CPFR_INPUT_DIR", "from_env")
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(stdout_of(&out).contains("Valid CPFs: 4"));
}

// ── 3. Discovery and errors ─────────────────────────────────────────────────

#[test]
fn test_cli_no_input_files_exits_without_prompt() {
    let dir = TempDir::new().unwrap();
    let out = run_cpfr(dir.path(), &[], "1\n0\n");
    assert!(out.status.success());
    let stdout = stdout_of(&out);
    assert!(stdout.contains("No .txt files found"), "{stdout}");
    assert!(!stdout.contains("Your choice:"));
}

#[cfg(unix)]
#[test]
fn test_cli_unlistable_input_dir_counts_as_empty() {
    use std::os::unix::fs::PermissionsExt;

    let ws = make_workspace();
    let cpfs = ws.path().join("cpfs");
    fs::set_permissions(&cpfs, fs::Permissions::from_mode(0o000)).unwrap();
    // Privileged users can still read the directory; nothing to check then.
    let still_readable = fs::read_dir(&cpfs).is_ok();
    let out = run_cpfr(ws.path(), &["-t", "1", "--no-save"], "");
    fs::set_permissions(&cpfs, fs::Permissions::from_mode(0o755)).unwrap();
    if still_readable {
        return;
    }

    assert_eq!(out.status.code(), Some(0));
    assert!(stdout_of(&out).contains("No .txt files found"));
    assert!(String::from_utf8_lossy(&out.stderr).contains("cannot list input directory"));
}

#[test]
fn test_cli_unwritable_results_dir_still_reports() {
    let ws = make_workspace();
    // A regular file where the results directory should be.
    fs::write(ws.path().join("resultados"), "blocker").unwrap();
    let out = run_cpfr(ws.path(), &["-t", "2"], "");
    assert!(out.status.success());
    assert!(stdout_of(&out).contains("Valid CPFs: 4"));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error saving time"));
}

#[test]
fn test_cli_invalid_thread_flag_fails() {
    let ws = make_workspace();
    let out = run_cpfr(ws.path(), &["-t", "4"], "");
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_cli_version() {
    let out = Command::new(cpfr_bin()).arg("--version").output().unwrap();
    assert!(out.status.success());
    assert!(stdout_of(&out).contains(env!("CARGO_PKG_VERSION")));
}
