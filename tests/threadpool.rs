// Integration tests for the fixed-size worker pool (src/threadpool.rs).
//
// Coverage:
//   - WorkerPool::new rejects zero threads, accepts every selectable size
//   - submit runs each job exactly once and hands its value back
//   - jobs_completed blocks until pending jobs finish, and is reusable
//   - shutdown / Drop drain in-flight jobs
//   - a pool of N threads really runs N jobs at once
//   - a panicking job is reported through its handle and spares the others

use cpfr::config::THREAD_OPTIONS;
use cpfr::threadpool::{JobError, PoolError, WorkerPool};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// WorkerPool::new
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn new_rejects_zero_threads() {
    assert!(matches!(WorkerPool::new(0), Err(PoolError::ZeroThreads)));
}

#[test]
fn new_accepts_every_thread_option() {
    for &t in THREAD_OPTIONS {
        let pool = WorkerPool::new(t).expect("valid pool");
        assert_eq!(pool.threads(), t);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// submit / join
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn submit_multiple_jobs_all_execute() {
    // Each submitted job runs exactly once — no jobs are silently dropped.
    let pool = WorkerPool::new(2).expect("valid pool");
    let counter = Arc::new(AtomicUsize::new(0));
    const N: usize = 16;

    let handles: Vec<_> = (0..N)
        .map(|_| {
            let c = Arc::clone(&counter);
            pool.submit(move || {
                c.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();

    for h in handles {
        h.join().expect("job ran");
    }
    assert_eq!(counter.load(Ordering::SeqCst), N);
}

#[test]
fn handles_return_their_own_values() {
    let pool = WorkerPool::new(3).expect("valid pool");
    let handles: Vec<_> = (0..10u64).map(|i| pool.submit(move || i * i)).collect();
    let values: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(values, (0..10u64).map(|i| i * i).collect::<Vec<_>>());
}

#[test]
fn join_after_shutdown() {
    // Submit everything, tear the pool down, then collect.
    let pool = WorkerPool::new(2).expect("valid pool");
    let handles: Vec<_> = (1..=4u32).map(|i| pool.submit(move || i)).collect();
    pool.shutdown();
    let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total, 10);
}

#[test]
fn dropped_handle_does_not_block_pool() {
    let pool = WorkerPool::new(1).expect("valid pool");
    drop(pool.submit(|| 1u8));
    let h = pool.submit(|| 2u8);
    assert_eq!(h.join(), Ok(2));
}

// ─────────────────────────────────────────────────────────────────────────────
// jobs_completed — barrier semantics
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn jobs_completed_returns_immediately_when_no_jobs() {
    let pool = WorkerPool::new(2).expect("valid pool");
    let done = Arc::new(AtomicUsize::new(0));
    let d = Arc::clone(&done);
    let handle = std::thread::spawn(move || {
        pool.jobs_completed();
        d.store(1, Ordering::SeqCst);
    });
    handle.join().expect("jobs_completed should not deadlock on idle pool");
    assert_eq!(done.load(Ordering::SeqCst), 1);
}

#[test]
fn jobs_completed_waits_for_slow_job() {
    let pool = WorkerPool::new(1).expect("valid pool");
    let flag = Arc::new(AtomicUsize::new(0));

    let f = Arc::clone(&flag);
    let _h = pool.submit(move || {
        std::thread::sleep(Duration::from_millis(50));
        f.store(1, Ordering::SeqCst);
    });

    pool.jobs_completed();
    assert_eq!(flag.load(Ordering::SeqCst), 1);
}

#[test]
fn jobs_completed_is_reusable() {
    let pool = WorkerPool::new(2).expect("valid pool");
    let counter = Arc::new(AtomicUsize::new(0));

    for round in 1..=2 {
        for _ in 0..4 {
            let c = Arc::clone(&counter);
            let _h = pool.submit(move || {
                c.fetch_add(1, Ordering::SeqCst);
            });
        }
        pool.jobs_completed();
        assert_eq!(counter.load(Ordering::SeqCst), 4 * round);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Drop — waits for running jobs before tearing the pool down
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn drop_waits_for_in_flight_jobs() {
    let flag = Arc::new(AtomicUsize::new(0));

    {
        let pool = WorkerPool::new(1).expect("valid pool");
        let f = Arc::clone(&flag);
        let _h = pool.submit(move || {
            std::thread::sleep(Duration::from_millis(50));
            f.store(1, Ordering::SeqCst);
        });
        // pool drops here — must wait for the job
    }

    assert_eq!(flag.load(Ordering::SeqCst), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Parallelism
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn jobs_run_concurrently_across_threads() {
    // All N jobs rendezvous at a barrier; with fewer than N threads this
    // would deadlock.
    const N: usize = 5;
    let pool = WorkerPool::new(N).expect("valid pool");
    let barrier = Arc::new(Barrier::new(N));

    let handles: Vec<_> = (0..N)
        .map(|_| {
            let b = Arc::clone(&barrier);
            pool.submit(move || b.wait().is_leader())
        })
        .collect();

    let leaders = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|&leader| leader)
        .count();
    assert_eq!(leaders, 1);
}

#[test]
fn many_jobs_small_pool() {
    let pool = WorkerPool::new(2).expect("valid pool");
    let counter = Arc::new(AtomicUsize::new(0));
    const N: usize = 50;

    for _ in 0..N {
        let c = Arc::clone(&counter);
        let _h = pool.submit(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
    }

    pool.jobs_completed();
    assert_eq!(counter.load(Ordering::SeqCst), N);
}

// ─────────────────────────────────────────────────────────────────────────────
// Failure capture
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn panicking_job_is_isolated() {
    let pool = WorkerPool::new(2).expect("valid pool");
    let handles: Vec<_> = (0..6u32)
        .map(|i| {
            pool.submit(move || {
                if i == 3 {
                    panic!("job {} exploded", i);
                }
                i
            })
        })
        .collect();
    pool.shutdown();

    let mut ok = 0;
    let mut failed = Vec::new();
    for h in handles {
        match h.join() {
            Ok(_) => ok += 1,
            Err(e) => failed.push(e),
        }
    }
    assert_eq!(ok, 5);
    assert_eq!(failed, [JobError::Panicked("job 3 exploded".to_owned())]);
}
