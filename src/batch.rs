//! Work splitting: one contiguous slice of the input list per worker.

/// Partitions `items` into at most `workers` contiguous, non-overlapping slices.
///
/// The batch size is `ceil(len / workers)`, so every batch but the last has the
/// same length and the last holds the remainder. Fewer than `workers` batches
/// are produced when the list is short (7 files over 6 workers gives batches of
/// 2, 2, 2 and 1). An empty list produces no batches. A `workers` value of 0 is
/// treated as 1.
pub fn split<T>(items: &[T], workers: usize) -> Vec<&[T]> {
    if items.is_empty() {
        return Vec::new();
    }
    items.chunks(batch_size(items.len(), workers)).collect()
}

/// Length of every batch except possibly the last.
pub fn batch_size(total: usize, workers: usize) -> usize {
    total.div_ceil(workers.max(1)).max(1)
}
