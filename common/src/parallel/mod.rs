//! Parallel processing utilities.

use std::ops::Range;

use rayon::prelude::*;


/// Multiplier for number of chunks relative to CPU threads.
/// Using 3x threads provides good load balancing when some chunks finish faster.
const CHUNKS_PER_THREAD: usize = 3;

/// Compute chunk size for splitting `len` items across the rayon pool.
#[inline]
pub fn auto_chunk_size(len: usize) -> usize {
    let num_chunks = rayon::current_num_threads() * CHUNKS_PER_THREAD;
    (len / num_chunks).max(1)
}

/// Folds the index range `0..len` in parallel into thread-private accumulators.
///
/// The range is cut into chunks of [`auto_chunk_size`]. Each rayon fold task
/// starts from `init()` and receives whole chunks through `fold`, so the hot
/// loop never shares mutable state. Partial accumulators are then combined
/// pairwise with `merge`. `init()` must be the identity of `merge`; rayon may
/// insert it any number of times.
pub fn par_fold_chunked<A, I, F, M>(len: usize, init: I, fold: F, merge: M) -> A
where
    A: Send,
    I: Fn() -> A + Sync + Send,
    F: Fn(&mut A, Range<usize>) + Sync + Send,
    M: Fn(A, A) -> A + Sync + Send,
{
    let chunk_size = auto_chunk_size(len);
    let num_chunks = len.div_ceil(chunk_size);

    (0..num_chunks)
        .into_par_iter()
        .fold(&init, |mut acc, chunk| {
            let start = chunk * chunk_size;
            fold(&mut acc, start..(start + chunk_size).min(len));
            acc
        })
        .reduce(&init, merge)
}
