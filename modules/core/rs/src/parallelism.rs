use std::cmp::Ordering;
use std::thread::available_parallelism;

use eyre::Result;

// Requested thread counts follow the common CLI convention:
// * positive - use exactly that many threads (capped by the machine)
// * zero - single-threaded
// * negative - all available threads except (|requested| - 1)
fn normalize(requested: isize, max: isize) -> usize {
    match requested.cmp(&0) {
        Ordering::Less => (max + requested + 1).max(1) as usize,
        Ordering::Equal => 1,
        Ordering::Greater => requested.min(max) as usize,
    }
}

/// Number of worker threads to use for the requested thread count.
pub fn available(requested: isize) -> Result<usize> {
    let max = available_parallelism()?.get() as isize;
    Ok(normalize(requested, max))
}

/// Size of work chunks when `items` are split between `workers`, aiming for a few chunks per
/// worker so that uneven chunks are balanced by work stealing.
pub fn chunk_size(items: usize, workers: usize) -> usize {
    const CHUNKS_PER_WORKER: usize = 4;
    let chunks = workers.max(1) * CHUNKS_PER_WORKER;
    items.div_ceil(chunks).max(1)
}
