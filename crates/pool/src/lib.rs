//! # prfmap-pool
//!
//! Chunked fan-out/fan-in execution for CPU-bound model generation.
//!
//! The full work range (parameter rows or pixel rows) is split into
//! contiguous chunks, one OS thread per chunk. Every chunk is dispatched
//! before any result is collected; workers push `(chunk_index, result)`
//! pairs onto a many-producer/one-consumer channel, and the coordinator
//! blocks until it has received exactly one result per dispatched chunk.
//! Workers share nothing mutable, so no locks are involved; global output
//! order is restored from the chunk index, never from completion order.
//!
//! A worker failure is surfaced as [`PoolError::ChunkFailed`] tagged with
//! the chunk's identity so the caller can localize the failing range. A
//! chunk that never reports is a fatal [`PoolError::MissingChunk`]; partial
//! output is never returned.

mod error;

use std::fmt::Display;
use std::ops::Range;

use crossbeam::channel;
use tracing::debug;

pub use error::PoolError;

/// Splits `0..len` into at most `n_chunks` contiguous, non-empty,
/// near-equal ranges that cover the whole input.
///
/// `n_chunks` is clamped to `len`, so no chunk is ever empty. The first
/// `len % n_chunks` chunks are one element longer than the rest.
pub fn partition(len: usize, n_chunks: usize) -> Vec<Range<usize>> {
    if len == 0 || n_chunks == 0 {
        return Vec::new();
    }
    let n = n_chunks.min(len);
    let base = len / n;
    let extra = len % n;

    let mut ranges = Vec::with_capacity(n);
    let mut start = 0;
    for i in 0..n {
        let size = base + usize::from(i < extra);
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

/// Runs `job` once per chunk of `0..len` on parallel worker threads and
/// returns the per-chunk outputs in dispatch order.
///
/// `job` receives the chunk index and its range. It must be pure with
/// respect to shared state: inputs are shared read-only across workers by
/// reference.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`PoolError::ChunkFailed`] | a worker's job returned an error |
/// | [`PoolError::MissingChunk`] | a dispatched chunk produced no result |
pub fn run_chunked<T, E, F>(len: usize, n_chunks: usize, job: F) -> Result<Vec<T>, PoolError>
where
    T: Send,
    E: Display,
    F: Fn(usize, Range<usize>) -> Result<T, E> + Sync,
{
    let chunks = partition(len, n_chunks);
    let n = chunks.len();
    debug!(len, n_chunks = n, "dispatching chunks");

    let mut slots: Vec<Option<T>> = (0..n).map(|_| None).collect();

    std::thread::scope(|scope| -> Result<(), PoolError> {
        let (tx, rx) = channel::unbounded::<(usize, Result<T, String>)>();

        // Dispatch every chunk before collecting any result.
        for (index, range) in chunks.into_iter().enumerate() {
            let tx = tx.clone();
            let job = &job;
            scope.spawn(move || {
                let outcome = job(index, range).map_err(|e| e.to_string());
                // A send error means the coordinator already bailed out.
                let _ = tx.send((index, outcome));
            });
        }
        drop(tx);

        for _ in 0..n {
            match rx.recv() {
                Ok((index, Ok(value))) => slots[index] = Some(value),
                Ok((index, Err(message))) => {
                    return Err(PoolError::ChunkFailed {
                        chunk: index,
                        message,
                    });
                }
                // All senders gone before n results arrived; the slot scan
                // below names the missing chunk.
                Err(channel::RecvError) => break,
            }
        }
        Ok(())
    })?;

    let mut outputs = Vec::with_capacity(n);
    for (index, slot) in slots.into_iter().enumerate() {
        match slot {
            Some(value) => outputs.push(value),
            None => return Err(PoolError::MissingChunk { chunk: index }),
        }
    }
    Ok(outputs)
}
