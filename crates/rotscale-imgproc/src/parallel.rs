use rayon::prelude::*;
use thiserror::Error;

use rotscale_image::Image;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how the per-pixel loop is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool, one task per destination row.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

/// Visits every pixel of `dst` with its `(x, y)` coordinate.
///
/// Rows are disjoint chunks of the destination buffer, so each worker owns
/// the pixels it writes and no synchronization is needed. The result does not
/// depend on the strategy.
///
/// # Errors
///
/// Only [`ExecutionStrategy::Fixed`] can fail, when the pool cannot be built.
pub fn par_iter_rows_resample<T, const C: usize>(
    dst: &mut Image<T, C>,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, usize, &mut [T]) + Send + Sync,
) -> Result<(), ParallelError>
where
    T: Send,
{
    if let ExecutionStrategy::Fixed(0) = strategy {
        return Err(ParallelError::InvalidThreadCount(0));
    }

    let row_stride = C * dst.cols();
    if row_stride == 0 || dst.rows() == 0 {
        return Ok(());
    }

    let process_row = |(y, row): (usize, &mut [T])| {
        row.chunks_exact_mut(C)
            .enumerate()
            .for_each(|(x, dst_pixel)| f(x, y, dst_pixel));
    };

    let data = dst.as_slice_mut();
    match strategy {
        ExecutionStrategy::Serial => {
            data.chunks_exact_mut(row_stride)
                .enumerate()
                .for_each(process_row);
        }
        ExecutionStrategy::ParallelRows => {
            data.par_chunks_exact_mut(row_stride)
                .enumerate()
                .for_each(process_row);
        }
        ExecutionStrategy::Fixed(num_threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;
            pool.install(|| {
                data.par_chunks_exact_mut(row_stride)
                    .enumerate()
                    .for_each(process_row);
            });
        }
    }

    Ok(())
}
