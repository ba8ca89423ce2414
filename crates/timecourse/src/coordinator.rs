//! Chunk dispatch and index-keyed reassembly of pRF time courses.

use ndarray::{Array2, ArrayView2, ArrayView3, s};
use prfmap_model::{ModelError, PARAM_COLS};
use tracing::{debug, info};

use crate::error::TimeCourseError;
use crate::worker::time_course_chunk;

/// Generates the full `[K, 1 + n_volumes]` pRF time-course matrix for a
/// parameter grid, fanning the rows out across parallel workers.
///
/// All inputs are validated here, once, before any chunk is dispatched:
/// catching a bad standard deviation centrally is cheap, discovering it in
/// the middle of a worker's numeric loop is not. The stimulus tensor is
/// shared read-only across workers.
///
/// Workers emit `(chunk_index, rows)` on the shared result channel; their
/// completion order carries no meaning. The output is reassembled by
/// sorting on the embedded original-index column, and the coordinator
/// refuses to return anything unless exactly one row per dispatched
/// parameter combination came back.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`TimeCourseError::BadParameterColumns`] | grid is not 4 columns wide |
/// | [`TimeCourseError::StimulusShapeMismatch`] | stimulus disagrees with the visual space |
/// | [`TimeCourseError::Model`] | non-positive grid dimension, volume count, or sd |
/// | [`TimeCourseError::AggregationMismatch`] | reassembled row count differs from K |
/// | [`TimeCourseError::Pool`] | a chunk failed or went missing |
pub fn generate_time_courses(
    params: ArrayView2<'_, f64>,
    visual_space: (usize, usize),
    n_volumes: usize,
    stimulus: ArrayView3<'_, f64>,
    n_chunks: usize,
) -> Result<Array2<f64>, TimeCourseError> {
    let (width, height) = visual_space;
    if width == 0 || height == 0 {
        return Err(ModelError::InvalidGridSize { width, height }.into());
    }
    if n_volumes == 0 {
        return Err(ModelError::InvalidVolumeCount.into());
    }
    if params.ncols() != PARAM_COLS {
        return Err(TimeCourseError::BadParameterColumns {
            expected: PARAM_COLS,
            got: params.ncols(),
        });
    }
    let dim = stimulus.dim();
    if dim != (width, height, n_volumes) {
        return Err(TimeCourseError::StimulusShapeMismatch {
            width,
            height,
            n_volumes,
            got: [dim.0, dim.1, dim.2],
        });
    }
    for combo in params.outer_iter() {
        let sd = combo[3];
        if !sd.is_finite() || sd <= 0.0 {
            return Err(ModelError::InvalidStandardDeviation(sd).into());
        }
    }

    let n_rows = params.nrows();
    if n_rows == 0 {
        return Ok(Array2::zeros((0, 1 + n_volumes)));
    }

    info!(
        n_rows,
        n_chunks,
        width,
        height,
        n_volumes,
        "generating pRF time courses"
    );

    let chunks = prfmap_pool::run_chunked(n_rows, n_chunks, |index, range| {
        debug!(chunk = index, start = range.start, end = range.end, "processing chunk");
        time_course_chunk(
            params.slice(s![range.start..range.end, ..]),
            visual_space,
            n_volumes,
            stimulus,
        )
    })?;

    let total: usize = chunks.iter().map(|c| c.nrows()).sum();
    if total != n_rows {
        return Err(TimeCourseError::AggregationMismatch {
            dispatched: n_rows,
            got: total,
        });
    }

    // Restore the original order from the embedded index column; chunk
    // completion order is irrelevant.
    let mut order: Vec<(usize, usize)> = Vec::with_capacity(total);
    for (chunk_index, chunk) in chunks.iter().enumerate() {
        for row in 0..chunk.nrows() {
            order.push((chunk_index, row));
        }
    }
    order.sort_by(|&(ca, ra), &(cb, rb)| {
        let ia = chunks[ca][[ra, 0]];
        let ib = chunks[cb][[rb, 0]];
        ia.partial_cmp(&ib).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut out = Array2::zeros((total, 1 + n_volumes));
    for (slot, &(chunk_index, row)) in order.iter().enumerate() {
        out.row_mut(slot).assign(&chunks[chunk_index].row(row));
    }
    Ok(out)
}
