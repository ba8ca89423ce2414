//! Per-chunk pRF model time-course computation.

use ndarray::{Array2, ArrayView2, ArrayView3};
use prfmap_model::{PARAM_COLS, gaussian_kernel};

use crate::error::TimeCourseError;

/// Computes one predicted time course per parameter row of `params`.
///
/// Per row `(index, x, y, sd)`:
/// 1. round x, y and sd to the nearest model-grid integers
///    (half-away-from-zero, via [`f64::round`]);
/// 2. build the Gaussian kernel for the rounded values;
/// 3. weight the `[width, height, volumes]` stimulus tensor by the kernel
///    and sum over both spatial axes, yielding the area under the
///    Gaussian-weighted stimulus surface at each volume.
///
/// The kernel integrates to unit mass by construction, so the weighted sum
/// is already normalized for receptive-field size; no per-row division by
/// the kernel sum takes place.
///
/// Output shape is `[chunk_rows, 1 + n_volumes]` with the row's original
/// index in column 0, which is the only ordering key the coordinator needs.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`TimeCourseError::BadParameterColumns`] | `params` is not 4 columns wide |
/// | [`TimeCourseError::StimulusShapeMismatch`] | stimulus disagrees with `(width, height, n_volumes)` |
/// | [`TimeCourseError::Model`] | kernel construction rejected a rounded parameter |
pub fn time_course_chunk(
    params: ArrayView2<'_, f64>,
    visual_space: (usize, usize),
    n_volumes: usize,
    stimulus: ArrayView3<'_, f64>,
) -> Result<Array2<f64>, TimeCourseError> {
    let (width, height) = visual_space;
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

    let mut out = Array2::zeros((params.nrows(), 1 + n_volumes));

    for (row, combo) in params.outer_iter().enumerate() {
        // Candidate positions live on a fractional grid; the supersampled
        // stimulus is indexed by whole pixels.
        let x = combo[1].round();
        let y = combo[2].round();
        let sd = combo[3].round();

        let kernel = gaussian_kernel(width, height, x, y, sd)?;

        let mut course = out.row_mut(row);
        course[0] = combo[0];
        for ((i, j), &weight) in kernel.indexed_iter() {
            for t in 0..n_volumes {
                course[1 + t] += weight * stimulus[[i, j, t]];
            }
        }
    }
    Ok(out)
}
