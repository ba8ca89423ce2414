//! Candidate pRF parameter grid construction.

use ndarray::Array2;

use crate::error::ModelError;

/// Number of columns in a parameter grid row: index, x, y, sd.
pub const PARAM_COLS: usize = 4;

/// Evenly spaced values from `start` to `stop` inclusive.
///
/// Mirrors the linspace used to lay out candidate positions and sizes over
/// the supersampled visual space. `n == 1` yields `[start]`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![start];
    }
    let step = (stop - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Builds the full `[K, 4]` grid of candidate parameter combinations.
///
/// Rows are laid out row-major over `(x, y, sd)` with x varying slowest.
/// Column 0 carries the original row index, which workers propagate through
/// parallel processing so the coordinator can restore the original order.
///
/// # Errors
///
/// Returns [`ModelError::InvalidStandardDeviation`] if any candidate sd is
/// not finite and positive. Candidate combinations are validated here, once,
/// before any chunk is dispatched.
pub fn parameter_grid(
    xs: &[f64],
    ys: &[f64],
    sds: &[f64],
) -> Result<Array2<f64>, ModelError> {
    for &sd in sds {
        if !sd.is_finite() || sd <= 0.0 {
            return Err(ModelError::InvalidStandardDeviation(sd));
        }
    }

    let n = xs.len() * ys.len() * sds.len();
    let mut grid = Array2::zeros((n, PARAM_COLS));
    let mut row = 0usize;
    for &x in xs {
        for &y in ys {
            for &sd in sds {
                grid[[row, 0]] = row as f64;
                grid[[row, 1]] = x;
                grid[[row, 2]] = y;
                grid[[row, 3]] = sd;
                row += 1;
            }
        }
    }
    Ok(grid)
}
