//! HRF convolution of pixel-wise stimulus time courses.

use ndarray::{Array2, ArrayView2, Axis, concatenate, s};
use tracing::{debug, info};

use crate::error::ConvolveError;

/// Trailing zeros appended to both the stimulus row and the HRF copy
/// before convolution, so the response can run out past the end of the
/// acquisition instead of being cut off at the boundary.
pub const EDGE_PAD: usize = 100;

/// Full linear convolution of two sequences.
///
/// Output length is `a.len() + b.len() - 1`, matching numpy's
/// `convolve(..., mode="full")`.
fn convolve_full(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &av) in a.iter().enumerate() {
        for (j, &bv) in b.iter().enumerate() {
            out[i + j] += av * bv;
        }
    }
    out
}

/// Convolves each pixel row of `chunk` with the HRF and truncates to the
/// first `n_volumes` samples.
///
/// Every iteration pads a fresh copy of the canonical HRF; the caller's
/// sequence is never mutated or re-extended across pixels. Output shape is
/// `[chunk_pixels, n_volumes]` regardless of the input row length (samples
/// past the end of the convolution are zero).
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ConvolveError::InvalidVolumeCount`] | `n_volumes == 0` |
/// | [`ConvolveError::EmptyHrf`] | `hrf` is empty |
pub fn convolve_pixels(
    chunk: ArrayView2<'_, f64>,
    hrf: &[f64],
    n_volumes: usize,
) -> Result<Array2<f64>, ConvolveError> {
    if n_volumes == 0 {
        return Err(ConvolveError::InvalidVolumeCount);
    }
    if hrf.is_empty() {
        return Err(ConvolveError::EmptyHrf);
    }

    let n_pixels = chunk.nrows();
    let mut out = Array2::zeros((n_pixels, n_volumes));

    for (pixel, row) in chunk.outer_iter().enumerate() {
        let mut design: Vec<f64> = row.iter().copied().collect();
        design.extend(std::iter::repeat(0.0).take(EDGE_PAD));

        // Fresh zero-padded copy of the canonical HRF per pixel.
        let mut padded_hrf: Vec<f64> = hrf.to_vec();
        padded_hrf.extend(std::iter::repeat(0.0).take(EDGE_PAD));

        let full = convolve_full(&design, &padded_hrf);
        for (t, slot) in out.row_mut(pixel).iter_mut().enumerate() {
            *slot = full.get(t).copied().unwrap_or(0.0);
        }
    }
    Ok(out)
}

/// Convolves the whole `[pixels, volumes]` stimulus with the HRF across
/// parallel workers.
///
/// Pixel rows are split into contiguous chunks, one worker per chunk. All
/// chunks are dispatched before any result is collected; each worker emits
/// `(chunk_index, convolved_chunk)` on the shared result channel and the
/// output is reassembled in dispatch-index order, so completion order does
/// not matter. Any chunk whose row count does not match the dispatched
/// range aborts the whole batch.
///
/// # Errors
///
/// In addition to the [`convolve_pixels`] errors:
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ConvolveError::AggregationMismatch`] | chunk returned the wrong number of rows |
/// | [`ConvolveError::Pool`] | a chunk failed or went missing |
pub fn convolve_stimulus(
    stimulus: ArrayView2<'_, f64>,
    hrf: &[f64],
    n_volumes: usize,
    n_chunks: usize,
) -> Result<Array2<f64>, ConvolveError> {
    if n_volumes == 0 {
        return Err(ConvolveError::InvalidVolumeCount);
    }
    if hrf.is_empty() {
        return Err(ConvolveError::EmptyHrf);
    }

    let n_pixels = stimulus.nrows();
    if n_pixels == 0 {
        return Ok(Array2::zeros((0, n_volumes)));
    }

    info!(n_pixels, n_chunks, n_volumes, "convolving pixel time courses");

    let chunks = prfmap_pool::run_chunked(n_pixels, n_chunks, |index, range| {
        debug!(chunk = index, start = range.start, end = range.end, "convolving chunk");
        convolve_pixels(stimulus.slice(s![range.start..range.end, ..]), hrf, n_volumes)
    })?;

    // Chunk boundaries are known a priori, so reassembly is keyed by the
    // dispatch index alone.
    let ranges = prfmap_pool::partition(n_pixels, n_chunks);
    for (index, (chunk, range)) in chunks.iter().zip(ranges.iter()).enumerate() {
        if chunk.nrows() != range.len() {
            return Err(ConvolveError::AggregationMismatch {
                chunk: index,
                dispatched: range.len(),
                got: chunk.nrows(),
            });
        }
    }

    let views: Vec<ArrayView2<'_, f64>> = chunks.iter().map(|c| c.view()).collect();
    let out = concatenate(Axis(0), &views).expect("chunk shapes verified above");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn full_convolution_matches_hand_result() {
        let out = convolve_full(&[1.0, 2.0, 3.0], &[0.0, 1.0, 0.5]);
        assert_eq!(out.len(), 5);
        assert_relative_eq!(out[0], 0.0);
        assert_relative_eq!(out[1], 1.0);
        assert_relative_eq!(out[2], 2.5);
        assert_relative_eq!(out[3], 4.0);
        assert_relative_eq!(out[4], 1.5);
    }

    #[test]
    fn impulse_stimulus_reproduces_hrf() {
        // A unit impulse at t = 0 convolved with the HRF returns the HRF.
        let hrf = prfmap_model::hrf(20, 2.0).unwrap();
        let mut stimulus = Array2::zeros((1, 20));
        stimulus[[0, 0]] = 1.0;

        let out = convolve_pixels(stimulus.view(), &hrf, 20).unwrap();
        for t in 0..20 {
            assert_relative_eq!(out[[0, t]], hrf[t], epsilon = 1e-12);
        }
    }

    #[test]
    fn delayed_impulse_shifts_response() {
        let hrf = prfmap_model::hrf(20, 2.0).unwrap();
        let mut stimulus = Array2::zeros((1, 20));
        stimulus[[0, 5]] = 1.0;

        let out = convolve_pixels(stimulus.view(), &hrf, 20).unwrap();
        for t in 0..5 {
            assert_relative_eq!(out[[0, t]], 0.0);
        }
        for t in 5..20 {
            assert_relative_eq!(out[[0, t]], hrf[t - 5], epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_stimulus_yields_zero_output() {
        let hrf = prfmap_model::hrf(16, 2.0).unwrap();
        let stimulus = Array2::zeros((4, 16));
        let out = convolve_pixels(stimulus.view(), &hrf, 16).unwrap();
        assert_eq!(out.dim(), (4, 16));
        assert!(out.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn output_length_is_volume_count_regardless_of_input_length() {
        let hrf = vec![1.0, 0.5];
        // Stimulus rows shorter than the target volume count.
        let stimulus = array![[1.0, 0.0, 0.0]];
        let out = convolve_pixels(stimulus.view(), &hrf, 10).unwrap();
        assert_eq!(out.ncols(), 10);
        assert_relative_eq!(out[[0, 0]], 1.0);
        assert_relative_eq!(out[[0, 1]], 0.5);
        for t in 2..10 {
            assert_relative_eq!(out[[0, t]], 0.0);
        }
    }

    #[test]
    fn canonical_hrf_not_mutated_across_pixels() {
        // Every pixel must see the same HRF; repeated in-place padding
        // would make later rows differ.
        let hrf = prfmap_model::hrf(12, 2.0).unwrap();
        let hrf_before = hrf.clone();
        let mut stimulus = Array2::zeros((50, 12));
        for p in 0..50 {
            stimulus[[p, 0]] = 1.0;
        }

        let out = convolve_pixels(stimulus.view(), &hrf, 12).unwrap();
        assert_eq!(hrf, hrf_before);
        let first = out.row(0).to_owned();
        for p in 1..50 {
            for t in 0..12 {
                assert_relative_eq!(out[[p, t]], first[t]);
            }
        }
    }

    #[test]
    fn parallel_driver_matches_sequential() {
        let hrf = prfmap_model::hrf(24, 2.0).unwrap();
        let stimulus =
            Array2::from_shape_fn((37, 24), |(p, t)| ((p * 7 + t * 3) % 5) as f64 / 4.0);

        let sequential = convolve_pixels(stimulus.view(), &hrf, 24).unwrap();
        for n_chunks in [1, 2, 3, 5, 8, 37, 100] {
            let parallel = convolve_stimulus(stimulus.view(), &hrf, 24, n_chunks).unwrap();
            assert_eq!(parallel.dim(), sequential.dim());
            for (a, b) in parallel.iter().zip(sequential.iter()) {
                assert_relative_eq!(a, b, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn rejects_zero_volume_count() {
        let stimulus = Array2::zeros((2, 8));
        assert!(matches!(
            convolve_pixels(stimulus.view(), &[1.0], 0),
            Err(ConvolveError::InvalidVolumeCount)
        ));
        assert!(matches!(
            convolve_stimulus(stimulus.view(), &[1.0], 0, 2),
            Err(ConvolveError::InvalidVolumeCount)
        ));
    }

    #[test]
    fn rejects_empty_hrf() {
        let stimulus = Array2::zeros((2, 8));
        assert!(matches!(
            convolve_pixels(stimulus.view(), &[], 8),
            Err(ConvolveError::EmptyHrf)
        ));
    }

    #[test]
    fn empty_stimulus_yields_empty_output() {
        let out = convolve_stimulus(Array2::zeros((0, 8)).view(), &[1.0], 8, 4).unwrap();
        assert_eq!(out.dim(), (0, 8));
    }
}
