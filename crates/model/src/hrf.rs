//! Canonical double-gamma hemodynamic response function.

use statrs::distribution::{Continuous, Gamma};

use crate::error::ModelError;

/// Relative weight of the post-stimulus undershoot.
const UNDERSHOOT_WEIGHT: f64 = 0.35;

/// Builds the canonical double-gamma HRF sampled at volume indices
/// `0..n_volumes`, one value per imaging volume.
///
/// The response is the gamma density with shape `6.0 / tr` minus 0.35
/// times the gamma density with shape `12.0 / tr` (both with unit rate),
/// then divided by its own maximum so the peak equals exactly 1.0.
///
/// Deterministic for a given `(n_volumes, tr)`; the returned sequence is
/// read-only from the caller's point of view and is shared across workers
/// by reference.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ModelError::InvalidVolumeCount`] | `n_volumes == 0` |
/// | [`ModelError::InvalidRepetitionTime`] | `tr` not finite or `tr <= 0` |
/// | [`ModelError::DegenerateHrf`] | unscaled maximum is not finite and positive |
pub fn hrf(n_volumes: usize, tr: f64) -> Result<Vec<f64>, ModelError> {
    if n_volumes == 0 {
        return Err(ModelError::InvalidVolumeCount);
    }
    if !tr.is_finite() || tr <= 0.0 {
        return Err(ModelError::InvalidRepetitionTime(tr));
    }

    // Expected peak and undershoot times in volume units.
    let peak_shape = 6.0 / tr;
    let undershoot_shape = 12.0 / tr;

    let peak = gamma_pdf_at_volumes(n_volumes, peak_shape)?;
    let undershoot = gamma_pdf_at_volumes(n_volumes, undershoot_shape)?;

    let mut response: Vec<f64> = peak
        .iter()
        .zip(undershoot.iter())
        .map(|(&p, &u)| p - UNDERSHOOT_WEIGHT * u)
        .collect();

    let max = response.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() || max <= 0.0 {
        return Err(ModelError::DegenerateHrf { max });
    }

    for v in response.iter_mut() {
        *v /= max;
    }
    Ok(response)
}

/// Gamma density with the given shape and unit rate, evaluated at the
/// integer sample points `0..n`.
fn gamma_pdf_at_volumes(n: usize, shape: f64) -> Result<Vec<f64>, ModelError> {
    let dist = Gamma::new(shape, 1.0).map_err(|e| ModelError::GammaConstruction {
        shape,
        message: e.to_string(),
    })?;
    Ok((0..n).map(|t| dist.pdf(t as f64)).collect())
}
