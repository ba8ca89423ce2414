//! 2-D Gaussian receptive-field kernel over the supersampled visual space.

use ndarray::Array2;

use crate::error::ModelError;

/// Builds a 2-D Gaussian kernel over a `width` x `height` grid.
///
/// Cell `(i, j)` holds
/// `exp(-((i - x)^2 + (j - y)^2) / (2 sd^2)) / (2 pi sd^2)`,
/// so the kernel is a sampled bivariate normal density: it integrates to
/// unit mass when the grid comfortably contains the support. Downstream
/// time-course generation relies on this built-in normalization and does
/// not divide by the kernel sum again.
///
/// Axis convention: axis 0 is x (width), axis 1 is y (height). The stimulus
/// tensor uses the same `[width, height, volumes]` layout, so the kernel
/// can weight it element-wise without transposition.
///
/// The center `(x, y)` is not clamped to the grid: positions outside
/// `[0, width) x [0, height)` are legal and simply leave rapidly decaying
/// weight at the nearest edge.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ModelError::InvalidGridSize`] | `width == 0` or `height == 0` |
/// | [`ModelError::InvalidStandardDeviation`] | `sd` not finite or `sd <= 0` |
pub fn gaussian_kernel(
    width: usize,
    height: usize,
    x: f64,
    y: f64,
    sd: f64,
) -> Result<Array2<f64>, ModelError> {
    if width == 0 || height == 0 {
        return Err(ModelError::InvalidGridSize { width, height });
    }
    if !sd.is_finite() || sd <= 0.0 {
        return Err(ModelError::InvalidStandardDeviation(sd));
    }

    let two_sd_sq = 2.0 * sd * sd;
    let norm = 1.0 / (2.0 * std::f64::consts::PI * sd * sd);

    Ok(Array2::from_shape_fn((width, height), |(i, j)| {
        let dx = i as f64 - x;
        let dy = j as f64 - y;
        (-(dx * dx + dy * dy) / two_sd_sq).exp() * norm
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn kernel_peak_is_at_center() {
        // Concrete scenario: 10x10 grid, center (5, 5), sd 2.
        let kernel = gaussian_kernel(10, 10, 5.0, 5.0, 2.0).unwrap();

        let peak = kernel[[5, 5]];
        let mut n_at_peak = 0;
        for &v in kernel.iter() {
            assert!(v <= peak);
            if v == peak {
                n_at_peak += 1;
            }
        }
        // The peak is the unique maximum.
        assert_eq!(n_at_peak, 1);
        assert_relative_eq!(peak, 1.0 / (2.0 * std::f64::consts::PI * 4.0));
    }

    #[test]
    fn kernel_values_strictly_positive() {
        let kernel = gaussian_kernel(20, 20, 3.0, 17.0, 1.5).unwrap();
        assert!(kernel.iter().all(|&v| v > 0.0));
    }

    #[test]
    fn kernel_sums_to_unit_mass() {
        // sd = 2 with the center 10 pixels from every edge: essentially the
        // whole support lies inside the grid, so the sampled density sums
        // to 1 within discretization error.
        let kernel = gaussian_kernel(21, 21, 10.0, 10.0, 2.0).unwrap();
        let total: f64 = kernel.iter().sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn kernel_symmetric_under_xy_reflection() {
        // On a square grid with the center on the diagonal, swapping the
        // roles of x and y must transpose the kernel exactly.
        let kernel = gaussian_kernel(16, 16, 4.0, 11.0, 3.0).unwrap();
        let swapped = gaussian_kernel(16, 16, 11.0, 4.0, 3.0).unwrap();
        for i in 0..16 {
            for j in 0..16 {
                assert_relative_eq!(kernel[[i, j]], swapped[[j, i]], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn kernel_axis_order_x_is_axis_zero() {
        // Off-center along x only: the maximum over axis 0 must sit at
        // index x, not y.
        let kernel = gaussian_kernel(8, 4, 6.0, 1.0, 1.0).unwrap();
        assert_eq!(kernel.dim(), (8, 4));
        let peak = kernel
            .indexed_iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(idx, _)| idx)
            .unwrap();
        assert_eq!(peak, (6, 1));
    }

    #[test]
    fn kernel_center_outside_grid_is_legal() {
        let kernel = gaussian_kernel(10, 10, -4.0, 15.0, 2.0).unwrap();
        // All mass decays towards the nearest corner; still strictly positive.
        assert!(kernel.iter().all(|&v| v > 0.0));
        let total: f64 = kernel.iter().sum();
        assert!(total < 0.5);
    }

    #[test]
    fn kernel_deterministic() {
        let a = gaussian_kernel(32, 24, 7.3, 11.9, 2.5).unwrap();
        let b = gaussian_kernel(32, 24, 7.3, 11.9, 2.5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn kernel_rejects_zero_width() {
        assert!(matches!(
            gaussian_kernel(0, 10, 0.0, 0.0, 1.0),
            Err(ModelError::InvalidGridSize { width: 0, height: 10 })
        ));
    }

    #[test]
    fn kernel_rejects_zero_height() {
        assert!(matches!(
            gaussian_kernel(10, 0, 0.0, 0.0, 1.0),
            Err(ModelError::InvalidGridSize { width: 10, height: 0 })
        ));
    }

    #[test]
    fn kernel_rejects_bad_sd() {
        assert!(gaussian_kernel(10, 10, 5.0, 5.0, 0.0).is_err());
        assert!(gaussian_kernel(10, 10, 5.0, 5.0, -2.0).is_err());
        assert!(gaussian_kernel(10, 10, 5.0, 5.0, f64::NAN).is_err());
        assert!(gaussian_kernel(10, 10, 5.0, 5.0, f64::INFINITY).is_err());
    }
}
