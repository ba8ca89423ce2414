//! Bridging from TOML configuration to library-level inputs.

use anyhow::{Result, bail};
use ndarray::Array2;
use prfmap_model::{linspace, parameter_grid};

use crate::config::{AxisToml, ModelToml};

/// Expands one configured axis into its candidate values.
fn build_axis(axis: &AxisToml, name: &str) -> Result<Vec<f64>> {
    if axis.n == 0 {
        bail!("[model].{name}: n must be at least 1");
    }
    if !(axis.min.is_finite() && axis.max.is_finite()) {
        bail!("[model].{name}: min/max must be finite");
    }
    Ok(linspace(axis.min, axis.max, axis.n))
}

/// Builds the full candidate parameter grid from the model section.
pub fn build_parameter_grid(model: &ModelToml) -> Result<Array2<f64>> {
    let xs = build_axis(&model.x_positions, "x_positions")?;
    let ys = build_axis(&model.y_positions, "y_positions")?;
    let sds = build_axis(&model.prf_sizes, "prf_sizes")?;
    Ok(parameter_grid(&xs, &ys, &sds)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_from_default_model_section() {
        let model = ModelToml::default();
        let grid = build_parameter_grid(&model).unwrap();
        assert_eq!(grid.dim(), (40 * 40 * 40, 4));
    }

    #[test]
    fn zero_count_axis_is_rejected() {
        let mut model = ModelToml::default();
        model.prf_sizes.n = 0;
        let err = build_parameter_grid(&model).unwrap_err();
        assert!(err.to_string().contains("prf_sizes"));
    }

    #[test]
    fn non_positive_sizes_are_rejected() {
        let mut model = ModelToml::default();
        model.prf_sizes.min = 0.0;
        assert!(build_parameter_grid(&model).is_err());
    }
}
