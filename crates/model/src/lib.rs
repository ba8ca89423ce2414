//! # prfmap-model
//!
//! Population receptive field (pRF) model primitives: the 2-D Gaussian
//! receptive-field kernel, the canonical double-gamma hemodynamic response
//! function (HRF), and the candidate parameter grid.
//!
//! ## Conventions
//!
//! | Object | Shape | Axes |
//! |--------|-------|------|
//! | Gaussian kernel | `[width, height]` | axis 0 = x, axis 1 = y |
//! | Stimulus tensor | `[width, height, volumes]` | spatial axes as above, time last |
//! | Parameter grid | `[K, 4]` | columns: index, x, y, sd |
//! | HRF | `[volumes]` | one sample per imaging volume |
//!
//! All constructors are pure and deterministic: calling them twice with the
//! same arguments produces identical output, and nothing is cached or
//! mutated, so they are safe to call concurrently from many workers.
//!
//! ## Quick start
//!
//! ```
//! use prfmap_model::{gaussian_kernel, hrf};
//!
//! let kernel = gaussian_kernel(10, 10, 5.0, 5.0, 2.0).unwrap();
//! assert_eq!(kernel.dim(), (10, 10));
//!
//! let h = hrf(20, 2.0).unwrap();
//! assert_eq!(h.iter().cloned().fold(f64::NEG_INFINITY, f64::max), 1.0);
//! ```

mod error;
mod gaussian;
mod grid;
mod hrf;

pub use error::ModelError;
pub use gaussian::gaussian_kernel;
pub use grid::{PARAM_COLS, linspace, parameter_grid};
pub use hrf::hrf;
