//! Error types for the prfmap-model crate.

/// Error type for all fallible operations in the prfmap-model crate.
///
/// Covers parameter validation failures and degenerate model shapes that
/// may occur during kernel or HRF construction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ModelError {
    /// Returned when the visual-space grid has a zero dimension.
    #[error("invalid grid size: {width}x{height} (both dimensions must be positive)")]
    InvalidGridSize {
        /// Requested grid width.
        width: usize,
        /// Requested grid height.
        height: usize,
    },

    /// Returned when the Gaussian standard deviation is not finite and positive.
    #[error("invalid standard deviation: {0} (must be finite and positive)")]
    InvalidStandardDeviation(f64),

    /// Returned when the requested volume count is zero.
    #[error("invalid volume count: 0 (need at least one volume)")]
    InvalidVolumeCount,

    /// Returned when the repetition time is not finite and positive.
    #[error("invalid repetition time: {0} s (must be finite and positive)")]
    InvalidRepetitionTime(f64),

    /// Returned when the unscaled HRF has a non-positive or non-finite
    /// maximum, so the peak cannot be scaled to 1.0.
    #[error("degenerate HRF: maximum of unscaled response is {max}")]
    DegenerateHrf {
        /// Maximum of the unscaled double-gamma curve.
        max: f64,
    },

    /// Returned when gamma density construction fails for the derived
    /// shape parameter.
    #[error("gamma density construction failed for shape {shape}: {message}")]
    GammaConstruction {
        /// Shape parameter passed to the gamma density.
        shape: f64,
        /// Underlying construction error.
        message: String,
    },
}
