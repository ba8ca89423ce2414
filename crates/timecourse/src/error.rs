//! Error types for the prfmap-timecourse crate.

use prfmap_model::ModelError;
use prfmap_pool::PoolError;

/// Error type for pRF time-course generation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TimeCourseError {
    /// Returned when the parameter grid does not have the expected
    /// (index, x, y, sd) columns.
    #[error("parameter grid has {got} columns, expected {expected}")]
    BadParameterColumns {
        /// Expected column count.
        expected: usize,
        /// Actual column count.
        got: usize,
    },

    /// Returned when the stimulus tensor shape disagrees with the declared
    /// visual-space size or volume count.
    #[error(
        "stimulus shape {got:?} does not match visual space {width}x{height} with {n_volumes} volumes"
    )]
    StimulusShapeMismatch {
        /// Declared visual-space width.
        width: usize,
        /// Declared visual-space height.
        height: usize,
        /// Declared volume count.
        n_volumes: usize,
        /// Actual stimulus tensor shape.
        got: [usize; 3],
    },

    /// Returned when reassembled output does not contain exactly one row
    /// per dispatched parameter combination.
    #[error("aggregation mismatch: dispatched {dispatched} rows, reassembled {got}")]
    AggregationMismatch {
        /// Number of parameter rows dispatched.
        dispatched: usize,
        /// Number of rows reassembled from chunk results.
        got: usize,
    },

    /// Model construction failed (invalid grid, sd, volume count or TR).
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A chunk failed or went missing during parallel dispatch.
    #[error(transparent)]
    Pool(#[from] PoolError),
}
