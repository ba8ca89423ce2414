//! Error types for the prfmap-convolve crate.

use prfmap_pool::PoolError;

/// Error type for the per-pixel HRF convolution stage.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConvolveError {
    /// Returned when the requested volume count is zero.
    #[error("invalid volume count: 0 (need at least one volume)")]
    InvalidVolumeCount,

    /// Returned when the HRF sequence is empty.
    #[error("empty HRF sequence")]
    EmptyHrf,

    /// Returned when a chunk result does not match the dispatched chunk
    /// size; the coordinator refuses to assemble partial output.
    #[error("aggregation mismatch in chunk {chunk}: dispatched {dispatched} pixels, got {got}")]
    AggregationMismatch {
        /// Index of the offending chunk.
        chunk: usize,
        /// Number of pixel rows dispatched to the chunk.
        dispatched: usize,
        /// Number of pixel rows the chunk returned.
        got: usize,
    },

    /// A chunk failed or went missing during parallel dispatch.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_volume_count() {
        let err = ConvolveError::InvalidVolumeCount;
        assert_eq!(
            err.to_string(),
            "invalid volume count: 0 (need at least one volume)"
        );
    }

    #[test]
    fn error_empty_hrf() {
        assert_eq!(ConvolveError::EmptyHrf.to_string(), "empty HRF sequence");
    }

    #[test]
    fn error_aggregation_mismatch() {
        let err = ConvolveError::AggregationMismatch {
            chunk: 2,
            dispatched: 64,
            got: 60,
        };
        assert_eq!(
            err.to_string(),
            "aggregation mismatch in chunk 2: dispatched 64 pixels, got 60"
        );
    }

    #[test]
    fn error_wraps_pool_error() {
        let err: ConvolveError = PoolError::MissingChunk { chunk: 1 }.into();
        assert_eq!(err.to_string(), "chunk 1 never returned a result");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<ConvolveError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ConvolveError>();
    }
}
