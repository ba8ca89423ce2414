//! Error types for the prfmap-pool crate.

/// Error type for chunk dispatch and result collection.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PoolError {
    /// Returned when a worker's job failed; carries the chunk identity so
    /// the caller can localize the failing range.
    #[error("chunk {chunk} failed: {message}")]
    ChunkFailed {
        /// Index of the failed chunk.
        chunk: usize,
        /// Display of the worker's error.
        message: String,
    },

    /// Returned when a dispatched chunk never produced a result.
    #[error("chunk {chunk} never returned a result")]
    MissingChunk {
        /// Index of the missing chunk.
        chunk: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_chunk_failed() {
        let err = PoolError::ChunkFailed {
            chunk: 3,
            message: "invalid standard deviation: 0".into(),
        };
        assert_eq!(
            err.to_string(),
            "chunk 3 failed: invalid standard deviation: 0"
        );
    }

    #[test]
    fn error_missing_chunk() {
        let err = PoolError::MissingChunk { chunk: 7 };
        assert_eq!(err.to_string(), "chunk 7 never returned a result");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<PoolError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<PoolError>();
    }
}
