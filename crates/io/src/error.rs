//! Error types for the prfmap-io crate.

use std::path::PathBuf;

/// Error type for volumetric file loading and writing.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input path does not exist on disk.
    #[error("file not found: {path}")]
    FileNotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// Returned when an image does not have the expected dimensionality
    /// after dropping singleton axes.
    #[error("expected a {expected}-D image, got {got} non-singleton dimensions")]
    DimensionMismatch {
        /// Expected number of non-singleton dimensions.
        expected: usize,
        /// Actual number of non-singleton dimensions.
        got: usize,
    },

    /// Returned when a streamed slab's shape disagrees with the header.
    #[error("slab {index} has shape {got:?}, header promises {expected:?}")]
    SlabShapeMismatch {
        /// Volume index of the offending slab.
        index: usize,
        /// Shape promised by the file header.
        expected: Vec<usize>,
        /// Shape actually read.
        got: Vec<usize>,
    },

    /// Underlying NIfTI format error.
    #[error(transparent)]
    Nifti(#[from] nifti::NiftiError),
}
