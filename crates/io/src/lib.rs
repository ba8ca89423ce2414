//! # prfmap-io
//!
//! NIfTI volume loading and writing for the pRF model pipeline.
//!
//! Two loaders with identical results: [`read_volume`] decodes the whole
//! file at once, [`read_volume_streamed`] goes volume-by-volume to bound
//! memory on large 4-D acquisitions. Both return a [`Volume`] carrying the
//! f32 data array, the file header, and the 4x4 spatial affine.

mod error;
mod read;
mod volume;
mod write;

pub use error::IoError;
pub use read::{read_volume, read_volume_streamed};
pub use volume::{Volume, affine_from_header};
pub use write::write_volume;
