//! NIfTI readers: whole-file and streaming volume-by-volume.

use std::path::Path;

use ndarray::{ArrayD, Axis, IxDyn};
use nifti::{IntoNdArray, NiftiObject, ReaderOptions, ReaderStreamedOptions};
use tracing::{debug, info};

use crate::error::IoError;
use crate::volume::Volume;

/// Loads a NIfTI file whole, at f32 precision.
///
/// Returns the data array together with the header and the spatial affine.
/// Read-only and side-effect-free beyond file access.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the path does not exist on disk,
/// or [`IoError::Nifti`] for format-level failures.
pub fn read_volume(path: &Path) -> Result<Volume, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    info!(path = %path.display(), "reading volume");
    let object = ReaderOptions::new().read_file(path)?;
    let header = object.header().clone();
    let data = object.into_volume().into_ndarray::<f32>()?;
    debug!(shape = ?data.shape(), "volume loaded");
    Ok(Volume::new(data, header))
}

/// Loads a NIfTI file volume-by-volume, at f32 precision.
///
/// Bounds peak memory to one volume above the output array, for files too
/// large to decode in one piece. The result is bit-identical to
/// [`read_volume`] for the same input.
///
/// # Errors
///
/// As [`read_volume`], plus [`IoError::SlabShapeMismatch`] if a streamed
/// slab disagrees with the header geometry.
pub fn read_volume_streamed(path: &Path) -> Result<Volume, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    info!(path = %path.display(), "reading volume (streamed)");
    let object = ReaderStreamedOptions::new().read_file(path)?;
    let header = object.header().clone();

    let rank = usize::from(header.dim[0]);
    let shape: Vec<usize> = (1..=rank).map(|i| usize::from(header.dim[i])).collect();
    let slab_shape = &shape[..rank - 1];

    let mut data = ArrayD::<f32>::zeros(IxDyn(&shape));
    for (index, slab) in object.into_volume().enumerate() {
        let slab = slab?.into_ndarray::<f32>()?;
        if slab.shape() != slab_shape {
            return Err(IoError::SlabShapeMismatch {
                index,
                expected: slab_shape.to_vec(),
                got: slab.shape().to_vec(),
            });
        }
        data.index_axis_mut(Axis(rank - 1), index).assign(&slab);
    }
    debug!(shape = ?data.shape(), "volume loaded");
    Ok(Volume::new(data, header))
}
