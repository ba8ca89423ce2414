//! NIfTI writing for pipeline outputs.

use std::path::Path;

use ndarray::{ArrayBase, Data, Dimension, RemoveAxis};
use nifti::writer::WriterOptions;
use tracing::info;

use crate::error::IoError;

/// Writes an f32 array to a NIfTI file at `path`.
///
/// The on-disk datatype follows the element type; geometry metadata is the
/// writer's default (identity orientation), which is appropriate for model
/// outputs that do not live in scanner space.
pub fn write_volume<S, D>(path: &Path, data: &ArrayBase<S, D>) -> Result<(), IoError>
where
    S: Data<Elem = f32>,
    D: Dimension + RemoveAxis,
{
    info!(path = %path.display(), shape = ?data.shape(), "writing volume");
    WriterOptions::new(path).write_nifti(data)?;
    Ok(())
}
