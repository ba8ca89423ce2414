//! Loaded volume type and header-derived geometry.

use ndarray::{Array2, Array3, ArrayD};
use nifti::NiftiHeader;

use crate::error::IoError;

/// A volumetric image loaded at f32 precision, together with its header
/// and the 4x4 spatial affine describing voxel-to-world positioning.
#[derive(Debug, Clone)]
pub struct Volume {
    data: ArrayD<f32>,
    header: NiftiHeader,
    affine: Array2<f64>,
}

impl Volume {
    pub(crate) fn new(data: ArrayD<f32>, header: NiftiHeader) -> Self {
        let affine = affine_from_header(&header);
        Self {
            data,
            header,
            affine,
        }
    }

    /// The image data, shaped as stored in the file.
    pub fn data(&self) -> &ArrayD<f32> {
        &self.data
    }

    /// Consumes the volume, returning the image data.
    pub fn into_data(self) -> ArrayD<f32> {
        self.data
    }

    /// The file header.
    pub fn header(&self) -> &NiftiHeader {
        &self.header
    }

    /// The 4x4 voxel-to-world affine.
    pub fn affine(&self) -> &Array2<f64> {
        &self.affine
    }

    /// Reinterprets the image as a `[width, height, volumes]` stimulus
    /// tensor at f64 precision, dropping singleton axes.
    ///
    /// Accepts 3-D images directly and higher-rank images whose extra axes
    /// are singletons (a typical stimulus export is `[w, h, 1, t]`).
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if the image does not reduce
    /// to exactly three non-singleton dimensions.
    pub fn to_stimulus_tensor(&self) -> Result<Array3<f64>, IoError> {
        let kept: Vec<usize> = self
            .data
            .shape()
            .iter()
            .copied()
            .filter(|&len| len != 1)
            .collect();
        if kept.len() != 3 {
            return Err(IoError::DimensionMismatch {
                expected: 3,
                got: kept.len(),
            });
        }

        let flat: Vec<f64> = self.data.iter().map(|&v| f64::from(v)).collect();
        let arr = Array3::from_shape_vec((kept[0], kept[1], kept[2]), flat)
            .expect("element count matches the filtered shape");
        Ok(arr)
    }
}

/// Builds the 4x4 spatial affine from a NIfTI header.
///
/// Uses the sform rows when `sform_code > 0`, otherwise falls back to a
/// diagonal scaling by the voxel dimensions.
pub fn affine_from_header(header: &NiftiHeader) -> Array2<f64> {
    let mut affine = Array2::zeros((4, 4));
    if header.sform_code > 0 {
        for (row, srow) in [header.srow_x, header.srow_y, header.srow_z]
            .iter()
            .enumerate()
        {
            for (col, &v) in srow.iter().enumerate() {
                affine[[row, col]] = f64::from(v);
            }
        }
    } else {
        for axis in 0..3 {
            affine[[axis, axis]] = f64::from(header.pixdim[axis + 1]);
        }
    }
    affine[[3, 3]] = 1.0;
    affine
}
