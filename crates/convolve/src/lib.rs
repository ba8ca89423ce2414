//! # prfmap-convolve
//!
//! Convolution of pixel-wise stimulus "design matrices" with a hemodynamic
//! response function.
//!
//! Each pixel of the stimulus tensor carries a time course of stimulus
//! presence. Convolving every pixel with the HRF turns those into expected
//! signal time courses; this stage is independent of pRF time-course
//! reduction and can run before or after it, at the caller's choice.
//!
//! ```text
//! convolve_stimulus()
//!   ├─ prfmap_pool::partition()     contiguous pixel chunks
//!   ├─ convolve_pixels()            per chunk, on a worker thread
//!   └─ reassemble by chunk index    dispatch order, not completion order
//! ```

mod convolve;
mod error;

pub use convolve::{EDGE_PAD, convolve_pixels, convolve_stimulus};
pub use error::ConvolveError;
