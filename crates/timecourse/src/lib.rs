//! # prfmap-timecourse
//!
//! Parallel generation of pRF model time courses across a candidate
//! parameter grid.
//!
//! For every `(index, x, y, sd)` row, a Gaussian receptive-field kernel is
//! projected onto the supersampled stimulus tensor and reduced to a scalar
//! time course per volume. Rows are processed in contiguous chunks on
//! parallel workers; each output row carries its original grid index in
//! column 0 and the coordinator restores the global order from that column
//! alone.
//!
//! ```text
//! generate_time_courses()
//!   ├─ validate grid, stimulus, sd     (before dispatch)
//!   ├─ prfmap_pool::run_chunked()      one worker per chunk
//!   │    └─ time_course_chunk()        kernel → weight → reduce
//!   └─ sort by embedded index column   exactly K rows or error
//! ```

mod coordinator;
mod error;
mod worker;

pub use coordinator::generate_time_courses;
pub use error::TimeCourseError;
pub use worker::time_course_chunk;
