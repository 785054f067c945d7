//! # tropocorr
//!
//! Tropospheric delay correction for InSAR interferograms.
//!
//! The core of the crate is a bilinear interpolator that resamples a scalar
//! surface (or a stack of surfaces) defined on a rectilinear coordinate grid
//! at arbitrary query points. Around it sit the pieces needed to turn a
//! gridded zenith delay into a per-pixel phase correction and apply it to a
//! complex interferogram.
//!
//! ## Key Features
//!
//! - **Rectilinear grids**: regular grids use a closed-form coordinate
//!   mapping, irregular grids a binary search; both agree on regular grids
//! - **Edge clamping**: queries outside the grid return the boundary value
//! - **Any query shape**: scalars, vectors and meshes come back in the shape
//!   they went in, optionally evaluated in parallel
//! - **Phase correction**: delay-to-phase conversion and complex
//!   multiplication of interferogram pixels
//!
//! ## Architecture
//!
//! - **interpolation**: axes, grid mapping and the bilinear interpolators
//! - **correction / atmosphere**: physics on top of resampled surfaces
//! - **raster / workflow**: raw float32 raster I/O and the apply stage

pub mod atmosphere;
pub mod config;
pub mod correction;
pub mod error;
pub mod interpolation;
pub mod logging;
pub mod raster;
pub mod workflow;

pub use config::Config;
pub use error::{Result, TropoError};
pub use interpolation::{
    AxisMapping, CoordinateAxis, GridInterpolator, LayeredGridInterpolator, RectilinearGrid,
};
pub use logging::{
    generate_operation_id, init_tracing, log_error, log_operation_end, log_operation_start,
    log_raster_stats, log_timed_operation,
};
pub use raster::GridSpec;
pub use workflow::{apply_correction, CorrectionReport};
