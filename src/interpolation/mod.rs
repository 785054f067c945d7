//! Interpolation of gridded data at arbitrary query points.
//!
//! A [`RectilinearGrid`] maps query coordinates to interpolation cells; the
//! bilinear interpolators combine a grid with either one data layer
//! ([`GridInterpolator`]) or a stack of layers ([`LayeredGridInterpolator`]).

pub mod axis;
pub mod bilinear;
pub mod common;
pub mod grid;

pub use axis::{CoordinateAxis, REGULARITY_TOLERANCE};
pub use bilinear::{GridInterpolator, LayeredGridInterpolator};
pub use grid::{AxisMapping, Cell, RectilinearGrid};
