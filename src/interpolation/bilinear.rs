//! Bilinear interpolation.
//!
//! This method performs linear interpolation in two dimensions using
//! the four nearest grid points. Query points outside the grid are clamped
//! onto its boundary, so the result there is the edge value: there is no
//! linear extrapolation and no out-of-domain error.

use ndarray::{Array, Array2, Array3, ArrayBase, ArrayView2, Axis, Data, Dimension, Ix2, Ix3, Zip};
use tracing::debug;

use super::grid::{AxisMapping, Cell, RectilinearGrid};
use crate::error::{Result, TropoError};
use crate::interpolation::common::linear_weight;

/// Weighted sum of the four corners of `cell` in `layer`
pub fn sample(layer: &ArrayView2<f64>, cell: &Cell) -> f64 {
    let (wx0, wx1) = linear_weight(cell.fx);
    let (wy0, wy1) = linear_weight(cell.fy);

    wx0 * wy0 * layer[[cell.y0, cell.x0]]
        + wx1 * wy1 * layer[[cell.y1, cell.x1]]
        + wx0 * wy1 * layer[[cell.y1, cell.x0]]
        + wx1 * wy0 * layer[[cell.y0, cell.x1]]
}

fn sample_at(grid: &RectilinearGrid, layer: &ArrayView2<f64>, x: f64, y: f64) -> f64 {
    if x.is_nan() || y.is_nan() {
        return f64::NAN;
    }
    sample(layer, &grid.cell(x, y))
}

fn check_query_shapes(xq: &[usize], yq: &[usize]) -> Result<()> {
    if xq != yq {
        return Err(TropoError::shape(format!(
            "query x has shape {:?} but query y has shape {:?}",
            xq, yq
        )));
    }
    Ok(())
}

fn check_axis_lengths(grid_shape: (usize, usize), rows: usize, cols: usize) -> Result<()> {
    let (ny, nx) = grid_shape;
    if cols != nx {
        return Err(TropoError::shape(format!(
            "x axis has {} values but data has {} columns",
            nx, cols
        )));
    }
    if rows != ny {
        return Err(TropoError::shape(format!(
            "y axis has {} values but data has {} rows",
            ny, rows
        )));
    }
    Ok(())
}

fn query<S1, S2, D>(
    grid: &RectilinearGrid,
    layer: ArrayView2<f64>,
    xq: &ArrayBase<S1, D>,
    yq: &ArrayBase<S2, D>,
) -> Result<Array<f64, D>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    check_query_shapes(xq.shape(), yq.shape())?;
    Ok(Zip::from(xq)
        .and(yq)
        .map_collect(|&x, &y| sample_at(grid, &layer, x, y)))
}

fn par_query<S1, S2, D>(
    grid: &RectilinearGrid,
    layer: ArrayView2<f64>,
    xq: &ArrayBase<S1, D>,
    yq: &ArrayBase<S2, D>,
) -> Result<Array<f64, D>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    D: Dimension,
{
    check_query_shapes(xq.shape(), yq.shape())?;
    Ok(Zip::from(xq)
        .and(yq)
        .par_map_collect(|&x, &y| sample_at(grid, &layer, x, y)))
}

/// Bilinear interpolator over a single 2D data layer.
///
/// Data is indexed `[row, column]` with rows following the y axis and
/// columns following the x axis. The interpolator owns copies of the axes
/// and data, so later changes to the caller's arrays have no effect.
#[derive(Debug, Clone)]
pub struct GridInterpolator {
    grid: RectilinearGrid,
    data: Array2<f64>,
}

impl GridInterpolator {
    /// Build an interpolator for `data` sampled at `x` × `y`.
    ///
    /// Fails with `ShapeMismatch` when an axis length disagrees with the
    /// matching data dimension, and with `UnsortedAxis` when an axis descends.
    pub fn new<S>(x: &[f64], y: &[f64], data: &ArrayBase<S, Ix2>) -> Result<Self>
    where
        S: Data<Elem = f64>,
    {
        let (rows, cols) = data.dim();
        check_axis_lengths((y.len(), x.len()), rows, cols)?;
        let grid = RectilinearGrid::new(x, y)?;

        Ok(Self {
            grid,
            data: data.to_owned(),
        })
    }

    /// Replace the coordinate mapping chosen from the grid regularity
    pub fn with_mapping(mut self, mapping: AxisMapping) -> Self {
        self.grid = self.grid.with_mapping(mapping);
        self
    }

    pub fn grid(&self) -> &RectilinearGrid {
        &self.grid
    }

    pub fn data(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Interpolate one point
    pub fn interpolate_point(&self, x: f64, y: f64) -> f64 {
        sample_at(&self.grid, &self.data.view(), x, y)
    }

    /// Interpolate every `(xq[i], yq[i])` pair.
    ///
    /// The result has the shape of the query arrays, whatever their
    /// dimensionality. NaN coordinates yield NaN.
    pub fn interpolate<S1, S2, D>(
        &self,
        xq: &ArrayBase<S1, D>,
        yq: &ArrayBase<S2, D>,
    ) -> Result<Array<f64, D>>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D: Dimension,
    {
        query(&self.grid, self.data.view(), xq, yq)
    }

    /// Same as [`GridInterpolator::interpolate`], spread over the rayon pool
    pub fn par_interpolate<S1, S2, D>(
        &self,
        xq: &ArrayBase<S1, D>,
        yq: &ArrayBase<S2, D>,
    ) -> Result<Array<f64, D>>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D: Dimension,
    {
        par_query(&self.grid, self.data.view(), xq, yq)
    }
}

/// Bilinear interpolator over a stack of 2D layers sharing one grid.
///
/// Data is indexed `[layer, row, column]`. Every query names the layer it
/// reads; an out-of-range layer is rejected with `LayerIndex`.
#[derive(Debug, Clone)]
pub struct LayeredGridInterpolator {
    grid: RectilinearGrid,
    data: Array3<f64>,
}

impl LayeredGridInterpolator {
    /// Build an interpolator for a layer stack sampled at `x` × `y`
    pub fn new<S>(x: &[f64], y: &[f64], data: &ArrayBase<S, Ix3>) -> Result<Self>
    where
        S: Data<Elem = f64>,
    {
        let (layers, rows, cols) = data.dim();
        check_axis_lengths((y.len(), x.len()), rows, cols)?;
        let grid = RectilinearGrid::new(x, y)?;
        debug!(layers, "Built layered grid interpolator");

        Ok(Self {
            grid,
            data: data.to_owned(),
        })
    }

    pub fn with_mapping(mut self, mapping: AxisMapping) -> Self {
        self.grid = self.grid.with_mapping(mapping);
        self
    }

    pub fn grid(&self) -> &RectilinearGrid {
        &self.grid
    }

    /// Number of layers in the stack
    pub fn layers(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// View of one layer
    pub fn layer(&self, index: usize) -> Result<ArrayView2<'_, f64>> {
        if index >= self.layers() {
            return Err(TropoError::LayerIndex {
                index,
                layers: self.layers(),
            });
        }
        Ok(self.data.index_axis(Axis(0), index))
    }

    pub fn interpolate_point(&self, x: f64, y: f64, layer: usize) -> Result<f64> {
        let view = self.layer(layer)?;
        Ok(sample_at(&self.grid, &view, x, y))
    }

    /// Interpolate every `(xq[i], yq[i])` pair in one layer
    pub fn interpolate<S1, S2, D>(
        &self,
        xq: &ArrayBase<S1, D>,
        yq: &ArrayBase<S2, D>,
        layer: usize,
    ) -> Result<Array<f64, D>>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D: Dimension,
    {
        query(&self.grid, self.layer(layer)?, xq, yq)
    }

    pub fn par_interpolate<S1, S2, D>(
        &self,
        xq: &ArrayBase<S1, D>,
        yq: &ArrayBase<S2, D>,
        layer: usize,
    ) -> Result<Array<f64, D>>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
        D: Dimension,
    {
        par_query(&self.grid, self.layer(layer)?, xq, yq)
    }
}
