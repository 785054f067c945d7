//! Rectilinear grid geometry and coordinate-to-cell mapping.

use tracing::debug;

use crate::error::Result;
use crate::interpolation::axis::CoordinateAxis;
use crate::interpolation::common;

/// How query coordinates are turned into fractional grid indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisMapping {
    /// Closed-form rescale between the axis endpoints (regular grids)
    Affine,
    /// Binary search for the bracketing nodes (any ascending grid)
    Search,
}

/// The interpolation cell of one query point.
///
/// `(x0, y0)` is the lower node, `(x1, y1)` the upper node, and `fx`/`fy`
/// are the fractional offsets inside the cell, both in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub x0: usize,
    pub x1: usize,
    pub y0: usize,
    pub y1: usize,
    pub fx: f64,
    pub fy: f64,
}

/// Two coordinate axes spanning a rectilinear grid
#[derive(Debug, Clone, PartialEq)]
pub struct RectilinearGrid {
    x: CoordinateAxis,
    y: CoordinateAxis,
    mapping: AxisMapping,
}

impl RectilinearGrid {
    /// Validate both axes and pick the mapping from their regularity
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self> {
        let x = CoordinateAxis::new("x", x)?;
        let y = CoordinateAxis::new("y", y)?;
        let mapping = if x.is_regular() && y.is_regular() {
            AxisMapping::Affine
        } else {
            AxisMapping::Search
        };

        debug!(
            nx = x.len(),
            ny = y.len(),
            x_range = ?(x.first(), x.last()),
            y_range = ?(y.first(), y.last()),
            mapping = ?mapping,
            "Built rectilinear grid"
        );

        Ok(Self { x, y, mapping })
    }

    /// Override the mapping chosen at construction.
    ///
    /// `Search` is exact on every ascending grid. `Affine` on an irregular
    /// grid treats the axes as evenly spaced between their endpoints.
    pub fn with_mapping(mut self, mapping: AxisMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn x(&self) -> &CoordinateAxis {
        &self.x
    }

    pub fn y(&self) -> &CoordinateAxis {
        &self.y
    }

    pub fn nx(&self) -> usize {
        self.x.len()
    }

    pub fn ny(&self) -> usize {
        self.y.len()
    }

    /// Grid shape in array order, `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.ny(), self.nx())
    }

    pub fn mapping(&self) -> AxisMapping {
        self.mapping
    }

    /// Whether both axes passed the regularity check
    pub fn is_regular(&self) -> bool {
        self.x.is_regular() && self.y.is_regular()
    }

    /// Unclamped fractional indices of a query point
    pub fn fractional_index(&self, x: f64, y: f64) -> (f64, f64) {
        match self.mapping {
            AxisMapping::Affine => (self.x.affine_index(x), self.y.affine_index(y)),
            AxisMapping::Search => (self.x.search_index(x), self.y.search_index(y)),
        }
    }

    /// The clamped interpolation cell of a query point.
    ///
    /// Points outside the grid land on the nearest edge cell, so their
    /// interpolated value is the boundary value.
    pub fn cell(&self, x: f64, y: f64) -> Cell {
        let (xf, yf) = self.fractional_index(x, y);
        let (x0, x1, fx) = common::bracket(xf, self.nx());
        let (y0, y1, fy) = common::bracket(yf, self.ny());
        Cell {
            x0,
            x1,
            y0,
            y1,
            fx,
            fy,
        }
    }
}
