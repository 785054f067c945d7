//! Common utilities for interpolation algorithms.
//!
//! Coordinates are first mapped to fractional grid indices, then clamped into
//! the grid and split into an integer cell plus a fractional weight.

/// Fractional index reported for coordinates left of the first axis value
pub const LEFT_OF_GRID: f64 = -1.0;

/// Map a coordinate to a fractional grid index by binary search.
///
/// `coord_values` must be ascending. Coordinates before the first value map
/// to [`LEFT_OF_GRID`]; coordinates beyond the last bracket map to
/// `coord_values.len()`. Both sentinels are meant to be clamped afterwards.
pub fn coord_to_index(coord: f64, coord_values: &[f64]) -> f64 {
    let size = coord_values.len();
    let insertion = coord_values.partition_point(|&v| v < coord);
    if insertion == 0 {
        return LEFT_OF_GRID;
    }

    let lower = insertion - 1;
    if lower + 1 >= size {
        return size as f64;
    }

    let (lo, hi) = (coord_values[lower], coord_values[lower + 1]);
    lower as f64 + (coord - lo) / (hi - lo)
}

/// Map a coordinate to a fractional grid index on an evenly spaced axis
pub fn affine_index(coord: f64, first: f64, last: f64, size: usize) -> f64 {
    (size - 1) as f64 * (coord - first) / (last - first)
}

/// Clamp an index to valid bounds
pub fn clamp_index(index: f64, size: usize) -> f64 {
    index.max(0.0).min((size - 1) as f64)
}

/// Get the weight for linear interpolation
pub fn linear_weight(fraction: f64) -> (f64, f64) {
    (1.0 - fraction, fraction)
}

/// Split a fractional index into `(lower, upper, fraction)` after clamping.
///
/// At the last grid line the cell collapses to zero width: `lower == upper`
/// and the fraction is zero.
pub fn bracket(index: f64, size: usize) -> (usize, usize, f64) {
    let clamped = clamp_index(index, size);
    let lower = clamped.floor() as usize;
    let upper = (lower + 1).min(size - 1);
    (lower, upper, clamped - lower as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(-1.0, 10), 0.0);
        assert_eq!(clamp_index(5.5, 10), 5.5);
        assert_eq!(clamp_index(15.0, 10), 9.0);
    }

    #[test]
    fn test_linear_weight() {
        let (w0, w1) = linear_weight(0.3);
        assert!((w0 - 0.7).abs() < 1e-10);
        assert!((w1 - 0.3).abs() < 1e-10);
        assert!((w0 + w1 - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_coord_to_index_inside() {
        let axis = [0.0, 1.0, 3.0, 7.0];
        assert!((coord_to_index(0.5, &axis) - 0.5).abs() < 1e-12);
        assert!((coord_to_index(2.0, &axis) - 1.5).abs() < 1e-12);
        assert!((coord_to_index(6.0, &axis) - 2.75).abs() < 1e-12);
        // Interior nodes land in the bracket to their left at fraction 1
        assert!((coord_to_index(3.0, &axis) - 2.0).abs() < 1e-12);
        assert!((coord_to_index(7.0, &axis) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_coord_to_index_sentinels() {
        let axis = [0.0, 1.0, 3.0, 7.0];
        assert_eq!(coord_to_index(-0.1, &axis), LEFT_OF_GRID);
        // The first node itself sorts before every value and takes the sentinel
        assert_eq!(coord_to_index(0.0, &axis), LEFT_OF_GRID);
        assert_eq!(coord_to_index(7.5, &axis), 4.0);
        assert_eq!(coord_to_index(f64::NAN, &axis), LEFT_OF_GRID);
    }

    #[test]
    fn test_affine_index() {
        assert_eq!(affine_index(0.0, 0.0, 2.0, 3), 0.0);
        assert_eq!(affine_index(1.5, 0.0, 2.0, 3), 1.5);
        assert_eq!(affine_index(4.0, 0.0, 2.0, 3), 4.0);
        assert_eq!(affine_index(-1.0, 10.0, 20.0, 11), -11.0);
    }

    #[test]
    fn test_bracket() {
        assert_eq!(bracket(0.25, 3), (0, 1, 0.25));
        assert_eq!(bracket(-3.0, 3), (0, 1, 0.0));
        assert_eq!(bracket(2.0, 3), (2, 2, 0.0));
        assert_eq!(bracket(17.0, 3), (2, 2, 0.0));
        assert_eq!(bracket(1.0, 3), (1, 2, 0.0));
    }
}
