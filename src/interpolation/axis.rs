//! Coordinate axes of a rectilinear grid.

use crate::error::{Result, TropoError};
use crate::interpolation::common;

/// Largest spread between successive spacings for an axis to count as regular
pub const REGULARITY_TOLERANCE: f64 = 1e-4;

/// An owned, ascending sequence of grid coordinates.
///
/// Only the endpoints are checked for order: an axis whose last value is
/// below its first value is rejected rather than reversed. Interior values
/// are expected to be non-decreasing.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateAxis {
    name: String,
    values: Vec<f64>,
}

impl CoordinateAxis {
    /// Validate and copy an axis.
    ///
    /// `name` only appears in error messages.
    pub fn new(name: &str, values: &[f64]) -> Result<Self> {
        if values.len() < 2 {
            return Err(TropoError::DegenerateAxis {
                axis: name.to_string(),
                message: format!("needs at least 2 values, got {}", values.len()),
            });
        }

        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(TropoError::DegenerateAxis {
                axis: name.to_string(),
                message: format!("contains non-finite value {}", bad),
            });
        }

        let first = values[0];
        let last = values[values.len() - 1];
        if last < first {
            return Err(TropoError::UnsortedAxis {
                axis: name.to_string(),
                first,
                last,
            });
        }
        if last == first {
            return Err(TropoError::DegenerateAxis {
                axis: name.to_string(),
                message: format!("zero extent, every value is {}", first),
            });
        }

        Ok(Self {
            name: name.to_string(),
            values: values.to_vec(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: construction requires two values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first(&self) -> f64 {
        self.values[0]
    }

    pub fn last(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Difference between the widest and the narrowest successive spacing
    pub fn spacing_spread(&self) -> f64 {
        let (narrowest, widest) = self
            .values
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), step| {
                (lo.min(step), hi.max(step))
            });
        widest - narrowest
    }

    /// Whether the spacing is uniform within [`REGULARITY_TOLERANCE`]
    pub fn is_regular(&self) -> bool {
        self.spacing_spread() < REGULARITY_TOLERANCE
    }

    /// Fractional index by affine rescaling of the endpoints
    pub fn affine_index(&self, coord: f64) -> f64 {
        common::affine_index(coord, self.first(), self.last(), self.len())
    }

    /// Fractional index by binary search, with edge sentinels
    pub fn search_index(&self, coord: f64) -> f64 {
        common::coord_to_index(coord, &self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_axis_accessors() {
        let axis = CoordinateAxis::new("x", &[-2.0, 0.0, 2.0, 4.0]).unwrap();
        assert_eq!(axis.name(), "x");
        assert_eq!(axis.len(), 4);
        assert!(!axis.is_empty());
        assert_eq!(axis.first(), -2.0);
        assert_eq!(axis.last(), 4.0);
        assert_eq!(axis.values(), &[-2.0, 0.0, 2.0, 4.0]);
    }

    #[test]
    fn test_axis_copies_input() {
        let mut raw = vec![0.0, 1.0, 2.0];
        let axis = CoordinateAxis::new("x", &raw).unwrap();
        raw[1] = 100.0;
        assert_eq!(axis.values(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_descending_axis_rejected() {
        let err = CoordinateAxis::new("y", &[3.0, 2.0, 1.0]).unwrap_err();
        assert!(matches!(err, TropoError::UnsortedAxis { ref axis, .. } if axis == "y"));
    }

    #[test]
    fn test_degenerate_axes_rejected() {
        assert!(matches!(
            CoordinateAxis::new("x", &[1.0]),
            Err(TropoError::DegenerateAxis { .. })
        ));
        assert!(matches!(
            CoordinateAxis::new("x", &[]),
            Err(TropoError::DegenerateAxis { .. })
        ));
        assert!(matches!(
            CoordinateAxis::new("x", &[5.0, 5.0, 5.0]),
            Err(TropoError::DegenerateAxis { .. })
        ));
        assert!(matches!(
            CoordinateAxis::new("x", &[0.0, f64::NAN, 2.0]),
            Err(TropoError::DegenerateAxis { .. })
        ));
    }

    #[test]
    fn test_regularity() {
        let regular = CoordinateAxis::new("x", &[0.0, 0.5, 1.0, 1.5]).unwrap();
        assert!(regular.is_regular());
        assert_relative_eq!(regular.spacing_spread(), 0.0);

        let nearly = CoordinateAxis::new("x", &[0.0, 1.0, 2.00002, 3.0]).unwrap();
        assert!(nearly.is_regular());

        let irregular = CoordinateAxis::new("x", &[0.0, 1.0, 3.0, 7.0]).unwrap();
        assert!(!irregular.is_regular());
        assert_relative_eq!(irregular.spacing_spread(), 3.0);
    }

    #[test]
    fn test_index_mappings_agree_on_regular_axis() {
        let axis = CoordinateAxis::new("x", &[10.0, 12.0, 14.0, 16.0, 18.0]).unwrap();
        for coord in [10.5, 11.0, 13.9, 15.0, 17.25] {
            assert_relative_eq!(
                axis.affine_index(coord),
                axis.search_index(coord),
                epsilon = 1e-12
            );
        }
    }
}
