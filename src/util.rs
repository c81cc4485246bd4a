//! Boundary validation and input coercion helpers.
//!
//! Everything here runs before a tree operation starts descending, which is what
//! lets failing operations leave the tree untouched.

use num_traits::{Float, Zero};

use crate::error::{KdTreeError, Result};
use crate::traits::{Axis, KdPoint};

/// Checks that every point in `points` has the same dimensionality and returns it.
///
/// # Examples
///
/// ```rust
/// use kdtrees::util::check_dimensionality;
///
/// assert_eq!(check_dimensionality(&[vec![0f64, 1f64], vec![2f64, 3f64]]), Ok(2));
/// assert!(check_dimensionality(&[vec![0f64], vec![0f64, 1f64]]).is_err());
/// ```
pub fn check_dimensionality<P: KdPoint>(points: &[P]) -> Result<usize> {
    let first = points.first().ok_or(KdTreeError::EmptyInput)?;
    let dims = first.dims();

    if let Some(bad) = points.iter().find(|p| p.dims() != dims) {
        return Err(KdTreeError::DimensionMismatch {
            expected: dims,
            found: bad.dims(),
        });
    }

    Ok(dims)
}

/// Wraps each scalar in a one-dimensional point.
///
/// ```rust
/// use kdtrees::util::lift_scalars;
///
/// assert_eq!(lift_scalars(&[4f64, 2f64]), vec![vec![4f64], vec![2f64]]);
/// ```
pub fn lift_scalars<A: Axis>(values: &[A]) -> Vec<Vec<A>> {
    values.iter().map(|&v| vec![v]).collect()
}

/// Validates a single operand against a tree of `dims` dimensions: coordinate count,
/// orderable coordinates and a zero self-distance.
pub(crate) fn validate_point<P: KdPoint>(point: &P, dims: usize) -> Result<()> {
    if point.dims() != dims {
        return Err(KdTreeError::DimensionMismatch {
            expected: dims,
            found: point.dims(),
        });
    }

    if let Some(axis) = (0..dims).find(|&axis| point.coord(axis).is_nan()) {
        return Err(KdTreeError::CapabilityViolation(format!(
            "coordinate {axis} is not orderable"
        )));
    }

    let self_dist = point.distance(point);
    if self_dist != P::Coord::zero() {
        return Err(KdTreeError::CapabilityViolation(format!(
            "distance from a point to itself is {self_dist}, expected 0"
        )));
    }

    Ok(())
}

/// Rejects distances that break the metric contract.
#[inline]
pub(crate) fn checked_distance<A: Axis>(distance: A) -> Result<A> {
    if distance.is_nan() || distance < A::zero() {
        return Err(KdTreeError::CapabilityViolation(format!(
            "distance must be a non-negative number, got {distance}"
        )));
    }
    Ok(distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Unmeasured(f64);

    impl KdPoint for Unmeasured {
        type Coord = f64;

        fn dims(&self) -> usize {
            1
        }

        fn coord(&self, _axis: usize) -> f64 {
            self.0
        }

        fn distance(&self, _other: &Self) -> f64 {
            1.0
        }
    }

    #[test]
    fn dimensionality_of_a_consistent_collection() {
        let points = lift_scalars(&[0f64, 1f64, 2f64]);

        assert_eq!(check_dimensionality(&points), Ok(1));
        assert_eq!(check_dimensionality(&[[0f32, 1f32, 2f32]]), Ok(3));
    }

    #[test]
    fn dimensionality_of_an_empty_collection_is_an_error() {
        let points: Vec<Vec<f64>> = vec![];

        assert_eq!(check_dimensionality(&points), Err(KdTreeError::EmptyInput));
    }

    #[test]
    fn dimensionality_mismatch_reports_the_offender() {
        let points = vec![vec![0f64], vec![0f64], vec![0f64, 1f64]];

        assert_eq!(
            check_dimensionality(&points),
            Err(KdTreeError::DimensionMismatch {
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn nan_coordinates_are_not_orderable() {
        let err = validate_point(&vec![0f64, f64::NAN], 2).unwrap_err();

        assert!(matches!(err, KdTreeError::CapabilityViolation(_)));
    }

    #[test]
    fn nonzero_self_distance_is_a_capability_violation() {
        let err = validate_point(&Unmeasured(3.0), 1).unwrap_err();

        assert!(matches!(err, KdTreeError::CapabilityViolation(_)));
    }

    #[test]
    fn negative_distances_are_rejected() {
        assert_eq!(checked_distance(2f64), Ok(2f64));
        assert!(checked_distance(-1f64).is_err());
        assert!(checked_distance(f64::NAN).is_err());
    }
}
