//! Contains a selection of distance metrics that can be chosen from to measure the distance
//! between two points stored inside the tree.
//!
//! All of these are true metrics that dominate the single-axis separation, which is what
//! the branch-and-bound pruning in the neighbour queries assumes. Squared Euclidean
//! distance does not, and is deliberately absent.

use crate::traits::Axis;

/// Trait that needs to be implemented by any potential distance
/// metric to be used by a point type
pub trait DistanceMetric<A> {
    /// returns the distance between two K-d points, as measured
    /// by a particular distance metric
    fn dist(a: &[A], b: &[A]) -> A;
}

/// Returns the Euclidean distance (L2 norm) between two points.
///
/// This is the metric used by the built-in `Vec<A>` and `[A; N]` point types.
///
/// # Examples
///
/// ```rust
/// use kdtrees::distance::{DistanceMetric, Euclidean};
///
/// assert_eq!(0f64, Euclidean::dist(&[0f64, 0f64], &[0f64, 0f64]));
/// assert_eq!(1f64, Euclidean::dist(&[0f64, 0f64], &[1f64, 0f64]));
/// assert_eq!(5f64, Euclidean::dist(&[0f64, 0f64], &[3f64, 4f64]));
/// ```
pub struct Euclidean {}

impl<A: Axis> DistanceMetric<A> for Euclidean {
    #[inline]
    fn dist(a: &[A], b: &[A]) -> A {
        a.iter()
            .zip(b.iter())
            .map(|(&a_val, &b_val)| (a_val - b_val) * (a_val - b_val))
            .fold(A::zero(), std::ops::Add::add)
            .sqrt()
    }
}

/// Returns the Manhattan / "taxi cab" distance between two points.
///
/// # Examples
///
/// ```rust
/// use kdtrees::distance::{DistanceMetric, Manhattan};
///
/// assert_eq!(0f32, Manhattan::dist(&[0f32, 0f32], &[0f32, 0f32]));
/// assert_eq!(1f32, Manhattan::dist(&[0f32, 0f32], &[1f32, 0f32]));
/// assert_eq!(2f32, Manhattan::dist(&[0f32, 0f32], &[1f32, 1f32]));
/// ```
pub struct Manhattan {}

impl<A: Axis> DistanceMetric<A> for Manhattan {
    #[inline]
    fn dist(a: &[A], b: &[A]) -> A {
        a.iter()
            .zip(b.iter())
            .map(|(&a_val, &b_val)| a_val.saturating_dist(b_val))
            .fold(A::zero(), std::ops::Add::add)
    }
}

/// Returns the Chebyshev / "chessboard" distance between two points: the largest
/// separation along any single axis.
///
/// # Examples
///
/// ```rust
/// use kdtrees::distance::{Chebyshev, DistanceMetric};
///
/// assert_eq!(0f64, Chebyshev::dist(&[0f64, 0f64], &[0f64, 0f64]));
/// assert_eq!(3f64, Chebyshev::dist(&[0f64, 0f64], &[1f64, -3f64]));
/// ```
pub struct Chebyshev {}

impl<A: Axis> DistanceMetric<A> for Chebyshev {
    #[inline]
    fn dist(a: &[A], b: &[A]) -> A {
        a.iter()
            .zip(b.iter())
            .map(|(&a_val, &b_val)| a_val.saturating_dist(b_val))
            .fold(A::zero(), |acc, d| acc.max(d))
    }
}
