//! Capability contracts consumed by the tree: the coordinate scalar ([`Axis`]) and the
//! point abstraction ([`KdPoint`]) that lets custom types stand in for numeric vectors.
use num_traits::Float;
use std::fmt::{Debug, Display};

use crate::distance::{DistanceMetric, Euclidean};

/// Axis trait represents the traits that must be implemented by the scalar used
/// for both the coordinates of a point and the distances between points.
/// This will generally be [`f64`] or [`f32`].
///
/// Coordinates and distances share a type because neighbour pruning compares
/// `query[axis] ± distance` against a node's coordinate.
pub trait Axis: Float + Default + Debug + Display + Copy + Sync + Send + std::ops::AddAssign {
    /// returns absolute diff between two values of a type implementing this trait
    fn saturating_dist(self, other: Self) -> Self;
}
impl<T: Float + Default + Debug + Display + Copy + Sync + Send + std::ops::AddAssign> Axis for T {
    #[inline]
    fn saturating_dist(self, other: Self) -> Self {
        (self - other).abs()
    }
}

/// Point capability contract.
///
/// Must be implemented by any type stored in a [`KdTree`](crate::KdTree). Plain numeric
/// vectors (`Vec<f64>`, `[f32; 3]`, ...) implement it out of the box, measuring
/// distance with [`Euclidean`]. A custom type supplies its own indexed coordinate
/// access and its own distance method.
///
/// The distance must never be smaller than the separation along any single axis,
/// i.e. `|a.coord(i) - b.coord(i)| <= a.distance(b)`. Every Minkowski norm satisfies
/// this, and the nearest neighbour and radius queries rely on it to prune branches.
///
/// # Examples
///
/// ```rust
/// use kdtrees::{KdPoint, KdTree};
/// use kdtrees::distance::{DistanceMetric, Manhattan};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Station {
///     name: &'static str,
///     pos: [f64; 2],
/// }
///
/// impl KdPoint for Station {
///     type Coord = f64;
///
///     fn dims(&self) -> usize {
///         2
///     }
///
///     fn coord(&self, axis: usize) -> f64 {
///         self.pos[axis]
///     }
///
///     fn distance(&self, other: &Self) -> f64 {
///         Manhattan::dist(&self.pos, &other.pos)
///     }
/// }
///
/// let tree = KdTree::build(vec![
///     Station { name: "north", pos: [0.0, 5.0] },
///     Station { name: "south", pos: [0.0, -5.0] },
/// ]).unwrap();
///
/// let query = Station { name: "visitor", pos: [1.0, 4.0] };
/// let nearest = tree.nearest_one(&query).unwrap().unwrap();
/// assert_eq!(nearest.point.name, "north");
/// assert_eq!(nearest.distance, 2.0);
/// ```
pub trait KdPoint: Clone + PartialEq + Debug {
    /// Scalar type of coordinates and distances
    type Coord: Axis;

    /// Number of coordinates this value carries
    fn dims(&self) -> usize;

    /// Coordinate of this value along `axis`. Only called with `axis < self.dims()`.
    fn coord(&self, axis: usize) -> Self::Coord;

    /// Distance between this value and `other`; must be non-negative.
    fn distance(&self, other: &Self) -> Self::Coord;
}

impl<A: Axis> KdPoint for Vec<A> {
    type Coord = A;

    #[inline]
    fn dims(&self) -> usize {
        self.len()
    }

    #[inline]
    fn coord(&self, axis: usize) -> A {
        self[axis]
    }

    #[inline]
    fn distance(&self, other: &Self) -> A {
        Euclidean::dist(self, other)
    }
}

impl<A: Axis, const N: usize> KdPoint for [A; N] {
    type Coord = A;

    #[inline]
    fn dims(&self) -> usize {
        N
    }

    #[inline]
    fn coord(&self, axis: usize) -> A {
        self[axis]
    }

    #[inline]
    fn distance(&self, other: &Self) -> A {
        Euclidean::dist(self, other)
    }
}
