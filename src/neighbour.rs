//! A result item returned by a neighbour query
use std::cmp::Ordering;

use crate::traits::Axis;

/// Represents an entry in the results of a nearest neighbour or radius query, with
/// `distance` being the distance of this particular point from the query point, and
/// `point` being a copy of the stored value that was found as part of the query.
#[derive(Debug, Clone)]
pub struct Neighbour<A, P> {
    /// the distance of the found point from the query point according to the point's metric
    pub distance: A,
    /// the stored value that was found in the query
    pub point: P,
}

impl<A: Axis, P: PartialEq> Ord for Neighbour<A, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

#[allow(unknown_lints)]
#[allow(clippy::non_canonical_partial_ord_impl)]
impl<A: Axis, P: PartialEq> PartialOrd for Neighbour<A, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.distance.partial_cmp(&other.distance)
    }
}

impl<A: Axis, P: PartialEq> Eq for Neighbour<A, P> {}

impl<A: Axis, P: PartialEq> PartialEq for Neighbour<A, P> {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance && self.point == other.point
    }
}

impl<A, P> From<Neighbour<A, P>> for (P, A) {
    fn from(elem: Neighbour<A, P>) -> Self {
        (elem.point, elem.distance)
    }
}
