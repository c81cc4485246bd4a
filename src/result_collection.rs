use num_traits::Float;
use sorted_vec::SortedVec;

use crate::neighbour::Neighbour;
use crate::traits::KdPoint;

/// Accumulates query results in ascending distance order while a query walks the tree.
///
/// `max_dist` is the pruning bound: a branch whose splitting plane lies further than
/// this from the query can hold nothing the collection would still accept.
pub(crate) trait ResultCollection<P: KdPoint> {
    fn add(&mut self, query: &P, point: &P, distance: P::Coord);
    fn max_dist(&self) -> P::Coord;
    fn into_sorted_vec(self) -> Vec<Neighbour<P::Coord, P>>;
}

/// Keeps the `qty` closest candidates seen so far.
pub(crate) struct NearestN<P: KdPoint> {
    entries: SortedVec<Neighbour<P::Coord, P>>,
    qty: usize,
}

impl<P: KdPoint> NearestN<P> {
    /// `capacity` only presizes storage; at most `qty` entries are kept either way.
    pub(crate) fn new_with_capacity(qty: usize, capacity: usize) -> Self {
        Self {
            entries: SortedVec::with_capacity(capacity.min(qty)),
            qty,
        }
    }
}

impl<P: KdPoint> ResultCollection<P> for NearestN<P> {
    fn add(&mut self, _query: &P, point: &P, distance: P::Coord) {
        if self.entries.len() < self.qty {
            self.entries.insert(Neighbour {
                distance,
                point: point.clone(),
            });
        } else if self
            .entries
            .last()
            .is_some_and(|worst| distance < worst.distance)
        {
            self.entries.pop();
            self.entries.insert(Neighbour {
                distance,
                point: point.clone(),
            });
        }
    }

    fn max_dist(&self) -> P::Coord {
        if self.entries.len() < self.qty {
            P::Coord::infinity()
        } else {
            self.entries
                .last()
                .map_or(P::Coord::infinity(), |n| n.distance)
        }
    }

    fn into_sorted_vec(self) -> Vec<Neighbour<P::Coord, P>> {
        self.entries.into_vec()
    }
}

/// Keeps every candidate within `radius` of the query, excluding the query value itself.
pub(crate) struct WithinRadius<P: KdPoint> {
    entries: SortedVec<Neighbour<P::Coord, P>>,
    radius: P::Coord,
}

impl<P: KdPoint> WithinRadius<P> {
    pub(crate) fn new(radius: P::Coord) -> Self {
        Self {
            entries: SortedVec::new(),
            radius,
        }
    }
}

impl<P: KdPoint> ResultCollection<P> for WithinRadius<P> {
    fn add(&mut self, query: &P, point: &P, distance: P::Coord) {
        if distance <= self.radius && point != query {
            self.entries.insert(Neighbour {
                distance,
                point: point.clone(),
            });
        }
    }

    fn max_dist(&self) -> P::Coord {
        self.radius
    }

    fn into_sorted_vec(self) -> Vec<Neighbour<P::Coord, P>> {
        self.entries.into_vec()
    }
}
