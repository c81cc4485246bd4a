use num_traits::{Float, Zero};

use crate::error::{KdTreeError, Result};
use crate::kdtree::KdTree;
use crate::neighbour::Neighbour;
use crate::query::neighbours_recurse;
use crate::result_collection::{ResultCollection, WithinRadius};
use crate::traits::KdPoint;
use crate::util::validate_point;

impl<P: KdPoint> KdTree<P> {
    /// Finds every stored value within `radius` of `query`, boundary included, sorted
    /// nearest first. A value equal to `query` is left out.
    ///
    /// A radius of zero is an exact lookup instead: the stored value equal to `query`
    /// at distance zero, or nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdtrees::KdTree;
    ///
    /// let tree = KdTree::build(vec![[1f64], [4f64]]).unwrap();
    ///
    /// let within = tree.radius_search(&[3f64], 1f64).unwrap();
    /// assert_eq!(within.len(), 1);
    /// assert_eq!(within[0].point, [4f64]);
    /// assert_eq!(within[0].distance, 1f64);
    ///
    /// assert!(tree.radius_search(&[3f64], 0f64).unwrap().is_empty());
    /// ```
    pub fn radius_search(&self, query: &P, radius: P::Coord) -> Result<Vec<Neighbour<P::Coord, P>>> {
        validate_point(query, self.dims)?;
        if radius.is_nan() || radius < P::Coord::zero() {
            return Err(KdTreeError::InvalidRadius);
        }

        if radius == P::Coord::zero() {
            return Ok(self
                .search(query)?
                .map(|node| Neighbour {
                    distance: P::Coord::zero(),
                    point: node.value().clone(),
                })
                .into_iter()
                .collect());
        }

        let mut results = WithinRadius::new(radius);
        if let Some(root) = self.root() {
            neighbours_recurse(query, root, &mut results)?;
        }

        Ok(results.into_sorted_vec())
    }
}
