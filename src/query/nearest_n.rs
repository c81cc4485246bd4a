use crate::error::{KdTreeError, Result};
use crate::kdtree::KdTree;
use crate::neighbour::Neighbour;
use crate::query::neighbours_recurse;
use crate::result_collection::{NearestN, ResultCollection};
use crate::traits::KdPoint;
use crate::util::validate_point;

impl<P: KdPoint> KdTree<P> {
    /// Finds the nearest `qty` values to `query`, using the point type's distance.
    ///
    /// Results are sorted nearest first. Fewer than `qty` are returned if the tree
    /// holds fewer values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdtrees::KdTree;
    ///
    /// let tree = KdTree::build(vec![[1f64], [5f64], [6f64]]).unwrap();
    ///
    /// let nearest: Vec<([f64; 1], f64)> = tree
    ///     .k_nearest(&[4f64], 2)
    ///     .unwrap()
    ///     .into_iter()
    ///     .map(Into::into)
    ///     .collect();
    ///
    /// assert_eq!(nearest, vec![([5f64], 1f64), ([6f64], 2f64)]);
    /// ```
    pub fn k_nearest(&self, query: &P, qty: usize) -> Result<Vec<Neighbour<P::Coord, P>>> {
        validate_point(query, self.dims)?;
        if qty == 0 {
            return Err(KdTreeError::InvalidQuantity);
        }

        let mut results = NearestN::new_with_capacity(qty, self.len());
        if let Some(root) = self.root() {
            neighbours_recurse(query, root, &mut results)?;
        }

        Ok(results.into_sorted_vec())
    }

    /// Finds the single nearest value to `query`, or `None` for an empty tree.
    pub fn nearest_one(&self, query: &P) -> Result<Option<Neighbour<P::Coord, P>>> {
        Ok(self.k_nearest(query, 1)?.into_iter().next())
    }
}
