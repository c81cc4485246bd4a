use crate::error::Result;
use crate::kdtree::{KdTree, Node};
use crate::traits::KdPoint;
use crate::util::validate_point;

impl<P: KdPoint> KdTree<P> {
    /// Finds the node storing a value equal to `point`.
    ///
    /// A miss is `Ok(None)`; only an invalid operand is an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdtrees::KdTree;
    ///
    /// let tree = KdTree::build(vec![[0f64], [1f64], [2f64]]).unwrap();
    ///
    /// assert_eq!(tree.search(&[2f64]).unwrap().unwrap().value(), &[2f64]);
    /// assert!(tree.search(&[3f64]).unwrap().is_none());
    /// assert!(tree.search(&[0f64]).is_ok());
    /// ```
    pub fn search(&self, point: &P) -> Result<Option<&Node<P>>> {
        validate_point(point, self.dims)?;

        let mut curr = self.root();
        while let Some(node) = curr {
            if node.value == *point {
                return Ok(Some(node));
            }

            curr = if point.coord(node.axis) >= node.value.coord(node.axis) {
                node.right()
            } else {
                node.left()
            };
        }

        Ok(None)
    }

    /// Whether a value equal to `point` is stored in the tree.
    pub fn contains(&self, point: &P) -> Result<bool> {
        Ok(self.search(point)?.is_some())
    }
}
