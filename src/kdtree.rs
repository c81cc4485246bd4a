//! Dynamic, pseudo-balanced k-d tree over points implementing [`KdPoint`].
//!
//! Each [`Node`] owns its children outright, so the tree is a strict hierarchy
//! with no shared nodes and no parent links. Besides the usual per-axis ordering,
//! every node keeps `|size(left) - size(right)| <= k`, restored after mutations by
//! rebuilding the offending subtree from its points.

use std::fmt;

use crate::error::{KdTreeError, Result};
use crate::traits::KdPoint;

/// A single tree node: a stored value, its discriminant axis and its two subtrees.
///
/// Points in `left` are strictly less than `value` on `axis`; points in `right` are
/// greater or equal. `size` counts the nodes of this subtree, itself included.
#[derive(Clone, Debug, PartialEq)]
pub struct Node<P: KdPoint> {
    pub(crate) value: P,
    pub(crate) axis: usize,
    pub(crate) left: Option<Box<Node<P>>>,
    pub(crate) right: Option<Box<Node<P>>>,
    pub(crate) size: usize,
    /// Skew left behind by coordinates tied on `axis` when this subtree was last
    /// built, or 0 if that build came out balanced.
    pub(crate) tie_skew: usize,
}

impl<P: KdPoint> Node<P> {
    pub(crate) fn leaf(value: P, axis: usize) -> Self {
        Self {
            value,
            axis,
            left: None,
            right: None,
            size: 1,
            tie_skew: 0,
        }
    }

    /// The value stored at this node
    #[inline]
    pub fn value(&self) -> &P {
        &self.value
    }

    /// The discriminant axis of this node
    #[inline]
    pub fn axis(&self) -> usize {
        self.axis
    }

    /// Number of nodes in the subtree rooted here, including this one
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The subtree holding values below this node's value on its axis
    #[inline]
    pub fn left(&self) -> Option<&Node<P>> {
        self.left.as_deref()
    }

    /// The subtree holding values at or above this node's value on its axis
    #[inline]
    pub fn right(&self) -> Option<&Node<P>> {
        self.right.as_deref()
    }

    /// Number of levels in the subtree rooted here
    pub fn height(&self) -> usize {
        1 + self
            .left()
            .map_or(0, Node::height)
            .max(self.right().map_or(0, Node::height))
    }

    /// Whether the sizes of the two subtrees differ by at most `dims`.
    #[inline]
    pub fn is_balanced(&self, dims: usize) -> bool {
        self.skew() <= dims
    }

    #[inline]
    pub(crate) fn skew(&self) -> usize {
        subtree_size(&self.left).abs_diff(subtree_size(&self.right))
    }

    /// Whether rebuilding this subtree is worth it. A subtree whose last build was
    /// already skewed by ties is left alone until its skew doubles.
    #[inline]
    pub(crate) fn needs_rebuild(&self, dims: usize) -> bool {
        self.skew() > dims.max(2 * self.tie_skew)
    }

    #[inline]
    pub(crate) fn update_size(&mut self) {
        self.size = 1 + subtree_size(&self.left) + subtree_size(&self.right);
    }

    /// Iterate over the values of this subtree in collection order.
    pub fn iter(&self) -> Iter<'_, P> {
        Iter { stack: vec![self] }
    }

    pub(crate) fn into_points(self, out: &mut Vec<P>) {
        out.push(self.value);
        if let Some(right) = self.right {
            right.into_points(out);
        }
        if let Some(left) = self.left {
            left.into_points(out);
        }
    }

    fn is_consistent(&self, dims: usize) -> bool {
        let pivot = self.value.coord(self.axis);
        let next_axis = (self.axis + 1) % dims;

        let children_ok = [(&self.left, true), (&self.right, false)]
            .into_iter()
            .all(|(child, is_left)| match child.as_deref() {
                None => true,
                Some(child) => {
                    child.axis == next_axis
                        && child.iter().all(|p| {
                            if is_left {
                                p.coord(self.axis) < pivot
                            } else {
                                p.coord(self.axis) >= pivot
                            }
                        })
                        && child.is_consistent(dims)
                }
            });

        self.value.dims() == dims
            && self.axis < dims
            && self.size == 1 + subtree_size(&self.left) + subtree_size(&self.right)
            && children_ok
    }

    fn render(&self, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coords: Vec<String> = (0..self.value.dims())
            .map(|axis| self.value.coord(axis).to_string())
            .collect();
        writeln!(
            f,
            "{}[{}], axis: {}, nodes: {}",
            "\t".repeat(depth),
            coords.join(" "),
            self.axis,
            self.size
        )?;

        for child in [&self.right, &self.left] {
            match child {
                Some(node) => node.render(depth + 1, f)?,
                None => writeln!(f, "{}None", "\t".repeat(depth + 1))?,
            }
        }
        Ok(())
    }
}

#[inline]
pub(crate) fn subtree_size<P: KdPoint>(node: &Option<Box<Node<P>>>) -> usize {
    node.as_ref().map_or(0, |n| n.size)
}

/// Iterator over the values of a tree or subtree.
///
/// Values are yielded depth first: a node, then its right subtree, then its left
/// subtree. This order is stable but not sorted along any axis.
pub struct Iter<'a, P: KdPoint> {
    stack: Vec<&'a Node<P>>,
}

impl<'a, P: KdPoint> Iterator for Iter<'a, P> {
    type Item = &'a P;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(left) = node.left() {
            self.stack.push(left);
        }
        if let Some(right) = node.right() {
            self.stack.push(right);
        }
        Some(&node.value)
    }
}

/// Options for [`KdTree::build_with`].
///
/// # Examples
///
/// ```rust
/// use kdtrees::{BuildOptions, KdTree};
///
/// let tree = KdTree::build_with(
///     vec![vec![0f64, 0f64], vec![1f64, 1f64], vec![2f64, 0f64]],
///     BuildOptions::new().with_dims(2).with_axis(1),
/// ).unwrap();
///
/// assert_eq!(tree.root().unwrap().axis(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Dimensionality of the tree. Detected from the first point when `None`.
    pub dims: Option<usize>,
    /// Discriminant axis of the root node.
    pub axis: usize,
}

impl BuildOptions {
    /// Auto-detected dimensionality, root axis 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require every point to have exactly `dims` coordinates.
    pub fn with_dims(mut self, dims: usize) -> Self {
        self.dims = Some(dims);
        self
    }

    /// Discriminate on `axis` at the root.
    pub fn with_axis(mut self, axis: usize) -> Self {
        self.axis = axis;
        self
    }
}

/// Dynamic k-d tree
///
/// Stores values implementing [`KdPoint`]: numeric vectors such as `Vec<f64>` or
/// `[f32; 3]`, or custom types with their own distance method. The dimensionality
/// is fixed when the tree is created and every operand is checked against it.
///
/// # Examples
///
/// ```rust
/// use kdtrees::KdTree;
///
/// let mut tree = KdTree::build(vec![vec![1f64], vec![5f64], vec![6f64]]).unwrap();
///
/// tree.insert(vec![9f64]).unwrap();
/// assert_eq!(tree.len(), 4);
///
/// let nearest = tree.k_nearest(&vec![4f64], 2).unwrap();
/// assert_eq!(nearest[0].point, vec![5f64]);
/// assert_eq!(nearest[1].point, vec![6f64]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct KdTree<P: KdPoint> {
    pub(crate) root: Option<Box<Node<P>>>,
    pub(crate) dims: usize,
}

impl<P: KdPoint> KdTree<P> {
    /// Creates an empty tree of `dims` dimensions.
    ///
    /// ```rust
    /// use kdtrees::KdTree;
    ///
    /// let tree: KdTree<[f64; 3]> = KdTree::new(3).unwrap();
    ///
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.dims(), 3);
    /// ```
    pub fn new(dims: usize) -> Result<Self> {
        if dims == 0 {
            return Err(KdTreeError::ZeroDimensions);
        }
        Ok(Self { root: None, dims })
    }

    /// Dimensionality every stored and queried point must have
    #[inline]
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Returns the current number of points stored in the tree
    #[inline]
    pub fn len(&self) -> usize {
        subtree_size(&self.root)
    }

    /// Whether the tree holds no points
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, if any
    #[inline]
    pub fn root(&self) -> Option<&Node<P>> {
        self.root.as_deref()
    }

    /// Number of levels in the tree; zero when empty
    pub fn height(&self) -> usize {
        self.root().map_or(0, Node::height)
    }

    /// Iterate over all stored values, node first, then right subtree, then left subtree.
    ///
    /// ```rust
    /// use kdtrees::KdTree;
    ///
    /// let tree = KdTree::build(vec![[1f64], [2f64], [3f64]]).unwrap();
    ///
    /// let values: Vec<_> = tree.iter().collect();
    /// assert_eq!(values, vec![&[2f64], &[3f64], &[1f64]]);
    /// ```
    pub fn iter(&self) -> Iter<'_, P> {
        Iter {
            stack: self.root().into_iter().collect(),
        }
    }

    /// Copies every stored value out, in [`iter`](KdTree::iter) order.
    pub fn collect(&self) -> Vec<P> {
        self.iter().cloned().collect()
    }

    /// Consumes the tree, returning its values in [`iter`](KdTree::iter) order.
    pub fn into_points(self) -> Vec<P> {
        let mut out = Vec::with_capacity(self.len());
        if let Some(root) = self.root {
            root.into_points(&mut out);
        }
        out
    }

    /// Checks the structural invariants over the whole tree: subtree sizes, axis
    /// cycling and per-axis ordering.
    pub fn is_consistent(&self) -> bool {
        self.root()
            .map_or(true, |root| root.is_consistent(self.dims))
    }

    /// Whether every node satisfies `|size(left) - size(right)| <= k`.
    ///
    /// Always holds for points with pairwise distinct coordinates. Points sharing
    /// a coordinate on a node's axis all land on its right, so heavy ties can
    /// leave a subtree skewed even after it is rebuilt.
    pub fn is_balanced(&self) -> bool {
        self.iter_nodes().all(|node| node.is_balanced(self.dims))
    }

    fn iter_nodes(&self) -> impl Iterator<Item = &Node<P>> {
        let mut stack: Vec<&Node<P>> = self.root().into_iter().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.left());
            stack.extend(node.right());
            Some(node)
        })
    }

    /// Renders the tree one node per line, indented by depth, right child first.
    ///
    /// ```rust
    /// use kdtrees::KdTree;
    ///
    /// let tree = KdTree::build(vec![vec![0f64, 0f64], vec![1f64, 1f64], vec![2f64, 0f64]]).unwrap();
    ///
    /// assert_eq!(
    ///     tree.visualize(),
    ///     "[1 1], axis: 0, nodes: 3\n\
    ///      \t[2 0], axis: 1, nodes: 1\n\
    ///      \t\tNone\n\
    ///      \t\tNone\n\
    ///      \t[0 0], axis: 1, nodes: 1\n\
    ///      \t\tNone\n\
    ///      \t\tNone\n"
    /// );
    /// ```
    pub fn visualize(&self) -> String {
        self.to_string()
    }
}

impl<'a, P: KdPoint> IntoIterator for &'a KdTree<P> {
    type Item = &'a P;
    type IntoIter = Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P: KdPoint> fmt::Display for KdTree<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => root.render(0, f),
            None => writeln!(f, "None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::error::KdTreeError;
    use crate::kdtree::{KdTree, Node};

    fn hand_built() -> KdTree<Vec<f64>> {
        let mut root = Node::leaf(vec![1f64], 0);
        root.right = Some(Box::new(Node::leaf(vec![2f64], 0)));
        root.left = Some(Box::new(Node::leaf(vec![0f64], 0)));
        root.update_size();

        KdTree {
            root: Some(Box::new(root)),
            dims: 1,
        }
    }

    #[test]
    fn it_can_be_constructed_empty() {
        let tree: KdTree<Vec<f64>> = KdTree::new(2).unwrap();

        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert!(tree.is_empty());
        assert!(tree.is_consistent());
        assert_eq!(tree.visualize(), "None\n");
    }

    #[test]
    fn it_cannot_be_constructed_with_zero_dims() {
        let result: Result<KdTree<Vec<f64>>, _> = KdTree::new(0);

        assert_eq!(result.unwrap_err(), KdTreeError::ZeroDimensions);
    }

    #[test]
    fn sizes_are_recomputed_from_children() {
        let tree = hand_built();
        let root = tree.root().unwrap();

        assert_eq!(root.size(), 3);
        assert_eq!(root.height(), 2);
        assert_eq!(root.right().unwrap().value(), &vec![2f64]);
        assert_eq!(root.left().unwrap().value(), &vec![0f64]);
        assert!(root.is_balanced(1));
    }

    #[test]
    fn can_iterate_right_before_left() {
        let tree = hand_built();

        let values: Vec<_> = tree.iter().cloned().collect();
        assert_eq!(values, vec![vec![1f64], vec![2f64], vec![0f64]]);
        assert_eq!(tree.clone().into_points(), values);
        assert_eq!(tree.collect(), values);
    }

    #[test]
    fn iteration_visits_every_value_once() {
        let tree = hand_built();

        let seen: HashSet<_> = (&tree).into_iter().map(|p| p[0] as i64).collect();
        assert_eq!(seen, HashSet::from([0, 1, 2]));
    }

    #[test]
    fn misordered_children_are_inconsistent() {
        let mut tree = hand_built();
        if let Some(root) = tree.root.as_mut() {
            std::mem::swap(&mut root.left, &mut root.right);
        }

        assert!(!tree.is_consistent());
    }

    #[test]
    fn stale_sizes_are_inconsistent() {
        let mut tree = hand_built();
        if let Some(root) = tree.root.as_mut() {
            root.size = 7;
        }

        assert!(!tree.is_consistent());
    }

    #[test]
    fn lopsided_chains_are_unbalanced() {
        let mut chain = Node::leaf(vec![0f64], 0);
        let mut right = Node::leaf(vec![1f64], 0);
        right.right = Some(Box::new(Node::leaf(vec![2f64], 0)));
        right.update_size();
        chain.right = Some(Box::new(right));
        chain.update_size();
        let tree = KdTree {
            root: Some(Box::new(chain)),
            dims: 1,
        };

        assert!(tree.is_consistent());
        assert!(!tree.is_balanced());
        assert!(hand_built().is_balanced());
    }

    #[test]
    fn renders_absent_children_as_none() {
        let tree = hand_built();

        assert_eq!(
            tree.to_string(),
            "[1], axis: 0, nodes: 3\n\
             \t[2], axis: 0, nodes: 1\n\
             \t\tNone\n\
             \t\tNone\n\
             \t[0], axis: 0, nodes: 1\n\
             \t\tNone\n\
             \t\tNone\n"
        );
    }
}
