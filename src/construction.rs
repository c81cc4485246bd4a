//! Construction and mutation: presorted median build, insert, delete and
//! whole-subtree rebuild rebalancing.

use std::cmp::Ordering;

#[cfg(feature = "tracing")]
use tracing::{event, span, Level};

use crate::error::{KdTreeError, Result};
use crate::kdtree::{BuildOptions, KdTree, Node};
use crate::traits::KdPoint;
use crate::util::{check_dimensionality, validate_point};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Pivot,
    Right,
}

impl<P: KdPoint> KdTree<P> {
    /// Builds a tree from `points`, detecting the dimensionality from the first point
    /// and discriminating on axis 0 at the root.
    ///
    /// Repeated values are stored once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdtrees::KdTree;
    ///
    /// let tree = KdTree::build(vec![vec![4f64], vec![2f64], vec![5f64], vec![7f64], vec![1f64], vec![9f64]]).unwrap();
    ///
    /// assert_eq!(tree.len(), 6);
    /// assert_eq!(tree.root().unwrap().value(), &vec![5f64]);
    /// ```
    pub fn build(points: Vec<P>) -> Result<Self> {
        Self::build_with(points, BuildOptions::default())
    }

    /// Builds a tree from `points` using explicit [`BuildOptions`].
    ///
    /// Fails without building anything if `points` is empty, if any point disagrees
    /// with the dimensionality, or if a point breaks the [`KdPoint`] contract.
    pub fn build_with(points: Vec<P>, options: BuildOptions) -> Result<Self> {
        let found = check_dimensionality(&points)?;
        let dims = options.dims.unwrap_or(found);

        if dims == 0 {
            return Err(KdTreeError::ZeroDimensions);
        }
        if found != dims {
            return Err(KdTreeError::DimensionMismatch {
                expected: dims,
                found,
            });
        }
        if options.axis >= dims {
            return Err(KdTreeError::AxisOutOfRange {
                axis: options.axis,
                dims,
            });
        }
        for point in &points {
            validate_point(point, dims)?;
        }

        let points = dedup_points(points);

        Ok(Self {
            root: build_subtree(points, options.axis, dims),
            dims,
        })
    }

    /// Inserts `point`, rebalancing every ancestor on the insertion path.
    ///
    /// Returns `Ok(false)` and leaves the tree untouched if an equal value is already stored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdtrees::KdTree;
    ///
    /// let mut tree = KdTree::build(vec![vec![0f64, 0f64], vec![1f64, 1f64]]).unwrap();
    ///
    /// assert_eq!(tree.insert(vec![1f64, 0f64]), Ok(true));
    /// assert_eq!(tree.insert(vec![0f64, 0f64]), Ok(false));
    /// assert_eq!(tree.len(), 3);
    /// assert!(tree.insert(vec![0f64, 0f64, 0f64]).is_err());
    /// ```
    pub fn insert(&mut self, point: P) -> Result<bool> {
        validate_point(&point, self.dims)?;

        let Some(root) = self.root.take() else {
            self.root = Some(Box::new(Node::leaf(point, 0)));
            return Ok(true);
        };

        let (root, inserted) = insert_recursive(root, point, self.dims);
        self.root = root;

        if !inserted {
            #[cfg(feature = "tracing")]
            event!(Level::TRACE, "insert of a stored value ignored");
        }

        Ok(inserted)
    }

    /// Inserts every point from `points`, returning how many were new.
    ///
    /// All points are validated before the first insertion, so a failure leaves the
    /// tree unmodified.
    pub fn extend_points<I: IntoIterator<Item = P>>(&mut self, points: I) -> Result<usize> {
        let points: Vec<P> = points.into_iter().collect();
        for point in &points {
            validate_point(point, self.dims)?;
        }

        let mut added = 0;
        for point in points {
            if self.insert(point)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Removes `point`, rebuilding the subtree it was found at and rebalancing every
    /// ancestor on the search path.
    ///
    /// Returns `Ok(false)` if the value is not stored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdtrees::KdTree;
    ///
    /// let mut tree = KdTree::build(vec![[1f64], [2f64], [3f64], [4f64]]).unwrap();
    ///
    /// assert_eq!(tree.delete(&[4f64]), Ok(true));
    /// assert_eq!(tree.delete(&[4f64]), Ok(false));
    /// assert_eq!(tree.root().unwrap().value(), &[2f64]);
    /// ```
    pub fn delete(&mut self, point: &P) -> Result<bool> {
        validate_point(point, self.dims)?;

        let Some(root) = self.root.take() else {
            return Ok(false);
        };

        let (root, removed) = delete_recursive(root, point, self.dims);
        self.root = root;

        if !removed {
            #[cfg(feature = "tracing")]
            event!(Level::TRACE, "delete of an absent value ignored");
        }

        Ok(removed)
    }
}

fn insert_recursive<P: KdPoint>(
    mut node: Box<Node<P>>,
    point: P,
    dims: usize,
) -> (Option<Box<Node<P>>>, bool) {
    if node.value == point {
        return (Some(node), false);
    }

    let axis = node.axis;
    let slot = if point.coord(axis) >= node.value.coord(axis) {
        &mut node.right
    } else {
        &mut node.left
    };

    let inserted = match slot.take() {
        None => {
            *slot = Some(Box::new(Node::leaf(point, (axis + 1) % dims)));
            true
        }
        Some(child) => {
            let (child, inserted) = insert_recursive(child, point, dims);
            *slot = child;
            inserted
        }
    };

    if !inserted {
        return (Some(node), false);
    }

    node.update_size();
    (rebalance(node, dims), true)
}

fn delete_recursive<P: KdPoint>(
    mut node: Box<Node<P>>,
    point: &P,
    dims: usize,
) -> (Option<Box<Node<P>>>, bool) {
    if node.value == *point {
        if node.size == 1 {
            return (None, true);
        }

        let axis = node.axis;
        let mut points = Vec::with_capacity(node.size);
        node.into_points(&mut points);
        points.retain(|p| p != point);

        #[cfg(feature = "tracing")]
        event!(
            Level::DEBUG,
            axis,
            remaining = points.len(),
            "rebuilding subtree after delete"
        );

        return (build_subtree(points, axis, dims), true);
    }

    let axis = node.axis;
    let slot = if point.coord(axis) >= node.value.coord(axis) {
        &mut node.right
    } else {
        &mut node.left
    };

    let Some(child) = slot.take() else {
        return (Some(node), false);
    };

    let (child, removed) = delete_recursive(child, point, dims);
    *slot = child;

    if !removed {
        return (Some(node), false);
    }

    node.update_size();
    (rebalance(node, dims), true)
}

/// Rebuilds `node`'s whole subtree, keeping its discriminant axis, if its two
/// subtrees differ in size by more than `dims`. Otherwise returns it unchanged.
///
/// Points tied on the node's axis all land on its right, so a rebuild cannot always
/// restore balance. A node whose previous build was skewed that way is only rebuilt
/// once its skew has doubled, keeping repeated mutations along a run of ties from
/// rebuilding the same subtree every time.
pub(crate) fn rebalance<P: KdPoint>(node: Box<Node<P>>, dims: usize) -> Option<Box<Node<P>>> {
    if node.is_balanced(dims) {
        return Some(node);
    }
    if !node.needs_rebuild(dims) {
        #[cfg(feature = "tracing")]
        event!(
            Level::TRACE,
            skew = node.skew(),
            tie_skew = node.tie_skew,
            "skew from tied coordinates tolerated"
        );
        return Some(node);
    }

    let axis = node.axis;
    let mut points = Vec::with_capacity(node.size);
    node.into_points(&mut points);

    #[cfg(feature = "tracing")]
    event!(
        Level::DEBUG,
        axis,
        size = points.len(),
        "rebalancing subtree"
    );

    build_subtree(points, axis, dims)
}

/// Builds a subtree from distinct, validated `points`, discriminating on `axis` at its root.
///
/// Every axis is sorted once up front; each level then splits those orderings around
/// the median by membership instead of sorting again.
pub(crate) fn build_subtree<P: KdPoint>(
    points: Vec<P>,
    axis: usize,
    dims: usize,
) -> Option<Box<Node<P>>> {
    #[cfg(feature = "tracing")]
    let span = span!(Level::TRACE, "build_subtree", size = points.len(), axis);
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    if points.is_empty() {
        return None;
    }

    let sorted: Vec<Vec<usize>> = (0..dims)
        .map(|dim| sort_along(&points, (0..points.len()).collect(), dim))
        .collect();
    let mut side = vec![Side::Pivot; points.len()];
    let mut slots: Vec<Option<P>> = points.into_iter().map(Some).collect();

    populate_recursive(&mut slots, &mut side, sorted, axis, dims)
}

fn populate_recursive<P: KdPoint>(
    slots: &mut [Option<P>],
    side: &mut [Side],
    sorted: Vec<Vec<usize>>,
    axis: usize,
    dims: usize,
) -> Option<Box<Node<P>>> {
    let by_axis = sorted.get(axis)?;
    if by_axis.is_empty() {
        return None;
    }

    let median = lower_median(slots, by_axis, axis)?;
    let median_idx = by_axis[median];

    by_axis[..median].iter().for_each(|&i| side[i] = Side::Left);
    by_axis[median + 1..].iter().for_each(|&i| side[i] = Side::Right);
    side[median_idx] = Side::Pivot;

    let (left, right): (Vec<Vec<usize>>, Vec<Vec<usize>>) = sorted
        .iter()
        .map(|order| {
            let left = order.iter().copied().filter(|&i| side[i] == Side::Left).collect();
            let right = order.iter().copied().filter(|&i| side[i] == Side::Right).collect();
            (left, right)
        })
        .unzip();

    let next_axis = (axis + 1) % dims;
    let mut node = Node::leaf(slots[median_idx].take()?, axis);
    node.right = populate_recursive(slots, side, right, next_axis, dims);
    node.left = populate_recursive(slots, side, left, next_axis, dims);
    node.update_size();
    if !node.is_balanced(dims) {
        node.tie_skew = node.skew();
    }

    Some(Box::new(node))
}

/// Position of the median within `by_axis`: `len / 2`, moved down to the first of any
/// run of equal coordinates so that everything before it is strictly smaller.
fn lower_median<P: KdPoint>(slots: &[Option<P>], by_axis: &[usize], axis: usize) -> Option<usize> {
    let coord = |pos: usize| slots[by_axis[pos]].as_ref().map(|p| p.coord(axis));

    let mut median = by_axis.len() / 2;
    let pivot = coord(median)?;
    while median > 0 && coord(median - 1)? == pivot {
        median -= 1;
    }
    Some(median)
}

/// Stable sort of `indices` by the `dim` coordinate of the points they refer to.
fn sort_along<P: KdPoint>(points: &[P], mut indices: Vec<usize>, dim: usize) -> Vec<usize> {
    indices.sort_by(|&a, &b| {
        points[a]
            .coord(dim)
            .partial_cmp(&points[b].coord(dim))
            .unwrap_or(Ordering::Equal)
    });
    indices
}

/// Drops later repeats of equal values. Equal values share every coordinate, so only
/// runs that tie on the first axis need comparing.
fn dedup_points<P: KdPoint>(points: Vec<P>) -> Vec<P> {
    let order = sort_along(&points, (0..points.len()).collect(), 0);
    let mut keep = vec![true; points.len()];

    let mut run_start = 0;
    while run_start < order.len() {
        let first = points[order[run_start]].coord(0);
        let run_end = order[run_start..]
            .iter()
            .position(|&i| points[i].coord(0) != first)
            .map_or(order.len(), |len| run_start + len);

        let run = &order[run_start..run_end];
        for (pos, &i) in run.iter().enumerate() {
            if run[..pos].iter().any(|&j| keep[j] && points[j] == points[i]) {
                keep[i] = false;
            }
        }
        run_start = run_end;
    }

    #[cfg(feature = "tracing")]
    {
        let dropped = keep.iter().filter(|k| !**k).count();
        if dropped > 0 {
            event!(Level::DEBUG, dropped, "repeated values dropped from build input");
        }
    }

    points
        .into_iter()
        .zip(keep)
        .filter_map(|(p, keep)| keep.then_some(p))
        .collect()
}
