//! Exact search, k-nearest-neighbour and radius queries.

mod nearest_n;
mod search;
mod within;

use crate::error::Result;
use crate::kdtree::Node;
use crate::result_collection::ResultCollection;
use crate::traits::KdPoint;
use crate::util::checked_distance;

/// Branch-and-bound walk shared by the neighbour queries.
///
/// Every visited value is offered to `results`. The child on the query's side of the
/// splitting plane is visited first; each child is only entered while the plane is
/// within `results.max_dist()` of the query along the node's axis, re-reading the
/// bound just before descending since the first visit may have tightened it.
pub(crate) fn neighbours_recurse<P, R>(query: &P, node: &Node<P>, results: &mut R) -> Result<()>
where
    P: KdPoint,
    R: ResultCollection<P>,
{
    let distance = checked_distance(query.distance(&node.value))?;
    results.add(query, &node.value, distance);

    let query_val = query.coord(node.axis);
    let split_val = node.value.coord(node.axis);
    let right_first = query_val >= split_val;

    for go_right in [right_first, !right_first] {
        let bound = results.max_dist();
        if go_right {
            if let Some(right) = node.right() {
                if query_val + bound >= split_val {
                    neighbours_recurse(query, right, results)?;
                }
            }
        } else if let Some(left) = node.left() {
            if query_val - bound < split_val {
                neighbours_recurse(query, left, results)?;
            }
        }
    }

    Ok(())
}
