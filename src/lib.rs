#![warn(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::invalid_codeblock_attributes)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::private_intra_doc_links)]

//! # kdtrees
//!
//! A dynamic, pseudo-balanced k-d tree.
//!
//! The tree is built by median partitioning over presorted axes and stays useful as it
//! mutates: besides the per-axis ordering of a classic k-d tree, every node keeps the
//! sizes of its two subtrees within `k` of each other. An insert or delete that breaks
//! this bound rebuilds the offending subtree from its points, so the median split is
//! re-established exactly rather than approximated by rotations.
//!
//! Supported operations are exact search, insertion, deletion, k-nearest-neighbour
//! queries and radius queries. Points are anything implementing [`KdPoint`]: numeric
//! vectors (`Vec<f64>`, `[f32; 3]`, ...) measured with Euclidean distance, or custom
//! types that bring their own distance method.
//!
//! ## Usage
//! ```rust
//! use kdtrees::KdTree;
//!
//! let mut tree = KdTree::build(vec![
//!     [0f64, 0f64],
//!     [1f64, 1f64],
//!     [2f64, 2f64],
//! ]).unwrap();
//!
//! tree.insert([3f64, 3f64]).unwrap();
//! tree.delete(&[2f64, 2f64]).unwrap();
//!
//! assert_eq!(tree.len(), 3);
//! assert!(tree.contains(&[3f64, 3f64]).unwrap());
//!
//! let nearest = tree.k_nearest(&[0.1f64, 0.1f64], 2).unwrap();
//! assert_eq!(nearest[0].point, [0f64, 0f64]);
//! assert_eq!(nearest[1].point, [1f64, 1f64]);
//!
//! let within = tree.radius_search(&[3f64, 3f64], 3f64).unwrap();
//! assert_eq!(within.len(), 1);
//! assert_eq!(within[0].point, [1f64, 1f64]);
//! ```
//!
//! ## Features
//! - `tracing` (default): emits `tracing` events when subtrees are rebuilt.
//! - `test_utils`: random point generators used by the tests and benches.

mod construction;
pub mod distance;
pub mod error;
pub mod kdtree;
pub mod neighbour;
mod query;
mod result_collection;
#[doc(hidden)]
#[cfg(feature = "test_utils")]
pub mod test_utils;
pub mod traits;
pub mod util;

pub use crate::error::KdTreeError;
pub use crate::kdtree::{BuildOptions, KdTree, Node};
pub use crate::neighbour::Neighbour;
pub use crate::traits::{Axis, KdPoint};
