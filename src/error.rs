//! Error types returned by tree construction, mutation and queries.
//!
//! A search or delete that finds nothing is not an error; those operations
//! return `Ok(None)` / `Ok(false)`.

use thiserror::Error;

/// Primary error type for tree operations.
///
/// Every public operation validates its input before touching the tree, so an
/// `Err` always means the tree is exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KdTreeError {
    #[error("dimensionality mismatch: expected {expected} coordinates, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("point violates the point contract: {0}")]
    CapabilityViolation(String),

    #[error("cannot build a tree from an empty point collection")]
    EmptyInput,

    #[error("a tree needs at least one dimension")]
    ZeroDimensions,

    #[error("initial axis {axis} is out of range for a {dims}-dimensional tree")]
    AxisOutOfRange { axis: usize, dims: usize },

    #[error("nearest neighbour queries need a quantity of at least 1")]
    InvalidQuantity,

    #[error("radius must be a non-negative number")]
    InvalidRadius,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KdTreeError>;

#[cfg(test)]
mod tests {
    use super::KdTreeError;

    #[test]
    fn dimension_mismatch_names_both_counts() {
        let err = KdTreeError::DimensionMismatch {
            expected: 2,
            found: 3,
        };

        assert_eq!(
            err.to_string(),
            "dimensionality mismatch: expected 2 coordinates, got 3"
        );
    }

    #[test]
    fn capability_violation_carries_its_reason() {
        let err = KdTreeError::CapabilityViolation("coordinate 1 is NaN".to_string());

        assert_eq!(
            err.to_string(),
            "point violates the point contract: coordinate 1 is NaN"
        );
    }
}
