use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
///
/// Coordinates are reported as `f64` regardless of the coordinate type of the tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuadTreeError {
    /// The domain corners are not finite, or do not describe a rectangle with `y` increasing
    /// upward.
    #[error(
        "Invalid domain: top-left ({}, {}) must be finite and above-left of ({}, {}).",
        .top_left.0, .top_left.1, .bottom_right.0, .bottom_right.1
    )]
    InvalidDomain {
        /// The requested top-left corner
        top_left: (f64, f64),
        /// The requested bottom-right corner
        bottom_right: (f64, f64),
    },

    /// The point lies outside the configured domain rectangle.
    #[error("Point ({x}, {y}) is outside the domain.")]
    OutOfDomain {
        /// x coordinate of the rejected point
        x: f64,
        /// y coordinate of the rejected point
        y: f64,
    },

    /// A record with identical coordinates already exists. The first insert wins.
    #[error("A record already exists at ({x}, {y}).")]
    Duplicate {
        /// x coordinate of the rejected point
        x: f64,
        /// y coordinate of the rejected point
        y: f64,
    },

    /// The point cannot be separated from an existing record because the coordinate type has no
    /// representable midpoint between them.
    #[error("Point ({x}, {y}) cannot be separated from its neighbor at this precision.")]
    Indivisible {
        /// x coordinate of the rejected point
        x: f64,
        /// y coordinate of the rejected point
        y: f64,
    },

    /// The tree was cleared and has no domain until it is reconfigured.
    #[error("The tree has been cleared; reconfigure a domain before inserting.")]
    Cleared,
}

pub type Result<T> = std::result::Result<T, QuadTreeError>;
