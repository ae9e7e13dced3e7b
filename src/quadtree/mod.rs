//! A region quadtree with exact point lookup and k-nearest-neighbor search.

#![warn(missing_docs)]

mod builder;
mod geometry;
mod index;
mod knn;
mod node;
pub mod traversal;

pub use builder::{QuadTreeBuilder, DEFAULT_QUADTREE_CAPACITY};
pub use geometry::{ChildSlot, Point, Rect};
pub use index::{Lookup, QuadTree};
pub use knn::KnnStrategy;
pub use node::{NodeId, Record};
