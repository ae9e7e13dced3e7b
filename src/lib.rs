#![doc = include_str!("../README.md")]

pub mod distance;
mod error;
pub mod quadtree;
mod r#type;

pub use error::QuadTreeError;
pub use r#type::QuadTreeNum;

#[cfg(test)]
pub(crate) mod test;
