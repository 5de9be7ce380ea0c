//! Vector and matrix math for the book model
//!
//! Points are treated as row vectors: `p' = p · M`. A chain `a.then(&b)`
//! therefore applies `a` first and `b` second, which is the order hinge,
//! turn and camera transforms are composed in.

pub mod matrix;
pub mod vector;

pub use matrix::Matrix4;
pub use vector::Vector3;
