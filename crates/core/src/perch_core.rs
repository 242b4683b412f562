//! # Core geometry shared by the Perch crates
//!
//! This crate holds the leaf value types every other crate builds on:
//! the [`Point`] coordinate pair, the [`PointLike`] contract used wherever a
//! "point-shaped" value is accepted, and the [`NodeTransform`] used by the
//! scene graph to move between global and local coordinate spaces.

pub mod point;
pub mod transform;

pub use point::{Point, PointLike};
pub use transform::NodeTransform;
