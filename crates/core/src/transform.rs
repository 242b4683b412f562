//! Translation + uniform scale transform for scene nodes
//!
//! Each node in the scene graph carries one of these relative to its parent.
//! Composing them from the root down yields the node's world transform, and
//! the inverse of that maps global (stage) coordinates into the node's local
//! space. No rotation, no skew.

use crate::point::{Point, PointLike};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A 2D transformation that supports only translation and uniform scale.
///
/// Formula: `point * scale + offset`
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeTransform {
    /// Translation relative to the parent's origin
    pub offset: Vec2,
    /// Uniform scale factor
    pub scale: f32,
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl NodeTransform {
    pub fn identity() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }

    pub fn from_translation(x: f32, y: f32) -> Self {
        Self {
            offset: Vec2::new(x, y),
            scale: 1.0,
        }
    }

    pub fn from_scale(scale: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            scale,
        }
    }

    pub fn new(offset: Vec2, scale: f32) -> Self {
        Self { offset, scale }
    }

    /// Maps a point from this node's space into its parent's space.
    pub fn apply(&self, point: impl PointLike) -> Point {
        (point.to_point().as_vec2() * self.scale + self.offset).into()
    }

    /// Maps a point from the parent's space into this node's space.
    ///
    /// Callers should check [`NodeTransform::is_invertible`] first; a zero
    /// scale yields non-finite coordinates.
    pub fn apply_inverse(&self, point: impl PointLike) -> Point {
        ((point.to_point().as_vec2() - self.offset) / self.scale).into()
    }

    /// Composes two transformations: first applies self, then other.
    ///
    /// For a child transform `c` and its parent's world transform `p`,
    /// `c.then(&p)` is the child's world transform.
    pub fn then(&self, other: &NodeTransform) -> NodeTransform {
        NodeTransform {
            offset: other.apply(self.offset).as_vec2(),
            scale: self.scale * other.scale,
        }
    }

    pub fn is_invertible(&self) -> bool {
        self.scale.is_finite() && self.scale != 0.0
    }
}
