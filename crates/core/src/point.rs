//! A mutable-in-place 2D coordinate pair.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Represents a point on a 2 dimensional x / y coordinate system.
///
/// `Point` is a plain value: it is `Copy`, so every binding holds its own
/// coordinates. The mutators ([`Point::set_values`], [`Point::copy_from`])
/// return `&mut Self` so calls can be chained on the same instance.
///
/// No validation is performed; NaN and infinite coordinates are stored as given.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Overwrites both coordinates.
    pub fn set_values(&mut self, x: f32, y: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Sets both coordinates back to zero.
    pub fn reset(&mut self) -> &mut Self {
        self.set_values(0.0, 0.0)
    }

    /// Copies the coordinates of `other` into this point.
    ///
    /// Only the values are copied, no reference to `other` is kept.
    pub fn copy_from(&mut self, other: &impl PointLike) -> &mut Self {
        self.set_values(other.x(), other.y())
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Copy with `-0.0` replaced by `0.0` on both axes, for display.
    pub fn unsigned_zero(self) -> Self {
        let unsign = |v: f32| if v == 0.0 { 0.0 } else { v };
        Self::new(unsign(self.x), unsign(self.y))
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Point { x, y } = self.unsigned_zero();
        write!(f, "Point (x={} y={})", x, y)
    }
}

impl From<Vec2> for Point {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        p.as_vec2()
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// Anything that exposes a numeric `x` / `y` pair.
///
/// Coordinate transforms may hand back any `PointLike` value; callers only
/// ever read the two components.
pub trait PointLike {
    fn x(&self) -> f32;
    fn y(&self) -> f32;

    fn to_point(&self) -> Point {
        Point::new(self.x(), self.y())
    }
}

impl PointLike for Point {
    fn x(&self) -> f32 {
        self.x
    }

    fn y(&self) -> f32 {
        self.y
    }
}

impl PointLike for Vec2 {
    fn x(&self) -> f32 {
        self.x
    }

    fn y(&self) -> f32 {
        self.y
    }
}

impl PointLike for (f32, f32) {
    fn x(&self) -> f32 {
        self.0
    }

    fn y(&self) -> f32 {
        self.1
    }
}

impl<P: PointLike + ?Sized> PointLike for &P {
    fn x(&self) -> f32 {
        (**self).x()
    }

    fn y(&self) -> f32 {
        (**self).y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn default_is_origin() {
        let point = Point::default();
        assert_eq!(point, Point::ZERO);
        assert_eq!(point.x, 0.0);
        assert_eq!(point.y, 0.0);
    }

    #[test]
    fn display_format() {
        assert_eq!(Point::new(0.0, 100.0).to_string(), "Point (x=0 y=100)");
        assert_eq!(Point::new(-2.5, 0.25).to_string(), "Point (x=-2.5 y=0.25)");
        assert_eq!(Point::new(-0.0, -0.0).to_string(), "Point (x=0 y=0)");
    }

    #[test]
    fn set_values_chains_on_same_instance() {
        let mut point = Point::new(1.0, 2.0);
        point.set_values(3.0, 4.0).set_values(5.0, 6.0);
        assert_eq!(point, Point::new(5.0, 6.0));

        point.reset();
        assert_eq!(point, Point::ZERO);
    }

    #[test]
    fn set_values_accepts_non_finite() {
        let mut point = Point::default();
        point.set_values(f32::INFINITY, f32::NAN);
        assert_eq!(point.x, f32::INFINITY);
        assert!(point.y.is_nan());
    }

    #[test]
    fn clone_is_independent() {
        let mut original = Point::new(10.0, 20.0);
        let mut copy = original.clone();

        copy.set_values(-1.0, -2.0);
        assert_eq!(original, Point::new(10.0, 20.0));

        original.x = 99.0;
        assert_eq!(copy, Point::new(-1.0, -2.0));
    }

    #[test]
    fn copy_then_clone_reflects_copied_values() {
        let other = Point::new(7.0, 8.0);
        let mut point = Point::new(1.0, 1.0);

        let cloned = point.copy_from(&other).clone();
        assert_eq!(cloned, other);
        assert_eq!(point, other);
    }

    #[test]
    fn copy_from_accepts_point_like_values() {
        let mut point = Point::default();
        point.copy_from(&Vec2::new(3.0, 4.0));
        assert_eq!(point, Point::new(3.0, 4.0));

        point.copy_from(&(5.0, 6.0));
        assert_eq!(point, Point::new(5.0, 6.0));
    }

    #[test]
    fn copy_from_does_not_alias_source() {
        let mut source = Point::new(1.0, 2.0);
        let mut point = Point::default();
        point.copy_from(&source);

        source.set_values(100.0, 200.0);
        assert_eq!(point, Point::new(1.0, 2.0));
    }

    #[test]
    fn random_copy_and_clone_keep_values() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..256 {
            let other = Point::new(
                rng.random_range(-1.0e4..1.0e4),
                rng.random_range(-1.0e4..1.0e4),
            );
            let mut point = Point::new(rng.random_range(-10.0..10.0), 0.0);
            let cloned = point.copy_from(&other).clone();
            assert_eq!(cloned, other);
        }
    }

    #[test]
    fn vec2_conversions() {
        let v = Vec2::new(5.0, 10.0);
        let point: Point = v.into();
        let back: Vec2 = point.into();
        assert_eq!(v, back);
        assert_eq!(Point::from((1.0, 2.0)), Point::new(1.0, 2.0));
    }

    #[test]
    fn serializes_as_plain_pair() {
        let json = serde_json::to_string(&Point::new(1.5, -2.0)).unwrap();
        assert_eq!(json, r#"{"x":1.5,"y":-2.0}"#);

        let parsed: Point = serde_json::from_str(r#"{"x":3.0,"y":4.0}"#).unwrap();
        assert_eq!(parsed, Point::new(3.0, 4.0));
    }
}
