//! Plain 2D geometry in logical (CSS-like) pixels.

use std::ops::{Add, Sub};

/// A point in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        (self - other).length()
    }

    /// Length of the vector from the origin to this point.
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle of the vector from the origin, in radians.
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either side is zero, negative or not a number.
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn min_side(self) -> f64 {
        self.width.min(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_center() {
        assert_eq!(Size::new(320.0, 200.0).center(), Point::new(160.0, 100.0));
        assert_eq!(Size::new(320.0, 200.0).min_side(), 200.0);
    }

    #[test]
    fn test_size_is_empty() {
        assert!(Size::new(0.0, 10.0).is_empty());
        assert!(Size::new(10.0, f64::NAN).is_empty());
        assert!(!Size::new(1.0, 1.0).is_empty());
    }

    #[test]
    fn test_point_angle() {
        let p = Point::new(0.0, 2.0);
        assert!((p.angle() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(p.length(), 2.0);
    }
}
