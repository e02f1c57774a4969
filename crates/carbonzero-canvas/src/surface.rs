//! The drawing-surface trait and its shared transform stack.

use carbonzero_core::{Point, Rgba, Size};

use crate::{Affine, Paint};

/// An ellipse in user space: center, semi-axes and rotation in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
    pub rotation: f64,
}

impl Ellipse {
    pub const fn new(center: Point, radius_x: f64, radius_y: f64, rotation: f64) -> Self {
        Self {
            center,
            radius_x,
            radius_y,
            rotation,
        }
    }

    /// Map a user-space point into the ellipse's unrotated frame, relative to its center.
    pub fn to_local(&self, p: Point) -> Point {
        let (sin, cos) = self.rotation.sin_cos();
        let d = p - self.center;
        Point::new(d.x * cos + d.y * sin, -d.x * sin + d.y * cos)
    }

    /// Implicit value `(x/rx)^2 + (y/ry)^2` at `p`; `<= 1` is inside.
    pub fn implicit(&self, p: Point) -> f64 {
        let l = self.to_local(p);
        (l.x / self.radius_x).powi(2) + (l.y / self.radius_y).powi(2)
    }

    /// Radius of the smallest circle around the center containing the ellipse.
    pub fn bounding_radius(&self) -> f64 {
        self.radius_x.abs().max(self.radius_y.abs())
    }
}

/// A 2D drawing surface with canvas-style primitives.
///
/// All coordinates are logical units in the current user space, i.e. after
/// the transform stack is applied. Drawing never fails.
pub trait Surface {
    /// Logical size of the surface.
    fn size(&self) -> Size;

    /// Reset every pixel to transparent.
    fn clear(&mut self);

    /// Push the current transform.
    fn save(&mut self);

    /// Pop the most recently saved transform. Unbalanced restores are ignored.
    fn restore(&mut self);

    fn translate(&mut self, dx: f64, dy: f64);

    fn rotate(&mut self, angle: f64);

    /// Current user-to-logical transform.
    fn transform(&self) -> Affine;

    fn fill_rect(&mut self, origin: Point, size: Size, paint: &Paint);

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint);

    fn fill_ellipse(&mut self, ellipse: Ellipse, paint: &Paint);

    fn stroke_circle(&mut self, center: Point, radius: f64, line_width: f64, color: Rgba);
}

/// Save/restore stack of affine transforms, shared by surface implementations.
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    current: Affine,
    saved: Vec<Affine>,
}

impl TransformStack {
    pub fn new(base: Affine) -> Self {
        Self {
            current: base,
            saved: Vec::new(),
        }
    }

    pub fn current(&self) -> Affine {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    pub fn restore(&mut self) {
        if let Some(previous) = self.saved.pop() {
            self.current = previous;
        }
    }

    pub fn concat(&mut self, m: Affine) {
        self.current = self.current.then_apply(m);
    }
}
