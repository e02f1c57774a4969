//! Fill and stroke paints.

use carbonzero_core::{Point, Rgba};

/// What a shape is filled with.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Radial(RadialGradient),
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        Paint::Solid(color)
    }
}

impl From<RadialGradient> for Paint {
    fn from(gradient: RadialGradient) -> Self {
        Paint::Radial(gradient)
    }
}

impl Paint {
    /// Premultiplied color of the paint at a user-space point.
    pub fn premultiplied_at(&self, p: Point) -> [f32; 4] {
        match self {
            Paint::Solid(color) => color.premultiplied(),
            Paint::Radial(gradient) => gradient.premultiplied_at(p),
        }
    }
}

/// A color stop at `offset` in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

/// Two-circle radial gradient with canvas semantics.
///
/// The gradient parameter `t` at a point is the largest `t` for which the
/// point lies on the circle interpolated between the start and end circles
/// with a non-negative radius. Outside `0..=1` the end stops are extended.
/// Points for which no such circle exists are transparent.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    start: Point,
    start_radius: f64,
    end: Point,
    end_radius: f64,
    stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(start: Point, start_radius: f64, end: Point, end_radius: f64) -> Self {
        Self {
            start,
            start_radius,
            end,
            end_radius,
            stops: Vec::new(),
        }
    }

    /// Add a color stop; stops with equal offsets keep insertion order.
    pub fn add_color_stop(&mut self, offset: f64, color: Rgba) {
        let offset = offset.clamp(0.0, 1.0);
        let at = self.stops.partition_point(|s| s.offset <= offset);
        self.stops.insert(at, ColorStop { offset, color });
    }

    /// Builder form of [`RadialGradient::add_color_stop`].
    pub fn with_stop(mut self, offset: f64, color: Rgba) -> Self {
        self.add_color_stop(offset, color);
        self
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Gradient parameter at `p`, before clamping.
    pub fn parameter_at(&self, p: Point) -> Option<f64> {
        let dc = self.end - self.start;
        let dr = self.end_radius - self.start_radius;
        let pd = p - self.start;
        let r0 = self.start_radius;

        // |pd - t*dc|^2 = (r0 + t*dr)^2  =>  a t^2 - 2 b t + c = 0
        let a = dc.dot(dc) - dr * dr;
        let b = pd.dot(dc) + r0 * dr;
        let c = pd.dot(pd) - r0 * r0;
        let radius_ok = |t: f64| r0 + t * dr >= 0.0;

        if a.abs() < 1e-12 {
            if b.abs() < 1e-12 {
                return None;
            }
            let t = c / (2.0 * b);
            return radius_ok(t).then_some(t);
        }

        let disc = b * b - a * c;
        if disc < 0.0 {
            return None;
        }
        let sq = disc.sqrt();
        let t1 = (b + sq) / a;
        let t2 = (b - sq) / a;
        let (hi, lo) = if t1 >= t2 { (t1, t2) } else { (t2, t1) };
        if radius_ok(hi) {
            Some(hi)
        } else if radius_ok(lo) {
            Some(lo)
        } else {
            None
        }
    }

    /// Premultiplied color at a user-space point.
    pub fn premultiplied_at(&self, p: Point) -> [f32; 4] {
        match self.parameter_at(p) {
            Some(t) => self.premultiplied_at_parameter(t),
            None => [0.0; 4],
        }
    }

    /// Premultiplied color for a gradient parameter, padded outside `0..=1`.
    pub fn premultiplied_at_parameter(&self, t: f64) -> [f32; 4] {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return [0.0; 4];
        };
        let t = t.clamp(0.0, 1.0);
        if t <= first.offset {
            return first.color.premultiplied();
        }
        if t >= last.offset {
            return last.color.premultiplied();
        }

        let upper = self.stops.partition_point(|s| s.offset <= t);
        let (lo, hi) = (self.stops[upper - 1], self.stops[upper]);
        let span = hi.offset - lo.offset;
        let k = if span > 0.0 {
            ((t - lo.offset) / span) as f32
        } else {
            1.0
        };
        let (a, b) = (lo.color.premultiplied(), hi.color.premultiplied());
        std::array::from_fn(|i| a[i] + (b[i] - a[i]) * k)
    }
}
