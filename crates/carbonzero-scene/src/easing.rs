//! CSS-style cubic-bezier timing functions.

/// A timing curve through (0,0), (x1,y1), (x2,y2), (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    /// The CSS `ease-in-out` curve.
    pub const EASE_IN_OUT: CubicBezier = CubicBezier::new(0.42, 0.0, 0.58, 1.0);

    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn component(s: f64, p1: f64, p2: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    }

    fn x_derivative(&self, s: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * self.x1
            + 6.0 * inv * s * (self.x2 - self.x1)
            + 3.0 * s * s * (1.0 - self.x2)
    }

    /// Output progress for an input progress `t` in `0..=1`.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }

        // Newton first, bisection if it stalls.
        let mut s = t;
        for _ in 0..8 {
            let err = Self::component(s, self.x1, self.x2) - t;
            if err.abs() < 1e-7 {
                return Self::component(s, self.y1, self.y2);
            }
            let d = self.x_derivative(s);
            if d.abs() < 1e-6 {
                break;
            }
            s = (s - err / d).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        s = t;
        for _ in 0..40 {
            let x = Self::component(s, self.x1, self.x2);
            if (x - t).abs() < 1e-7 {
                break;
            }
            if x < t {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        Self::component(s, self.y1, self.y2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_in_out_endpoints_and_midpoint() {
        let ease = CubicBezier::EASE_IN_OUT;
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_ease_in_out_is_slow_at_edges() {
        let ease = CubicBezier::EASE_IN_OUT;
        assert!(ease.apply(0.1) < 0.1);
        assert!(ease.apply(0.9) > 0.9);
    }

    #[test]
    fn test_ease_in_out_is_monotonic() {
        let ease = CubicBezier::EASE_IN_OUT;
        let mut last = 0.0;
        for i in 1..=100 {
            let v = ease.apply(i as f64 / 100.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_linear_curve() {
        let linear = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
        assert!((linear.apply(0.3) - 0.3).abs() < 1e-6);
    }
}
