//! Software rasterizer backing a [`Surface`].

use carbonzero_core::{Point, Rgba, Size};

use crate::{Affine, Ellipse, Paint, Surface, TransformStack};

/// A raster surface with a premultiplied RGBA backing store.
///
/// The backing store is `ceil(W·R) × ceil(H·R)` pixels for a logical size
/// `W × H` and pixel ratio `R`; the base transform scales by `R` so drawing
/// calls stay in logical units.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    size: Size,
    pixel_ratio: f64,
    width: usize,
    height: usize,
    pixels: Vec<[f32; 4]>,
    transforms: TransformStack,
}

impl RasterCanvas {
    /// Create a transparent canvas. Invalid pixel ratios fall back to 1.
    ///
    /// A backing store over 4096 × 4096 device pixels is not allocated: the
    /// canvas comes out empty, with zero logical size.
    pub fn new(size: Size, pixel_ratio: f64) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        let (size, width, height) = match backing_dimensions(size, pixel_ratio) {
            Some((width, height)) => (size, width, height),
            None => (Size::default(), 0, 0),
        };

        Self {
            size,
            pixel_ratio,
            width,
            height,
            pixels: vec![[0.0; 4]; width * height],
            transforms: TransformStack::new(Affine::scaling(pixel_ratio, pixel_ratio)),
        }
    }

    /// Backing store dimensions in device pixels.
    pub fn backing_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Premultiplied value of a device pixel.
    pub fn premultiplied(&self, x: usize, y: usize) -> Option<[f32; 4]> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Straight-alpha color of a device pixel.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        self.premultiplied(x, y).map(Rgba::from_premultiplied)
    }

    /// Color of the device pixel under a logical point.
    pub fn sample(&self, p: Point) -> Option<Rgba> {
        if p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let x = (p.x * self.pixel_ratio).floor() as usize;
        let y = (p.y * self.pixel_ratio).floor() as usize;
        self.pixel(x, y)
    }

    /// Rasterize a shape given its user-space bounding corners and a coverage
    /// function of (user point, device pixels per user unit).
    fn fill_with<F>(&mut self, corners: [Point; 4], paint: &Paint, coverage: F)
    where
        F: Fn(Point, f64) -> f32,
    {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let m = self.transforms.current();
        let Some(inverse) = m.invert() else {
            return;
        };
        let scale = m.scale_factor();

        let device = corners.map(|c| m.apply(c));
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in device {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        let clamp_x = |v: f64| v.clamp(0.0, self.width as f64) as usize;
        let clamp_y = |v: f64| v.clamp(0.0, self.height as f64) as usize;
        let (x0, x1) = (clamp_x(min_x.floor() - 1.0), clamp_x(max_x.ceil() + 1.0));
        let (y0, y1) = (clamp_y(min_y.floor() - 1.0), clamp_y(max_y.ceil() + 1.0));

        for py in y0..y1 {
            for px in x0..x1 {
                let user = inverse.apply(Point::new(px as f64 + 0.5, py as f64 + 0.5));
                let cov = coverage(user, scale);
                if cov <= 0.0 {
                    continue;
                }
                let src = paint.premultiplied_at(user);
                let dst = &mut self.pixels[py * self.width + px];
                let src_a = src[3] * cov;
                for i in 0..4 {
                    dst[i] = src[i] * cov + dst[i] * (1.0 - src_a);
                }
            }
        }
    }
}

/// Largest backing store a canvas will allocate, in device pixels.
const MAX_BACKING_PIXELS: usize = 4096 * 4096;

/// `ceil(W·R) × ceil(H·R)`, or `None` for an empty or oversized store.
fn backing_dimensions(size: Size, pixel_ratio: f64) -> Option<(usize, usize)> {
    if size.is_empty() {
        return None;
    }
    let width = (size.width * pixel_ratio).ceil();
    let height = (size.height * pixel_ratio).ceil();
    let limit = MAX_BACKING_PIXELS as f64;
    if !(width.is_finite() && height.is_finite()) || width > limit || height > limit {
        return None;
    }
    let (width, height) = (width as usize, height as usize);
    width
        .checked_mul(height)
        .filter(|&pixels| pixels <= MAX_BACKING_PIXELS)
        .map(|_| (width, height))
}

/// Coverage of a signed distance (negative inside) at a device scale.
fn edge_coverage(signed_distance: f64, scale: f64) -> f32 {
    (0.5 - signed_distance * scale).clamp(0.0, 1.0) as f32
}

fn square_corners(center: Point, half: f64) -> [Point; 4] {
    [
        Point::new(center.x - half, center.y - half),
        Point::new(center.x + half, center.y - half),
        Point::new(center.x + half, center.y + half),
        Point::new(center.x - half, center.y + half),
    ]
}

impl Surface for RasterCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
    }

    fn save(&mut self) {
        self.transforms.save();
    }

    fn restore(&mut self) {
        self.transforms.restore();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transforms.concat(Affine::translation(dx, dy));
    }

    fn rotate(&mut self, angle: f64) {
        self.transforms.concat(Affine::rotation(angle));
    }

    fn transform(&self) -> Affine {
        // Report the logical transform, without the device pixel ratio.
        Affine::scaling(1.0 / self.pixel_ratio, 1.0 / self.pixel_ratio)
            .then_apply(self.transforms.current())
    }

    fn fill_rect(&mut self, origin: Point, size: Size, paint: &Paint) {
        let (x0, y0) = (origin.x.min(origin.x + size.width), origin.y.min(origin.y + size.height));
        let (x1, y1) = (origin.x.max(origin.x + size.width), origin.y.max(origin.y + size.height));
        let corners = [
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ];
        self.fill_with(corners, paint, |p, scale| {
            let dx = (x0 - p.x).max(p.x - x1);
            let dy = (y0 - p.y).max(p.y - y1);
            edge_coverage(dx, scale) * edge_coverage(dy, scale)
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        if radius <= 0.0 {
            return;
        }
        self.fill_with(square_corners(center, radius), paint, |p, scale| {
            edge_coverage(p.distance(center) - radius, scale)
        });
    }

    fn fill_ellipse(&mut self, ellipse: Ellipse, paint: &Paint) {
        if ellipse.radius_x <= 0.0 || ellipse.radius_y <= 0.0 {
            return;
        }
        let corners = square_corners(ellipse.center, ellipse.bounding_radius());
        self.fill_with(corners, paint, |p, scale| {
            let f = ellipse.implicit(p).sqrt();
            if f < 0.5 {
                return 1.0;
            }
            // First-order distance estimate: (f - 1) / |grad f|.
            let l = ellipse.to_local(p);
            let grad = (l.x / ellipse.radius_x.powi(2)).hypot(l.y / ellipse.radius_y.powi(2)) / f;
            edge_coverage((f - 1.0) / grad, scale)
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, line_width: f64, color: Rgba) {
        if line_width <= 0.0 {
            return;
        }
        let half = line_width / 2.0;
        let paint = Paint::Solid(color);
        self.fill_with(square_corners(center, radius + half), &paint, |p, scale| {
            edge_coverage((p.distance(center) - radius).abs() - half, scale)
        });
    }
}
