//! Rotating sphere renderer.
//!
//! Paints a lit sphere with three revolving landmass blobs and an atmosphere
//! ring. The blobs are drawn in a frame rotated about the sphere center, a 2D
//! stand-in for surface rotation.

use carbonzero_canvas::{Ellipse, Paint, RadialGradient, Surface};
use carbonzero_core::{Point, Rgba, Size};
use tracing::debug;

/// Radians added to the rotation after every frame.
pub const ROTATION_STEP: f64 = 0.004;

/// Sphere radius as a fraction of the surface's shorter side.
const RADIUS_FACTOR: f64 = 0.18 * 2.2;

const GLOW_INNER: Rgba = Rgba::rgba(104, 192, 155, 0.18);
const GLOW_OUTER: Rgba = Rgba::rgba(8, 18, 14, 0.0);
const BODY_HIGHLIGHT: Rgba = Rgba::rgb(0xc7, 0xf5, 0xe6);
const BODY_MID: Rgba = Rgba::rgb(0x6b, 0xc7, 0x9b);
const BODY_EDGE: Rgba = Rgba::rgb(0x2a, 0x8f, 0x67);
const LAND: Rgba = Rgba::rgba(15, 56, 39, 0.9);
const ATMOSPHERE: Rgba = Rgba::rgba(104, 192, 155, 0.22);
const ATMOSPHERE_GAP: f64 = 6.0;
const ATMOSPHERE_WIDTH: f64 = 2.2;

/// A decorative landmass: an ellipse placed relative to the sphere center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmass {
    pub offset: Point,
    pub radius_x: f64,
    pub radius_y: f64,
    pub skew: f64,
}

impl Landmass {
    const fn new(x: f64, y: f64, radius_x: f64, radius_y: f64, skew: f64) -> Self {
        Self {
            offset: Point::new(x, y),
            radius_x,
            radius_y,
            skew,
        }
    }

    fn ellipse(&self) -> Ellipse {
        Ellipse::new(self.offset, self.radius_x, self.radius_y, self.skew)
    }
}

/// The three landmass blobs, in draw order.
pub const LANDMASSES: [Landmass; 3] = [
    Landmass::new(12.0, -22.0, 26.0, 34.0, 0.35),
    Landmass::new(-42.0, 2.0, 20.0, 48.0, -0.25),
    Landmass::new(52.0, -8.0, 30.0, 36.0, 0.12),
];

/// Center and radius of the sphere, fixed at setup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereGeometry {
    pub center: Point,
    pub radius: f64,
}

impl SphereGeometry {
    /// Geometry for a surface of the given logical size.
    pub fn for_surface(size: Size) -> Self {
        Self {
            center: size.center(),
            radius: size.min_side() * RADIUS_FACTOR,
        }
    }
}

/// Rotation angle, stored as a frame count so `angle() == frames × step` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rotation {
    frames: u64,
}

impl Rotation {
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Current angle in radians.
    pub fn angle(&self) -> f64 {
        self.frames as f64 * ROTATION_STEP
    }

    pub fn advance(&mut self) {
        self.frames = self.frames.saturating_add(1);
    }
}

/// Draws the sphere onto an owned surface, one frame at a time.
#[derive(Debug)]
pub struct SphereRenderer<S> {
    surface: S,
    geometry: SphereGeometry,
    rotation: Rotation,
    glow: Paint,
    body: Paint,
}

impl<S: Surface> SphereRenderer<S> {
    /// Set up a renderer on `surface`.
    ///
    /// Returns `None` when there is no surface or it has no area; the caller
    /// then simply has nothing to animate.
    pub fn mount(surface: Option<S>) -> Option<Self> {
        let surface = surface?;
        let size = surface.size();
        if size.is_empty() {
            debug!(?size, "sphere surface has no area, skipping");
            return None;
        }

        let geometry = SphereGeometry::for_surface(size);
        let SphereGeometry { center, radius } = geometry;

        let glow = RadialGradient::new(center, radius * 0.2, center, radius * 1.4)
            .with_stop(0.0, GLOW_INNER)
            .with_stop(1.0, GLOW_OUTER);
        let highlight = Point::new(center.x - radius * 0.3, center.y - radius * 0.3);
        let body = RadialGradient::new(highlight, 1.0, center, radius)
            .with_stop(0.0, BODY_HIGHLIGHT)
            .with_stop(0.5, BODY_MID)
            .with_stop(1.0, BODY_EDGE);

        debug!(
            width = size.width,
            height = size.height,
            radius,
            "sphere renderer mounted"
        );

        Some(Self {
            surface,
            geometry,
            rotation: Rotation::default(),
            glow: glow.into(),
            body: body.into(),
        })
    }

    pub fn geometry(&self) -> SphereGeometry {
        self.geometry
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Repaint the surface at the current rotation without advancing it.
    pub fn draw(&mut self) {
        let SphereGeometry { center, radius } = self.geometry;
        let surface = &mut self.surface;
        let size = surface.size();

        surface.clear();
        surface.fill_rect(Point::default(), size, &self.glow);
        surface.fill_circle(center, radius, &self.body);

        surface.save();
        surface.translate(center.x, center.y);
        surface.rotate(self.rotation.angle());
        let land = Paint::Solid(LAND);
        for landmass in &LANDMASSES {
            surface.fill_ellipse(landmass.ellipse(), &land);
        }
        surface.restore();

        surface.stroke_circle(center, radius + ATMOSPHERE_GAP, ATMOSPHERE_WIDTH, ATMOSPHERE);
    }

    /// Draw one frame, then advance the rotation for the next one.
    pub fn frame(&mut self) {
        self.draw();
        self.rotation.advance();
    }
}

#[cfg(test)]
mod tests {
    use carbonzero_canvas::{DrawCommand, RasterCanvas, Recording};

    use super::*;

    fn recording_renderer(w: f64, h: f64) -> SphereRenderer<Recording> {
        SphereRenderer::mount(Some(Recording::new(Size::new(w, h)))).unwrap()
    }

    #[test]
    fn test_geometry_for_square_surface() {
        let g = SphereGeometry::for_surface(Size::new(320.0, 320.0));
        assert_eq!(g.center, Point::new(160.0, 160.0));
        assert!((g.radius - 126.72).abs() < 1e-9);
    }

    #[test]
    fn test_geometry_uses_shorter_side() {
        let g = SphereGeometry::for_surface(Size::new(500.0, 200.0));
        assert_eq!(g.center, Point::new(250.0, 100.0));
        assert!((g.radius - 79.2).abs() < 1e-9);
    }

    #[test]
    fn test_setup_is_idempotent() {
        let a = recording_renderer(321.0, 123.0).geometry();
        let b = recording_renderer(321.0, 123.0).geometry();
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_surface_is_noop() {
        assert!(SphereRenderer::<Recording>::mount(None).is_none());
        assert!(SphereRenderer::mount(Some(Recording::new(Size::new(0.0, 100.0)))).is_none());
    }

    #[test]
    fn test_rotation_after_n_frames() {
        let mut renderer = recording_renderer(320.0, 320.0);
        let mut previous = renderer.rotation().angle();
        assert_eq!(previous, 0.0);
        for n in 1..=250u64 {
            renderer.frame();
            let angle = renderer.rotation().angle();
            assert_eq!(angle, n as f64 * ROTATION_STEP);
            assert!(angle > previous);
            previous = angle;
        }
        assert!((renderer.rotation().angle() - 1.0).abs() < 1e-12);
        assert_eq!(renderer.rotation().frames(), 250);
    }

    #[test]
    fn test_geometry_is_independent_of_rotation() {
        let mut renderer = recording_renderer(320.0, 240.0);
        let before = renderer.geometry();
        for _ in 0..100 {
            renderer.frame();
        }
        assert_eq!(renderer.geometry(), before);
        assert_eq!(renderer.geometry().center, Point::new(160.0, 120.0));
    }

    #[test]
    fn test_frame_draw_order() {
        let mut renderer = recording_renderer(320.0, 320.0);
        renderer.frame();
        let commands = renderer.surface().commands();
        assert_eq!(commands.len(), 7);
        assert!(matches!(commands[0], DrawCommand::Clear));
        assert!(matches!(
            &commands[1],
            DrawCommand::FillRect { paint: Paint::Radial(_), .. }
        ));
        assert!(matches!(
            &commands[2],
            DrawCommand::FillCircle { radius, .. } if (*radius - 126.72).abs() < 1e-9
        ));
        assert!(commands[3..6]
            .iter()
            .all(|c| matches!(c, DrawCommand::FillEllipse { .. })));
        assert!(matches!(
            &commands[6],
            DrawCommand::StrokeCircle { radius, line_width, .. }
                if (*radius - 132.72).abs() < 1e-9 && *line_width == 2.2
        ));
        assert_eq!(renderer.surface().save_depth(), 0);
    }

    #[test]
    fn test_landmasses_rotate_rigidly_about_center() {
        let mut renderer = recording_renderer(320.0, 320.0);
        let center = renderer.geometry().center;

        let angles_at = |rec: &Recording| -> Vec<f64> {
            rec.ellipse_centers()
                .iter()
                .rev()
                .take(3)
                .rev()
                .map(|p| (*p - center).angle())
                .collect()
        };

        renderer.draw();
        let first = angles_at(renderer.surface());
        let base: Vec<f64> = LANDMASSES.iter().map(|l| l.offset.angle()).collect();
        for (got, want) in first.iter().zip(&base) {
            assert!((got - want).abs() < 1e-9);
        }

        for _ in 0..137 {
            renderer.frame();
        }
        renderer.draw();
        let later = angles_at(renderer.surface());
        let turn = renderer.rotation().angle();

        let wrap = |a: f64| a.sin().atan2(a.cos());
        for (i, (got, want)) in later.iter().zip(&base).enumerate() {
            assert!(
                wrap(got - want - turn).abs() < 1e-9,
                "landmass {i} did not rotate by {turn}"
            );
        }
        for (i, j) in [(0, 1), (1, 2), (0, 2)] {
            let before = wrap(first[i] - first[j]);
            let after = wrap(later[i] - later[j]);
            assert!((before - after).abs() < 1e-9);
        }

        // Distances from the center never change.
        for (p, l) in renderer.surface().ellipse_centers().iter().rev().take(3).rev().zip(&LANDMASSES) {
            assert!((p.distance(center) - l.offset.length()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_raster_frame_paints_sphere() {
        let mut renderer =
            SphereRenderer::mount(Some(RasterCanvas::new(Size::new(64.0, 64.0), 2.0))).unwrap();
        renderer.frame();
        let canvas = renderer.surface();
        assert_eq!(canvas.backing_size(), (128, 128));

        // Inside the sphere body, below-right of the landmasses: opaque green.
        let body = canvas.sample(Point::new(32.0, 50.0)).unwrap();
        assert!(body.a > 0.99);
        assert!(body.g > body.r && body.g > body.b);

        // Corners only carry the faint glow (or nothing).
        let corner = canvas.sample(Point::new(0.5, 0.5)).unwrap();
        assert!(corner.a < 0.2);
    }
}
