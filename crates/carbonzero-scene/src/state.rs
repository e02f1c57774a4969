//! Page animation state management.

use std::time::{Duration, Instant};

use carbonzero_canvas::{CanvasView, RasterCanvas};
use carbonzero_core::{Interval, Size, palette};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{Frame, layout::Rect};
use tracing::{debug, info};

use crate::{Co2Counter, ParticleField, SphereRenderer};

/// Startup options for the page animations.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSettings {
    /// Whether the sphere's drawing surface exists at all.
    pub sphere_enabled: bool,
    /// Logical size of the sphere's drawing surface.
    pub sphere_size: Size,
    /// Device pixel ratio of the drawing surface.
    pub pixel_ratio: f64,
    pub particles_enabled: bool,
    pub particle_count: usize,
    /// Pixel size of one terminal cell (width, height).
    pub cell_px: (f64, f64),
    pub counter_start: f64,
    pub counter_max_step: f64,
    pub counter_interval: Duration,
    /// Fixed RNG seed; a time-based seed is used when absent.
    pub seed: Option<u64>,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            sphere_enabled: true,
            sphere_size: Size::new(320.0, 320.0),
            pixel_ratio: 1.0,
            particles_enabled: true,
            particle_count: 30,
            cell_px: (8.0, 16.0),
            counter_start: 37_000_000_000.0,
            counter_max_step: 150.0,
            counter_interval: Duration::from_millis(200),
            seed: None,
        }
    }
}

/// All page animations, each independent of the others.
#[derive(Debug)]
pub struct SceneState {
    /// Sphere renderer, absent when there is no drawing surface.
    sphere: Option<SphereRenderer<RasterCanvas>>,
    /// Particles placed at startup.
    particles: ParticleField,
    /// Live CO₂ total.
    counter: Co2Counter,
    /// Timer driving the counter.
    counter_timer: Interval,
    /// Pixel size of one terminal cell.
    cell_px: (f64, f64),
    /// Random source for counter ticks.
    rng: StdRng,
    /// Seed captured at initialization.
    init_seed: u64,
}

impl SceneState {
    /// Build every animation once, at `now`.
    pub fn new(settings: &SceneSettings, now: Instant) -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        let init_seed = settings.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });
        let mut rng = StdRng::seed_from_u64(init_seed);

        let surface = settings
            .sphere_enabled
            .then(|| RasterCanvas::new(settings.sphere_size, settings.pixel_ratio));
        let sphere = SphereRenderer::mount(surface);

        let particles = if settings.particles_enabled {
            ParticleField::new(settings.particle_count, &mut rng)
        } else {
            ParticleField::default()
        };

        info!(
            seed = init_seed,
            sphere = sphere.is_some(),
            particles = particles.particles().len(),
            "scene initialized"
        );

        Self {
            sphere,
            particles,
            counter: Co2Counter::new(settings.counter_start, settings.counter_max_step),
            counter_timer: Interval::new(settings.counter_interval, now),
            cell_px: settings.cell_px,
            rng,
            init_seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.init_seed
    }

    pub fn counter(&self) -> &Co2Counter {
        &self.counter
    }

    pub fn sphere(&self) -> Option<&SphereRenderer<RasterCanvas>> {
        self.sphere.as_ref()
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    /// When the counter next wants to run.
    pub fn next_timer_deadline(&self) -> Instant {
        self.counter_timer.next_deadline()
    }

    /// Run timers that are due at `now`.
    pub fn update(&mut self, now: Instant) {
        if self.counter_timer.poll(now) {
            let delta = self.counter.tick(&mut self.rng);
            debug!(delta, total = self.counter.total(), "counter tick");
        }
    }

    /// Draw the particle layer over `area`.
    pub fn render_particles(&self, frame: &mut Frame, area: Rect, elapsed_ms: u64) {
        self.particles.render(
            frame.buffer_mut(),
            area,
            elapsed_ms,
            self.cell_px,
            palette::PAGE_BACKGROUND,
        );
    }

    /// Draw one sphere frame into `area` and advance its rotation.
    pub fn render_sphere(&mut self, frame: &mut Frame, area: Rect) {
        let Some(sphere) = self.sphere.as_mut() else {
            return;
        };
        sphere.frame();
        frame.render_widget(
            CanvasView::new(sphere.surface(), palette::PAGE_BACKGROUND),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SceneSettings {
        SceneSettings {
            sphere_size: Size::new(32.0, 32.0),
            seed: Some(11),
            ..Default::default()
        }
    }

    #[test]
    fn test_counter_ticks_on_interval() {
        let t0 = Instant::now();
        let mut scene = SceneState::new(&settings(), t0);
        let start = scene.counter().total();

        scene.update(t0);
        let after_first = scene.counter().total();
        assert!(after_first >= start);

        scene.update(t0 + Duration::from_millis(100));
        assert_eq!(scene.counter().total(), after_first);

        assert_eq!(scene.next_timer_deadline(), t0 + Duration::from_millis(200));
    }

    #[test]
    fn test_disabled_sphere_is_noop() {
        let scene = SceneState::new(
            &SceneSettings {
                sphere_enabled: false,
                ..settings()
            },
            Instant::now(),
        );
        assert!(scene.sphere().is_none());
    }

    #[test]
    fn test_oversized_sphere_surface_is_skipped() {
        let scene = SceneState::new(
            &SceneSettings {
                sphere_size: Size::new(320.0, 320.0),
                pixel_ratio: 1e9,
                ..settings()
            },
            Instant::now(),
        );
        assert!(scene.sphere().is_none());
    }

    #[test]
    fn test_seeded_scene_is_reproducible() {
        let t0 = Instant::now();
        let a = SceneState::new(&settings(), t0);
        let b = SceneState::new(&settings(), t0);
        assert_eq!(a.seed(), 11);
        assert_eq!(a.particles().particles(), b.particles().particles());
    }

    #[test]
    fn test_particles_can_be_disabled() {
        let scene = SceneState::new(
            &SceneSettings {
                particles_enabled: false,
                ..settings()
            },
            Instant::now(),
        );
        assert!(scene.particles().particles().is_empty());
        assert!(scene.sphere().is_some());
    }
}
