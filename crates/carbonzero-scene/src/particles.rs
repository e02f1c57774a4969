//! Floating particle decoration (stateless after placement).

use carbonzero_core::Rgba;
use rand::Rng;
use ratatui::{buffer::Buffer, layout::Rect};

use crate::{chars::PARTICLE_CHARS, easing::CubicBezier};

const GRADIENT_FROM: Rgba = Rgba::rgba(104, 192, 155, 0.9);
const GRADIENT_TO: Rgba = Rgba::rgba(42, 143, 103, 0.9);

/// A single write-once particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Diameter in pixels (6..16).
    pub size_px: f64,
    /// Left edge as a percentage of the viewport width.
    pub left_pct: f64,
    /// Top edge as a percentage of the viewport height.
    pub top_pct: f64,
    /// Opacity (0.25..0.85).
    pub opacity: f64,
    /// Loop duration in milliseconds (6s..18s).
    pub period_ms: f64,
    /// Peak drift in pixels.
    pub drift: (f64, f64),
    /// How far into its loop the particle starts, in milliseconds.
    pub phase_ms: f64,
}

impl Particle {
    /// Place a particle using `rng`.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let size_px = 6.0 + rng.r#gen::<f64>() * 10.0;
        let left_pct = rng.r#gen::<f64>() * 100.0;
        let top_pct = rng.r#gen::<f64>() * 100.0;
        let opacity = 0.25 + rng.r#gen::<f64>() * 0.6;
        let period_ms = (6.0 + rng.r#gen::<f64>() * 12.0) * 1000.0;
        let dx = (rng.r#gen::<f64>() - 0.5) * 40.0;
        let dy = (rng.r#gen::<f64>() - 0.5) * 40.0;
        let phase_ms = rng.r#gen::<f64>() * period_ms;
        Self {
            size_px,
            left_pct,
            top_pct,
            opacity,
            period_ms,
            drift: (dx, dy),
            phase_ms,
        }
    }

    /// Displacement in pixels at `elapsed_ms`: out to the drift and back once
    /// per period, eased over the whole loop.
    pub fn offset_at(&self, elapsed_ms: u64) -> (f64, f64) {
        let local = (elapsed_ms as f64 + self.phase_ms) % self.period_ms;
        let eased = CubicBezier::EASE_IN_OUT.apply(local / self.period_ms);
        let k = if eased <= 0.5 {
            eased * 2.0
        } else {
            (1.0 - eased) * 2.0
        };
        (self.drift.0 * k, self.drift.1 * k)
    }

    fn glyph(&self) -> char {
        let idx = (((self.size_px - 6.0) / 10.0) * PARTICLE_CHARS.len() as f64) as usize;
        PARTICLE_CHARS[idx.min(PARTICLE_CHARS.len() - 1)]
    }

    fn color(&self, background: Rgba) -> Rgba {
        let mid = GRADIENT_FROM.lerp(GRADIENT_TO, 0.5);
        mid.with_alpha(mid.a * self.opacity as f32).over(background)
    }
}

/// The whole particle field, placed once.
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new<R: Rng>(count: usize, rng: &mut R) -> Self {
        Self {
            particles: (0..count).map(|_| Particle::random(rng)).collect(),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Cell a particle's center occupies at `elapsed_ms`, if inside `area`.
    ///
    /// `cell_px` is the pixel size of one terminal cell, used to turn the
    /// page's pixel units into cells.
    pub fn cell_of(
        particle: &Particle,
        area: Rect,
        elapsed_ms: u64,
        cell_px: (f64, f64),
    ) -> Option<(u16, u16)> {
        let (cw, ch) = cell_px;
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(cw) || !usable(ch) || area.is_empty() {
            return None;
        }
        let viewport_w = area.width as f64 * cw;
        let viewport_h = area.height as f64 * ch;
        let (dx, dy) = particle.offset_at(elapsed_ms);

        let x = particle.left_pct / 100.0 * viewport_w + particle.size_px / 2.0 + dx;
        let y = particle.top_pct / 100.0 * viewport_h + particle.size_px / 2.0 + dy;
        let col = (x / cw).floor();
        let row = (y / ch).floor();
        if col < 0.0 || row < 0.0 || col >= area.width as f64 || row >= area.height as f64 {
            return None;
        }
        Some((area.x + col as u16, area.y + row as u16))
    }

    /// Draw every particle into `buf`, keeping existing cell backgrounds.
    pub fn render(
        &self,
        buf: &mut Buffer,
        area: Rect,
        elapsed_ms: u64,
        cell_px: (f64, f64),
        background: Rgba,
    ) {
        for particle in &self.particles {
            let Some(pos) = Self::cell_of(particle, area, elapsed_ms, cell_px) else {
                continue;
            };
            if let Some(cell) = buf.cell_mut(pos) {
                cell.set_char(particle.glyph())
                    .set_fg(particle.color(background).to_color());
            }
        }
    }
}
