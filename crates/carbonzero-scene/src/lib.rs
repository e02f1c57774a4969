//! Animated page decorations for carbonzero.
//!
//! The rotating sphere is drawn onto a [`carbonzero_canvas::Surface`] once per
//! frame; floating particles are a pure function of elapsed time; the CO₂
//! counter ticks on its own interval. None of them share state.

mod chars;
mod counter;
mod easing;
mod particles;
mod sphere;
mod state;

pub use counter::{Co2Counter, format_grouped};
pub use easing::CubicBezier;
pub use particles::{Particle, ParticleField};
pub use sphere::{LANDMASSES, Landmass, ROTATION_STEP, Rotation, SphereGeometry, SphereRenderer};
pub use state::{SceneSettings, SceneState};
