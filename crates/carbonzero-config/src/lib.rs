//! Configuration for carbonzero.
//!
//! Settings live in a TOML file in the platform config directory. Every field
//! has a default, so a missing or partial file is fine; an unreadable or
//! invalid one falls back to defaults with a warning.

mod error;
mod loader;
mod paths;
mod schema;
mod validation;

pub use error::ConfigError;
pub use loader::{create_default_config, default_config_toml, load_default, load_from_path};
pub use paths::ProjectPaths;
pub use schema::{
    AnimationConfig, Config, CounterConfig, ParticlesConfig, SphereConfig, WaitlistConfig,
    WaitlistMode,
};
pub use validation::{resolve, validate};
