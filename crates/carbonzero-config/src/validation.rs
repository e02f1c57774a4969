//! Config validation.

use tracing::warn;

use crate::{Config, ConfigError, WaitlistMode};

/// Largest sphere backing store, `ceil(W·R) × ceil(H·R)`, in device pixels.
const MAX_SPHERE_PIXELS: f64 = 4096.0 * 4096.0;

/// Reject values no component can work with.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let sphere = &config.sphere;
    if !(sphere.width.is_finite() && sphere.width >= 0.0)
        || !(sphere.height.is_finite() && sphere.height >= 0.0)
    {
        return Err(ConfigError::Invalid(format!(
            "sphere size must be non-negative, got {}x{}",
            sphere.width, sphere.height
        )));
    }
    if !(sphere.pixel_ratio.is_finite() && sphere.pixel_ratio > 0.0) {
        return Err(ConfigError::Invalid(format!(
            "sphere.pixel_ratio must be positive, got {}",
            sphere.pixel_ratio
        )));
    }
    let backing =
        (sphere.width * sphere.pixel_ratio).ceil() * (sphere.height * sphere.pixel_ratio).ceil();
    if backing > MAX_SPHERE_PIXELS {
        return Err(ConfigError::Invalid(format!(
            "sphere backing store of {backing} pixels exceeds {MAX_SPHERE_PIXELS}"
        )));
    }
    if config.animation.fps == 0 {
        return Err(ConfigError::Invalid("animation.fps must be at least 1".into()));
    }
    let particles = &config.particles;
    let positive = |v: f64| v.is_finite() && v > 0.0;
    if !positive(particles.cell_width_px) || !positive(particles.cell_height_px) {
        return Err(ConfigError::Invalid(
            "particle cell size must be positive".into(),
        ));
    }
    if config.counter.interval_ms == 0 {
        return Err(ConfigError::Invalid(
            "counter.interval_ms must be at least 1".into(),
        ));
    }
    if !(config.counter.max_step.is_finite() && config.counter.max_step >= 0.0) {
        return Err(ConfigError::Invalid(
            "counter.max_step must be non-negative".into(),
        ));
    }
    Ok(())
}

/// Settle combinations that validate but cannot run as asked.
///
/// Remote mode without an endpoint falls back to local mode.
pub fn resolve(mut config: Config) -> Config {
    let waitlist = &mut config.waitlist;
    let has_endpoint = waitlist
        .endpoint
        .as_deref()
        .is_some_and(|url| !url.trim().is_empty());
    if waitlist.mode == WaitlistMode::Remote && !has_endpoint {
        warn!("waitlist mode is remote but no endpoint is set, using local mode");
        waitlist.mode = WaitlistMode::Local;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_sized_sphere_is_valid() {
        // A zero-sized surface just disables the sphere.
        let mut config = Config::default();
        config.sphere.width = 0.0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = Config::default();
        config.sphere.pixel_ratio = 0.0;
        assert!(matches!(validate(&config), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.animation.fps = 0;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.sphere.height = f64::NAN;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.counter.interval_ms = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_oversized_sphere_backing_store() {
        let config: Config = toml::from_str("[sphere]\npixel_ratio = 1e9\n").unwrap();
        assert!(matches!(validate(&config), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.sphere.width = 4096.0;
        config.sphere.height = 4096.0;
        assert!(validate(&config).is_ok());
        config.sphere.pixel_ratio = 1.5;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_nan_cell_size() {
        let config: Config = toml::from_str("[particles]\ncell_width_px = nan\n").unwrap();
        assert!(matches!(validate(&config), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.particles.cell_height_px = f64::INFINITY;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_remote_without_endpoint_falls_back_to_local() {
        let mut config = Config::default();
        config.waitlist.mode = WaitlistMode::Remote;
        config.waitlist.endpoint = Some("  ".into());
        assert_eq!(resolve(config).waitlist.mode, WaitlistMode::Local);

        let mut config = Config::default();
        config.waitlist.mode = WaitlistMode::Remote;
        config.waitlist.endpoint = Some("https://example.com/signup".into());
        assert_eq!(resolve(config).waitlist.mode, WaitlistMode::Remote);
    }
}
