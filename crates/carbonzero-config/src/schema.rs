//! Config file schema. Every section and field has a default.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sphere: SphereConfig,
    pub animation: AnimationConfig,
    pub particles: ParticlesConfig,
    pub counter: CounterConfig,
    pub waitlist: WaitlistConfig,
}

/// The sphere's drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    /// When false there is no drawing surface and the sphere does nothing.
    pub enabled: bool,
    /// Logical width in pixels.
    pub width: f64,
    /// Logical height in pixels.
    pub height: f64,
    /// Device pixel ratio used for the backing store.
    pub pixel_ratio: f64,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 320.0,
            height: 320.0,
            pixel_ratio: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Target frames per second.
    pub fps: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { fps: 60 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticlesConfig {
    pub enabled: bool,
    pub count: usize,
    /// Pixel width of one terminal cell.
    pub cell_width_px: f64,
    /// Pixel height of one terminal cell.
    pub cell_height_px: f64,
    /// Fixed seed for particle placement and counter ticks.
    pub seed: Option<u64>,
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            count: 30,
            cell_width_px: 8.0,
            cell_height_px: 16.0,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub start: f64,
    /// Largest amount added per tick.
    pub max_step: f64,
    pub interval_ms: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            start: 37_000_000_000.0,
            max_step: 150.0,
            interval_ms: 200,
        }
    }
}

/// Which waitlist handler the signup form uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitlistMode {
    /// Validate and remember the signup locally, no network.
    #[default]
    Local,
    /// POST the email to `endpoint`.
    Remote,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitlistConfig {
    pub mode: WaitlistMode,
    /// Form endpoint for remote mode.
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
    /// How long feedback stays up before the form resets.
    pub reset_ms: u64,
}

impl Default for WaitlistConfig {
    fn default() -> Self {
        Self {
            mode: WaitlistMode::Local,
            endpoint: None,
            timeout_secs: 10,
            reset_ms: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [sphere]
            pixel_ratio = 2.0

            [waitlist]
            mode = "remote"
            endpoint = "https://example.com/signup"
            "#,
        )
        .unwrap();
        assert_eq!(config.sphere.pixel_ratio, 2.0);
        assert_eq!(config.sphere.width, 320.0);
        assert_eq!(config.waitlist.mode, WaitlistMode::Remote);
        assert_eq!(config.waitlist.reset_ms, 3000);
        assert_eq!(config.counter, CounterConfig::default());
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[waitlist]\nmode = \"carrier-pigeon\"");
        assert!(result.is_err());
    }
}
