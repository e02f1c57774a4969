//! TOML config file loading and creation.

use std::path::Path;

use tracing::{info, warn};

use crate::{Config, ConfigError, ProjectPaths, validation};

/// Load config from a specific TOML file.
///
/// Missing fields take their defaults. A file that parses but fails
/// validation is reported with a warning and replaced by the defaults.
pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&content)?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(Config::default());
    }

    info!("loaded config from {}", path.display());
    Ok(validation::resolve(config))
}

/// Load config from the default location, creating it on first run.
///
/// Parse errors are not fatal: they are logged and the defaults are used.
pub fn load_default(paths: &ProjectPaths) -> Result<Config, ConfigError> {
    let path = paths.config_file();

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(Config::default());
    }

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::Parse(e)) => {
            warn!("could not parse {}: {e}", path.display());
            warn!("falling back to default config");
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

/// Write the default config file, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(path, default_config_toml()).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// The documented default config file.
pub fn default_config_toml() -> &'static str {
    r#"# carbonzero configuration

[sphere]
# Set to false to run without the rotating sphere.
enabled = true
# Logical size of the drawing surface, in pixels.
width = 320.0
height = 320.0
# Device pixel ratio of the backing store.
pixel_ratio = 1.0

[animation]
fps = 60

[particles]
enabled = true
count = 30
# Pixel size of one terminal cell.
cell_width_px = 8.0
cell_height_px = 16.0
# seed = 42

[counter]
start = 37000000000.0
max_step = 150.0
interval_ms = 200

[waitlist]
# "local" remembers signups on this machine, "remote" posts them to `endpoint`.
mode = "local"
# endpoint = "https://example.com/waitlist"
timeout_secs = 10
reset_ms = 3000
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WaitlistMode;

    #[test]
    fn test_default_toml_matches_defaults() {
        let parsed: Config = toml::from_str(default_config_toml()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_from_path(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_default_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ProjectPaths::rooted_at(dir.path());

        let config = load_default(&paths).unwrap();
        assert_eq!(config, Config::default());
        assert!(paths.config_file().exists());

        // Second load reads the file back.
        assert_eq!(load_default(&paths).unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[animation]\nfps = 0\n").unwrap();
        assert_eq!(load_from_path(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_unparsable_file_falls_back_in_load_default() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ProjectPaths::rooted_at(dir.path());
        std::fs::create_dir_all(paths.config_dir()).unwrap();
        std::fs::write(paths.config_file(), "this is = = not toml").unwrap();

        assert!(matches!(
            load_from_path(&paths.config_file()),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(load_default(&paths).unwrap(), Config::default());
    }

    #[test]
    fn test_remote_mode_is_resolved_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[waitlist]\nmode = \"remote\"\n").unwrap();
        let config = load_from_path(&path).unwrap();
        assert_eq!(config.waitlist.mode, WaitlistMode::Local);
    }
}
