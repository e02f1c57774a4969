//! Platform-specific file locations.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::ConfigError;

const APP_NAME: &str = "carbonzero";

/// Where carbonzero keeps its config, log and local waitlist record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl ProjectPaths {
    /// Resolve the platform directories.
    ///
    /// On Linux: `~/.config/carbonzero` and `~/.local/share/carbonzero`.
    pub fn discover() -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from("", "", APP_NAME).ok_or(ConfigError::NoHomeDir)?;
        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }

    /// Keep everything under one root directory.
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            config_dir: root.join("config"),
            data_dir: root.join("data"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(format!("{APP_NAME}.log"))
    }

    /// File backing the local waitlist record.
    pub fn waitlist_store(&self) -> PathBuf {
        self.data_dir.join(format!("{APP_NAME}_waitlist.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rooted_layout() {
        let paths = ProjectPaths::rooted_at("/tmp/cz");
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/cz/config/config.toml"));
        assert_eq!(paths.log_file(), PathBuf::from("/tmp/cz/data/carbonzero.log"));
        assert_eq!(
            paths.waitlist_store(),
            PathBuf::from("/tmp/cz/data/carbonzero_waitlist.json")
        );
    }
}
