use std::path::{Path, PathBuf};

use crate::error::{PulseError, Result};

/// Manages paths for gamepulse configuration
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root configuration directory (~/.gamepulse)
    pub root: PathBuf,
    /// Configuration file path (~/.gamepulse/config.toml)
    pub config_file: PathBuf,
}

impl Paths {
    /// Create a new Paths instance using the user's home directory
    pub fn new() -> Result<Self> {
        let home = std::env::var("HOME").map_err(|_| {
            PulseError::config_missing("HOME is not set; pass --config to locate the config file")
        })?;
        let root = PathBuf::from(home).join(".gamepulse");

        Ok(Self {
            config_file: root.join("config.toml"),
            root,
        })
    }

    /// Use an explicit config file (from `--config` or `GAMEPULSE_CONFIG`)
    pub fn with_config_file(config_file: impl AsRef<Path>) -> Self {
        let config_file = config_file.as_ref().to_path_buf();
        let root = config_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Self { root, config_file }
    }

    /// Resolve paths from an optional override, falling back to the home directory
    pub fn resolve(config_override: Option<&Path>) -> Result<Self> {
        match config_override {
            Some(path) => Ok(Self::with_config_file(path)),
            None => Self::new(),
        }
    }

    /// Check if the config file exists
    pub fn config_exists(&self) -> bool {
        self.config_file.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_config_file_uses_parent_as_root() {
        let paths = Paths::with_config_file("/etc/gamepulse/pulse.toml");
        assert_eq!(paths.root, PathBuf::from("/etc/gamepulse"));
        assert_eq!(paths.config_file, PathBuf::from("/etc/gamepulse/pulse.toml"));
    }

    #[test]
    fn test_resolve_prefers_override() {
        let paths = Paths::resolve(Some(Path::new("custom/config.toml"))).unwrap();
        assert_eq!(paths.config_file, PathBuf::from("custom/config.toml"));
    }
}
