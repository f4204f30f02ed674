//! File-based config discovery for CLI use.

use std::path::{Path, PathBuf};

use crate::config::{CONFIG_FILE_NAME, CentrifugeConfig};
use crate::error::{ConfigError, Result};

/// Locates `centrifuge.toml` and loads the layered configuration.
///
/// A missing file is not an error during discovery: defaults and environment
/// overrides still apply. An explicit path that does not exist is.
///
/// # Example
///
/// ```no_run
/// use centrifuge_config::ConfigDiscovery;
///
/// let config = ConfigDiscovery::new(".").load().unwrap();
/// println!("damping = {}", config.analysis.damping);
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The config file in the root directory, if there is one.
    pub fn find(&self) -> Option<PathBuf> {
        let path = self.root.join(CONFIG_FILE_NAME);
        path.is_file().then_some(path)
    }

    /// Load defaults, the discovered file (if any) and environment overrides.
    pub fn load(&self) -> Result<CentrifugeConfig> {
        let file = self.find();
        match &file {
            Some(path) => tracing::debug!(path = %path.display(), "loading config file"),
            None => tracing::debug!(root = %self.root.display(), "no config file found; using defaults"),
        }
        CentrifugeConfig::from_figment(&CentrifugeConfig::figment(file.as_deref()))
    }

    /// Load with an explicit config file instead of the discovered one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if `path` does not exist.
    pub fn load_from(&self, path: &Path) -> Result<CentrifugeConfig> {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        if !path.is_file() {
            return Err(ConfigError::NotFound(path));
        }
        tracing::debug!(path = %path.display(), "loading config file");
        CentrifugeConfig::from_figment(&CentrifugeConfig::figment(Some(&path)))
    }
}

/// Discover and load config from the current directory.
pub fn discover() -> Result<CentrifugeConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}
