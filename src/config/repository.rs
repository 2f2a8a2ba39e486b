//! Config repository - abstracts configuration loading and saving.

use std::path::Path;

use anyhow::Result;

use super::loader::ConfigWarning;
use super::types::AppConfig;

/// Repository trait for configuration management.
///
/// A backup runner depends on this instead of the file system so tests can
/// hand it settings directly.
pub trait ConfigRepository: Send + Sync {
    /// Load configuration from a specific path.
    fn load(&self, path: &Path) -> Result<AppConfig>;

    /// Load configuration with warnings about unknown keys.
    fn load_with_warnings(&self, path: &Path) -> Result<(AppConfig, Vec<ConfigWarning>)>;

    /// Load configuration using the standard hierarchy:
    /// 1. Project config (save-backup.toml, save-backup.json)
    /// 2. User config (<config dir>/save-backup/config.toml)
    /// 3. Built-in defaults
    ///
    /// Then applies environment variable overrides.
    fn load_or_default(&self, project_root: Option<&Path>) -> AppConfig;

    /// Persist the configuration to `path`.
    fn save(&self, path: &Path, config: &AppConfig) -> Result<()>;

    /// Check if a config file exists at the given path.
    fn exists(&self, path: &Path) -> bool;
}

/// File-backed repository; the format follows the file extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileConfigRepository;

impl FileConfigRepository {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigRepository for FileConfigRepository {
    fn load(&self, path: &Path) -> Result<AppConfig> {
        AppConfig::load(path).map_err(Into::into)
    }

    fn load_with_warnings(&self, path: &Path) -> Result<(AppConfig, Vec<ConfigWarning>)> {
        AppConfig::load_with_warnings(path).map_err(Into::into)
    }

    fn load_or_default(&self, project_root: Option<&Path>) -> AppConfig {
        AppConfig::load_or_default(project_root)
    }

    fn save(&self, path: &Path, config: &AppConfig) -> Result<()> {
        config.save(path).map_err(Into::into)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
