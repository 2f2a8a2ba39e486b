//! Configuration type definitions

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{SaveBackupError, SaveBackupResult};

use super::loader::{self, ConfigWarning};

/// On-disk representation of an [`AppConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    #[default]
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from a file extension. Anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Toml => f.write_str("toml"),
            ConfigFormat::Json => f.write_str("json"),
        }
    }
}

/// Settings for a single backup tool run.
///
/// Every field is plain data: reading or assigning it has no side effects,
/// and nothing here checks that the paths exist. A default record has empty
/// paths and every flag off.
///
/// PascalCase keys are accepted when reading so settings files written by the
/// earlier desktop tool keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Directory or file holding the save data to back up
    #[serde(alias = "SaveLocation")]
    pub save_location: PathBuf,

    /// Directory or file the backups are written to
    #[serde(alias = "BackupLocation")]
    pub backup_location: PathBuf,

    /// Track backups as version-control commits instead of plain copies
    #[serde(alias = "UseGit")]
    pub use_git: bool,

    /// Emit detailed progress output
    #[serde(alias = "Verbose")]
    pub verbose: bool,

    /// Wait for the user to acknowledge before the process exits
    #[serde(alias = "PauseOnFinish")]
    pub pause_on_finish: bool,
}

impl AppConfig {
    /// True when a save location has been set (existence is not checked)
    pub fn has_save_location(&self) -> bool {
        !self.save_location.as_os_str().is_empty()
    }

    /// True when a backup location has been set (existence is not checked)
    pub fn has_backup_location(&self) -> bool {
        !self.backup_location.as_os_str().is_empty()
    }

    /// Log level a consuming tool should run at
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    /// Parse TOML text. Missing keys take their default values.
    pub fn from_toml_str(content: &str) -> SaveBackupResult<Self> {
        toml::from_str(content).map_err(|e| SaveBackupError::Parse {
            format: ConfigFormat::Toml,
            message: e.to_string(),
        })
    }

    /// Parse JSON text. Missing keys take their default values.
    pub fn from_json_str(content: &str) -> SaveBackupResult<Self> {
        serde_json::from_str(content).map_err(|e| SaveBackupError::Parse {
            format: ConfigFormat::Json,
            message: e.to_string(),
        })
    }

    pub fn to_toml_string(&self) -> SaveBackupResult<String> {
        toml::to_string(self).map_err(|e| SaveBackupError::Serialize {
            format: ConfigFormat::Toml,
            message: e.to_string(),
        })
    }

    pub fn to_json_string(&self) -> SaveBackupResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SaveBackupError::Serialize {
            format: ConfigFormat::Json,
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML or JSON file
    pub fn load(path: &Path) -> SaveBackupResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> SaveBackupResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults, then apply
    /// `SAVE_BACKUP_*` environment overrides.
    pub fn load_or_default(project_root: Option<&Path>) -> Self {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (SAVE_BACKUP_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Apply overrides from an arbitrary variable lookup, logging each
    /// rejected value once
    pub fn with_overrides_from<F>(self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let (config, invalid) =
            loader::apply_env_overrides(self, |key| lookup(key).map(OsString::from));
        loader::log_invalid_env(&invalid);
        config
    }

    /// Write the config to `path` atomically, in the format its extension
    /// selects.
    pub fn save(&self, path: &Path) -> SaveBackupResult<()> {
        loader::save(self, path)
    }
}
