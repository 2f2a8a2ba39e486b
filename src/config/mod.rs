//! Configuration module for SaveBackup
//!
//! Lookup hierarchy:
//! 1. Environment variables (SAVE_BACKUP_*)
//! 2. Project config (save-backup.toml, then save-backup.json)
//! 3. User config (<config dir>/save-backup/config.toml)
//! 4. Built-in defaults (lowest priority)

pub mod env_validator;
mod loader;
mod repository;
mod shared;
mod types;

pub use env_validator::InvalidEnvValue;
pub use loader::{
    apply_env_overrides, load_from_layers, user_config_dir, user_config_path, ConfigWarning,
    APP_DIR_NAME, CONFIG_DIR_VAR, ENV_BACKUP_LOCATION, ENV_PAUSE_ON_FINISH, ENV_SAVE_LOCATION,
    ENV_USE_GIT, ENV_VERBOSE, PROJECT_CONFIG_FILES, USER_CONFIG_FILE,
};
pub use repository::{ConfigRepository, FileConfigRepository};
pub use shared::SharedConfig;
pub use types::{AppConfig, ConfigFormat};
