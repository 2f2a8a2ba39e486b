//! SaveBackup - settings for a save-game backup tool
//!
//! Holds where save data lives, where backups go, and how a run should
//! behave (git-tracked backups, verbose output, pause before exit), plus the
//! loading and persistence of those settings.

pub mod config;
pub mod error;
pub mod logging;

// Re-exports for convenience
pub use config::{AppConfig, ConfigFormat, ConfigRepository, FileConfigRepository, SharedConfig};
pub use error::{SaveBackupError, SaveBackupResult};
