//! Configuration loading and persistence

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{SaveBackupError, SaveBackupResult};

use super::env_validator::{closest, validate_bool, InvalidEnvValue};
use super::types::{AppConfig, ConfigFormat};

/// Config file names looked up in a project directory, in priority order
pub const PROJECT_CONFIG_FILES: &[&str] = &["save-backup.toml", "save-backup.json"];

/// Directory under the platform config dir that holds the user config
pub const APP_DIR_NAME: &str = "save-backup";

/// User config file name inside [`APP_DIR_NAME`]
pub const USER_CONFIG_FILE: &str = "config.toml";

/// Overrides the platform config dir (used for test isolation)
pub const CONFIG_DIR_VAR: &str = "SAVE_BACKUP_CONFIG_DIR";

pub const ENV_SAVE_LOCATION: &str = "SAVE_BACKUP_SAVE_LOCATION";
pub const ENV_BACKUP_LOCATION: &str = "SAVE_BACKUP_BACKUP_LOCATION";
pub const ENV_USE_GIT: &str = "SAVE_BACKUP_USE_GIT";
pub const ENV_VERBOSE: &str = "SAVE_BACKUP_VERBOSE";
pub const ENV_PAUSE_ON_FINISH: &str = "SAVE_BACKUP_PAUSE_ON_FINISH";

const KNOWN_KEYS: &[&str] = &[
    "save_location",
    "backup_location",
    "use_git",
    "verbose",
    "pause_on_finish",
];

/// Non-fatal configuration warning (an unknown key in a config file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> SaveBackupResult<(AppConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let invalid = |message: String| SaveBackupError::InvalidConfig {
        file: path.to_path_buf(),
        message,
    };

    let format = ConfigFormat::from_path(path);
    let config: AppConfig = match format {
        ConfigFormat::Toml => {
            let deserializer = toml::de::Deserializer::new(&content);
            serde_ignored::deserialize(deserializer, |p| {
                unknown_paths.push(p.to_string());
            })
            .map_err(|e| invalid(e.to_string()))?
        }
        ConfigFormat::Json => {
            let mut deserializer = serde_json::Deserializer::from_str(&content);
            let config: AppConfig = serde_ignored::deserialize(&mut deserializer, |p| {
                unknown_paths.push(p.to_string());
            })
            .map_err(|e| invalid(e.to_string()))?;
            deserializer.end().map_err(|e| invalid(e.to_string()))?;
            config
        }
    };

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_key_line(&content, &key, format),
                suggestion: suggest_key(&key),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from project config, user config, or defaults, then apply env
/// overrides.
pub fn load_or_default(project_root: Option<&Path>) -> AppConfig {
    let user_config = user_config_path();
    with_env_overrides(load_from_layers(project_root, user_config.as_deref()))
}

/// Pick the first config file that exists and parses.
///
/// Lookup order is the project files in [`PROJECT_CONFIG_FILES`], then
/// `user_config`, then built-in defaults. Files are not merged. A file that
/// exists but fails to load is skipped with a warning.
pub fn load_from_layers(project_root: Option<&Path>, user_config: Option<&Path>) -> AppConfig {
    let project_candidates = project_root
        .into_iter()
        .flat_map(|root| PROJECT_CONFIG_FILES.iter().map(move |name| root.join(name)));
    let candidates = project_candidates.chain(user_config.map(Path::to_path_buf));

    for candidate in candidates {
        if !candidate.is_file() {
            continue;
        }
        match load_with_warnings(&candidate) {
            Ok((config, warnings)) => {
                for warning in &warnings {
                    log_warning(warning);
                }
                log::debug!("loaded config from {}", candidate.display());
                return config;
            }
            Err(e) => {
                log::warn!("skipping config file: {}", e);
            }
        }
    }

    log::debug!("no config file found, using defaults");
    AppConfig::default()
}

/// Apply environment variable overrides (SAVE_BACKUP_* prefix)
///
/// Each invalid value is logged once with `log::warn!`.
pub fn with_env_overrides(config: AppConfig) -> AppConfig {
    let (config, invalid) = apply_env_overrides(config, |key| std::env::var_os(key));
    log_invalid_env(&invalid);
    config
}

/// Apply overrides from `lookup` and return the values that were rejected.
///
/// Empty path values are ignored; paths need not be UTF-8. An invalid
/// boolean keeps the current field value.
pub fn apply_env_overrides<F>(
    mut config: AppConfig,
    lookup: F,
) -> (AppConfig, Vec<InvalidEnvValue>)
where
    F: Fn(&str) -> Option<OsString>,
{
    if let Some(path) = lookup(ENV_SAVE_LOCATION).filter(|v| !v.is_empty()) {
        config.save_location = PathBuf::from(path);
    }

    if let Some(path) = lookup(ENV_BACKUP_LOCATION).filter(|v| !v.is_empty()) {
        config.backup_location = PathBuf::from(path);
    }

    let mut invalid = Vec::new();
    let flags: [(&str, &mut bool); 3] = [
        (ENV_USE_GIT, &mut config.use_git),
        (ENV_VERBOSE, &mut config.verbose),
        (ENV_PAUSE_ON_FINISH, &mut config.pause_on_finish),
    ];
    for (var, field) in flags {
        let Some(raw) = lookup(var) else {
            continue;
        };
        match validate_bool(var, &raw.to_string_lossy()) {
            Ok(value) => *field = value,
            Err(err) => invalid.push(err),
        }
    }

    (config, invalid)
}

/// Serialize `config` in the format chosen by the extension of `path` and
/// replace the file atomically.
pub fn save(config: &AppConfig, path: &Path) -> SaveBackupResult<()> {
    let content = match ConfigFormat::from_path(path) {
        ConfigFormat::Toml => config.to_toml_string()?,
        ConfigFormat::Json => config.to_json_string()?,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| SaveBackupError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    log::debug!("saved config to {}", path.display());
    Ok(())
}

/// Platform config dir, honoring [`CONFIG_DIR_VAR`]
pub fn user_config_dir() -> Option<PathBuf> {
    std::env::var(CONFIG_DIR_VAR)
        .ok()
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

/// Full path of the user config file, if a config dir can be resolved
pub fn user_config_path() -> Option<PathBuf> {
    user_config_dir().map(|dir| dir.join(APP_DIR_NAME).join(USER_CONFIG_FILE))
}

pub(super) fn log_invalid_env(invalid: &[InvalidEnvValue]) {
    for err in invalid {
        log::warn!("ignoring {}", err);
    }
}

fn log_warning(warning: &ConfigWarning) {
    let location = match warning.line {
        Some(line) => format!("{}:{}", warning.file.display(), line),
        None => warning.file.display().to_string(),
    };
    match &warning.suggestion {
        Some(suggestion) => log::warn!(
            "unknown config key '{}' in {} (did you mean '{}'?)",
            warning.key,
            location,
            suggestion
        ),
        None => log::warn!("unknown config key '{}' in {}", warning.key, location),
    }
}

/// 1-based line on which `key` is defined, not merely mentioned.
fn find_key_line(content: &str, key: &str, format: ConfigFormat) -> Option<usize> {
    content
        .lines()
        .position(|line| match format {
            ConfigFormat::Toml => toml_line_defines(line, key),
            ConfigFormat::Json => json_line_defines(line, key),
        })
        .map(|i| i + 1)
}

fn toml_line_defines(line: &str, key: &str) -> bool {
    let line = line.trim_start();
    let double_quoted = format!("\"{key}\"");
    let single_quoted = format!("'{key}'");
    let defined = [key, double_quoted.as_str(), single_quoted.as_str()]
        .into_iter()
        .any(|spelling| {
            line.strip_prefix(spelling)
                .is_some_and(|rest| rest.trim_start().starts_with('='))
        });
    defined
}

fn json_line_defines(line: &str, key: &str) -> bool {
    let quoted = format!("\"{key}\"");
    line.match_indices(&quoted)
        .any(|(at, _)| line[at + quoted.len()..].trim_start().starts_with(':'))
}

fn suggest_key(unknown: &str) -> Option<String> {
    closest(&unknown.to_lowercase(), KNOWN_KEYS, 2).map(str::to_string)
}
