//! Common test utilities for SaveBackup contract and property tests.
//!
//! `TestEnv` gives each test its own project directory and user config
//! directory. Environment overrides are passed explicitly so tests never
//! touch the process environment.

#![allow(dead_code)]

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use save_backup::config::{
    apply_env_overrides, load_from_layers, InvalidEnvValue, APP_DIR_NAME, USER_CONFIG_FILE,
};
use save_backup::AppConfig;
use tempfile::TempDir;

/// Isolated project and user config directories
pub struct TestEnv {
    pub project_root: TempDir,
    pub config_dir: TempDir,
    env_vars: HashMap<String, String>,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::default()
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Where the user config file lives for this environment
    pub fn user_config_path(&self) -> PathBuf {
        self.config_dir.path().join(APP_DIR_NAME).join(USER_CONFIG_FILE)
    }

    /// Resolve settings the way `AppConfig::load_or_default` does, with this
    /// environment's directories and variables.
    pub fn load(&self) -> AppConfig {
        self.load_reporting_invalid_env().0
    }

    /// Like [`TestEnv::load`], also returning the rejected variables
    pub fn load_reporting_invalid_env(&self) -> (AppConfig, Vec<InvalidEnvValue>) {
        let user = self.user_config_path();
        let config = load_from_layers(Some(self.project_root.path()), Some(&user));
        apply_env_overrides(config, |key| {
            self.env_vars.get(key).cloned().map(OsString::from)
        })
    }
}

#[derive(Default)]
pub struct TestEnvBuilder {
    project_files: Vec<(String, String)>,
    user_config: Option<String>,
    env_vars: HashMap<String, String>,
}

impl TestEnvBuilder {
    /// Write `save-backup.toml` in the project directory
    pub fn with_project_config(self, content: &str) -> Self {
        self.with_project_file("save-backup.toml", content)
    }

    /// Write `save-backup.json` in the project directory
    pub fn with_project_json(self, content: &str) -> Self {
        self.with_project_file("save-backup.json", content)
    }

    pub fn with_project_file(mut self, name: &str, content: &str) -> Self {
        self.project_files.push((name.to_string(), dedent(content)));
        self
    }

    pub fn with_user_config(mut self, content: &str) -> Self {
        self.user_config = Some(dedent(content));
        self
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env_vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn build(self) -> TestEnv {
        let env = TestEnv {
            project_root: TempDir::new().expect("create project dir"),
            config_dir: TempDir::new().expect("create config dir"),
            env_vars: self.env_vars,
        };

        for (name, content) in &self.project_files {
            write_file(&env.project_path(name), content);
        }
        if let Some(content) = &self.user_config {
            write_file(&env.user_config_path(), content);
        }

        env
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, content).expect("write test file");
}

/// Strip leading indentation so config literals can be indented in tests
fn dedent(content: &str) -> String {
    content
        .lines()
        .map(str::trim_start)
        .collect::<Vec<_>>()
        .join("\n")
}
