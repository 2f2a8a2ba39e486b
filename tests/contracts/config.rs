//! Configuration contracts (CONFIG-001 through CONFIG-004)
//!
//! Priority: env vars > project config > user config > defaults

use crate::common::*;
use std::path::PathBuf;

/// CONTRACT CONFIG-001: Layer Priority Order
mod config_priority {
    use super::*;

    #[test]
    fn contract_project_config_overrides_user_config() {
        let env = TestEnv::builder()
            .with_user_config(
                r#"
                save_location = "/user/saves"
                verbose = true
                "#,
            )
            .with_project_config(
                r#"
                save_location = "/project/saves"
                "#,
            )
            .build();

        let config = env.load();

        assert_eq!(config.save_location, PathBuf::from("/project/saves"));
        // The project file replaces the user file wholesale
        assert!(!config.verbose);
    }

    #[test]
    fn contract_env_overrides_project_config() {
        let env = TestEnv::builder()
            .with_project_config(
                r#"
                backup_location = "/project/backup"
                use_git = false
                "#,
            )
            .with_env("SAVE_BACKUP_BACKUP_LOCATION", "/env/backup")
            .with_env("SAVE_BACKUP_USE_GIT", "true")
            .build();

        let config = env.load();

        assert_eq!(config.backup_location, PathBuf::from("/env/backup"));
        assert!(config.use_git);
    }

    #[test]
    fn contract_user_config_used_when_no_project_config() {
        let env = TestEnv::builder()
            .with_user_config(
                r#"
                pause_on_finish = true
                "#,
            )
            .build();

        assert!(env.load().pause_on_finish);
    }
}

/// CONTRACT CONFIG-002: Missing Values Are Never Unset
mod config_defaults {
    use super::*;
    use save_backup::AppConfig;

    #[test]
    fn contract_no_files_yields_defaults() {
        let env = TestEnv::builder().build();
        assert_eq!(env.load(), AppConfig::default());
    }

    #[test]
    fn contract_partial_file_fills_defaults() {
        let env = TestEnv::builder()
            .with_project_json(r#"{ "UseGit": true }"#)
            .build();

        let config = env.load();

        assert!(config.use_git);
        assert!(config.save_location.as_os_str().is_empty());
        assert!(config.backup_location.as_os_str().is_empty());
        assert!(!config.verbose);
        assert!(!config.pause_on_finish);
    }
}

/// CONTRACT CONFIG-003: Malformed Files Do Not Abort Loading
mod config_malformed {
    use super::*;

    #[test]
    fn contract_malformed_project_falls_back_to_user() {
        let env = TestEnv::builder()
            .with_project_config("use_git = \"sometimes\"")
            .with_user_config("backup_location = \"/user/backup\"")
            .build();

        let config = env.load();

        assert!(!config.use_git);
        assert_eq!(config.backup_location, PathBuf::from("/user/backup"));
    }

    #[test]
    fn contract_invalid_env_flag_keeps_file_value() {
        let env = TestEnv::builder()
            .with_project_config("verbose = true")
            .with_env("SAVE_BACKUP_VERBOSE", "loud")
            .build();

        let (config, invalid) = env.load_reporting_invalid_env();

        assert!(config.verbose);
        assert_eq!(invalid.len(), 1, "one warning per invalid variable");
        assert_eq!(invalid[0].var, "SAVE_BACKUP_VERBOSE");
        assert_eq!(invalid[0].value, "loud");
    }
}

/// CONTRACT CONFIG-004: Save Then Load Is Lossless
mod config_persistence {
    use super::*;
    use save_backup::{AppConfig, ConfigRepository, FileConfigRepository};

    #[test]
    fn contract_saved_project_config_is_picked_up() {
        let env = TestEnv::builder().build();
        let config = AppConfig {
            save_location: PathBuf::from("/home/user/saves"),
            backup_location: PathBuf::from("/mnt/backup"),
            use_git: true,
            verbose: false,
            pause_on_finish: true,
        };

        FileConfigRepository::new()
            .save(&env.project_path("save-backup.toml"), &config)
            .unwrap();

        assert_eq!(env.load(), config);
    }

    #[test]
    fn contract_saved_user_config_is_picked_up() {
        let env = TestEnv::builder().build();
        let config = AppConfig {
            verbose: true,
            ..AppConfig::default()
        };

        config.save(&env.user_config_path()).unwrap();

        assert_eq!(env.load(), config);
    }
}
