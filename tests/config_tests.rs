//! Integration tests for preference persistence
//!
//! All tests point `WEBMIRROR_CONFIG_DIR` at a private temp directory and run
//! serially under one lock.

#![allow(clippy::unwrap_used)]
#![allow(unsafe_code)]

use std::sync::Mutex;
use webmirror::config::{AppConfig, ConfigManager, MenuBarIcon, PreviewSize, manager::CONFIG_DIR_ENV};

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn with_config_dir(test: impl FnOnce(&std::path::Path)) {
    let _lock = ENV_LOCK
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    let temp_dir = tempfile::tempdir().unwrap();
    // SAFETY: serialized by ENV_LOCK; no other thread reads the variable
    unsafe {
        std::env::set_var(CONFIG_DIR_ENV, temp_dir.path());
    }
    test(temp_dir.path());
    // SAFETY: as above
    unsafe {
        std::env::remove_var(CONFIG_DIR_ENV);
    }
}

#[test]
fn test_first_launch_uses_defaults() {
    with_config_dir(|dir| {
        let config = ConfigManager::load().unwrap();
        assert_eq!(config.preview_size, PreviewSize::AVERAGE);
        assert_eq!(config.icon, MenuBarIcon::Webcam);
        assert!(!dir.join("config.json").exists());
    });
}

#[test]
fn test_preferences_survive_restart() {
    with_config_dir(|dir| {
        let config = AppConfig {
            preview_size: PreviewSize::LARGE,
            icon: MenuBarIcon::Rearmirror,
            ..AppConfig::default()
        };
        ConfigManager::save(&config).unwrap();
        assert!(dir.join("config.json").exists());

        let loaded = ConfigManager::load().unwrap();
        assert_eq!(loaded.preview_size, PreviewSize::LARGE);
        assert_eq!(loaded.icon, MenuBarIcon::Rearmirror);
    });
}

#[test]
fn test_corrupt_file_falls_back_to_defaults() {
    with_config_dir(|dir| {
        std::fs::write(dir.join("config.json"), "{ not json").unwrap();
        let loaded = ConfigManager::load().unwrap();
        assert_eq!(loaded.preview_size, PreviewSize::AVERAGE);
    });
}

#[test]
fn test_invalid_size_is_sanitized_on_load() {
    with_config_dir(|dir| {
        std::fs::write(
            dir.join("config.json"),
            r#"{ "preview_size": { "width": 0, "height": 240 }, "icon": "eyes" }"#,
        )
        .unwrap();
        let loaded = ConfigManager::load().unwrap();
        assert_eq!(loaded.preview_size, PreviewSize::AVERAGE);
        assert_eq!(loaded.icon, MenuBarIcon::Eyes);
    });
}
