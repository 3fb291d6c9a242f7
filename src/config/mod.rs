//! Configuration management module
//!
//! This module handles loading, saving, and managing the persisted
//! preferences (preview size and tray icon). Configuration is stored in
//! `<config dir>/WebMirror/config.json` with atomic writes to prevent
//! corruption.

pub mod manager;
pub mod models;

pub use manager::ConfigManager;
pub use models::{AppConfig, MenuBarIcon, PreviewSize};
