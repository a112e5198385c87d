//! Configuration management for the conference wall.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - The ordered `[[steps]]` list with per-step config tables
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//!
//! # Example
//!
//! ```no_run
//! use wall_core::config::{ConfigManager, ConfigSection};
//!
//! // Create manager and load (or create default) config
//! let mut config = ConfigManager::new(".config/wall.toml");
//! config.load_or_create().unwrap();
//!
//! // Read settings
//! println!("Steps: {}", config.settings().steps.len());
//!
//! // Modify a setting
//! config.settings_mut().engine.cycles = 3;
//!
//! // Save just the engine section atomically
//! config.update_section(ConfigSection::Engine).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ConfigSection, EngineSettings, LoggingSettings, PathSettings, Settings, StepDefinition,
};
