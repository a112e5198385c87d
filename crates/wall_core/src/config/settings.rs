//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.
//! The step list is an array of tables, one `[[steps]]` entry per step.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Step engine timing.
    #[serde(default)]
    pub engine: EngineSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Template and data file locations.
    #[serde(default)]
    pub paths: PathSettings,

    /// Steps in display order.
    #[serde(default = "default_steps")]
    pub steps: Vec<StepDefinition>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine: EngineSettings::default(),
            logging: LoggingSettings::default(),
            paths: PathSettings::default(),
            steps: default_steps(),
        }
    }
}

fn default_steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition::new("ShowSchedule"),
        StepDefinition::new("ShowTopRatedToday"),
        StepDefinition::new("FlipOutSchedule"),
    ]
}

/// Step engine timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Presentation frame interval in milliseconds.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// Cycles to run before exiting, 0 to run until interrupted.
    #[serde(default)]
    pub cycles: u64,
}

fn default_frame_interval_ms() -> u64 {
    16
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
            cycles: 0,
        }
    }
}

impl EngineSettings {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,

    /// Also write logs to a daily file in `logs_folder`.
    #[serde(default = "default_true")]
    pub log_to_file: bool,

    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_true() -> bool {
    true
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            log_to_file: true,
            logs_folder: default_logs_folder(),
        }
    }
}

/// Template folder and provider data files.
///
/// Empty strings mean "not configured": built-in templates, empty data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathSettings {
    /// Folder of `*.toml` templates overriding the built-in ones.
    #[serde(default)]
    pub templates_folder: String,

    /// JSON array of schedule sessions.
    #[serde(default)]
    pub schedule_data: String,

    /// JSON array of today's rated talks.
    #[serde(default)]
    pub top_talks_today_data: String,

    /// JSON array of this week's rated talks.
    #[serde(default)]
    pub top_talks_week_data: String,

    /// JSON object mapping speaker names to picture sources.
    #[serde(default)]
    pub speaker_images_data: String,
}

/// One `[[steps]]` entry: the step type and its raw config table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDefinition {
    pub step: String,
    #[serde(default, skip_serializing_if = "toml::Table::is_empty")]
    pub config: toml::Table,
}

impl StepDefinition {
    pub fn new(step: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            config: toml::Table::new(),
        }
    }

    pub fn with_config(mut self, config: toml::Table) -> Self {
        self.config = config;
        self
    }

    /// Resolve the config table into a typed config.
    ///
    /// Fields missing from the table take the config type's defaults.
    pub fn config<C: DeserializeOwned>(&self) -> Result<C, toml::de::Error> {
        toml::Value::Table(self.config.clone()).try_into()
    }
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Engine,
    Logging,
    Paths,
}

impl ConfigSection {
    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Engine => "engine",
            ConfigSection::Logging => "logging",
            ConfigSection::Paths => "paths",
        }
    }
}
