//! Conference Wall - Main entry point
//!
//! Runs the wall's step list on a display cycle. It handles:
//! - Configuration loading
//! - Application-level logging initialization
//! - Data provider and template setup
//! - Running the step engine until done or interrupted

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use anyhow::Context;
use wall_core::config::{ConfigManager, PathSettings};
use wall_core::logging::{init_tracing, init_tracing_with_file};
use wall_core::models::{SessionData, SpeakerKey, VotedTalk};
use wall_core::orchestrator::{EngineError, StepEngine, StepRegistry};
use wall_core::providers::{
    load_records, load_speaker_images, DataProviders, ProviderError, ScheduleDataProvider,
    SpeakerImageProvider, TopTalksTodayDataProvider, TopTalksWeekDataProvider,
};
use wall_core::templates::{TemplateLibrary, TemplateLoader};

/// Default config path: .config/wall.toml (relative to current working directory)
fn default_config_path() -> PathBuf {
    PathBuf::from(".config").join("wall.toml")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // First argument overrides the config path
    let config_path = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);
    let mut config_manager = ConfigManager::new(&config_path);

    if let Err(e) = config_manager.load_or_create() {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
    }
    let settings = config_manager.settings().clone();

    let _log_guard = if settings.logging.log_to_file {
        init_tracing_with_file(settings.logging.level, config_manager.logs_folder())
    } else {
        init_tracing(settings.logging.level);
        None
    };

    tracing::info!("Conference wall starting");
    tracing::info!("Config: {}", config_path.display());
    tracing::info!("Core version: {}", wall_core::version());

    let providers = build_providers(&settings.paths);
    let templates = build_templates(&settings.paths)?;

    let mut engine = StepEngine::from_settings(
        &settings,
        &StepRegistry::with_builtin_steps(),
        providers,
        templates,
    )
    .context("Failed to build step engine")?;

    let cancel = engine.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping after the current step");
            cancel.cancel();
        }
    });

    match engine.run(settings.engine.cycles).await {
        Ok(cycles) => tracing::info!("Finished after {} cycles", cycles),
        Err(EngineError::Cancelled { cycle }) => tracing::info!("Stopped in cycle {}", cycle),
        Err(e) => return Err(e).context("Step engine stopped"),
    }

    Ok(())
}

fn build_providers(paths: &PathSettings) -> DataProviders {
    let images: HashMap<SpeakerKey, String> =
        load_or_empty(&paths.speaker_images_data, "speaker images", |path| {
            load_speaker_images(path)
        });

    DataProviders::new()
        .with(ScheduleDataProvider::new(load_or_empty(
            &paths.schedule_data,
            "schedule",
            |path| load_records::<SessionData>(path),
        )))
        .with(TopTalksTodayDataProvider::new(load_or_empty(
            &paths.top_talks_today_data,
            "top talks today",
            |path| load_records::<VotedTalk>(path),
        )))
        .with(TopTalksWeekDataProvider::new(load_or_empty(
            &paths.top_talks_week_data,
            "top talks week",
            |path| load_records::<VotedTalk>(path),
        )))
        .with(SpeakerImageProvider::new(images))
}

/// Load a data file, falling back to empty data when it is unset or broken.
fn load_or_empty<T: Default>(
    path: &str,
    what: &str,
    load: impl FnOnce(&str) -> Result<T, ProviderError>,
) -> T {
    if path.is_empty() {
        tracing::debug!("No {} data configured", what);
        return T::default();
    }
    match load(path) {
        Ok(data) => {
            tracing::debug!("Loaded {} data from {}", what, path);
            data
        }
        Err(e) => {
            tracing::warn!("{}; showing no {} data", e, what);
            T::default()
        }
    }
}

fn build_templates(paths: &PathSettings) -> anyhow::Result<Box<dyn TemplateLoader>> {
    if paths.templates_folder.is_empty() {
        tracing::debug!("Using built-in templates");
        return Ok(Box::new(TemplateLibrary::builtin()));
    }
    let library = TemplateLibrary::from_dir(&paths.templates_folder).with_context(|| {
        format!("Failed to load templates from {}", paths.templates_folder)
    })?;
    tracing::info!(
        "Loaded {} templates from {}",
        library.len(),
        paths.templates_folder
    );
    let broken = library.broken_names();
    if !broken.is_empty() {
        tracing::warn!(
            "Templates that failed to load and will be skipped: {}",
            broken.join(", ")
        );
    }
    Ok(Box::new(library))
}
