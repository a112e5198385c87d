//! The shipped demo configuration loads and runs one cycle.

use std::path::PathBuf;

use wall_core::config::ConfigManager;
use wall_core::models::{SessionData, VotedTalk};
use wall_core::orchestrator::{StepEngine, StepOutcome, StepRegistry};
use wall_core::providers::{
    load_records, load_speaker_images, DataProviders, ScheduleDataProvider, SpeakerImageProvider,
    TopTalksTodayDataProvider, TopTalksWeekDataProvider,
};
use wall_core::scene::PanelKey;
use wall_core::templates::TemplateLibrary;

fn demo_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demo")
}

#[tokio::test(start_paused = true)]
async fn demo_config_runs_a_cycle() {
    let demo = demo_dir();
    let mut manager = ConfigManager::new(demo.join("wall.toml"));
    manager.load().unwrap();
    let settings = manager.settings().clone();
    let paths = &settings.paths;

    let sessions: Vec<SessionData> = load_records(demo.join(&paths.schedule_data)).unwrap();
    let today: Vec<VotedTalk> = load_records(demo.join(&paths.top_talks_today_data)).unwrap();
    let week: Vec<VotedTalk> = load_records(demo.join(&paths.top_talks_week_data)).unwrap();
    let images = load_speaker_images(demo.join(&paths.speaker_images_data)).unwrap();
    let templates = TemplateLibrary::from_dir(demo.join(&paths.templates_folder)).unwrap();

    assert_eq!(sessions.len(), 5);
    assert_eq!(settings.steps.len(), 3);

    let providers = DataProviders::new()
        .with(ScheduleDataProvider::new(sessions))
        .with(TopTalksTodayDataProvider::new(today))
        .with(TopTalksWeekDataProvider::new(week))
        .with(SpeakerImageProvider::new(images));

    let mut engine = StepEngine::from_settings(
        &settings,
        &StepRegistry::with_builtin_steps(),
        providers,
        Box::new(templates),
    )
    .unwrap();

    let report = engine.run_cycle().await.unwrap();
    assert!(report
        .steps
        .iter()
        .all(|step| step.outcome == StepOutcome::Advanced));

    let panel = engine.scene().lookup(PanelKey::TOP_RATED_TODAY).unwrap();
    assert_eq!((panel.layout.x, panel.layout.y), (1100.0, 200.0));
    let first = &panel.grid("sessionGrid").unwrap().cells()[0].node;
    assert_eq!(first.text("averageVote"), Some("4.9"));
    assert_eq!(first.text("voteCount"), Some("15 Votes"));
}
