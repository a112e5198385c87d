//! Flip in the conference schedule.

use std::time::Duration;

use super::panel::{self, GridLayout, PanelConfig, PanelSpec};
use crate::config::StepDefinition;
use crate::models::SessionData;
use crate::orchestrator::completion::Completion;
use crate::orchestrator::context::MachineContext;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::{Step, StepFactory};
use crate::providers::{ProviderId, ScheduleDataProvider};
use crate::scene::{Node, PanelKey};
use crate::templates::{TemplateLoader, TemplateRef};

const SCHEDULE_PANEL: PanelSpec = PanelSpec {
    key: PanelKey::SCHEDULE,
    template: TemplateRef::SCHEDULE,
    grid: "sessionGrid",
    layout: GridLayout::TwoColumn,
};

/// Shows upcoming sessions two per row.
#[derive(Debug, Clone)]
pub struct ShowSchedule {
    config: PanelConfig,
}

impl ShowSchedule {
    pub const STEP_TYPE: &'static str = "ShowSchedule";

    pub fn new(config: PanelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }
}

impl Step for ShowSchedule {
    fn name(&self) -> &str {
        Self::STEP_TYPE
    }

    fn do_step(&self, ctx: &mut MachineContext<'_>) -> StepResult<Completion> {
        let schedule = ctx.provider::<ScheduleDataProvider>()?;
        let templates = ctx.templates();

        panel::reveal(
            ctx,
            &SCHEDULE_PANEL,
            &self.config,
            || schedule.filtered_snapshot(),
            |session| session_card(templates, session),
        )
    }

    fn preferred_step_duration(&self, _ctx: &MachineContext<'_>) -> Option<Duration> {
        Some(self.config.step_duration())
    }
}

fn session_card(templates: &dyn TemplateLoader, session: &SessionData) -> StepResult<Node> {
    let mut card = templates.instantiate(TemplateRef::SESSION)?;
    card.set_text("title", session.title_label())?;
    card.set_text("speakers", session.speakers_label())?;
    card.set_text("room", session.room_label())?;
    card.set_text("startTime", session.time_label())?;
    Ok(card)
}

/// Factory for [`ShowSchedule`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowScheduleFactory;

impl StepFactory for ShowScheduleFactory {
    fn step_type(&self) -> &'static str {
        ShowSchedule::STEP_TYPE
    }

    fn create(&self, definition: &StepDefinition) -> StepResult<Box<dyn Step>> {
        let config = definition
            .config::<PanelConfig>()
            .map_err(|e| StepError::invalid_config(ShowSchedule::STEP_TYPE, e))?;
        Ok(Box::new(ShowSchedule::new(config)))
    }

    fn required_data_providers(&self, _definition: &StepDefinition) -> Vec<ProviderId> {
        vec![ProviderId::of::<ScheduleDataProvider>()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::DataProviders;
    use crate::scene::Scene;
    use crate::templates::{Template, TemplateLibrary};
    use crate::transition::Timeline;

    fn sessions(count: usize) -> Vec<SessionData> {
        (0..count)
            .map(|i| {
                SessionData::new(format!("Talk {}", i))
                    .with_speaker("Ada")
                    .with_speaker("Grace")
                    .with_room(format!("Room {}", i))
                    .with_time("10:00", "10:50")
            })
            .collect()
    }

    fn run(
        step: &ShowSchedule,
        scene: &mut Scene,
        providers: &DataProviders,
        templates: &TemplateLibrary,
    ) -> (Completion, Vec<String>) {
        let mut timeline = Timeline::new();
        let mut ctx = MachineContext::new(scene, &mut timeline, providers, templates, 1);
        let completion = step.do_step(&mut ctx).unwrap();
        let failures = ctx.into_failures();
        timeline.tick(Duration::from_millis(1000), scene);
        (completion, failures)
    }

    #[test]
    fn sessions_fill_two_columns() {
        let providers = DataProviders::new().with(ScheduleDataProvider::new(sessions(5)));
        let templates = TemplateLibrary::builtin();
        let mut scene = Scene::new();
        let step = ShowSchedule::new(PanelConfig::default());

        let (mut completion, failures) = run(&step, &mut scene, &providers, &templates);

        assert!(failures.is_empty());
        assert_eq!(completion.try_outcome(), Some(Ok(())));

        let grid = scene
            .lookup(PanelKey::SCHEDULE)
            .and_then(|panel| panel.grid("sessionGrid"))
            .unwrap();
        let cells: Vec<_> = grid.cells().iter().map(|c| (c.column, c.row)).collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert_eq!(grid.row_count(), 3);

        let first = &grid.cells()[0].node;
        assert_eq!(first.text("title"), Some("Talk 0"));
        assert_eq!(first.text("speakers"), Some("Ada, Grace"));
        assert_eq!(first.text("room"), Some("Room 0"));
    }

    #[test]
    fn panel_uses_configured_layout() {
        let providers = DataProviders::new().with(ScheduleDataProvider::new(sessions(1)));
        let templates = TemplateLibrary::builtin();
        let mut scene = Scene::new();
        let step = ShowSchedule::new(PanelConfig {
            layout_x: 150.0,
            layout_y: 200.0,
            ..PanelConfig::default()
        });

        run(&step, &mut scene, &providers, &templates);

        let layout = scene.lookup(PanelKey::SCHEDULE).unwrap().layout;
        assert_eq!((layout.x, layout.y), (150.0, 200.0));
    }

    #[test]
    fn broken_card_template_leaves_siblings() {
        let providers = DataProviders::new().with(ScheduleDataProvider::new(sessions(3)));
        let mut templates = TemplateLibrary::builtin();
        // Card template without the room slot.
        templates.insert(Template::new("session").with_texts(&["title", "speakers"]));
        let mut scene = Scene::new();
        let step = ShowSchedule::new(PanelConfig::default());

        let (mut completion, failures) = run(&step, &mut scene, &providers, &templates);

        assert_eq!(failures.len(), 3);
        assert_eq!(completion.try_outcome(), Some(Ok(())));
        let grid = scene
            .lookup(PanelKey::SCHEDULE)
            .and_then(|panel| panel.grid("sessionGrid"))
            .unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn factory_binds_config() {
        let mut table = toml::Table::new();
        table.insert("stepDuration".into(), toml::Value::Integer(15000));
        let definition = StepDefinition::new(ShowSchedule::STEP_TYPE).with_config(table);

        let step = ShowScheduleFactory.create(&definition).unwrap();
        let providers = DataProviders::new();
        let templates = TemplateLibrary::builtin();
        let mut scene = Scene::new();
        let mut timeline = Timeline::new();
        let ctx = MachineContext::new(&mut scene, &mut timeline, &providers, &templates, 1);

        assert_eq!(
            step.preferred_step_duration(&ctx),
            Some(Duration::from_millis(15000))
        );
        assert_eq!(
            ShowScheduleFactory.required_data_providers(&definition),
            vec![ProviderId::of::<ScheduleDataProvider>()]
        );
    }

    #[test]
    fn factory_rejects_bad_config() {
        let mut table = toml::Table::new();
        table.insert("stepDuration".into(), toml::Value::String("long".into()));
        let definition = StepDefinition::new(ShowSchedule::STEP_TYPE).with_config(table);

        let err = ShowScheduleFactory.create(&definition).err().unwrap();
        assert!(matches!(err, StepError::InvalidConfig { .. }));
    }
}
