//! Flip the schedule panel out and remove it.

use tracing::debug;

use crate::config::StepDefinition;
use crate::orchestrator::completion::{completion, Completion};
use crate::orchestrator::context::MachineContext;
use crate::orchestrator::errors::StepResult;
use crate::orchestrator::step::{Step, StepFactory};
use crate::providers::{ProviderId, TopTalksWeekDataProvider};
use crate::scene::{NodeAddress, PanelKey, Scene};
use crate::transition::{ParallelTransition, Transition};

/// Removes the schedule panel once its exit flip has played.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlipOutSchedule;

impl FlipOutSchedule {
    pub const STEP_TYPE: &'static str = "FlipOutSchedule";
}

impl Step for FlipOutSchedule {
    fn name(&self) -> &str {
        Self::STEP_TYPE
    }

    fn should_skip(&self, ctx: &MachineContext<'_>) -> bool {
        !ctx.scene().contains(PanelKey::SCHEDULE)
    }

    fn do_step(&self, ctx: &mut MachineContext<'_>) -> StepResult<Completion> {
        let (advance, completion) = completion();
        let group = ParallelTransition::new()
            .with(Transition::flip_out(NodeAddress::panel(PanelKey::SCHEDULE)));

        ctx.play(
            group,
            Box::new(move |scene: &mut Scene| {
                if scene.detach(PanelKey::SCHEDULE).is_some() {
                    debug!("Panel '{}' removed", PanelKey::SCHEDULE);
                }
                advance.advance();
            }),
        );
        Ok(completion)
    }
}

/// Factory for [`FlipOutSchedule`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FlipOutScheduleFactory;

impl StepFactory for FlipOutScheduleFactory {
    fn step_type(&self) -> &'static str {
        FlipOutSchedule::STEP_TYPE
    }

    fn create(&self, _definition: &StepDefinition) -> StepResult<Box<dyn Step>> {
        Ok(Box::new(FlipOutSchedule))
    }

    fn required_data_providers(&self, _definition: &StepDefinition) -> Vec<ProviderId> {
        vec![ProviderId::of::<TopTalksWeekDataProvider>()]
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::providers::DataProviders;
    use crate::scene::Node;
    use crate::templates::TemplateLibrary;
    use crate::transition::Timeline;

    #[test]
    fn skipped_without_schedule_panel() {
        let providers = DataProviders::new();
        let templates = TemplateLibrary::builtin();
        let mut scene = Scene::new();
        let mut timeline = Timeline::new();
        let ctx = MachineContext::new(&mut scene, &mut timeline, &providers, &templates, 1);

        assert!(FlipOutSchedule.should_skip(&ctx));
    }

    #[test]
    fn panel_removed_after_flip_then_advances() {
        let providers = DataProviders::new();
        let templates = TemplateLibrary::builtin();
        let mut scene = Scene::new();
        scene
            .attach(PanelKey::SCHEDULE, Node::new("schedule"))
            .unwrap();
        let mut timeline = Timeline::new();

        let mut completion = {
            let mut ctx =
                MachineContext::new(&mut scene, &mut timeline, &providers, &templates, 1);
            assert!(!FlipOutSchedule.should_skip(&ctx));
            FlipOutSchedule.do_step(&mut ctx).unwrap()
        };

        timeline.tick(Duration::from_millis(600), &mut scene);
        assert!(scene.contains(PanelKey::SCHEDULE));
        assert!(completion.try_outcome().is_none());

        timeline.tick(Duration::from_millis(400), &mut scene);
        assert!(!scene.contains(PanelKey::SCHEDULE));
        assert_eq!(completion.try_outcome(), Some(Ok(())));
    }
}
