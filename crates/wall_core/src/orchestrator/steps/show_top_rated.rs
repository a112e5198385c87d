//! Flip in today's top rated talks.

use std::time::Duration;

use super::panel::{self, GridLayout, PanelConfig, PanelSpec};
use crate::config::StepDefinition;
use crate::models::VotedTalk;
use crate::orchestrator::completion::Completion;
use crate::orchestrator::context::MachineContext;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::{Step, StepFactory};
use crate::providers::{ProviderId, SpeakerImageProvider, TopTalksTodayDataProvider};
use crate::scene::{Node, PanelKey};
use crate::templates::{TemplateLoader, TemplateRef};

const TOP_RATED_PANEL: PanelSpec = PanelSpec {
    key: PanelKey::TOP_RATED_TODAY,
    template: TemplateRef::TOP_RATED_TODAY,
    grid: "sessionGrid",
    layout: GridLayout::SingleColumn,
};

/// Shows the day's best rated talks, one per row, with speaker pictures.
///
/// Skipped while there are no ratings yet.
#[derive(Debug, Clone)]
pub struct ShowTopRatedToday {
    config: PanelConfig,
}

impl ShowTopRatedToday {
    pub const STEP_TYPE: &'static str = "ShowTopRatedToday";

    pub fn new(config: PanelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }
}

impl Step for ShowTopRatedToday {
    fn name(&self) -> &str {
        Self::STEP_TYPE
    }

    fn should_skip(&self, ctx: &MachineContext<'_>) -> bool {
        ctx.provider::<TopTalksTodayDataProvider>()
            .map_or(true, |talks| talks.filtered_snapshot().is_empty())
    }

    fn do_step(&self, ctx: &mut MachineContext<'_>) -> StepResult<Completion> {
        let talks = ctx.provider::<TopTalksTodayDataProvider>()?;
        let speakers = ctx.provider::<SpeakerImageProvider>()?;
        let templates = ctx.templates();

        panel::reveal(
            ctx,
            &TOP_RATED_PANEL,
            &self.config,
            || talks.filtered_snapshot(),
            |talk| rated_talk_card(templates, speakers, talk),
        )
    }

    fn preferred_step_duration(&self, _ctx: &MachineContext<'_>) -> Option<Duration> {
        Some(self.config.step_duration())
    }
}

fn rated_talk_card(
    templates: &dyn TemplateLoader,
    speakers: &SpeakerImageProvider,
    talk: &VotedTalk,
) -> StepResult<Node> {
    let mut card = templates.instantiate(TemplateRef::RATED_TALK)?;
    card.set_text("title", talk.title_label())?;
    card.set_text("speakers", talk.speakers_label())?;
    card.set_text("averageVote", talk.rating_label())?;
    card.set_text("voteCount", talk.votes_label())?;
    card.set_image("speakerImage", speakers.speaker_image(talk.speaker.as_ref()))?;
    Ok(card)
}

/// Factory for [`ShowTopRatedToday`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowTopRatedTodayFactory;

impl StepFactory for ShowTopRatedTodayFactory {
    fn step_type(&self) -> &'static str {
        ShowTopRatedToday::STEP_TYPE
    }

    fn create(&self, definition: &StepDefinition) -> StepResult<Box<dyn Step>> {
        let config = definition
            .config::<PanelConfig>()
            .map_err(|e| StepError::invalid_config(ShowTopRatedToday::STEP_TYPE, e))?;
        Ok(Box::new(ShowTopRatedToday::new(config)))
    }

    fn required_data_providers(&self, _definition: &StepDefinition) -> Vec<ProviderId> {
        vec![
            ProviderId::of::<TopTalksTodayDataProvider>(),
            ProviderId::of::<SpeakerImageProvider>(),
        ]
    }
}
