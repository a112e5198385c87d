//! Per-invocation execution context handed to steps.

use super::errors::{StepError, StepResult};
use crate::providers::{DataProvider, DataProviders, ProviderId};
use crate::scene::Scene;
use crate::templates::TemplateLoader;
use crate::transition::{OnFinished, ParallelTransition, Timeline};

/// Shared state a step sees while it runs.
///
/// The engine builds one context per step invocation over the scene and
/// timeline it owns. A step must not keep anything borrowed from the
/// context beyond its own invocation; work that outlives `do_step` goes
/// through [`MachineContext::play`] callbacks, which get the scene back
/// when they fire.
pub struct MachineContext<'a> {
    scene: &'a mut Scene,
    timeline: &'a mut Timeline,
    providers: &'a DataProviders,
    templates: &'a dyn TemplateLoader,
    cycle: u64,
    failures: Vec<String>,
}

impl<'a> MachineContext<'a> {
    pub fn new(
        scene: &'a mut Scene,
        timeline: &'a mut Timeline,
        providers: &'a DataProviders,
        templates: &'a dyn TemplateLoader,
        cycle: u64,
    ) -> Self {
        Self {
            scene,
            timeline,
            providers,
            templates,
            cycle,
            failures: Vec::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &*self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut *self.scene
    }

    /// Provider registered for capability `P`.
    ///
    /// The engine refuses to schedule a step whose declared providers are
    /// missing, so an error here means the step queried a capability its
    /// factory never declared.
    pub fn provider<P: DataProvider>(&self) -> StepResult<&'a P> {
        let providers: &'a DataProviders = self.providers;
        providers
            .get::<P>()
            .ok_or_else(|| StepError::MissingProvider(ProviderId::of::<P>()))
    }

    pub fn templates(&self) -> &'a dyn TemplateLoader {
        self.templates
    }

    /// Display cycle this invocation belongs to, starting at 1.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Start a transition group on the presentation timeline.
    pub fn play(&mut self, group: ParallelTransition, on_finished: OnFinished) {
        self.timeline.play(group, &mut *self.scene, on_finished);
    }

    /// Note a recoverable failure for the step report.
    pub fn record_failure(&mut self, failure: impl Into<String>) {
        self.failures.push(failure.into());
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub(crate) fn into_failures(self) -> Vec<String> {
        self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{ScheduleDataProvider, TopTalksTodayDataProvider};
    use crate::templates::TemplateLibrary;

    #[test]
    fn provider_lookup_by_capability() {
        let providers = DataProviders::new().with(ScheduleDataProvider::new(Vec::new()));
        let templates = TemplateLibrary::builtin();
        let mut scene = Scene::new();
        let mut timeline = Timeline::new();
        let ctx = MachineContext::new(&mut scene, &mut timeline, &providers, &templates, 1);

        assert!(ctx.provider::<ScheduleDataProvider>().is_ok());
        let err = ctx.provider::<TopTalksTodayDataProvider>().err().unwrap();
        assert!(matches!(err, StepError::MissingProvider(_)));
    }

    #[test]
    fn failures_are_collected() {
        let providers = DataProviders::new();
        let templates = TemplateLibrary::new();
        let mut scene = Scene::new();
        let mut timeline = Timeline::new();
        let mut ctx = MachineContext::new(&mut scene, &mut timeline, &providers, &templates, 3);

        ctx.record_failure("card 2: missing slot");
        assert_eq!(ctx.cycle(), 3);
        assert_eq!(ctx.failures().len(), 1);
        assert_eq!(ctx.into_failures(), vec!["card 2: missing slot".to_string()]);
    }
}
