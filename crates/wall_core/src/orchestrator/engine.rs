//! Reference host that runs steps in sequence.

use std::future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::completion::Completion;
use super::context::MachineContext;
use super::errors::{AdvanceError, EngineError, EngineResult};
use super::registry::StepRegistry;
use super::step::Step;
use super::types::{CycleReport, StepOutcome, StepReport};
use crate::config::{Settings, StepDefinition};
use crate::providers::{DataProviders, ProviderId};
use crate::scene::Scene;
use crate::templates::TemplateLoader;
use crate::transition::Timeline;

/// Default presentation frame interval (about 60 fps).
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Engine that owns the scene and runs a list of steps.
///
/// Steps run one at a time in list order. For each step the engine checks
/// `should_skip`, runs `do_step`, then ticks the timeline at the frame
/// interval until the step's completion resolves or its preferred duration
/// elapses. A failing step is reported and the cycle moves on.
pub struct StepEngine {
    scene: Scene,
    timeline: Timeline,
    providers: DataProviders,
    templates: Box<dyn TemplateLoader>,
    steps: Vec<Box<dyn Step>>,
    frame_interval: Duration,
    cycle: u64,
    cancelled: Arc<AtomicBool>,
}

impl StepEngine {
    /// Create an engine with no steps.
    pub fn new(providers: DataProviders, templates: Box<dyn TemplateLoader>) -> Self {
        Self {
            scene: Scene::new(),
            timeline: Timeline::new(),
            providers,
            templates,
            steps: Vec::new(),
            frame_interval: DEFAULT_FRAME_INTERVAL,
            cycle: 0,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Build an engine with every step listed in `settings`.
    ///
    /// Fails on the first unknown step type, invalid step config or step
    /// whose data providers are not in `providers`.
    pub fn from_settings(
        settings: &Settings,
        registry: &StepRegistry,
        providers: DataProviders,
        templates: Box<dyn TemplateLoader>,
    ) -> EngineResult<Self> {
        let mut engine =
            Self::new(providers, templates).with_frame_interval(settings.engine.frame_interval());
        for definition in &settings.steps {
            engine.add_definition(registry, definition)?;
        }
        info!(
            "Step engine ready with {} steps: {}",
            engine.step_count(),
            engine.step_names().join(", ")
        );
        Ok(engine)
    }

    /// Set the timeline frame interval (builder pattern).
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Create a step from its definition and schedule it.
    pub fn add_definition(
        &mut self,
        registry: &StepRegistry,
        definition: &StepDefinition,
    ) -> EngineResult<&mut Self> {
        let factory = registry
            .get(&definition.step)
            .ok_or_else(|| EngineError::UnknownStepType(definition.step.clone()))?;

        let required = factory.required_data_providers(definition);
        self.check_providers(&definition.step, &required)?;

        let step = factory
            .create(definition)
            .map_err(|e| EngineError::step_creation(&definition.step, e))?;
        debug!("Scheduled step '{}'", step.name());
        self.steps.push(step);
        Ok(self)
    }

    /// Schedule an already built step that reads `required` providers.
    pub fn add_step(
        &mut self,
        step: Box<dyn Step>,
        required: &[ProviderId],
    ) -> EngineResult<&mut Self> {
        self.check_providers(step.name(), required)?;
        debug!("Scheduled step '{}'", step.name());
        self.steps.push(step);
        Ok(self)
    }

    fn check_providers(&self, step: &str, required: &[ProviderId]) -> EngineResult<()> {
        let missing = self.providers.missing(required);
        if missing.is_empty() {
            return Ok(());
        }
        error!(
            "Step '{}' cannot be scheduled, missing providers: {:?}",
            step, missing
        );
        Err(EngineError::missing_providers(step, missing))
    }

    /// Get a cancellation handle.
    ///
    /// Call `cancel()` on the returned handle to stop the run at the next
    /// step boundary.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            flag: Arc::clone(&self.cancelled),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn providers(&self) -> &DataProviders {
        &self.providers
    }

    /// Cycles started so far.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Step names in order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run a single step to completion, timeout or abandonment.
    pub async fn run_step(&mut self, index: usize) -> EngineResult<StepReport> {
        let count = self.steps.len();
        let step = self
            .steps
            .get(index)
            .ok_or(EngineError::InvalidStepIndex { index, count })?;
        let name = step.name().to_string();
        let started = Instant::now();

        let (completion, deadline, failures) = {
            let mut ctx = MachineContext::new(
                &mut self.scene,
                &mut self.timeline,
                &self.providers,
                self.templates.as_ref(),
                self.cycle,
            );

            if step.should_skip(&ctx) {
                debug!("{} skipped", name);
                return Ok(StepReport::skipped(name));
            }

            let deadline = step.preferred_step_duration(&ctx);
            debug!("Executing '{}'", name);
            match step.do_step(&mut ctx) {
                Ok(completion) => (completion, deadline, ctx.into_failures()),
                Err(e) => {
                    error!("Step '{}' failed: {}", name, e);
                    return Ok(StepReport {
                        name,
                        outcome: StepOutcome::Failed(e.to_string()),
                        failures: ctx.into_failures(),
                        elapsed: started.elapsed(),
                    });
                }
            }
        };

        let outcome = drive(
            completion,
            deadline,
            &mut self.scene,
            &mut self.timeline,
            self.frame_interval,
        )
        .await;

        match &outcome {
            StepOutcome::TimedOut => warn!(
                "{} did not advance within {:?}, forcing advancement",
                name, deadline
            ),
            StepOutcome::Abandoned => warn!("{} dropped its advance signal", name),
            _ => debug!("{} advanced", name),
        }
        for failure in &failures {
            debug!("{} recorded failure: {}", name, failure);
        }

        Ok(StepReport {
            name,
            outcome,
            failures,
            elapsed: started.elapsed(),
        })
    }

    /// Run every step once, in order.
    pub async fn run_cycle(&mut self) -> EngineResult<CycleReport> {
        self.cycle += 1;
        let mut report = CycleReport::new(self.cycle);
        info!("Cycle {} started", self.cycle);

        for index in 0..self.steps.len() {
            if self.is_cancelled() {
                warn!(
                    "Run cancelled before step '{}'",
                    self.steps[index].name()
                );
                return Err(EngineError::cancelled(self.cycle));
            }
            let step_report = self.run_step(index).await?;
            report.steps.push(step_report);
        }

        info!(
            "Cycle {} finished: {} advanced, {} skipped, {} failures",
            report.cycle,
            report.advanced(),
            report.skipped(),
            report.failure_count()
        );
        Ok(report)
    }

    /// Run `cycles` cycles, or until cancelled when `cycles` is 0.
    ///
    /// Returns the number of completed cycles.
    pub async fn run(&mut self, cycles: u64) -> EngineResult<u64> {
        if self.steps.is_empty() {
            warn!("No steps configured, nothing to run");
            return Ok(0);
        }

        let mut completed = 0;
        while cycles == 0 || completed < cycles {
            let report = self.run_cycle().await?;
            completed += 1;
            if report.skipped() == report.steps.len() {
                // Nothing ran; avoid spinning on a cycle of skips.
                time::sleep(self.frame_interval).await;
            }
        }
        Ok(completed)
    }
}

/// Tick the timeline until `completion` resolves or `deadline` elapses.
async fn drive(
    mut completion: Completion,
    deadline: Option<Duration>,
    scene: &mut Scene,
    timeline: &mut Timeline,
    frame_interval: Duration,
) -> StepOutcome {
    if let Some(outcome) = completion.try_outcome() {
        return outcome_of(outcome);
    }

    let mut frames = time::interval(frame_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_frame = frames.tick().await;

    let timeout = async move {
        match deadline {
            Some(deadline) => time::sleep(deadline).await,
            None => future::pending::<()>().await,
        }
    };
    tokio::pin!(timeout);

    loop {
        tokio::select! {
            biased;
            outcome = &mut completion => return outcome_of(outcome),
            _ = &mut timeout => return StepOutcome::TimedOut,
            now = frames.tick() => {
                timeline.tick(now - last_frame, scene);
                last_frame = now;
            }
        }
    }
}

fn outcome_of(result: Result<(), AdvanceError>) -> StepOutcome {
    match result {
        Ok(()) => StepOutcome::Advanced,
        Err(AdvanceError::Abandoned) => StepOutcome::Abandoned,
    }
}

/// Handle for cancelling a running engine.
#[derive(Clone)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Cancel the run.
    ///
    /// The engine will stop at the next step boundary.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::completion::{advanced, completion};
    use crate::orchestrator::errors::StepResult;
    use crate::providers::ScheduleDataProvider;
    use crate::templates::TemplateLibrary;
    use std::sync::atomic::AtomicUsize;

    struct CountingStep {
        name: &'static str,
        executed: Arc<AtomicUsize>,
    }

    impl Step for CountingStep {
        fn name(&self) -> &str {
            self.name
        }

        fn do_step(&self, _ctx: &mut MachineContext<'_>) -> StepResult<Completion> {
            self.executed.fetch_add(1, Ordering::SeqCst);
            Ok(advanced())
        }
    }

    struct SilentStep;

    impl Step for SilentStep {
        fn name(&self) -> &str {
            "Silent"
        }

        fn do_step(&self, _ctx: &mut MachineContext<'_>) -> StepResult<Completion> {
            let (_advance, completion) = completion();
            Ok(completion)
        }
    }

    fn engine() -> StepEngine {
        StepEngine::new(DataProviders::new(), Box::new(TemplateLibrary::builtin()))
    }

    #[test]
    fn engine_builds_correctly() {
        let executed = Arc::new(AtomicUsize::new(0));
        let mut engine = engine();
        engine
            .add_step(
                Box::new(CountingStep {
                    name: "Step1",
                    executed: Arc::clone(&executed),
                }),
                &[],
            )
            .unwrap()
            .add_step(
                Box::new(CountingStep {
                    name: "Step2",
                    executed,
                }),
                &[],
            )
            .unwrap();

        assert_eq!(engine.step_count(), 2);
        assert_eq!(engine.step_names(), vec!["Step1", "Step2"]);
    }

    #[test]
    fn missing_providers_rejected_when_scheduling() {
        let mut engine = engine();
        let err = engine
            .add_step(
                Box::new(SilentStep),
                &[ProviderId::of::<ScheduleDataProvider>()],
            )
            .err()
            .unwrap();

        assert!(matches!(err, EngineError::MissingDataProviders { .. }));
        assert_eq!(engine.step_count(), 0);
    }

    #[test]
    fn cancel_handle_works() {
        let engine = engine();
        let handle = engine.cancel_handle();

        assert!(!engine.is_cancelled());
        handle.cancel();
        assert!(engine.is_cancelled());
        assert!(handle.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn cycle_runs_each_step_once() {
        let executed = Arc::new(AtomicUsize::new(0));
        let mut engine = engine();
        for name in ["A", "B", "C"] {
            engine
                .add_step(
                    Box::new(CountingStep {
                        name,
                        executed: Arc::clone(&executed),
                    }),
                    &[],
                )
                .unwrap();
        }

        let report = engine.run_cycle().await.unwrap();
        assert_eq!(report.cycle, 1);
        assert_eq!(report.advanced(), 3);
        assert_eq!(executed.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_advance_is_reported_not_awaited() {
        let mut engine = engine();
        engine.add_step(Box::new(SilentStep), &[]).unwrap();

        let report = engine.run_step(0).await.unwrap();
        assert_eq!(report.outcome, StepOutcome::Abandoned);
    }

    #[tokio::test]
    async fn invalid_index_is_an_error() {
        let mut engine = engine();
        let err = engine.run_step(4).await.err().unwrap();
        assert!(matches!(
            err,
            EngineError::InvalidStepIndex { index: 4, count: 0 }
        ));
    }

    #[tokio::test]
    async fn cancelled_run_stops_at_step_boundary() {
        let executed = Arc::new(AtomicUsize::new(0));
        let mut engine = engine();
        engine
            .add_step(
                Box::new(CountingStep {
                    name: "A",
                    executed: Arc::clone(&executed),
                }),
                &[],
            )
            .unwrap();
        engine.cancel_handle().cancel();

        let err = engine.run(0).await.err().unwrap();
        assert!(matches!(err, EngineError::Cancelled { cycle: 1 }));
        assert_eq!(executed.load(Ordering::SeqCst), 0);
    }
}
