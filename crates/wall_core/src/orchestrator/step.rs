//! Step and step factory traits.

use std::time::Duration;

use super::completion::Completion;
use super::context::MachineContext;
use super::errors::StepResult;
use crate::config::StepDefinition;
use crate::providers::ProviderId;

/// A unit of scripted visual behavior.
///
/// The engine calls these methods for every invocation:
///
/// 1. `should_skip` - bypass the step entirely when it has nothing to do
/// 2. `do_step` - mutate the scene and start transitions
/// 3. await the returned [`Completion`], bounded by
///    `preferred_step_duration` when present
///
/// # Example
///
/// ```ignore
/// struct Pause;
///
/// impl Step for Pause {
///     fn name(&self) -> &str { "Pause" }
///
///     fn do_step(&self, _ctx: &mut MachineContext<'_>) -> StepResult<Completion> {
///         // Nothing to animate: resolve before returning.
///         Ok(advanced())
///     }
///
///     fn preferred_step_duration(&self, _ctx: &MachineContext<'_>) -> Option<Duration> {
///         Some(Duration::from_secs(5))
///     }
/// }
/// ```
pub trait Step: Send + Sync {
    /// Step name (for logging and reports).
    fn name(&self) -> &str;

    /// Whether this invocation should be bypassed.
    ///
    /// Must not mutate anything and must be safe to call before the step
    /// has ever run. Default is `false`.
    fn should_skip(&self, _ctx: &MachineContext<'_>) -> bool {
        false
    }

    /// Execute the step.
    ///
    /// The returned completion resolves exactly once: either before
    /// `do_step` returns, or from the finish callback of a transition group
    /// started through [`MachineContext::play`].
    fn do_step(&self, ctx: &mut MachineContext<'_>) -> StepResult<Completion>;

    /// Upper bound after which the engine advances without waiting for
    /// the completion. `None` makes the completion authoritative.
    fn preferred_step_duration(&self, _ctx: &MachineContext<'_>) -> Option<Duration> {
        None
    }
}

/// Builds steps of one type from their definitions.
pub trait StepFactory: Send + Sync {
    /// Type name used in `[[steps]]` definitions.
    fn step_type(&self) -> &'static str;

    /// Create the step, binding its config.
    fn create(&self, definition: &StepDefinition) -> StepResult<Box<dyn Step>>;

    /// Capabilities the created step reads from the context.
    fn required_data_providers(&self, _definition: &StepDefinition) -> Vec<ProviderId> {
        Vec::new()
    }
}
