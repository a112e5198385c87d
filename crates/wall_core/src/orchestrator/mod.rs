//! Step orchestration: contracts, completion protocol and the engine.
//!
//! A [`Step`] is created by its [`StepFactory`] from a [`StepDefinition`]
//! and declares the data providers it reads. The [`StepEngine`] checks those
//! declarations once when scheduling, then runs steps one at a time:
//!
//! ```text
//! StepEngine
//!     ├── should_skip(ctx)?      -> Skipped
//!     ├── do_step(ctx)           -> Completion
//!     └── tick timeline until the Completion resolves
//!         or preferred_step_duration elapses
//! ```
//!
//! Each step resolves its [`Completion`] exactly once, through the
//! single-use [`Advance`] handle.
//!
//! # Example
//!
//! ```ignore
//! use wall_core::orchestrator::{StepEngine, StepRegistry};
//!
//! let registry = StepRegistry::with_builtin_steps();
//! let mut engine = StepEngine::from_settings(&settings, &registry, providers, templates)?;
//! let report = engine.run_cycle().await?;
//! println!("Advanced: {}", report.advanced());
//! ```
//!
//! [`StepDefinition`]: crate::config::StepDefinition

mod completion;
mod context;
mod engine;
mod errors;
mod registry;
mod step;
pub mod steps;
mod types;

pub use completion::{advanced, completion, Advance, Completion};
pub use context::MachineContext;
pub use engine::{CancelHandle, StepEngine, DEFAULT_FRAME_INTERVAL};
pub use errors::{AdvanceError, EngineError, EngineResult, StepError, StepResult};
pub use registry::StepRegistry;
pub use step::{Step, StepFactory};
pub use steps::{
    FlipOutSchedule, FlipOutScheduleFactory, GridLayout, PanelConfig, ShowSchedule,
    ShowScheduleFactory, ShowTopRatedToday, ShowTopRatedTodayFactory,
};
pub use types::{CycleReport, StepOutcome, StepReport};
