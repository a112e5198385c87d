//! Reports produced by the step engine.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Local};

/// How one step invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step fired its advance signal.
    Advanced,
    /// `should_skip` returned true; `do_step` never ran.
    Skipped,
    /// The preferred duration elapsed first and the engine moved on.
    TimedOut,
    /// The step dropped its advance handle without firing it.
    Abandoned,
    /// `do_step` returned an error.
    Failed(String),
}

impl StepOutcome {
    /// Whether the step itself signalled completion.
    pub fn is_advanced(&self) -> bool {
        matches!(self, Self::Advanced)
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Advanced => f.write_str("advanced"),
            Self::Skipped => f.write_str("skipped"),
            Self::TimedOut => f.write_str("timed out"),
            Self::Abandoned => f.write_str("abandoned"),
            Self::Failed(message) => write!(f, "failed: {}", message),
        }
    }
}

/// Result of one step invocation.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub name: String,
    pub outcome: StepOutcome,
    /// Recoverable failures the step recorded (missing templates, bad cards).
    pub failures: Vec<String>,
    pub elapsed: Duration,
}

impl StepReport {
    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: StepOutcome::Skipped,
            failures: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }
}

/// Result of one pass over the step list.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub cycle: u64,
    pub started_at: DateTime<Local>,
    pub steps: Vec<StepReport>,
}

impl CycleReport {
    pub fn new(cycle: u64) -> Self {
        Self {
            cycle,
            started_at: Local::now(),
            steps: Vec::new(),
        }
    }

    /// Steps that reached their advance signal.
    pub fn advanced(&self) -> usize {
        self.steps.iter().filter(|s| s.outcome.is_advanced()).count()
    }

    pub fn skipped(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.outcome == StepOutcome::Skipped)
            .count()
    }

    /// Failures recorded across all steps.
    pub fn failure_count(&self) -> usize {
        self.steps.iter().map(|s| s.failures.len()).sum()
    }
}
