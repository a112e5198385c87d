//! Error types for steps and the step engine.
//!
//! Errors carry context that chains through layers:
//! Engine → Step → Template/Scene → Detail

use thiserror::Error;

use crate::providers::ProviderId;
use crate::scene::SceneError;
use crate::templates::TemplateError;

/// Top-level engine error.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A step was scheduled without the providers its factory declared.
    #[error("Step '{step}' requires unavailable data providers: {}", names(.missing))]
    MissingDataProviders {
        step: String,
        missing: Vec<ProviderId>,
    },

    /// The configured step type has no registered factory.
    #[error("Unknown step type '{0}'")]
    UnknownStepType(String),

    /// The factory rejected the step definition.
    #[error("Step '{step}' could not be created: {source}")]
    StepCreation {
        step: String,
        #[source]
        source: StepError,
    },

    /// A step index outside the step list.
    #[error("Invalid step index {index} (engine has {count} steps)")]
    InvalidStepIndex { index: usize, count: usize },

    /// The run was cancelled.
    #[error("Run cancelled in cycle {cycle}")]
    Cancelled { cycle: u64 },
}

fn names(ids: &[ProviderId]) -> String {
    ids.iter().map(|id| id.name()).collect::<Vec<_>>().join(", ")
}

impl EngineError {
    pub fn missing_providers(step: impl Into<String>, missing: Vec<ProviderId>) -> Self {
        Self::MissingDataProviders {
            step: step.into(),
            missing,
        }
    }

    pub fn step_creation(step: impl Into<String>, source: StepError) -> Self {
        Self::StepCreation {
            step: step.into(),
            source,
        }
    }

    pub fn cancelled(cycle: u64) -> Self {
        Self::Cancelled { cycle }
    }
}

/// Error from a single step.
#[derive(Error, Debug)]
pub enum StepError {
    /// A template could not be resolved or parsed.
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// A scene mutation was rejected.
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// The step definition's config table is invalid.
    #[error("Invalid config for step '{step}': {source}")]
    InvalidConfig {
        step: String,
        #[source]
        source: toml::de::Error,
    },

    /// A provider was queried that the host never supplied.
    #[error("Data provider '{0}' is not available")]
    MissingProvider(ProviderId),
}

impl StepError {
    pub fn invalid_config(step: impl Into<String>, source: toml::de::Error) -> Self {
        Self::InvalidConfig {
            step: step.into(),
            source,
        }
    }
}

/// Why a completion resolved without an advance.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceError {
    /// The advance handle was dropped without being fired.
    #[error("Step dropped its advance handle without advancing")]
    Abandoned,
}

/// Result type for step operations.
pub type StepResult<T> = Result<T, StepError>;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ScheduleDataProvider;
    use crate::templates::TemplateRef;

    #[test]
    fn missing_providers_lists_names() {
        let err = EngineError::missing_providers(
            "ShowSchedule",
            vec![ProviderId::of::<ScheduleDataProvider>()],
        );
        let msg = err.to_string();
        assert!(msg.contains("ShowSchedule"));
        assert!(msg.contains("ScheduleDataProvider"));
    }

    #[test]
    fn step_error_wraps_template_error() {
        let err: StepError = TemplateError::NotFound(TemplateRef::SESSION.to_string()).into();
        assert!(err.to_string().contains("session"));
    }
}
