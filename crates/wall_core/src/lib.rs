//! Wall Core - step plugins for the conference wall presentation engine
//!
//! This crate contains the step contracts, the completion protocol, the
//! scene and transition model and the reference steps that flip the
//! schedule and top rated talks panels in and out. A small sequential
//! [`orchestrator::StepEngine`] hosts the steps so they can run end to end.

pub mod config;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod providers;
pub mod scene;
pub mod templates;
pub mod transition;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
