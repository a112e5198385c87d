//! Step factories by type name.

use std::collections::HashMap;

use super::step::StepFactory;
use super::steps::{FlipOutScheduleFactory, ShowScheduleFactory, ShowTopRatedTodayFactory};

/// Lookup table from `[[steps]]` type names to factories.
#[derive(Default)]
pub struct StepRegistry {
    factories: HashMap<&'static str, Box<dyn StepFactory>>,
}

impl StepRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every step this crate ships.
    pub fn with_builtin_steps() -> Self {
        let mut registry = Self::new();
        registry
            .register(ShowScheduleFactory)
            .register(ShowTopRatedTodayFactory)
            .register(FlipOutScheduleFactory);
        registry
    }

    /// Register a factory, replacing any factory with the same type name.
    pub fn register<F: StepFactory + 'static>(&mut self, factory: F) -> &mut Self {
        self.factories.insert(factory.step_type(), Box::new(factory));
        self
    }

    pub fn get(&self, step_type: &str) -> Option<&dyn StepFactory> {
        self.factories.get(step_type).map(|f| f.as_ref())
    }

    /// Registered type names, sorted.
    pub fn step_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.factories.keys().copied().collect();
        types.sort_unstable();
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_steps_are_registered() {
        let registry = StepRegistry::with_builtin_steps();
        assert_eq!(
            registry.step_types(),
            vec!["FlipOutSchedule", "ShowSchedule", "ShowTopRatedToday"]
        );
        assert!(registry.get("ShowSchedule").is_some());
        assert!(registry.get("ShowWeather").is_none());
    }
}
