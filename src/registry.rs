use std::collections::HashMap;
use std::sync::Arc;

use crate::schedulers::power_shift::PowerShiftScheduler;
use crate::schedulers::types::Scheduler;

/// Name the power-shift handler registers under.
pub const POWER_SHIFT: &str = "power_shift";

/// Name-to-handler table owned by the host, populated once at startup.
///
/// Registration is idempotent: a name that is already present keeps its
/// existing handler, and the ordered name list never holds duplicates.
#[derive(Default)]
pub struct SchedulerRegistry {
    handlers: HashMap<String, Arc<dyn Scheduler>>,
    names: Vec<String>,
}

impl SchedulerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in schedulers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(POWER_SHIFT, Arc::new(PowerShiftScheduler::default()));
        registry
    }

    /// Inserts `handler` under `name` unless the name is already taken.
    /// Returns whether the handler was inserted.
    pub fn register(&mut self, name: &str, handler: Arc<dyn Scheduler>) -> bool {
        if self.handlers.contains_key(name) {
            return false;
        }
        self.handlers.insert(name.to_string(), handler);
        if !self.names.iter().any(|n| n == name) {
            self.names.push(name.to_string());
        }
        true
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Scheduler>> {
        self.handlers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model_sampling::ModelSampling;

    #[test]
    fn test_defaults_contain_power_shift() {
        let registry = SchedulerRegistry::with_defaults();
        assert!(registry.contains(POWER_SHIFT));
        assert_eq!(registry.names(), &[POWER_SHIFT.to_string()]);
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = SchedulerRegistry::with_defaults();
        let inserted = registry.register(POWER_SHIFT, Arc::new(PowerShiftScheduler::default()));
        assert!(!inserted);
        assert_eq!(registry.names().iter().filter(|n| *n == POWER_SHIFT).count(), 1);
    }

    #[test]
    fn test_lookup_produces_usable_handler() {
        let registry = SchedulerRegistry::with_defaults();
        let handler = registry.get(POWER_SHIFT).unwrap();
        let model = ModelSampling::new((0..100).map(|i| i as f64).collect());
        let sigmas = handler.sigmas(&model, 10).unwrap();
        assert_eq!(*sigmas.last().unwrap(), 0.0);
        assert!(registry.get("does_not_exist").is_none());
    }
}
