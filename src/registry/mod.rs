//! The metric registry.
//!
//! A read-only, process-wide table of `MetricConfig` entries, initialized
//! once and never mutated afterward (there is no write API). Iteration order
//! is the declaration order of the table, which keeps analysis output
//! deterministic.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::domain::MetricConfig;
use crate::scoring::{ScoreError, curve};

pub mod metrics;

pub struct MetricRegistry {
    entries: Vec<MetricConfig>,
    index: HashMap<&'static str, usize>,
}

impl MetricRegistry {
    /// Build a registry from an explicit entry list.
    ///
    /// Later duplicates of an id are ignored; the builtin table has none
    /// (enforced by test).
    pub fn new(entries: Vec<MetricConfig>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            index.entry(entry.id).or_insert(i);
        }
        Self { entries, index }
    }

    /// The compiled-in metric table.
    pub fn builtin() -> Self {
        Self::new(metrics::builtin_metrics())
    }

    /// Shared instance of the builtin registry.
    pub fn global() -> &'static MetricRegistry {
        static REGISTRY: OnceLock<MetricRegistry> = OnceLock::new();
        REGISTRY.get_or_init(MetricRegistry::builtin)
    }

    /// Look up a metric by id.
    pub fn get(&self, id: &str) -> Result<&MetricConfig, ScoreError> {
        self.index
            .get(id)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| ScoreError::UnknownMetric(id.to_string()))
    }

    /// Position of a metric in declaration order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// All metrics in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &MetricConfig> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check every entry's structural invariants and curve configuration.
    ///
    /// Returns all violations at once, not just the first.
    pub fn validate(&self) -> Vec<ScoreError> {
        let mut errors = Vec::new();
        for entry in &self.entries {
            if let Err(reason) = entry.validate() {
                errors.push(ScoreError::InvalidConfig {
                    metric: entry.id.to_string(),
                    reason,
                });
            }
            if let Err(err) = curve::validate_config(entry) {
                errors.push(err);
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_registry_is_well_formed() {
        let registry = MetricRegistry::builtin();
        assert!(!registry.is_empty());
        let errors = registry.validate();
        assert!(errors.is_empty(), "registry violations: {errors:?}");
    }

    #[test]
    fn builtin_ids_are_unique() {
        let registry = MetricRegistry::builtin();
        let ids: HashSet<&str> = registry.iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), registry.len());
    }

    #[test]
    fn lookup_hit_and_miss() {
        let registry = MetricRegistry::builtin();
        assert!(registry.get("faceWidthToHeight").is_ok());
        assert!(matches!(
            registry.get("notARealMetric"),
            Err(ScoreError::UnknownMetric(_))
        ));
    }

    #[test]
    fn global_returns_same_instance() {
        let a = MetricRegistry::global() as *const _;
        let b = MetricRegistry::global() as *const _;
        assert_eq!(a, b);
    }

    #[test]
    fn both_profiles_are_covered() {
        use crate::domain::ProfileType;
        let registry = MetricRegistry::builtin();
        assert!(registry.iter().any(|m| m.profile == ProfileType::Front));
        assert!(registry.iter().any(|m| m.profile == ProfileType::Side));
    }
}
