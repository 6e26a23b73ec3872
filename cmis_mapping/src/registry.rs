// src/registry.rs
//! Action evaluator registry
//!
//! Evaluators are registered per scope during initialization and never
//! change afterwards. Enumeration follows registration order, which callers
//! rely on to match the canonical schema order.

use crate::errors::{MappingError, MappingResult};
use crate::evaluators::ActionEvaluator;
use crate::object::CmisObject;
use cmis_model::logging::codes;
use cmis_model::{log_debug, log_error, Action, Scope};
use indexmap::IndexMap;
use std::time::SystemTime;

/// Scope-keyed, insertion-ordered evaluator table
pub struct ActionRegistry {
    evaluators: IndexMap<Scope, IndexMap<Action, Box<dyn ActionEvaluator>>>,
    metadata: RegistryMetadata,
}

#[derive(Debug, Clone)]
pub struct RegistryMetadata {
    pub total_evaluators: usize,
    pub creation_time: SystemTime,
    pub last_registration: Option<SystemTime>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            evaluators: IndexMap::new(),
            metadata: RegistryMetadata {
                total_evaluators: 0,
                creation_time: SystemTime::now(),
                last_registration: None,
            },
        }
    }

    /// Register `evaluator` for its action in `scope`
    pub fn register(&mut self, scope: Scope, evaluator: Box<dyn ActionEvaluator>) -> MappingResult<()> {
        let action = evaluator.action();
        let entries = self.evaluators.entry(scope).or_default();

        if entries.contains_key(&action) {
            log_error!(codes::registry::DUPLICATE_EVALUATOR, "Duplicate action evaluator",
                "scope" => scope, "action" => action);
            return Err(MappingError::DuplicateEvaluator { scope, action });
        }

        log_debug!(&format!(
            "Registered Action Evaluator: scope={}, evaluator={}",
            scope,
            evaluator.name()
        ));
        entries.insert(action, evaluator);

        self.metadata.total_evaluators += 1;
        self.metadata.last_registration = Some(SystemTime::now());
        Ok(())
    }

    /// Evaluators of `scope` in registration order
    pub fn evaluators(&self, scope: Scope) -> impl Iterator<Item = &dyn ActionEvaluator> {
        self.evaluators
            .get(&scope)
            .into_iter()
            .flat_map(|entries| entries.values().map(|e| e.as_ref()))
    }

    pub fn evaluator(&self, scope: Scope, action: Action) -> Option<&dyn ActionEvaluator> {
        self.evaluators
            .get(&scope)
            .and_then(|entries| entries.get(&action))
            .map(|e| e.as_ref())
    }

    pub fn actions(&self, scope: Scope) -> Vec<Action> {
        self.evaluators(scope).map(|e| e.action()).collect()
    }

    /// Allowed actions of `object`, in registration order
    pub fn allowable_actions(&self, scope: Scope, object: &CmisObject) -> Vec<Action> {
        self.evaluators(scope)
            .filter(|evaluator| evaluator.is_allowed(object))
            .map(|evaluator| evaluator.action())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.metadata.total_evaluators
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.total_evaluators == 0
    }

    pub fn metadata(&self) -> &RegistryMetadata {
        &self.metadata
    }

    pub fn statistics(&self) -> RegistryStatistics {
        let per_scope = self
            .evaluators
            .iter()
            .map(|(scope, entries)| (*scope, entries.len()))
            .collect();
        RegistryStatistics {
            total_evaluators: self.metadata.total_evaluators,
            per_scope,
            health: if self.is_empty() {
                RegistryHealth::Empty
            } else {
                RegistryHealth::Healthy
            },
        }
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("metadata", &self.metadata)
            .field("scopes", &self.evaluators.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// STATISTICS
// ============================================================================

#[derive(Debug, Clone)]
pub struct RegistryStatistics {
    pub total_evaluators: usize,
    pub per_scope: IndexMap<Scope, usize>,
    pub health: RegistryHealth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryHealth {
    Healthy,
    Empty,
}

impl RegistryHealth {
    pub fn is_healthy(self) -> bool {
        matches!(self, Self::Healthy)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Empty => "empty",
        }
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Chained registration; the first duplicate surfaces from `build`
pub struct ActionRegistryBuilder {
    registry: ActionRegistry,
    error: Option<MappingError>,
}

impl ActionRegistryBuilder {
    pub fn new() -> Self {
        Self {
            registry: ActionRegistry::new(),
            error: None,
        }
    }

    pub fn add(mut self, scope: Scope, evaluator: Box<dyn ActionEvaluator>) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.registry.register(scope, evaluator) {
                self.error = Some(e);
            }
        }
        self
    }

    pub fn build(self) -> MappingResult<ActionRegistry> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.registry),
        }
    }
}

impl Default for ActionRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
